//! Integration tests for echo contexts shared across threads.
//!
//! Section indices must stay unique under concurrent allocation and lines
//! written by different threads must never interleave.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use echo::Echo;
use test_support::{SharedBuffer, parse_message_line};

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

#[test]
fn concurrent_section_indices_are_distinct_and_increasing_per_thread() {
    let echo = Arc::new(Echo::with_writer(Vec::<u8>::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let echo = Arc::clone(&echo);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|i| echo.section(format!("work {i}")).index())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        let indices = handle.join().expect("worker thread completes");
        assert!(
            indices.windows(2).all(|pair| pair[0] < pair[1]),
            "indices from one thread must increase"
        );
        for index in indices {
            assert!(seen.insert(index), "index {index} handed out twice");
        }
    }

    assert_eq!(seen.len(), THREADS * PER_THREAD);
    assert_eq!(seen.iter().min(), Some(&1));
    assert_eq!(seen.iter().max(), Some(&((THREADS * PER_THREAD) as u64)));
}

#[test]
fn concurrent_lines_are_never_torn() {
    let buffer = SharedBuffer::new();
    let echo = Arc::new(Echo::with_writer(buffer.clone()));
    echo.set_verbose(true);
    echo.set_label("mt");

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let echo = Arc::clone(&echo);
            thread::spawn(move || {
                for step in 0..PER_THREAD {
                    echo.echo(&format!("worker {worker} step {step}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread completes");
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    let mut last_step = vec![None; THREADS];
    for line in &lines {
        let parsed = parse_message_line(line).expect("every line is well formed");
        assert_eq!(parsed.label, "mt");

        let mut words = parsed.message.split(' ');
        assert_eq!(words.next(), Some("worker"));
        let worker: usize = words.next().and_then(|w| w.parse().ok()).expect("worker id");
        assert_eq!(words.next(), Some("step"));
        let step: usize = words.next().and_then(|w| w.parse().ok()).expect("step");

        if let Some(previous) = last_step[worker] {
            assert!(step > previous, "lines from one worker keep program order");
        }
        last_step[worker] = Some(step);
    }
}

#[test]
fn verbosity_toggle_is_visible_across_threads() {
    let buffer = SharedBuffer::new();
    let echo = Arc::new(Echo::with_writer(buffer.clone()));

    let writer = Arc::clone(&echo);
    thread::spawn(move || writer.set_verbose(true))
        .join()
        .expect("toggle thread completes");

    assert!(echo.is_verbose());
    echo.echo("after toggle");
    assert_eq!(buffer.lines().len(), 1);
}

#[test]
fn elapsed_times_never_decrease_for_one_caller() {
    let buffer = SharedBuffer::new();
    let echo = Echo::with_writer(buffer.clone());
    echo.set_verbose(true);

    for i in 0..50 {
        echo.echo_value("tick", i);
    }

    let elapsed: Vec<u128> = buffer
        .lines()
        .iter()
        .map(|line| parse_message_line(line).expect("message format").elapsed_ms)
        .collect();
    assert!(elapsed.windows(2).all(|pair| pair[0] <= pair[1]));
}
