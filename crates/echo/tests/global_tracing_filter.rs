//! Installs the echo bridge behind an `EnvFilter` as the global subscriber.

use std::sync::Arc;

use echo::{Echo, init_tracing_with_filter};
use test_support::{SharedBuffer, parse_message_line};
use tracing_subscriber::EnvFilter;

#[test]
fn filter_decides_which_events_reach_echo() {
    let buffer = SharedBuffer::new();
    let echo = Arc::new(Echo::with_writer(buffer.clone()));
    echo.set_verbose(true);
    init_tracing_with_filter(Arc::clone(&echo), EnvFilter::new("app=info"));

    tracing::info!(target: "app::load", "kept");
    tracing::debug!(target: "app::load", "too detailed");
    tracing::info!(target: "other", "filtered out");

    let messages: Vec<String> = buffer
        .lines()
        .iter()
        .map(|line| parse_message_line(line).expect("message format").message)
        .collect();
    assert_eq!(messages, vec!["kept"]);
}
