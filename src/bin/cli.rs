use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use echo::{Abort, DEFAULT_ABORT_EXIT_CODE, DEFAULT_LABEL, Echo, EchoConfig, EchoLayer};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

/// Environment variable holding the `EnvFilter` directives for bridged tracing events.
pub const LOG_ENV: &str = "BRACT_LOG";

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("bract-echo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print verbosity-gated, timestamped diagnostic lines to stderr.")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Write messages and section lines (abort lines are always written).")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("label")
                .long("label")
                .value_name("TOKEN")
                .help("Label token prefixing every line.")
                .default_value(DEFAULT_LABEL),
        )
        .arg(
            Arg::new("section")
                .long("section")
                .value_name("DESC")
                .help("Wrap the messages in a section; repeat to nest.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("abort")
                .long("abort")
                .value_name("MSG")
                .help("Write an abort line after everything else and exit non-zero."),
        )
        .arg(
            Arg::new("exit-code")
                .long("exit-code")
                .value_name("N")
                .help("Non-zero exit status used by --abort (default 1).")
                .value_parser(value_parser!(u8).range(1..))
                .requires("abort"),
        )
        .arg(
            Arg::new("messages")
                .value_name("MESSAGE")
                .help("Messages to echo, one line each.")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

/// Parses `args`, echoes the requested lines into `stderr`, and maps the
/// outcome to a process exit status.
///
/// Help and version output go to `stdout`. Usage errors are rendered to
/// `stderr` with status 2. An `--abort` run exits with its abort status after
/// the abort line has been written.
pub fn run_with<I, Out, E>(args: I, stdout: &mut Out, mut stderr: E) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    Out: Write,
    E: Write + Send + 'static,
{
    let matches = match clap_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(error) => return report_usage(&error, stdout, &mut stderr),
    };

    let label = matches
        .get_one::<String>("label")
        .map_or(DEFAULT_LABEL, String::as_str);
    let config = EchoConfig::default()
        .with_verbose(matches.get_flag("verbose"))
        .with_label(label);
    let echo = Arc::new(Echo::with_config(stderr, &config));

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(EchoLayer::new(Arc::clone(&echo)));
    let outcome = tracing::subscriber::with_default(subscriber, || run(&echo, &matches));

    echo.flush();
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(abort) => abort.into(),
    }
}

fn run<W>(echo: &Echo<W>, matches: &ArgMatches) -> Result<(), Abort>
where
    W: Write,
{
    let descriptions: Vec<&String> = matches
        .get_many::<String>("section")
        .into_iter()
        .flatten()
        .collect();
    let messages: Vec<&String> = matches
        .get_many::<String>("messages")
        .into_iter()
        .flatten()
        .collect();
    tracing::debug!(
        target: "bract::cli",
        sections = descriptions.len(),
        messages = messages.len(),
        "echo run starting"
    );

    let mut open = Vec::with_capacity(descriptions.len());
    for description in descriptions {
        open.push(echo.scoped_section(description.as_str()));
    }
    for message in messages {
        echo.echo(message);
    }
    // innermost section closes first
    while let Some(section) = open.pop() {
        drop(section);
    }

    if let Some(message) = matches.get_one::<String>("abort") {
        let exit_code = matches
            .get_one::<u8>("exit-code")
            .copied()
            .unwrap_or(DEFAULT_ABORT_EXIT_CODE);
        tracing::debug!(target: "bract::cli", exit_code, "aborting");
        return Err(echo.abort_with_code(message.as_str(), exit_code));
    }

    Ok(())
}

fn report_usage<Out, E>(error: &clap::Error, stdout: &mut Out, stderr: &mut E) -> ExitCode
where
    Out: Write,
    E: Write,
{
    let rendered = error.render().to_string();
    let target: &mut dyn Write = if error.use_stderr() { stderr } else { stdout };
    // nowhere left to report a failure to print usage
    let _ = target
        .write_all(rendered.as_bytes())
        .and_then(|()| target.flush());

    ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(2))
}
