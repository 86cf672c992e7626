//! Diagnostic logging for the CLI.
//!
//! Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
//! overrides the level picked from `--verbose`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "brickyard=debug,warn"
    } else {
        "brickyard=warn"
    }
}

pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
