use tracing_subscriber::{EnvFilter, fmt};

/// Initialise the tracing subscriber.
///
/// The level is taken from `RUST_LOG` and defaults to `warn`, e.g.
/// - RUST_LOG=debug runreport run
/// - RUST_LOG=runreport=trace runreport latest
///
/// Logs go to stderr; stdout belongs to the operator console.
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::debug!("Logger initialized");
}
