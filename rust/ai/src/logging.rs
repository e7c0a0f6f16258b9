use tracing_subscriber::EnvFilter;

/// Environment variable holding the agent's log filter.
pub const LOG_ENV: &str = "CLUBBER_LOG";

const DEFAULT_FILTER: &str = "info";

/// Initialize stderr logging for the agent process.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
