use tracing_subscriber::EnvFilter;

/// Initialize stderr logging for the hub with the given filter directive.
///
/// An invalid directive falls back to `warn`. Later calls leave the first
/// subscriber in place.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true)
        .try_init();
}
