use tracing_subscriber::EnvFilter;

/// Install the global JSON subscriber on stderr.
///
/// Quiet mode filters everything out unless `RUST_LOG` says otherwise;
/// verbose mode defaults to `info`. Calling this twice is harmless.
pub fn init_logging(quiet: bool) {
    let default_directive = if quiet { "off" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(false)
        .try_init();
}
