use tracing::{error, info};

pub fn log_app_startup(command: &str, base_url: &str) {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        command = command,
        base_url = base_url
    );
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error
    );
}
