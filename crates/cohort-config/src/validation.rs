//! Configuration validation logic.

use crate::errors::ConfigError;
use crate::types::CohortConfig;

/// Validate a CohortConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `api.base_url` must be an `http://` or `https://` URL
/// - poll and retry intervals, the dashboard refresh interval, and the
///   failure limit must be non-zero
/// - `jobs.max_backoff_ms` must not be smaller than `jobs.retry_interval_ms`
pub fn validate_config(config: &CohortConfig) -> Result<(), ConfigError> {
    let base_url = config.api.base_url();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "Invalid api.base_url '{}': must start with http:// or https://",
                base_url
            ),
        });
    }

    if config.api.request_timeout_secs == Some(0) {
        return Err(invalid("api.request_timeout_secs must be greater than 0"));
    }

    let jobs = &config.jobs;
    if jobs.poll_interval().is_zero() {
        return Err(invalid("jobs.poll_interval_ms must be greater than 0"));
    }
    if jobs.retry_interval().is_zero() {
        return Err(invalid("jobs.retry_interval_ms must be greater than 0"));
    }
    if jobs.max_consecutive_failures() == 0 {
        return Err(invalid("jobs.max_consecutive_failures must be greater than 0"));
    }
    if jobs.max_backoff() < jobs.retry_interval() {
        return Err(invalid(
            "jobs.max_backoff_ms must be greater than or equal to jobs.retry_interval_ms",
        ));
    }

    if config.dashboard.refresh_interval().is_zero() {
        return Err(invalid("dashboard.refresh_interval_secs must be greater than 0"));
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidConfiguration {
        message: message.to_string(),
    }
}
