//! Configuration types.
//!
//! Every field is optional on disk so that user and project files can be
//! layered; accessor methods resolve the effective value with defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Flask's development server address, which the dashboard backend runs on.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_500;
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 3_000;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 30_000;
pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 10;
pub const DEFAULT_DASHBOARD_REFRESH_SECS: u64 = 30;

/// Top-level configuration, as read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// `[api]` section: where the backend lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Unset means requests never time out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            base_url: override_config
                .base_url
                .clone()
                .or_else(|| base.base_url.clone()),
            request_timeout_secs: override_config
                .request_timeout_secs
                .or(base.request_timeout_secs),
        }
    }
}

/// `[jobs]` section: email job status polling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsConfig {
    /// Delay before the next poll after a successful status fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
    /// Delay before the first retry after a failed status fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_interval_ms: Option<u64>,
    /// Ceiling for the exponential backoff between failed fetches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_backoff_ms: Option<u64>,
    /// Consecutive failed fetches after which polling is abandoned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consecutive_failures: Option<u32>,
}

impl JobsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS))
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms.unwrap_or(DEFAULT_RETRY_INTERVAL_MS))
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms.unwrap_or(DEFAULT_MAX_BACKOFF_MS))
    }

    pub fn max_consecutive_failures(&self) -> u32 {
        self.max_consecutive_failures
            .unwrap_or(DEFAULT_MAX_CONSECUTIVE_FAILURES)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            poll_interval_ms: override_config.poll_interval_ms.or(base.poll_interval_ms),
            retry_interval_ms: override_config.retry_interval_ms.or(base.retry_interval_ms),
            max_backoff_ms: override_config.max_backoff_ms.or(base.max_backoff_ms),
            max_consecutive_failures: override_config
                .max_consecutive_failures
                .or(base.max_consecutive_failures),
        }
    }
}

/// `[dashboard]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_secs: Option<u64>,
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(
            self.refresh_interval_secs
                .unwrap_or(DEFAULT_DASHBOARD_REFRESH_SECS),
        )
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            refresh_interval_secs: override_config
                .refresh_interval_secs
                .or(base.refresh_interval_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CohortConfig::default();
        assert_eq!(config.api.base_url(), "http://127.0.0.1:5000");
        assert_eq!(config.api.request_timeout(), None);
        assert_eq!(config.jobs.poll_interval(), Duration::from_millis(1500));
        assert_eq!(config.jobs.retry_interval(), Duration::from_secs(3));
        assert_eq!(config.jobs.max_backoff(), Duration::from_secs(30));
        assert_eq!(config.jobs.max_consecutive_failures(), 10);
        assert_eq!(config.dashboard.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: CohortConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://dash.example.org"

            [jobs]
            poll_interval_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url(), "https://dash.example.org");
        assert_eq!(config.jobs.poll_interval(), Duration::from_millis(500));
        // Untouched fields keep their defaults
        assert_eq!(config.jobs.retry_interval(), Duration::from_secs(3));
        assert_eq!(config.dashboard.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: CohortConfig = toml::from_str("").unwrap();
        assert_eq!(config, CohortConfig::default());
    }

    #[test]
    fn test_request_timeout_when_set() {
        let api = ApiConfig {
            base_url: None,
            request_timeout_secs: Some(12),
        };
        assert_eq!(api.request_timeout(), Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_jobs_merge_override_wins() {
        let base = JobsConfig {
            poll_interval_ms: Some(1000),
            retry_interval_ms: Some(2000),
            max_backoff_ms: None,
            max_consecutive_failures: Some(4),
        };
        let override_config = JobsConfig {
            poll_interval_ms: Some(250),
            ..JobsConfig::default()
        };
        let merged = JobsConfig::merge(&base, &override_config);
        assert_eq!(merged.poll_interval_ms, Some(250));
        assert_eq!(merged.retry_interval_ms, Some(2000));
        assert_eq!(merged.max_backoff_ms, None);
        assert_eq!(merged.max_consecutive_failures, Some(4));
    }
}
