//! # cohort-config
//!
//! TOML configuration types, loading, validation, and the demographic target
//! policy for cohort.
//!
//! Depends only on `cohort-paths`.

mod loading;
mod validation;

pub mod errors;
pub mod policy;
pub mod types;

// Public API re-exports
pub use errors::ConfigError;
pub use loading::{API_URL_ENV, load_hierarchy, load_hierarchy_from, merge_configs};
pub use policy::TargetPolicy;
pub use types::{ApiConfig, CohortConfig, DashboardConfig, JobsConfig};
pub use validation::validate_config;

impl CohortConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}
