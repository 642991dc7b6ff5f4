//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.cohort/config.toml` (global user preferences)
//! 3. **Project config** - `./.cohort/config.toml` (project-specific overrides)
//! 4. **Environment** - `COHORT_API_URL`
//! 5. **CLI arguments** - Command-line flags (highest priority, applied by the caller)

use std::fs;
use std::path::Path;

use cohort_paths::CohortPaths;
use tracing::debug;

use crate::errors::ConfigError;
use crate::types::{ApiConfig, CohortConfig, DashboardConfig, JobsConfig};
use crate::validation::validate_config;

/// Environment variable overriding `[api] base_url`.
pub const API_URL_ENV: &str = "COHORT_API_URL";

/// Load configuration from the hierarchy of config files.
///
/// Missing config files are not errors; parse and validation failures are.
pub fn load_hierarchy() -> Result<CohortConfig, ConfigError> {
    let user_config = match CohortPaths::resolve() {
        Ok(paths) => Some(paths.user_config()),
        Err(e) => {
            debug!(event = "config.user_path_unavailable", error = %e);
            None
        }
    };
    let project_root = std::env::current_dir()?;
    load_hierarchy_from(user_config.as_deref(), Some(&project_root))
}

/// Load the hierarchy from explicit locations. Use in tests.
pub fn load_hierarchy_from(
    user_config: Option<&Path>,
    project_root: Option<&Path>,
) -> Result<CohortConfig, ConfigError> {
    let mut config = CohortConfig::default();

    if let Some(path) = user_config
        && let Some(user) = load_config_file(path)?
    {
        config = merge_configs(config, user);
    }

    if let Some(root) = project_root
        && let Some(project) = load_config_file(&CohortPaths::project_config(root))?
    {
        config = merge_configs(config, project);
    }

    apply_env_overrides(&mut config);

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file, returning `None` when it does not exist.
fn load_config_file(path: &Path) -> Result<Option<CohortConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::IoError {
                source: std::io::Error::new(e.kind(), format!("'{}': {}", path.display(), e)),
            });
        }
    };

    let config = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("'{}': {}", path.display(), e),
    })?;

    debug!(event = "config.file_loaded", path = %path.display());
    Ok(Some(config))
}

fn apply_env_overrides(config: &mut CohortConfig) {
    if let Ok(url) = std::env::var(API_URL_ENV) {
        let url = url.trim();
        if !url.is_empty() {
            config.api.base_url = Some(url.to_string());
        }
    }
}

/// Merge two configurations, with override_config taking precedence.
///
/// Optional fields in the override replace base values only if present.
pub fn merge_configs(base: CohortConfig, override_config: CohortConfig) -> CohortConfig {
    CohortConfig {
        api: ApiConfig::merge(&base.api, &override_config.api),
        jobs: JobsConfig::merge(&base.jobs, &override_config.jobs),
        dashboard: DashboardConfig::merge(&base.dashboard, &override_config.dashboard),
    }
}
