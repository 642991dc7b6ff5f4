use std::error::Error;

/// Base trait for all application errors
pub trait CohortError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error was caused by user input rather than the system
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type CohortResult<T> = Result<T, Box<dyn CohortError>>;

impl CohortError for cohort_config::ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            cohort_config::ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            cohort_config::ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            cohort_config::ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            cohort_config::ConfigError::ConfigParseError { .. }
                | cohort_config::ConfigError::InvalidConfiguration { .. }
        )
    }
}

impl CohortError for cohort_paths::PathError {
    fn error_code(&self) -> &'static str {
        match self {
            cohort_paths::PathError::HomeNotFound => "HOME_NOT_FOUND",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohort_result() {
        let _result: CohortResult<i32> = Ok(42);
    }

    #[test]
    fn test_config_parse_error() {
        let error = cohort_config::ConfigError::ConfigParseError {
            message: "invalid TOML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse config file: invalid TOML syntax"
        );
        assert_eq!(error.error_code(), "CONFIG_PARSE_ERROR");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_config_io_error_is_not_user_error() {
        let error = cohort_config::ConfigError::IoError {
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(error.error_code(), "CONFIG_IO_ERROR");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_path_error_boxes_as_cohort_error() {
        let boxed: Box<dyn CohortError> = Box::new(cohort_paths::PathError::HomeNotFound);
        assert_eq!(boxed.error_code(), "HOME_NOT_FOUND");
        assert!(boxed.to_string().contains("$HOME"));
    }
}
