use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("home directory not found; set the $HOME environment variable")]
    HomeNotFound,
}

/// Centralized path construction for the `~/.cohort/` directory layout.
///
/// Use `resolve()` in production code and `from_dir()` in tests.
#[derive(Debug, Clone)]
pub struct CohortPaths {
    cohort_dir: PathBuf,
}

impl CohortPaths {
    /// Resolve paths from the user's home directory (`~/.cohort`).
    pub fn resolve() -> Result<Self, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeNotFound)?;
        Ok(Self {
            cohort_dir: home.join(".cohort"),
        })
    }

    /// Create paths from an explicit base directory. Use in tests.
    pub fn from_dir(cohort_dir: PathBuf) -> Self {
        Self { cohort_dir }
    }

    /// The base `~/.cohort` directory.
    pub fn cohort_dir(&self) -> &Path {
        &self.cohort_dir
    }

    pub fn user_config(&self) -> PathBuf {
        self.cohort_dir.join("config.toml")
    }

    /// Locally cached email template and signature drafts.
    pub fn drafts_file(&self) -> PathBuf {
        self.cohort_dir.join("drafts.toml")
    }

    // --- Static helpers (no self) ---

    /// Project-level config: `<project_root>/.cohort/config.toml`.
    pub fn project_config(project_root: &Path) -> PathBuf {
        project_root.join(".cohort").join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_paths() -> CohortPaths {
        CohortPaths::from_dir(PathBuf::from("/home/user/.cohort"))
    }

    #[test]
    fn test_resolve_returns_ok_when_home_set() {
        // HOME is set in CI and dev environments
        let result = CohortPaths::resolve();
        assert!(result.is_ok());
        let paths = result.unwrap();
        assert!(paths.cohort_dir().to_string_lossy().contains(".cohort"));
    }

    #[test]
    fn test_from_dir() {
        let paths = CohortPaths::from_dir(PathBuf::from("/tmp/test-cohort"));
        assert_eq!(paths.cohort_dir(), Path::new("/tmp/test-cohort"));
    }

    #[test]
    fn test_user_config() {
        assert_eq!(
            test_paths().user_config(),
            PathBuf::from("/home/user/.cohort/config.toml")
        );
    }

    #[test]
    fn test_drafts_file() {
        assert_eq!(
            test_paths().drafts_file(),
            PathBuf::from("/home/user/.cohort/drafts.toml")
        );
    }

    #[test]
    fn test_project_config() {
        assert_eq!(
            CohortPaths::project_config(Path::new("/work/dashboard")),
            PathBuf::from("/work/dashboard/.cohort/config.toml")
        );
    }

    #[test]
    fn test_path_error_message_mentions_home() {
        assert!(PathError::HomeNotFound.to_string().contains("$HOME"));
    }
}
