//! Local cache of the email template and signature being drafted.
//!
//! Stored as TOML at `~/.cohort/drafts.toml`. Loading never fails: a missing
//! or unreadable file yields an empty draft.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use cohort_paths::CohortPaths;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::CohortError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.template.is_none() && self.signature.is_none()
    }

    /// Template with the signature appended, as sent to the backend.
    pub fn html_template(&self) -> Option<String> {
        let template = self.template.as_deref()?;
        match self.signature.as_deref() {
            Some(signature) if !signature.trim().is_empty() => {
                Some(format!("{}\n{}", template, signature))
            }
            _ => Some(template.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("Failed to serialize draft: {message}")]
    SerializeFailed { message: String },

    #[error("Failed to write draft to '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CohortError for DraftError {
    fn error_code(&self) -> &'static str {
        match self {
            DraftError::SerializeFailed { .. } => "DRAFT_SERIALIZE_FAILED",
            DraftError::WriteFailed { .. } => "DRAFT_WRITE_FAILED",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(paths: &CohortPaths) -> Self {
        Self::from_path(paths.drafts_file())
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Draft {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Draft::default(),
            Err(e) => {
                warn!(
                    event = "core.drafts.read_failed",
                    path = %self.path.display(),
                    error = %e
                );
                return Draft::default();
            }
        };

        toml::from_str(&content).unwrap_or_else(|e| {
            warn!(
                event = "core.drafts.parse_failed",
                path = %self.path.display(),
                error = %e
            );
            Draft::default()
        })
    }

    /// Write `draft`, stamping `updated_at`.
    pub fn save(&self, draft: &Draft) -> Result<Draft, DraftError> {
        let stamped = Draft {
            updated_at: Some(Utc::now()),
            ..draft.clone()
        };
        let content =
            toml::to_string_pretty(&stamped).map_err(|e| DraftError::SerializeFailed {
                message: e.to_string(),
            })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.write_failed(source))?;
        }

        let temp_file = self.path.with_extension("toml.tmp");
        if let Err(e) = fs::write(&temp_file, &content) {
            let _ = fs::remove_file(&temp_file);
            return Err(self.write_failed(e));
        }
        if let Err(e) = fs::rename(&temp_file, &self.path) {
            let _ = fs::remove_file(&temp_file);
            return Err(self.write_failed(e));
        }

        info!(event = "core.drafts.saved", path = %self.path.display());
        Ok(stamped)
    }

    pub fn clear(&self) -> Result<(), DraftError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(event = "core.drafts.cleared", path = %self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.write_failed(e)),
        }
    }

    fn write_failed(&self, source: std::io::Error) -> DraftError {
        warn!(
            event = "core.drafts.write_failed",
            path = %self.path.display(),
            error = %source
        );
        DraftError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }
}
