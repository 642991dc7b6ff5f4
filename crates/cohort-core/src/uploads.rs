//! Spreadsheet uploads: local validation and file loading.
//!
//! The backend repeats these checks, but a programme upload reports its
//! failures only through an HTML redirect, so rejecting bad input here gives
//! the user a readable error.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::CohortError;

/// Spreadsheet extensions the backend can parse.
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["csv", "xlsx"];

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Program name is required")]
    EmptyProgramName,

    #[error(
        "Program name '{name}' contains invalid characters (letters, digits, underscores and spaces only)"
    )]
    InvalidProgramName { name: String },

    #[error("Only .csv and .xlsx files are allowed, got '{file_name}'")]
    UnsupportedExtension { file_name: String },

    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CohortError for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            UploadError::EmptyProgramName => "UPLOAD_EMPTY_PROGRAM_NAME",
            UploadError::InvalidProgramName { .. } => "UPLOAD_INVALID_PROGRAM_NAME",
            UploadError::UnsupportedExtension { .. } => "UPLOAD_UNSUPPORTED_EXTENSION",
            UploadError::ReadFailed { .. } => "UPLOAD_READ_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

/// Check a programme name and return it trimmed.
///
/// Accepts ASCII letters, digits, underscores and whitespace.
pub fn validate_program_name(name: &str) -> Result<&str, UploadError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(UploadError::EmptyProgramName);
    }
    let valid = trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace());
    if !valid {
        return Err(UploadError::InvalidProgramName {
            name: trimmed.to_string(),
        });
    }
    Ok(trimmed)
}

/// Check that a file name ends in `.csv` or `.xlsx`, ignoring case.
pub fn validate_upload_extension(file_name: &str) -> Result<(), UploadError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(UploadError::UnsupportedExtension {
            file_name: file_name.to_string(),
        }),
    }
}

/// A spreadsheet read into memory, ready for a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        validate_upload_extension(&file_name)?;
        Ok(Self { file_name, bytes })
    }

    /// Read `path` after checking its extension.
    pub async fn from_path(path: &Path) -> Result<Self, UploadError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        validate_upload_extension(&file_name)?;

        let bytes = tokio::fs::read(path).await.map_err(|source| {
            warn!(
                event = "core.upload.read_failed",
                path = %path.display(),
                error = %source
            );
            UploadError::ReadFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        debug!(
            event = "core.upload.file_loaded",
            file_name = %file_name,
            bytes = bytes.len()
        );

        Ok(Self { file_name, bytes })
    }

    /// Content type sent with the multipart part.
    pub fn mime_type(&self) -> &'static str {
        if self.file_name.to_ascii_lowercase().ends_with(".csv") {
            "text/csv"
        } else {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_accepts_words_and_underscores() {
        assert_eq!(validate_program_name("  Data Science_2024 ").unwrap(), "Data Science_2024");
    }

    #[test]
    fn test_program_name_rejects_punctuation() {
        let err = validate_program_name("Alpha/Beta").unwrap_err();
        assert_eq!(err.error_code(), "UPLOAD_INVALID_PROGRAM_NAME");
        assert!(err.to_string().contains("Alpha/Beta"));
    }

    #[test]
    fn test_program_name_rejects_non_ascii_letters() {
        assert!(validate_program_name("Café").is_err());
    }

    #[test]
    fn test_program_name_rejects_blank() {
        assert!(matches!(
            validate_program_name("   "),
            Err(UploadError::EmptyProgramName)
        ));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(validate_upload_extension("cohort.CSV").is_ok());
        assert!(validate_upload_extension("cohort.xlsx").is_ok());
    }

    #[test]
    fn test_extension_rejects_other_formats() {
        assert!(validate_upload_extension("cohort.xls").is_err());
        assert!(validate_upload_extension("cohort").is_err());
        assert!(validate_upload_extension("csv").is_err());
    }

    #[test]
    fn test_mime_type_follows_extension() {
        let csv = UploadFile::new("a.csv", vec![]).unwrap();
        let xlsx = UploadFile::new("a.XLSX", vec![]).unwrap();
        assert_eq!(csv.mime_type(), "text/csv");
        assert!(xlsx.mime_type().contains("spreadsheetml"));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("outcomes.csv");
        std::fs::write(&path, "Name,Email\nA,a@x.org\n").unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "outcomes.csv");
        assert!(file.bytes.starts_with(b"Name,Email"));
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = UploadFile::from_path(&dir.path().join("nope.csv"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UPLOAD_READ_FAILED");
    }
}
