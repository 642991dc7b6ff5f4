//! Request and response bodies for the mutation endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/candidates/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCandidateRequest {
    pub candidate_id: String,
    pub program: String,
}

/// Body of `POST /api/programs/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProgramRequest {
    pub program_name: String,
}

/// Response of the delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error payload the backend attaches to failed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    /// Required columns the uploaded file lacked.
    #[serde(default)]
    pub missing: Vec<String>,
}

impl ErrorBody {
    /// Human-readable message including any missing columns.
    pub fn describe(&self) -> Option<String> {
        let error = self.error.as_deref()?;
        if self.missing.is_empty() {
            Some(error.to_string())
        } else {
            Some(format!("{}: {}", error, self.missing.join(", ")))
        }
    }
}
