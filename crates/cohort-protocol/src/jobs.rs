//! Interview email job wire types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A standardised row of an uploaded interview spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub index: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub decision: String,
    #[serde(default)]
    pub feedback: String,
}

/// Response of `POST /api/interview-emails/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub job_id: String,
    #[serde(default)]
    pub preview_rows: Vec<PreviewRow>,
}

/// Whether a started job sends emails or only generates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobMode {
    /// Generate and send.
    Generate,
    /// Generate without sending.
    PreviewOnly,
}

impl JobMode {
    pub fn send(self) -> bool {
        matches!(self, JobMode::Generate)
    }

    pub fn preview_only(self) -> bool {
        matches!(self, JobMode::PreviewOnly)
    }
}

impl std::fmt::Display for JobMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobMode::Generate => write!(f, "generate"),
            JobMode::PreviewOnly => write!(f, "preview-only"),
        }
    }
}

/// Body of `POST /api/interview-emails/start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartJobRequest {
    pub job_id: String,
    pub send: bool,
    pub preview_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_decisions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_template: Option<String>,
}

impl StartJobRequest {
    pub fn new(job_id: impl Into<String>, mode: JobMode) -> Self {
        Self {
            job_id: job_id.into(),
            send: mode.send(),
            preview_only: mode.preview_only(),
            filter_decisions: None,
            html_template: None,
        }
    }

    /// Restrict processing to rows whose decision is in `decisions`.
    ///
    /// An empty list means no filter; the backend treats `[]` the same way.
    pub fn with_filter(mut self, decisions: Vec<String>) -> Self {
        self.filter_decisions = if decisions.is_empty() {
            None
        } else {
            Some(decisions)
        };
        self
    }

    pub fn with_template(mut self, template: Option<String>) -> Self {
        self.html_template = template;
        self
    }
}

/// Response of `POST /api/interview-emails/start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartJobResponse {
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Processing state of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RowState {
    Pending,
    Skipped,
    Generated,
    Sent,
    Failed,
    /// A state this client does not know, kept verbatim.
    Other(String),
}

impl RowState {
    /// Whether the backend is done with this row.
    pub fn is_settled(&self) -> bool {
        !matches!(self, RowState::Pending)
    }
}

impl From<String> for RowState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => RowState::Pending,
            "skipped" => RowState::Skipped,
            "generated" => RowState::Generated,
            "sent" => RowState::Sent,
            "failed" => RowState::Failed,
            _ => RowState::Other(value),
        }
    }
}

impl From<RowState> for String {
    fn from(value: RowState) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for RowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowState::Pending => write!(f, "pending"),
            RowState::Skipped => write!(f, "skipped"),
            RowState::Generated => write!(f, "generated"),
            RowState::Sent => write!(f, "sent"),
            RowState::Failed => write!(f, "failed"),
            RowState::Other(s) => write!(f, "{}", s),
        }
    }
}

/// The `generated` field of a row: a flag, or the generated email body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Generated {
    Flag(bool),
    Text(String),
}

impl Generated {
    pub fn is_generated(&self) -> bool {
        match self {
            Generated::Flag(flag) => *flag,
            Generated::Text(text) => !text.is_empty(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Generated::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Per-row status inside a [`JobStatus`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<Generated>,
    pub status: RowState,
    #[serde(default)]
    pub message: String,
}

impl RowStatus {
    pub fn is_generated(&self) -> bool {
        self.generated.as_ref().is_some_and(Generated::is_generated)
    }
}

/// Response of `GET /api/interview-emails/status?job_id=`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub succeeded: u64,
    #[serde(default)]
    pub failed: u64,
    /// Keyed by the row index as a decimal string.
    #[serde(default)]
    pub rows: BTreeMap<String, RowStatus>,
    #[serde(default)]
    pub finished: bool,
    /// Set when the job could not run at all (e.g. its saved file vanished).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
