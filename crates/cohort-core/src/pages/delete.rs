//! Confirm-then-submit deletion of candidates and programmes.

use cohort_protocol::{DeleteCandidateRequest, DeleteProgramRequest};
use tracing::{info, warn};

use crate::api::{ApiError, Backend};
use crate::errors::CohortError;

/// What is being deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Candidate {
        candidate_id: String,
        program: String,
    },
    Program {
        name: String,
    },
}

impl DeleteTarget {
    pub fn candidate(candidate_id: impl Into<String>, program: impl Into<String>) -> Self {
        DeleteTarget::Candidate {
            candidate_id: candidate_id.into(),
            program: program.into(),
        }
    }

    pub fn program(name: impl Into<String>) -> Self {
        DeleteTarget::Program { name: name.into() }
    }

    /// Question put to the user before anything is sent.
    pub fn prompt(&self) -> String {
        match self {
            DeleteTarget::Candidate {
                candidate_id,
                program,
            } => format!(
                "Delete candidate {} from program '{}'? This cannot be undone.",
                candidate_id, program
            ),
            DeleteTarget::Program { name } => format!(
                "Delete program '{}' and all of its candidates? This cannot be undone.",
                name
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeletePhase {
    #[default]
    Idle,
    Confirming(DeleteTarget),
    Submitting(DeleteTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent.
    Declined,
    /// The server removed the record. Carries its message, if any.
    Deleted { message: Option<String> },
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("Delete failed: {source}")]
    Failed {
        #[from]
        source: ApiError,
    },
}

impl CohortError for DeleteError {
    fn error_code(&self) -> &'static str {
        match self {
            DeleteError::Failed { .. } => "DELETE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            DeleteError::Failed { source } => source.is_user_error(),
        }
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Fixed answer, for `--yes` and tests.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Receives user-facing messages from page workflows.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Collects notices in memory.
#[derive(Debug, Default)]
pub struct NoticeLog {
    pub notices: Vec<Notice>,
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Drives one deletion at a time through
/// `Idle -> Confirming -> Submitting -> Idle`.
#[derive(Debug, Default)]
pub struct DeleteWorkflow {
    phase: DeletePhase,
}

impl DeleteWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DeletePhase {
        &self.phase
    }

    /// Confirm, then submit. On failure the user is notified and the phase
    /// returns to `Idle`; refreshing dependent views is the caller's job.
    pub async fn run<B, C, N>(
        &mut self,
        backend: &B,
        target: DeleteTarget,
        confirm: &mut C,
        notifier: &mut N,
    ) -> Result<DeleteOutcome, DeleteError>
    where
        B: Backend,
        C: Confirm + ?Sized,
        N: Notifier + ?Sized,
    {
        self.phase = DeletePhase::Confirming(target.clone());
        if !confirm.confirm(&target.prompt()) {
            info!(event = "core.delete.declined", target = ?target);
            self.phase = DeletePhase::Idle;
            return Ok(DeleteOutcome::Declined);
        }

        self.phase = DeletePhase::Submitting(target.clone());
        info!(event = "core.delete.submit_started", target = ?target);

        let result = match &target {
            DeleteTarget::Candidate {
                candidate_id,
                program,
            } => {
                backend
                    .delete_candidate(&DeleteCandidateRequest {
                        candidate_id: candidate_id.clone(),
                        program: program.clone(),
                    })
                    .await
            }
            DeleteTarget::Program { name } => {
                backend
                    .delete_program(&DeleteProgramRequest {
                        program_name: name.clone(),
                    })
                    .await
            }
        };
        self.phase = DeletePhase::Idle;

        match result {
            Ok(response) => {
                info!(event = "core.delete.submit_completed", target = ?target);
                Ok(DeleteOutcome::Deleted {
                    message: response.message,
                })
            }
            Err(e) => {
                warn!(event = "core.delete.submit_failed", target = ?target, error = %e);
                let error = DeleteError::from(e);
                notifier.notify(Notice::Error(error.to_string()));
                Err(error)
            }
        }
    }
}
