//! cohort-core: Core library for the recruitment dashboard client
//!
//! Talks to the dashboard backend, turns its payloads into view models and
//! drives the interview email jobs. It is used by the `cohort` CLI.
//!
//! # Main Entry Points
//!
//! - [`api`] - HTTP client and the [`Backend`] trait
//! - [`views`] - Pure payload-to-view-model renderers
//! - [`pages`] - Page controllers, including confirm-then-delete
//! - [`jobs`] - Interview email upload, start and polling
//! - [`drafts`] - Locally cached email template drafts

pub mod api;
pub mod drafts;
pub mod errors;
pub mod events;
pub mod jobs;
pub mod logging;
pub mod pages;
pub mod uploads;
pub mod views;

pub use api::{ApiClient, ApiError, Backend};
pub use cohort_config::{CohortConfig, ConfigError, TargetPolicy};
pub use drafts::{Draft, DraftError, DraftStore};
pub use errors::{CohortError, CohortResult};
pub use jobs::{JobError, JobOutcome, JobPhase, JobWorkflow, PollPolicy};
pub use pages::{
    AutoConfirm, CandidatesPage, Confirm, DashboardPage, DeleteError, DeleteOutcome, Notice,
    Notifier, ProgramsPage,
};
pub use uploads::{UploadError, UploadFile};

// Re-export logging initialization
pub use logging::init_logging;
