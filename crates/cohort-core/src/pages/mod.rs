//! Page controllers.
//!
//! Each page owns its backend handle and its current view model, and
//! publishes every rebuilt view through a `watch` channel. Presentation code
//! subscribes instead of holding its own copy.

mod candidates;
mod dashboard;
pub mod delete;
mod programs;

pub use candidates::CandidatesPage;
pub use dashboard::DashboardPage;
pub use delete::{
    AutoConfirm, Confirm, DeleteError, DeleteOutcome, DeletePhase, DeleteTarget, DeleteWorkflow,
    Notice, NoticeLog, Notifier,
};
pub use programs::ProgramsPage;
