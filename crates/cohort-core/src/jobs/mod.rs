//! Interview email jobs: upload a spreadsheet, start generation or sending,
//! then poll the backend until it reports the job finished.

pub mod errors;
pub mod policy;
mod workflow;

pub use errors::JobError;
pub use policy::{PollDecision, PollPolicy};
pub use workflow::{JobOutcome, JobPhase, JobWorkflow};
