//! Wire types for the recruitment dashboard backend.
//!
//! Everything here mirrors the JSON the backend sends or accepts. The backend
//! owns these entities; the client only displays them and issues mutations.

pub mod jobs;
pub mod messages;
pub mod types;

pub use jobs::{
    Generated, JobMode, JobStatus, PreviewRow, RowState, RowStatus, StartJobRequest,
    StartJobResponse, UploadResponse,
};
pub use messages::{DeleteCandidateRequest, DeleteProgramRequest, ErrorBody, MutationResponse};
pub use types::{Candidate, DashboardMetrics, Program, RaceGenderEntry, columns};
