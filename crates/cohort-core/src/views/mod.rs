//! Pure transforms from backend payloads to view models. No I/O.

pub mod candidates;
pub mod dashboard;
pub mod format;
pub mod jobs;
pub mod programs;

pub use candidates::{CandidateRow, CandidatesView, render_candidates, render_program_detail};
pub use dashboard::{
    CardStatus, ChartPoint, ChartSeries, DashboardSummary, DashboardView, MetricCard,
    RaceGenderRow, card_status, render_dashboard,
};
pub use format::{format_percent, truncate_label};
pub use jobs::{
    JobProgressView, JobRowView, UploadPreviewView, progress_percent, render_job_progress,
    render_upload_preview,
};
pub use programs::{ProgramRow, ProgramsView, TargetIndicator, render_programs};
