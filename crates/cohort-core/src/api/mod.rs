//! HTTP access to the dashboard backend.
//!
//! [`ApiClient`] talks to the real server; everything above it depends only
//! on the [`Backend`] trait so workflows can be driven by a fake in tests.

mod client;
pub mod errors;

use std::future::Future;

use cohort_protocol::{
    Candidate, DashboardMetrics, DeleteCandidateRequest, DeleteProgramRequest, JobStatus,
    MutationResponse, Program, StartJobRequest, StartJobResponse, UploadResponse,
};

use crate::uploads::UploadFile;

pub use client::ApiClient;
pub use errors::ApiError;

/// One method per backend endpoint. Each call is a single request with no
/// retry; callers decide what to do with failures.
pub trait Backend: Send + Sync {
    /// `GET /api/programs`
    fn list_programs(&self) -> impl Future<Output = Result<Vec<Program>, ApiError>> + Send;

    /// `GET /api/program/{name}`
    fn program_candidates(
        &self,
        program: &str,
    ) -> impl Future<Output = Result<Vec<Candidate>, ApiError>> + Send;

    /// `GET /api/candidates`
    fn list_candidates(&self) -> impl Future<Output = Result<Vec<Candidate>, ApiError>> + Send;

    /// `POST /api/candidates/delete`
    fn delete_candidate(
        &self,
        request: &DeleteCandidateRequest,
    ) -> impl Future<Output = Result<MutationResponse, ApiError>> + Send;

    /// `POST /api/programs/delete`
    fn delete_program(
        &self,
        request: &DeleteProgramRequest,
    ) -> impl Future<Output = Result<MutationResponse, ApiError>> + Send;

    /// `GET /api/dashboard/metrics`
    fn dashboard_metrics(&self) -> impl Future<Output = Result<DashboardMetrics, ApiError>> + Send;

    /// `POST /api/interview-emails/upload`
    fn upload_interview_file(
        &self,
        file: &UploadFile,
    ) -> impl Future<Output = Result<UploadResponse, ApiError>> + Send;

    /// `POST /api/interview-emails/start`
    fn start_interview_job(
        &self,
        request: &StartJobRequest,
    ) -> impl Future<Output = Result<StartJobResponse, ApiError>> + Send;

    /// `GET /api/interview-emails/status?job_id=`
    fn interview_job_status(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<JobStatus, ApiError>> + Send;

    /// `POST /upload-program`
    fn upload_program(
        &self,
        program_name: &str,
        file: &UploadFile,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET /api/interview-emails/logs`, returning the CSV text.
    fn download_email_logs(&self) -> impl Future<Output = Result<String, ApiError>> + Send;
}
