use crate::api::ApiError;
use crate::errors::CohortError;

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("No interview email job: upload a file first or pass a job id")]
    NoJob,

    #[error("Email job request failed: {source}")]
    Api {
        #[from]
        source: ApiError,
    },
}

impl CohortError for JobError {
    fn error_code(&self) -> &'static str {
        match self {
            JobError::NoJob => "JOB_NOT_STARTED",
            JobError::Api { .. } => "JOB_API_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            JobError::NoJob => true,
            JobError::Api { source } => source.is_user_error(),
        }
    }
}
