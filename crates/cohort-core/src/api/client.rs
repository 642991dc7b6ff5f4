use std::time::Duration;

use cohort_config::ApiConfig;
use cohort_protocol::{
    Candidate, DashboardMetrics, DeleteCandidateRequest, DeleteProgramRequest, ErrorBody,
    JobStatus, MutationResponse, Program, StartJobRequest, StartJobResponse, UploadResponse,
};
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::{ApiError, Backend};
use crate::uploads::UploadFile;

/// Path the backend redirects to when it refuses a programme upload.
const UPLOAD_PAGE_PATH: &str = "/upload";

/// reqwest-backed [`Backend`].
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::with_base_url(config.base_url(), config.request_timeout())
    }

    /// Build a client for `base_url`. `timeout` of `None` waits indefinitely.
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "URL cannot carry a path".to_string(),
            });
        }

        let mut builder =
            reqwest::Client::builder().user_agent(concat!("cohort/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ApiError::Transport {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        debug!(
            event = "core.api.client_created",
            base_url = %parsed,
            timeout_secs = timeout.map(|t| t.as_secs())
        );

        Ok(Self {
            base_url: parsed,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(event = "core.api.request_started", method = "GET", url = %url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;
        let body = read_success_body(&url, response).await?;
        decode(&url, &body)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = self.post_for_body(&url, body).await?;
        decode(&url, &body)
    }

    async fn post_for_body<B: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: &B,
    ) -> Result<String, ApiError> {
        debug!(event = "core.api.request_started", method = "POST", url = %url);
        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;
        read_success_body(url, response).await
    }

    async fn post_mutation<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<MutationResponse, ApiError> {
        let response: MutationResponse = self.post_json(url.clone(), body).await?;
        if let Some(error) = &response.error {
            warn!(event = "core.api.mutation_rejected", url = %url, error = %error);
            return Err(ApiError::Rejected {
                message: error.clone(),
            });
        }
        if !response.success {
            let message = response
                .message
                .clone()
                .unwrap_or_else(|| "the server did not confirm the change".to_string());
            warn!(event = "core.api.mutation_rejected", url = %url, error = %message);
            return Err(ApiError::Rejected { message });
        }
        Ok(response)
    }
}

fn transport_error(url: &Url, error: &reqwest::Error) -> ApiError {
    warn!(event = "core.api.transport_failed", url = %url, error = %error);
    ApiError::Transport {
        url: url.to_string(),
        message: error.to_string(),
    }
}

/// Read the body, turning any non-2xx status into [`ApiError::Status`].
async fn read_success_body(url: &Url, response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(url, &e))?;

    if !status.is_success() {
        let message = error_message(&body, status.canonical_reason());
        warn!(
            event = "core.api.request_failed",
            url = %url,
            status = status.as_u16(),
            message = %message
        );
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    debug!(
        event = "core.api.request_completed",
        url = %url,
        status = status.as_u16(),
        bytes = body.len()
    );
    Ok(body)
}

/// The JSON `error` field when present, else the raw body.
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && let Some(message) = parsed.describe()
    {
        return message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("empty response").to_string()
    } else {
        trimmed.to_string()
    }
}

/// Job endpoints report failures as a 2xx body with an `error` field.
fn reject_embedded_error(url: &Url, body: &str) -> Result<(), ApiError> {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return Ok(());
    };
    match parsed.describe() {
        Some(message) => {
            warn!(event = "core.api.request_rejected", url = %url, error = %message);
            Err(ApiError::Rejected { message })
        }
        None => Ok(()),
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(event = "core.api.decode_failed", url = %url, error = %e);
        ApiError::Decode {
            message: format!("{} ({})", e, url.path()),
        }
    })
}

fn file_part(file: &UploadFile, url: &Url) -> Result<Part, ApiError> {
    Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(file.mime_type())
        .map_err(|e| ApiError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
}

impl Backend for ApiClient {
    async fn list_programs(&self) -> Result<Vec<Program>, ApiError> {
        let programs: Vec<Program> = self.get_json(self.endpoint(&["api", "programs"])?).await?;
        info!(event = "core.api.programs_fetched", count = programs.len());
        Ok(programs)
    }

    async fn program_candidates(&self, program: &str) -> Result<Vec<Candidate>, ApiError> {
        let url = self.endpoint(&["api", "program", program])?;
        let candidates: Vec<Candidate> = self.get_json(url).await?;
        info!(
            event = "core.api.program_candidates_fetched",
            program = program,
            count = candidates.len()
        );
        Ok(candidates)
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, ApiError> {
        let candidates: Vec<Candidate> =
            self.get_json(self.endpoint(&["api", "candidates"])?).await?;
        info!(event = "core.api.candidates_fetched", count = candidates.len());
        Ok(candidates)
    }

    async fn delete_candidate(
        &self,
        request: &DeleteCandidateRequest,
    ) -> Result<MutationResponse, ApiError> {
        let url = self.endpoint(&["api", "candidates", "delete"])?;
        let response = self.post_mutation(url, request).await?;
        info!(
            event = "core.api.candidate_deleted",
            candidate_id = %request.candidate_id,
            program = %request.program
        );
        Ok(response)
    }

    async fn delete_program(
        &self,
        request: &DeleteProgramRequest,
    ) -> Result<MutationResponse, ApiError> {
        let url = self.endpoint(&["api", "programs", "delete"])?;
        let response = self.post_mutation(url, request).await?;
        info!(event = "core.api.program_deleted", program = %request.program_name);
        Ok(response)
    }

    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        let metrics: DashboardMetrics = self
            .get_json(self.endpoint(&["api", "dashboard", "metrics"])?)
            .await?;
        info!(
            event = "core.api.metrics_fetched",
            total_candidates = metrics.total_candidates
        );
        Ok(metrics)
    }

    async fn upload_interview_file(&self, file: &UploadFile) -> Result<UploadResponse, ApiError> {
        let url = self.endpoint(&["api", "interview-emails", "upload"])?;
        let form = Form::new().part("file", file_part(file, &url)?);

        debug!(event = "core.api.request_started", method = "POST", url = %url);
        let response = self
            .http
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;
        let body = read_success_body(&url, response).await?;
        reject_embedded_error(&url, &body)?;
        let upload: UploadResponse = decode(&url, &body)?;

        info!(
            event = "core.api.interview_file_uploaded",
            job_id = %upload.job_id,
            rows = upload.preview_rows.len()
        );
        Ok(upload)
    }

    async fn start_interview_job(
        &self,
        request: &StartJobRequest,
    ) -> Result<StartJobResponse, ApiError> {
        let url = self.endpoint(&["api", "interview-emails", "start"])?;
        let body = self.post_for_body(&url, request).await?;
        reject_embedded_error(&url, &body)?;
        let response: StartJobResponse = decode(&url, &body)?;
        info!(
            event = "core.api.interview_job_started",
            job_id = %response.job_id,
            send = request.send,
            preview_only = request.preview_only
        );
        Ok(response)
    }

    async fn interview_job_status(&self, job_id: &str) -> Result<JobStatus, ApiError> {
        let mut url = self.endpoint(&["api", "interview-emails", "status"])?;
        url.query_pairs_mut().append_pair("job_id", job_id);
        self.get_json(url).await
    }

    async fn upload_program(&self, program_name: &str, file: &UploadFile) -> Result<(), ApiError> {
        let url = self.endpoint(&["upload-program"])?;
        let form = Form::new()
            .text("program_name", program_name.to_string())
            .part("program_file", file_part(file, &url)?);

        debug!(event = "core.api.request_started", method = "POST", url = %url);
        let response = self
            .http
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;

        // The backend answers with a redirect: back to the upload form on
        // failure, on to the programmes page on success.
        let landed_on = response.url().path().trim_end_matches('/').to_string();
        read_success_body(&url, response).await?;
        if landed_on.ends_with(UPLOAD_PAGE_PATH) {
            warn!(
                event = "core.api.program_upload_rejected",
                program = program_name
            );
            return Err(ApiError::Rejected {
                message: format!(
                    "the server refused the upload for '{}'; check the required columns",
                    program_name
                ),
            });
        }

        info!(
            event = "core.api.program_uploaded",
            program = program_name,
            file_name = %file.file_name
        );
        Ok(())
    }

    async fn download_email_logs(&self) -> Result<String, ApiError> {
        let url = self.endpoint(&["api", "interview-emails", "logs"])?;
        debug!(event = "core.api.request_started", method = "GET", url = %url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;
        let csv = read_success_body(&url, response).await?;
        info!(event = "core.api.email_logs_downloaded", bytes = csv.len());
        Ok(csv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_base_url(base, None).unwrap()
    }

    #[test]
    fn test_endpoint_joins_onto_root() {
        let url = client("http://127.0.0.1:5000")
            .endpoint(&["api", "programs"])
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/programs");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = client("https://dash.example.org/recruit/")
            .endpoint(&["api", "candidates"])
            .unwrap();
        assert_eq!(url.as_str(), "https://dash.example.org/recruit/api/candidates");
    }

    #[test]
    fn test_endpoint_percent_encodes_program_name() {
        let url = client("http://localhost:5000")
            .endpoint(&["api", "program", "Data Science/AI"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/program/Data%20Science%2FAI"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ApiClient::with_base_url("not a url", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_error_message_prefers_json_error_field() {
        assert_eq!(
            error_message(r#"{"error": "Program not found"}"#, Some("Not Found")),
            "Program not found"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("  Bad Gateway\n", None), "Bad Gateway");
        assert_eq!(error_message("", Some("Not Found")), "Not Found");
    }
}
