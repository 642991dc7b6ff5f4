use cohort_protocol::{JobMode, StartJobRequest};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::errors::JobError;
use super::policy::{PollDecision, PollPolicy};
use crate::api::Backend;
use crate::uploads::UploadFile;
use crate::views::{JobProgressView, UploadPreviewView, render_job_progress, render_upload_preview};

/// Where an interview email job stands, as seen by this client.
#[derive(Debug, Clone, PartialEq)]
pub enum JobPhase {
    NoJob,
    Uploaded {
        job_id: String,
        preview: UploadPreviewView,
    },
    /// `mode` is unknown when attaching to a job started elsewhere.
    Started {
        job_id: String,
        mode: Option<JobMode>,
    },
    Polling {
        job_id: String,
        progress: JobProgressView,
    },
    Finished {
        job_id: String,
        progress: JobProgressView,
    },
    Abandoned {
        job_id: String,
        last_error: String,
    },
    Cancelled {
        job_id: String,
    },
}

impl JobPhase {
    pub fn job_id(&self) -> Option<&str> {
        match self {
            JobPhase::NoJob => None,
            JobPhase::Uploaded { job_id, .. }
            | JobPhase::Started { job_id, .. }
            | JobPhase::Polling { job_id, .. }
            | JobPhase::Finished { job_id, .. }
            | JobPhase::Abandoned { job_id, .. }
            | JobPhase::Cancelled { job_id } => Some(job_id),
        }
    }

    /// Latest progress snapshot, if any poll has succeeded.
    pub fn progress(&self) -> Option<&JobProgressView> {
        match self {
            JobPhase::Polling { progress, .. } | JobPhase::Finished { progress, .. } => {
                Some(progress)
            }
            _ => None,
        }
    }
}

/// How a poll loop ended.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Finished(JobProgressView),
    Abandoned { failures: u32, last_error: String },
    Cancelled,
}

/// Upload, start and follow one interview email job.
pub struct JobWorkflow<B> {
    backend: B,
    policy: PollPolicy,
    phase: watch::Sender<JobPhase>,
}

impl<B: Backend> JobWorkflow<B> {
    pub fn new(backend: B, policy: PollPolicy) -> Self {
        let (phase, _) = watch::channel(JobPhase::NoJob);
        Self {
            backend,
            policy,
            phase,
        }
    }

    /// Follow a job that was uploaded or started earlier.
    pub fn attach(&mut self, job_id: impl Into<String>) {
        self.phase.send_replace(JobPhase::Started {
            job_id: job_id.into(),
            mode: None,
        });
    }

    pub fn phase(&self) -> JobPhase {
        self.phase.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<JobPhase> {
        self.phase.subscribe()
    }

    fn current_job_id(&self) -> Result<String, JobError> {
        self.phase
            .borrow()
            .job_id()
            .map(str::to_string)
            .ok_or(JobError::NoJob)
    }

    /// Send the spreadsheet and keep the preview the backend returns.
    pub async fn upload(&mut self, file: &UploadFile) -> Result<UploadPreviewView, JobError> {
        info!(event = "core.jobs.upload_started", file_name = %file.file_name);
        let upload = self.backend.upload_interview_file(file).await?;
        let preview = render_upload_preview(&upload);

        info!(
            event = "core.jobs.upload_completed",
            job_id = %upload.job_id,
            rows = preview.rows.len()
        );
        self.phase.send_replace(JobPhase::Uploaded {
            job_id: upload.job_id,
            preview: preview.clone(),
        });
        Ok(preview)
    }

    /// Start processing the current job. An empty `filter` processes every
    /// row.
    pub async fn start(
        &mut self,
        mode: JobMode,
        filter: Vec<String>,
        html_template: Option<String>,
    ) -> Result<String, JobError> {
        let job_id = self.current_job_id()?;
        let request = StartJobRequest::new(job_id, mode)
            .with_filter(filter)
            .with_template(html_template);

        let response = self.backend.start_interview_job(&request).await?;
        info!(
            event = "core.jobs.start_completed",
            job_id = %response.job_id,
            mode = %mode
        );
        self.phase.send_replace(JobPhase::Started {
            job_id: response.job_id.clone(),
            mode: Some(mode),
        });
        Ok(response.job_id)
    }

    /// Fetch the status once and publish it.
    pub async fn poll_once(&mut self) -> Result<JobProgressView, JobError> {
        let job_id = self.current_job_id()?;
        let status = self.backend.interview_job_status(&job_id).await?;
        let progress = render_job_progress(&status);
        self.publish_progress(job_id, progress.clone());
        Ok(progress)
    }

    fn publish_progress(&self, job_id: String, progress: JobProgressView) {
        let phase = if progress.finished {
            JobPhase::Finished { job_id, progress }
        } else {
            JobPhase::Polling { job_id, progress }
        };
        self.phase.send_replace(phase);
    }

    /// Poll until the job finishes, the failure limit is hit, or `token` is
    /// cancelled. Every successful poll publishes a fresh progress view.
    pub async fn poll_until_finished(
        &mut self,
        token: &CancellationToken,
    ) -> Result<JobOutcome, JobError> {
        let job_id = self.current_job_id()?;
        info!(event = "core.jobs.poll_started", job_id = %job_id);

        let mut failures: u32 = 0;
        let mut last_error = String::new();
        let mut latest: Option<JobProgressView> = None;

        loop {
            let result = tokio::select! {
                _ = token.cancelled() => return Ok(self.cancel(job_id)),
                result = self.backend.interview_job_status(&job_id) => result,
            };

            let decision = match result {
                Ok(status) => {
                    if failures > 0 {
                        info!(
                            event = "core.jobs.poll_recovered",
                            job_id = %job_id,
                            failures = failures
                        );
                    }
                    failures = 0;
                    let progress = render_job_progress(&status);
                    debug!(
                        event = "core.jobs.poll_completed",
                        job_id = %job_id,
                        processed = progress.processed,
                        total = progress.total,
                        finished = progress.finished
                    );
                    let decision = self.policy.after_success(progress.finished);
                    latest = Some(progress.clone());
                    self.publish_progress(job_id.clone(), progress);
                    decision
                }
                Err(e) => {
                    failures += 1;
                    warn!(
                        event = "core.jobs.poll_failed",
                        job_id = %job_id,
                        failures = failures,
                        error = %e
                    );
                    last_error = e.to_string();
                    self.policy.after_failure(failures)
                }
            };

            match decision {
                PollDecision::Finished => {
                    let progress = latest.take().unwrap_or_default();
                    info!(
                        event = "core.jobs.poll_finished",
                        job_id = %job_id,
                        succeeded = progress.succeeded,
                        failed = progress.failed
                    );
                    return Ok(JobOutcome::Finished(progress));
                }
                PollDecision::GiveUp => {
                    error!(
                        event = "core.jobs.poll_abandoned",
                        job_id = %job_id,
                        failures = failures,
                        error = %last_error
                    );
                    self.phase.send_replace(JobPhase::Abandoned {
                        job_id,
                        last_error: last_error.clone(),
                    });
                    return Ok(JobOutcome::Abandoned {
                        failures,
                        last_error,
                    });
                }
                PollDecision::PollAgain(delay) => {
                    tokio::select! {
                        _ = token.cancelled() => return Ok(self.cancel(job_id)),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
    }

    fn cancel(&self, job_id: String) -> JobOutcome {
        info!(event = "core.jobs.poll_cancelled", job_id = %job_id);
        self.phase.send_replace(JobPhase::Cancelled { job_id });
        JobOutcome::Cancelled
    }
}
