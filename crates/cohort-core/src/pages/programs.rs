use cohort_config::TargetPolicy;
use tokio::sync::watch;
use tracing::{info, warn};

use super::delete::{
    Confirm, DeleteError, DeleteOutcome, DeletePhase, DeleteTarget, DeleteWorkflow, Notice,
    Notifier,
};
use crate::api::{ApiError, Backend};
use crate::errors::{CohortError, CohortResult};
use crate::uploads::{UploadFile, validate_program_name};
use crate::views::{CandidatesView, ProgramsView, render_program_detail, render_programs};

/// The programmes table plus an optional detail panel listing one
/// programme's candidates.
pub struct ProgramsPage<B> {
    backend: B,
    policy: TargetPolicy,
    programs: watch::Sender<ProgramsView>,
    detail: watch::Sender<Option<CandidatesView>>,
    deletes: DeleteWorkflow,
}

impl<B: Backend> ProgramsPage<B> {
    pub fn new(backend: B, policy: TargetPolicy) -> Self {
        let (programs, _) = watch::channel(ProgramsView::default());
        let (detail, _) = watch::channel(None);
        Self {
            backend,
            policy,
            programs,
            detail,
            deletes: DeleteWorkflow::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgramsView> {
        self.programs.subscribe()
    }

    pub fn subscribe_detail(&self) -> watch::Receiver<Option<CandidatesView>> {
        self.detail.subscribe()
    }

    pub fn programs(&self) -> ProgramsView {
        self.programs.borrow().clone()
    }

    pub fn detail(&self) -> Option<CandidatesView> {
        self.detail.borrow().clone()
    }

    pub fn delete_phase(&self) -> &DeletePhase {
        self.deletes.phase()
    }

    /// Re-fetch the programme list. On failure the previous table is kept.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let programs = self.backend.list_programs().await?;
        self.programs.send_replace(render_programs(&programs, &self.policy));
        Ok(())
    }

    /// Open the detail panel for `program`.
    pub async fn show_program(&mut self, program: &str) -> Result<(), ApiError> {
        let candidates = self.backend.program_candidates(program).await?;
        self.detail
            .send_replace(Some(render_program_detail(program, &candidates)));
        Ok(())
    }

    pub fn close_detail(&mut self) {
        self.detail.send_replace(None);
    }

    fn detail_shows(&self, program: &str) -> bool {
        self.detail
            .borrow()
            .as_ref()
            .is_some_and(|view| view.program.as_deref() == Some(program))
    }

    /// Delete one candidate, then re-fetch that programme's candidates and the
    /// programme list.
    pub async fn delete_candidate<C, N>(
        &mut self,
        candidate_id: &str,
        program: &str,
        confirm: &mut C,
        notifier: &mut N,
    ) -> Result<DeleteOutcome, DeleteError>
    where
        C: Confirm + ?Sized,
        N: Notifier + ?Sized,
    {
        let outcome = self
            .deletes
            .run(
                &self.backend,
                DeleteTarget::candidate(candidate_id, program),
                confirm,
                notifier,
            )
            .await?;

        if let DeleteOutcome::Deleted { message } = &outcome {
            notifier.notify(Notice::Success(
                message
                    .clone()
                    .unwrap_or_else(|| "Candidate deleted successfully".to_string()),
            ));
            if let Err(e) = self.show_program(program).await {
                self.report_refresh_failure(notifier, &e);
            }
            if let Err(e) = self.refresh().await {
                self.report_refresh_failure(notifier, &e);
            }
        }
        Ok(outcome)
    }

    /// Delete a whole programme, then re-fetch the programme list. The detail
    /// panel closes only if it was showing that programme.
    pub async fn delete_program<C, N>(
        &mut self,
        program: &str,
        confirm: &mut C,
        notifier: &mut N,
    ) -> Result<DeleteOutcome, DeleteError>
    where
        C: Confirm + ?Sized,
        N: Notifier + ?Sized,
    {
        let outcome = self
            .deletes
            .run(
                &self.backend,
                DeleteTarget::program(program),
                confirm,
                notifier,
            )
            .await?;

        if let DeleteOutcome::Deleted { message } = &outcome {
            notifier.notify(Notice::Success(message.clone().unwrap_or_else(|| {
                format!("Program \"{}\" deleted successfully", program)
            })));
            if self.detail_shows(program) {
                self.close_detail();
            }
            if let Err(e) = self.refresh().await {
                self.report_refresh_failure(notifier, &e);
            }
        }
        Ok(outcome)
    }

    /// Validate and upload a programme spreadsheet, then re-fetch the list.
    pub async fn upload_program(
        &mut self,
        program_name: &str,
        file: &UploadFile,
    ) -> CohortResult<()> {
        let program_name = validate_program_name(program_name).map_err(boxed)?;
        self.backend
            .upload_program(program_name, file)
            .await
            .map_err(boxed)?;
        info!(event = "core.programs.upload_completed", program = program_name);
        self.refresh().await.map_err(boxed)?;
        Ok(())
    }

    fn report_refresh_failure<N: Notifier + ?Sized>(&self, notifier: &mut N, error: &ApiError) {
        warn!(event = "core.programs.refresh_failed", error = %error);
        notifier.notify(Notice::Error(format!("Could not refresh: {}", error)));
    }
}

fn boxed<E: CohortError>(error: E) -> Box<dyn CohortError> {
    Box::new(error)
}
