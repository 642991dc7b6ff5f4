use tokio::sync::watch;
use tracing::warn;

use super::delete::{
    Confirm, DeleteError, DeleteOutcome, DeletePhase, DeleteTarget, DeleteWorkflow, Notice,
    Notifier,
};
use crate::api::{ApiError, Backend};
use crate::views::{CandidatesView, render_candidates};

/// All candidates across programmes.
pub struct CandidatesPage<B> {
    backend: B,
    candidates: watch::Sender<CandidatesView>,
    deletes: DeleteWorkflow,
}

impl<B: Backend> CandidatesPage<B> {
    pub fn new(backend: B) -> Self {
        let (candidates, _) = watch::channel(CandidatesView::default());
        Self {
            backend,
            candidates,
            deletes: DeleteWorkflow::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CandidatesView> {
        self.candidates.subscribe()
    }

    pub fn candidates(&self) -> CandidatesView {
        self.candidates.borrow().clone()
    }

    pub fn delete_phase(&self) -> &DeletePhase {
        self.deletes.phase()
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let candidates = self.backend.list_candidates().await?;
        self.candidates.send_replace(render_candidates(&candidates));
        Ok(())
    }

    /// Delete one candidate, then re-fetch the candidate list.
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
            if let Err(e) = self.refresh().await {
                warn!(event = "core.candidates.refresh_failed", error = %e);
                notifier.notify(Notice::Error(format!("Could not refresh: {}", e)));
            }
        }
        Ok(outcome)
    }
}
