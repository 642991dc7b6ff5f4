use std::time::Duration;

use cohort_config::TargetPolicy;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{ApiError, Backend};
use crate::views::{DashboardView, render_dashboard};

/// Dashboard cards and charts, refreshed on demand or on a timer.
pub struct DashboardPage<B> {
    backend: B,
    policy: TargetPolicy,
    view: watch::Sender<DashboardView>,
}

impl<B: Backend> DashboardPage<B> {
    pub fn new(backend: B, policy: TargetPolicy) -> Self {
        let (view, _) = watch::channel(DashboardView::NoData);
        Self {
            backend,
            policy,
            view,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view.subscribe()
    }

    pub fn view(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    /// Fetch metrics and publish a rebuilt view. A failed fetch leaves the
    /// previous view in place.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let metrics = self.backend.dashboard_metrics().await?;
        let view = render_dashboard(&metrics, &self.policy);
        debug!(
            event = "core.dashboard.view_rebuilt",
            total_candidates = metrics.total_candidates,
            has_data = view.summary().is_some()
        );
        self.view.send_replace(view);
        Ok(())
    }

    /// Refresh immediately and then every `interval` until `token` is
    /// cancelled. Failures are logged and the loop carries on.
    pub async fn run_periodic(&mut self, interval: Duration, token: &CancellationToken) {
        info!(
            event = "core.dashboard.refresh_loop_started",
            interval_secs = interval.as_secs()
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                _ = token.cancelled() => break,
                result = self.refresh() => {
                    if let Err(e) = result {
                        warn!(event = "core.dashboard.refresh_failed", error = %e);
                    }
                }
            }
        }

        info!(event = "core.dashboard.refresh_loop_stopped");
    }
}
