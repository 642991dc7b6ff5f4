use std::time::Duration;

use cohort_config::JobsConfig;

/// What the poll loop does after a status request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// The job reported `finished`; stop.
    Finished,
    /// Ask again after the delay.
    PollAgain(Duration),
    /// Too many consecutive failures; stop without a result.
    GiveUp,
}

/// Poll pacing: a fixed interval while the backend answers, exponential
/// backoff while it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub poll_interval: Duration,
    pub retry_interval: Duration,
    pub max_backoff: Duration,
    pub max_consecutive_failures: u32,
}

impl PollPolicy {
    pub fn from_config(config: &JobsConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            retry_interval: config.retry_interval(),
            max_backoff: config.max_backoff(),
            max_consecutive_failures: config.max_consecutive_failures(),
        }
    }

    pub fn after_success(&self, finished: bool) -> PollDecision {
        if finished {
            PollDecision::Finished
        } else {
            PollDecision::PollAgain(self.poll_interval)
        }
    }

    /// `consecutive` counts failures in a row, including this one.
    pub fn after_failure(&self, consecutive: u32) -> PollDecision {
        if consecutive >= self.max_consecutive_failures {
            PollDecision::GiveUp
        } else {
            PollDecision::PollAgain(self.backoff(consecutive))
        }
    }

    /// `retry_interval * 2^(consecutive - 1)`, capped at `max_backoff`.
    pub fn backoff(&self, consecutive: u32) -> Duration {
        let factor = 1u32
            .checked_shl(consecutive.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.retry_interval
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from_config(&JobsConfig::default())
    }
}
