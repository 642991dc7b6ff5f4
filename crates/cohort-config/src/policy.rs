//! Demographic target policy.
//!
//! These thresholds are programme policy, not user preferences, so they are
//! compiled in rather than read from `config.toml`. Renderers take a
//! [`TargetPolicy`] so tests can exercise the boundaries directly.

/// Female share at which a programme row is marked "Met".
pub const FEMALE_TABLE_TARGET_PERCENT: f64 = 70.0;

/// Share of persons with disability at which the PWD target is met.
pub const PWD_TARGET_PERCENT: f64 = 5.0;

/// Dashboard card tiers: at or above `GOOD` is good, at or above `WARNING`
/// is a warning, anything lower is danger.
pub const CARD_GOOD_PERCENT: f64 = 65.0;
pub const CARD_WARNING_PERCENT: f64 = 60.0;

/// Enrolment goal used when the backend does not send `total_target`.
pub const TOTAL_CANDIDATE_TARGET: u64 = 600;

/// Chart labels longer than this are truncated with an ellipsis.
pub const MAX_LABEL_CHARS: usize = 20;

/// Progress (percent of target) at which a race-gender category is met.
pub const RACE_GENDER_MET_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPolicy {
    pub female_table_target_percent: f64,
    pub pwd_target_percent: f64,
    pub card_good_percent: f64,
    pub card_warning_percent: f64,
    pub total_candidate_target: u64,
    pub max_label_chars: usize,
    pub race_gender_met_percent: f64,
}

impl Default for TargetPolicy {
    fn default() -> Self {
        Self {
            female_table_target_percent: FEMALE_TABLE_TARGET_PERCENT,
            pwd_target_percent: PWD_TARGET_PERCENT,
            card_good_percent: CARD_GOOD_PERCENT,
            card_warning_percent: CARD_WARNING_PERCENT,
            total_candidate_target: TOTAL_CANDIDATE_TARGET,
            max_label_chars: MAX_LABEL_CHARS,
            race_gender_met_percent: RACE_GENDER_MET_PERCENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_uses_named_constants() {
        let policy = TargetPolicy::default();
        assert_eq!(policy.female_table_target_percent, 70.0);
        assert_eq!(policy.pwd_target_percent, 5.0);
        assert_eq!(policy.card_good_percent, 65.0);
        assert_eq!(policy.card_warning_percent, 60.0);
        assert_eq!(policy.total_candidate_target, 600);
        assert_eq!(policy.max_label_chars, 20);
    }

    #[test]
    fn test_card_tiers_are_ordered() {
        assert!(CARD_GOOD_PERCENT > CARD_WARNING_PERCENT);
    }
}
