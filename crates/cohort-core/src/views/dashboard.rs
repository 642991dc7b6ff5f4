//! Dashboard view model: summary cards, chart series and the race-gender
//! table.

use std::collections::BTreeMap;

use cohort_config::TargetPolicy;
use cohort_protocol::{DashboardMetrics, RaceGenderEntry};
use serde::Serialize;

use super::format::{format_percent, percent_of, truncate_label};

/// Colour tier of a summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardStatus {
    Good,
    Warning,
    Danger,
}

/// Tier for a percentage: good at or above the good threshold, warning at or
/// above the warning threshold, danger below.
pub fn card_status(percent: f64, policy: &TargetPolicy) -> CardStatus {
    if percent >= policy.card_good_percent {
        CardStatus::Good
    } else if percent >= policy.card_warning_percent {
        CardStatus::Warning
    } else {
        CardStatus::Danger
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub detail: String,
    pub percent: f64,
    pub status: CardStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Points sorted by count descending, then label. Zero counts are dropped
    /// and labels shortened to `max_label_chars`.
    fn from_counts<'a>(
        title: &str,
        counts: impl IntoIterator<Item = (&'a str, u64)>,
        max_label_chars: usize,
    ) -> Self {
        let mut sorted: Vec<(&str, u64)> =
            counts.into_iter().filter(|(_, count)| *count > 0).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        Self {
            title: title.to_string(),
            points: sorted
                .into_iter()
                .map(|(label, count)| ChartPoint {
                    label: truncate_label(label, max_label_chars),
                    count,
                })
                .collect(),
        }
    }

    fn from_map(title: &str, counts: &BTreeMap<String, u64>, max_label_chars: usize) -> Self {
        Self::from_counts(
            title,
            counts.iter().map(|(label, count)| (label.as_str(), *count)),
            max_label_chars,
        )
    }

    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.count).sum()
    }

    pub fn max(&self) -> u64 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceGenderRow {
    pub race: String,
    pub female: u64,
    pub male: u64,
    pub total: u64,
    pub target: u64,
    pub progress_percent: f64,
    pub progress: String,
    pub met: bool,
}

impl RaceGenderRow {
    fn from_entry(entry: &RaceGenderEntry, policy: &TargetPolicy) -> Self {
        let total = entry.female + entry.male;
        let progress_percent = entry
            .progress_percent
            .unwrap_or_else(|| percent_of(total, entry.target));
        Self {
            race: entry.race.clone(),
            female: entry.female,
            male: entry.male,
            total,
            target: entry.target,
            progress_percent,
            progress: format_percent(progress_percent),
            met: progress_percent >= policy.race_gender_met_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_candidates: u64,
    pub total_card: MetricCard,
    pub female_card: MetricCard,
    pub pwd_card: MetricCard,
    pub gender: ChartSeries,
    pub disability: ChartSeries,
    pub race: ChartSeries,
    pub programs: ChartSeries,
    pub institutions: ChartSeries,
    pub nqf_levels: ChartSeries,
    pub race_gender: Vec<RaceGenderRow>,
}

impl DashboardSummary {
    pub fn charts(&self) -> [&ChartSeries; 6] {
        [
            &self.gender,
            &self.disability,
            &self.race,
            &self.programs,
            &self.institutions,
            &self.nqf_levels,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "summary", rename_all = "snake_case")]
pub enum DashboardView {
    /// No candidates uploaded yet; nothing to chart.
    NoData,
    Ready(Box<DashboardSummary>),
}

impl DashboardView {
    pub fn summary(&self) -> Option<&DashboardSummary> {
        match self {
            DashboardView::NoData => None,
            DashboardView::Ready(summary) => Some(summary),
        }
    }
}

/// Male count with the female overlap removed.
///
/// The backend counts "male" by substring, so its male count includes every
/// "female" row. A male count below the female count cannot contain them and
/// is taken as already exclusive.
pub fn male_count(metrics: &DashboardMetrics) -> u64 {
    if metrics.male_count >= metrics.female_count {
        metrics.male_count - metrics.female_count
    } else {
        metrics.male_count
    }
}

pub fn render_dashboard(metrics: &DashboardMetrics, policy: &TargetPolicy) -> DashboardView {
    let total = metrics.total_candidates;
    if total == 0 {
        return DashboardView::NoData;
    }

    let target = metrics
        .total_target
        .filter(|target| *target > 0)
        .unwrap_or(policy.total_candidate_target);
    let total_percent = percent_of(total, target);

    let total_card = MetricCard {
        title: "Total Candidates".to_string(),
        value: total.to_string(),
        detail: format!("{} of {} target", format_percent(total_percent), target),
        percent: total_percent,
        status: card_status(total_percent, policy),
    };

    let female_card = MetricCard {
        title: "Female Candidates".to_string(),
        value: metrics.female_count.to_string(),
        detail: format!(
            "{} (target {})",
            format_percent(metrics.female_percent),
            format_percent(policy.card_good_percent)
        ),
        percent: metrics.female_percent,
        status: card_status(metrics.female_percent, policy),
    };

    let pwd_card = MetricCard {
        title: "Persons with Disability".to_string(),
        value: metrics.pwd_count.to_string(),
        detail: format!(
            "{} (target {})",
            format_percent(metrics.pwd_percent),
            format_percent(policy.pwd_target_percent)
        ),
        percent: metrics.pwd_percent,
        status: if metrics.pwd_percent >= policy.pwd_target_percent {
            CardStatus::Good
        } else {
            CardStatus::Danger
        },
    };

    let female = metrics.female_count;
    let male = male_count(metrics);
    let other = total.saturating_sub(female + male);
    let labels = policy.max_label_chars;

    let summary = DashboardSummary {
        total_candidates: total,
        total_card,
        female_card,
        pwd_card,
        gender: ChartSeries::from_counts(
            "Gender",
            [("Female", female), ("Male", male), ("Other", other)],
            labels,
        ),
        disability: ChartSeries::from_counts(
            "Disability",
            [
                ("PWD", metrics.pwd_count),
                ("Non-PWD", total.saturating_sub(metrics.pwd_count)),
            ],
            labels,
        ),
        race: ChartSeries::from_map("Race", &metrics.race_counts, labels),
        programs: ChartSeries::from_map("Programs", &metrics.program_counts, labels),
        institutions: ChartSeries::from_map("Institutions", &metrics.institution_counts, labels),
        nqf_levels: ChartSeries::from_map("NQF Levels", &metrics.nqf_level_counts, labels),
        race_gender: metrics
            .race_gender
            .iter()
            .map(|entry| RaceGenderRow::from_entry(entry, policy))
            .collect(),
    };

    DashboardView::Ready(Box::new(summary))
}
