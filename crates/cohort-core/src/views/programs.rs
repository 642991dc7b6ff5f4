use cohort_config::TargetPolicy;
use cohort_protocol::Program;
use serde::Serialize;

use super::format::format_percent;

/// Whether a programme meets a demographic target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetIndicator {
    Met,
    NotMet,
}

impl TargetIndicator {
    pub fn from_percent(percent: f64, target_percent: f64) -> Self {
        if percent >= target_percent {
            TargetIndicator::Met
        } else {
            TargetIndicator::NotMet
        }
    }

    pub fn is_met(self) -> bool {
        self == TargetIndicator::Met
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetIndicator::Met => "Met",
            TargetIndicator::NotMet => "Not Met",
        }
    }
}

impl std::fmt::Display for TargetIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramRow {
    pub name: String,
    pub total_candidates: u64,
    pub female_count: u64,
    pub female_percent: String,
    pub female_target: TargetIndicator,
    pub pwd_count: u64,
    pub pwd_percent: String,
    pub pwd_target: TargetIndicator,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgramsView {
    pub rows: Vec<ProgramRow>,
}

impl ProgramsView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&ProgramRow> {
        self.rows.iter().find(|row| row.name == name)
    }
}

/// Build the programmes table. Rows keep the backend's order.
pub fn render_programs(programs: &[Program], policy: &TargetPolicy) -> ProgramsView {
    let rows = programs
        .iter()
        .map(|program| ProgramRow {
            name: program.name.clone(),
            total_candidates: program.total_candidates,
            female_count: program.female_count,
            female_percent: format_percent(program.female_percent),
            female_target: TargetIndicator::from_percent(
                program.female_percent,
                policy.female_table_target_percent,
            ),
            pwd_count: program.pwd_count,
            pwd_percent: format_percent(program.pwd_percent),
            pwd_target: TargetIndicator::from_percent(
                program.pwd_percent,
                policy.pwd_target_percent,
            ),
        })
        .collect();

    ProgramsView { rows }
}
