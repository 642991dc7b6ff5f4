use cohort_protocol::{Candidate, columns};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub race: String,
    pub disability: String,
    pub program: String,
    pub qualification: String,
    pub nqf_level: String,
    pub institution: String,
}

impl CandidateRow {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            id: candidate.candidate_id().to_string(),
            name: candidate.full_name(),
            email: candidate.get(columns::EMAIL).to_string(),
            gender: candidate.gender().to_string(),
            race: candidate.get(columns::RACE).to_string(),
            disability: candidate.disability_status().to_string(),
            program: candidate.program().to_string(),
            qualification: candidate.get(columns::HIGHEST_QUALIFICATION).to_string(),
            nqf_level: candidate.get(columns::NQF_LEVEL).to_string(),
            institution: candidate.get(columns::INSTITUTION).to_string(),
        }
    }
}

/// A candidates table, either across all programmes or for one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidatesView {
    /// Set when the table shows a single programme's candidates.
    pub program: Option<String>,
    pub rows: Vec<CandidateRow>,
}

impl CandidatesView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

pub fn render_candidates(candidates: &[Candidate]) -> CandidatesView {
    CandidatesView {
        program: None,
        rows: candidates.iter().map(CandidateRow::from_candidate).collect(),
    }
}

/// Candidates of one programme. The backend omits the `Program` column in
/// per-programme listings, so it is filled in from `program`.
pub fn render_program_detail(program: &str, candidates: &[Candidate]) -> CandidatesView {
    let rows = candidates
        .iter()
        .map(|candidate| {
            let mut row = CandidateRow::from_candidate(candidate);
            if row.program.is_empty() {
                row.program = program.to_string();
            }
            row
        })
        .collect();

    CandidatesView {
        program: Some(program.to_string()),
        rows,
    }
}
