use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Column names the backend standardises uploaded spreadsheets to.
pub mod columns {
    pub const CANDIDATE_ID: &str = "Candidate ID";
    pub const FIRST_NAME: &str = "First Name";
    pub const SURNAME: &str = "Surname";
    pub const EMAIL: &str = "Email Address";
    pub const GENDER: &str = "Gender";
    pub const RACE: &str = "Race";
    pub const DISABILITY_STATUS: &str = "Disability Status";
    pub const PROGRAM: &str = "Program";
    pub const HIGHEST_QUALIFICATION: &str = "Highest Qualification";
    pub const NQF_LEVEL: &str = "NQF Level";
    pub const QUALIFICATION_FIELD: &str = "Qualification Field";
    pub const INSTITUTION: &str = "Institution Name";

    /// Alternative spellings accepted for the candidate identifier column.
    pub const CANDIDATE_ID_ALIASES: [&str; 4] =
        ["CandidateID", "Candidate_ID", "Applicant ID", "ID"];
}

/// Summary row from `GET /api/programs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    pub total_candidates: u64,
    #[serde(default)]
    pub female_count: u64,
    #[serde(default)]
    pub female_percent: f64,
    #[serde(default)]
    pub pwd_count: u64,
    #[serde(default)]
    pub pwd_percent: f64,
    #[serde(default)]
    pub meets_female_target: bool,
    #[serde(default)]
    pub meets_pwd_target: bool,
}

/// A candidate record as stored by the backend: spreadsheet columns to cell
/// values.
///
/// Cells arrive as strings or numbers depending on how the backend parsed the
/// upload; they are normalised to strings here, with JSON `null` as `""`.
/// Columns the client does not know about are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Candidate {
    fields: BTreeMap<String, String>,
}

impl<'de> Deserialize<'de> for Candidate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self {
            fields: raw
                .into_iter()
                .map(|(column, value)| (column, cell_to_string(value)))
                .collect(),
        })
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    // Integer columns with gaps come back as floats (7.0)
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                        format!("{}", f as i64)
                    }
                    _ => n.to_string(),
                }
            }
        }
        other => other.to_string(),
    }
}

impl Candidate {
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of a column, or `""` when absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// The candidate identifier.
    ///
    /// Uses `Candidate ID` when present, then the known aliases, then the
    /// first column whose name mentions "id" or "candidate".
    pub fn candidate_id(&self) -> &str {
        if let Some(id) = self.fields.get(columns::CANDIDATE_ID) {
            return id;
        }
        for alias in columns::CANDIDATE_ID_ALIASES {
            if let Some(id) = self.fields.get(alias) {
                return id;
            }
        }
        self.fields
            .iter()
            .find(|(column, _)| {
                let lower = column.to_lowercase();
                lower.contains("candidate") || lower.split_whitespace().any(|w| w == "id")
            })
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn first_name(&self) -> &str {
        self.get(columns::FIRST_NAME)
    }

    pub fn surname(&self) -> &str {
        self.get(columns::SURNAME)
    }

    /// First name and surname joined, skipping whichever is empty.
    pub fn full_name(&self) -> String {
        [self.first_name().trim(), self.surname().trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn gender(&self) -> &str {
        self.get(columns::GENDER)
    }

    pub fn disability_status(&self) -> &str {
        self.get(columns::DISABILITY_STATUS)
    }

    pub fn program(&self) -> &str {
        self.get(columns::PROGRAM)
    }
}

/// One race category of the race-gender cross tabulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceGenderEntry {
    pub race: String,
    #[serde(default)]
    pub female: u64,
    #[serde(default)]
    pub male: u64,
    /// Enrolment goal for this category; zero when the backend sets none.
    #[serde(default)]
    pub target: u64,
    /// Backend-computed progress; derived from counts when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<f64>,
}

/// Aggregates from `GET /api/dashboard/metrics`.
///
/// An empty backend sends only the zeroed counters, so every field defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default)]
    pub total_candidates: u64,
    #[serde(default)]
    pub female_count: u64,
    #[serde(default)]
    pub male_count: u64,
    #[serde(default)]
    pub pwd_count: u64,
    #[serde(default)]
    pub female_percent: f64,
    #[serde(default)]
    pub pwd_percent: f64,
    #[serde(default)]
    pub female_target_met: bool,
    #[serde(default)]
    pub pwd_target_met: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_target: Option<u64>,
    #[serde(default)]
    pub total_percent: f64,
    #[serde(default)]
    pub program_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub institution_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub nqf_level_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub race_counts: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub race_gender: Vec<RaceGenderEntry>,
}
