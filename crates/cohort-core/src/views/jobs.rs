use std::collections::BTreeMap;

use cohort_protocol::{JobStatus, PreviewRow, RowState, UploadResponse};
use serde::Serialize;

/// Processed share of a job; 0 for an empty job.
pub fn progress_percent(processed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (processed as f64 / total as f64 * 100.0).min(100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRowView {
    /// Row index as reported by the backend.
    pub index: String,
    pub status: RowState,
    pub message: String,
    pub generated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobProgressView {
    pub job_id: Option<String>,
    pub total: u64,
    pub processed: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub percent: f64,
    pub finished: bool,
    pub error: Option<String>,
    pub rows: Vec<JobRowView>,
}

/// Build the progress view from a status snapshot.
///
/// Rows are ordered by numeric index; keys that are not numbers sort last.
pub fn render_job_progress(status: &JobStatus) -> JobProgressView {
    let mut rows: Vec<JobRowView> = status
        .rows
        .iter()
        .map(|(index, row)| JobRowView {
            index: index.clone(),
            status: row.status.clone(),
            message: row.message.clone(),
            generated: row.is_generated(),
        })
        .collect();
    rows.sort_by_key(|row| match row.index.parse::<u64>() {
        Ok(n) => (0, n, String::new()),
        Err(_) => (1, 0, row.index.clone()),
    });

    JobProgressView {
        job_id: status.id.clone(),
        total: status.total,
        processed: status.processed,
        succeeded: status.succeeded,
        failed: status.failed,
        percent: progress_percent(status.processed, status.total),
        finished: status.finished,
        error: status.error.clone(),
        rows,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadPreviewView {
    pub job_id: String,
    pub rows: Vec<PreviewRow>,
    /// Rows per decision, most common first.
    pub decisions: Vec<(String, u64)>,
}

pub fn render_upload_preview(upload: &UploadResponse) -> UploadPreviewView {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for row in &upload.preview_rows {
        let decision = row.decision.trim();
        let decision = if decision.is_empty() { "(none)" } else { decision };
        *counts.entry(decision).or_default() += 1;
    }
    let mut decisions: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(decision, count)| (decision.to_string(), count))
        .collect();
    decisions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    UploadPreviewView {
        job_id: upload.job_id.clone(),
        rows: upload.preview_rows.clone(),
        decisions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_protocol::RowStatus;

    fn row(status: RowState) -> RowStatus {
        RowStatus {
            generated: None,
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_empty_job_is_zero_percent() {
        assert_eq!(progress_percent(0, 0), 0.0);
        let view = render_job_progress(&JobStatus::default());
        assert_eq!(view.percent, 0.0);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_percent_of_processed_rows() {
        assert_eq!(progress_percent(1, 4), 25.0);
        assert_eq!(progress_percent(4, 4), 100.0);
    }

    #[test]
    fn test_rows_sorted_numerically() {
        let mut status = JobStatus {
            total: 11,
            ..Default::default()
        };
        for index in ["10", "2", "0", "1"] {
            status.rows.insert(index.to_string(), row(RowState::Sent));
        }
        let view = render_job_progress(&status);
        let order: Vec<_> = view.rows.iter().map(|r| r.index.as_str()).collect();
        assert_eq!(order, ["0", "1", "2", "10"]);
    }

    #[test]
    fn test_non_numeric_rows_sort_last() {
        let mut status = JobStatus::default();
        status.rows.insert("b".to_string(), row(RowState::Pending));
        status.rows.insert("3".to_string(), row(RowState::Failed));
        let view = render_job_progress(&status);
        assert_eq!(view.rows[0].index, "3");
        assert_eq!(view.rows[1].index, "b");
    }

    #[test]
    fn test_view_carries_counts_and_error() {
        let status = JobStatus {
            id: Some("job-1".to_string()),
            total: 2,
            processed: 2,
            succeeded: 1,
            failed: 1,
            finished: true,
            error: Some("File not found".to_string()),
            ..Default::default()
        };
        let view = render_job_progress(&status);
        assert_eq!(view.job_id.as_deref(), Some("job-1"));
        assert_eq!(view.percent, 100.0);
        assert!(view.finished);
        assert_eq!(view.error.as_deref(), Some("File not found"));
    }

    #[test]
    fn test_upload_preview_counts_decisions() {
        let preview = |decision: &str| PreviewRow {
            index: 0,
            name: "A".to_string(),
            surname: "B".to_string(),
            email: "a@b.org".to_string(),
            decision: decision.to_string(),
            feedback: String::new(),
        };
        let upload = UploadResponse {
            job_id: "job-1".to_string(),
            preview_rows: vec![
                preview("Proceed"),
                preview("Decline"),
                preview("Proceed"),
                preview(" "),
            ],
        };
        let view = render_upload_preview(&upload);
        assert_eq!(
            view.decisions,
            vec![
                ("Proceed".to_string(), 2),
                ("(none)".to_string(), 1),
                ("Decline".to_string(), 1),
            ]
        );
        assert_eq!(view.rows.len(), 4);
    }
}
