use std::path::{Path, PathBuf};

use clap::ArgMatches;
use tokio::sync::watch;
use tracing::{error, info, warn};

use cohort_core::views::{JobProgressView, UploadPreviewView, format_percent};
use cohort_core::{
    ApiClient, CohortConfig, DraftStore, JobError, JobOutcome, JobPhase, JobWorkflow, PollPolicy,
    UploadFile,
};
use cohort_paths::CohortPaths;
use cohort_protocol::{JobMode, RowState};

use super::helpers::{build_client, cancel_on_ctrl_c, format_count, report_failure};
use crate::color;
use crate::table::{Cell, Style, TableFormatter};

/// Default file for `cohort emails logs`.
const DEFAULT_LOG_FILE: &str = "email_log.csv";

pub(crate) async fn handle_emails_command(
    matches: &ArgMatches,
    config: &CohortConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client(config)?;
    let policy = PollPolicy::from_config(&config.jobs);

    match matches.subcommand() {
        Some(("upload", sub_matches)) => handle_upload(sub_matches, client, policy).await,
        Some(("start", sub_matches)) => handle_start(sub_matches, client, policy).await,
        Some(("status", sub_matches)) => handle_status(sub_matches, client, policy).await,
        Some(("watch", sub_matches)) => {
            let job_id = job_id(sub_matches)?;
            let mut workflow = JobWorkflow::new(client, policy);
            workflow.attach(job_id);
            follow_job(&mut workflow).await
        }
        Some(("logs", sub_matches)) => handle_logs(sub_matches, &client).await,
        _ => {
            error!(event = "cli.emails.subcommand_unknown");
            Err("Unknown emails subcommand".into())
        }
    }
}

fn job_id(matches: &ArgMatches) -> Result<&str, Box<dyn std::error::Error>> {
    Ok(matches
        .get_one::<String>("job-id")
        .ok_or("Job ID is required")?
        .as_str())
}

fn job_failure(action: &str, error: JobError) -> Box<dyn std::error::Error> {
    error!(event = "cli.emails.job_failed", action = action, error = %error);
    report_failure(action, error)
}

async fn handle_upload(
    matches: &ArgMatches,
    client: ApiClient,
    policy: PollPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = matches
        .get_one::<PathBuf>("file")
        .ok_or("File argument is required")?;
    let json_output = matches.get_flag("json");
    info!(event = "cli.emails.upload_started", path = %path.display());

    let file = match UploadFile::from_path(path).await {
        Ok(file) => file,
        Err(e) => return Err(report_failure("read upload", e)),
    };

    let mut workflow = JobWorkflow::new(client, policy);
    let preview = match workflow.upload(&file).await {
        Ok(preview) => preview,
        Err(e) => return Err(job_failure("upload interview outcomes", e)),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        print_preview(&preview);
        println!();
        println!(
            "{}",
            color::muted(&format!(
                "Start with: cohort emails start {} --mode preview-only",
                preview.job_id
            ))
        );
    }

    info!(
        event = "cli.emails.upload_completed",
        job_id = %preview.job_id,
        rows = preview.rows.len()
    );
    Ok(())
}

fn print_preview(preview: &UploadPreviewView) {
    println!(
        "Uploaded job {} ({})",
        color::accent(&preview.job_id),
        format_count(preview.rows.len(), "row")
    );

    if !preview.decisions.is_empty() {
        let counts: Vec<String> = preview
            .decisions
            .iter()
            .map(|(decision, count)| format!("{}: {}", decision, count))
            .collect();
        println!("Decisions: {}", counts.join(", "));
    }

    if preview.rows.is_empty() {
        return;
    }
    let rows: Vec<Vec<Cell>> = preview
        .rows
        .iter()
        .map(|row| {
            vec![
                Cell::styled(row.index.to_string(), Style::Muted),
                format!("{} {}", row.name, row.surname).trim().into(),
                row.email.as_str().into(),
                Cell::styled(row.decision.as_str(), Style::Accent),
                row.feedback.as_str().into(),
            ]
        })
        .collect();
    let formatter = TableFormatter::new(&["#", "Name", "Email", "Decision", "Feedback"], &rows);
    formatter.print_table(&rows);
}

/// Template to send with the job: a file, the saved draft, or nothing.
async fn resolve_template(
    matches: &ArgMatches,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if let Some(path) = matches.get_one::<PathBuf>("template") {
        return read_text(path).await.map(Some);
    }
    if !matches.get_flag("use-draft") {
        return Ok(None);
    }

    let paths = CohortPaths::resolve().map_err(|e| report_failure("locate drafts", e))?;
    let draft = DraftStore::new(&paths).load();
    match draft.html_template() {
        Some(template) => Ok(Some(template)),
        None => {
            eprintln!(
                "{}",
                color::error("❌ No saved draft template. Save one with: cohort draft save --template <file>")
            );
            Err("No saved draft template".into())
        }
    }
}

pub(crate) async fn read_text(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| report_failure(&format!("read '{}'", path.display()), e))
}

async fn handle_start(
    matches: &ArgMatches,
    client: ApiClient,
    policy: PollPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let job_id = job_id(matches)?;
    let mode = match matches.get_one::<String>("mode").map(String::as_str) {
        Some("generate") => JobMode::Generate,
        _ => JobMode::PreviewOnly,
    };
    let decisions: Vec<String> = matches
        .get_many::<String>("decision")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let template = resolve_template(matches).await?;

    info!(
        event = "cli.emails.start_started",
        job_id = job_id,
        mode = %mode,
        decisions = decisions.len(),
        has_template = template.is_some()
    );

    let mut workflow = JobWorkflow::new(client, policy);
    workflow.attach(job_id);
    let started = match workflow.start(mode, decisions, template).await {
        Ok(started) => started,
        Err(e) => return Err(job_failure("start job", e)),
    };
    println!(
        "{}",
        color::good(&format!("✅ Started job {} ({})", started, mode))
    );

    if matches.get_flag("no-watch") {
        println!(
            "{}",
            color::muted(&format!("Follow with: cohort emails watch {}", started))
        );
        return Ok(());
    }
    follow_job(&mut workflow).await
}

async fn handle_status(
    matches: &ArgMatches,
    client: ApiClient,
    policy: PollPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let job_id = job_id(matches)?;
    let json_output = matches.get_flag("json");

    let mut workflow = JobWorkflow::new(client, policy);
    workflow.attach(job_id);
    let progress = match workflow.poll_once().await {
        Ok(progress) => progress,
        Err(e) => return Err(job_failure("fetch job status", e)),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&progress)?);
    } else {
        println!("{}", progress_line(job_id, &progress));
        print_job_rows(&progress);
    }
    Ok(())
}

fn progress_line(job_id: &str, progress: &JobProgressView) -> String {
    let state = if progress.finished {
        color::good("finished")
    } else {
        color::warn("running")
    };
    format!(
        "Job {} {}: {}/{} processed ({}), {} succeeded, {} failed",
        color::accent(job_id),
        state,
        progress.processed,
        progress.total,
        format_percent(progress.percent),
        progress.succeeded,
        progress.failed
    )
}

fn state_style(state: &RowState) -> Style {
    match state {
        RowState::Sent | RowState::Generated => Style::Good,
        RowState::Failed => Style::Danger,
        RowState::Skipped => Style::Muted,
        RowState::Pending | RowState::Other(_) => Style::Plain,
    }
}

fn print_job_rows(progress: &JobProgressView) {
    if let Some(message) = &progress.error {
        eprintln!("{}", color::error(&format!("Job error: {}", message)));
    }
    if progress.rows.is_empty() {
        return;
    }
    let rows: Vec<Vec<Cell>> = progress
        .rows
        .iter()
        .map(|row| {
            let status = row.status.to_string();
            vec![
                Cell::styled(row.index.as_str(), Style::Muted),
                Cell::styled(status, state_style(&row.status)),
                (if row.generated { "yes" } else { "no" }).into(),
                row.message.as_str().into(),
            ]
        })
        .collect();
    let formatter = TableFormatter::new(&["Row", "Status", "Generated", "Message"], &rows);
    formatter.print_table(&rows);
}

/// Poll until the job settles, printing a line for each update. Ctrl+C stops
/// following but leaves the job running on the server.
async fn follow_job(
    workflow: &mut JobWorkflow<ApiClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = cancel_on_ctrl_c();
    let mut phases = workflow.subscribe();

    let outcome = tokio::select! {
        outcome = workflow.poll_until_finished(&token) => outcome,
        _ = print_phases(&mut phases) => return Ok(()),
    };

    match outcome {
        Ok(JobOutcome::Finished(progress)) => {
            println!(
                "{}",
                color::good(&format!(
                    "✅ Job finished: {} succeeded, {} failed",
                    progress.succeeded, progress.failed
                ))
            );
            print_job_rows(&progress);
            info!(event = "cli.emails.watch_completed", failed = progress.failed);
            Ok(())
        }
        Ok(JobOutcome::Abandoned {
            failures,
            last_error,
        }) => {
            eprintln!(
                "{}",
                color::error(&format!(
                    "❌ Gave up after {}: {}",
                    format_count(failures as usize, "failed poll"),
                    last_error
                ))
            );
            warn!(event = "cli.emails.watch_abandoned", failures = failures);
            Err(last_error.into())
        }
        Ok(JobOutcome::Cancelled) => {
            println!("Stopped following. The job keeps running on the server.");
            info!(event = "cli.emails.watch_cancelled");
            Ok(())
        }
        Err(e) => Err(job_failure("follow job", e)),
    }
}

async fn print_phases(phases: &mut watch::Receiver<JobPhase>) {
    while phases.changed().await.is_ok() {
        let line = match &*phases.borrow_and_update() {
            JobPhase::Polling { job_id, progress } => Some(progress_line(job_id, progress)),
            _ => None,
        };
        if let Some(line) = line {
            println!("{}", line);
        }
    }
}

async fn handle_logs(
    matches: &ArgMatches,
    client: &ApiClient,
) -> Result<(), Box<dyn std::error::Error>> {
    use cohort_core::Backend;

    info!(event = "cli.emails.logs_started");
    let csv = match client.download_email_logs().await {
        Ok(csv) => csv,
        Err(e) if e.is_not_found() => {
            eprintln!("{}", color::warning("No logs available yet."));
            info!(event = "cli.emails.logs_empty");
            return Err(e.into());
        }
        Err(e) => return Err(report_failure("download email logs", e)),
    };

    if matches.get_flag("stdout") {
        print!("{}", csv);
        return Ok(());
    }

    let path = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    if let Err(e) = tokio::fs::write(&path, csv.as_bytes()).await {
        return Err(report_failure(&format!("write '{}'", path.display()), e));
    }

    let lines = csv.lines().count().saturating_sub(1);
    println!(
        "{}",
        color::good(&format!(
            "✅ Wrote {} to {}",
            format_count(lines, "row"),
            path.display()
        ))
    );
    info!(event = "cli.emails.logs_completed", path = %path.display(), entries = lines);
    Ok(())
}
