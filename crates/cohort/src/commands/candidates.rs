use clap::ArgMatches;
use tracing::{error, info};

use cohort_core::pages::{CandidatesPage, DeleteOutcome};
use cohort_core::views::CandidatesView;
use cohort_core::{CohortConfig, events};

use super::helpers::{TerminalNotifier, build_client, confirmer, format_count, report_failure};
use crate::table::{Cell, Style, TableFormatter};

pub(crate) fn print_candidates(view: &CandidatesView) {
    let rows: Vec<Vec<Cell>> = view
        .rows
        .iter()
        .map(|row| {
            vec![
                Cell::styled(row.id.as_str(), Style::Muted),
                row.name.as_str().into(),
                row.email.as_str().into(),
                row.gender.as_str().into(),
                row.race.as_str().into(),
                row.disability.as_str().into(),
                Cell::styled(row.program.as_str(), Style::Accent),
                row.qualification.as_str().into(),
                row.nqf_level.as_str().into(),
                row.institution.as_str().into(),
            ]
        })
        .collect();

    let formatter = TableFormatter::new(
        &[
            "ID",
            "Name",
            "Email",
            "Gender",
            "Race",
            "Disability",
            "Program",
            "Qualification",
            "NQF",
            "Institution",
        ],
        &rows,
    );
    formatter.print_table(&rows);
}

pub(crate) async fn handle_candidates_command(
    matches: &ArgMatches,
    config: &CohortConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.candidates_started", json_output = json_output);

    let mut page = CandidatesPage::new(build_client(config)?);
    if let Err(e) = page.refresh().await {
        error!(event = "cli.candidates_failed", error = %e);
        return Err(report_failure("load candidates", e));
    }

    let view = page.candidates();
    if json_output {
        println!("{}", serde_json::to_string_pretty(&view.rows)?);
    } else if view.is_empty() {
        println!("No candidates found.");
    } else {
        println!("Candidates ({}):", format_count(view.len(), "candidate"));
        print_candidates(&view);
    }

    info!(event = "cli.candidates_completed", count = view.len());
    Ok(())
}

pub(crate) async fn handle_delete_candidate_command(
    matches: &ArgMatches,
    config: &CohortConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let candidate_id = matches
        .get_one::<String>("id")
        .ok_or("Candidate ID is required")?;
    let program = matches
        .get_one::<String>("program")
        .ok_or("Program is required")?;
    info!(
        event = "cli.delete_candidate_started",
        candidate_id = candidate_id.as_str(),
        program = program.as_str()
    );

    let mut page = CandidatesPage::new(build_client(config)?);
    let mut confirm = confirmer(matches);
    let mut notifier = TerminalNotifier;

    match page
        .delete_candidate(candidate_id, program, confirm.as_mut(), &mut notifier)
        .await
    {
        Ok(DeleteOutcome::Declined) => {
            println!("Aborted.");
            info!(event = "cli.delete_candidate_aborted");
            Ok(())
        }
        Ok(DeleteOutcome::Deleted { .. }) => {
            println!(
                "{} remaining.",
                format_count(page.candidates().len(), "candidate")
            );
            info!(
                event = "cli.delete_candidate_completed",
                candidate_id = candidate_id.as_str(),
                program = program.as_str()
            );
            Ok(())
        }
        Err(e) => {
            // The notifier already printed the failure.
            error!(
                event = "cli.delete_candidate_failed",
                candidate_id = candidate_id.as_str(),
                error = %e
            );
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
