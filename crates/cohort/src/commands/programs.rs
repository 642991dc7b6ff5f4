use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use cohort_core::pages::{DeleteOutcome, ProgramsPage};
use cohort_core::views::{CandidatesView, ProgramsView};
use cohort_core::{CohortConfig, CohortError, TargetPolicy, UploadFile, events};

use super::candidates::print_candidates;
use super::helpers::{TerminalNotifier, build_client, confirmer, format_count, report_failure};
use crate::color;
use crate::table::{Cell, Style, TableFormatter};

fn target_cell(percent: &str, met: bool) -> Cell {
    Cell::styled(percent, if met { Style::Good } else { Style::Danger })
}

fn print_programs(view: &ProgramsView) {
    let rows: Vec<Vec<Cell>> = view
        .rows
        .iter()
        .map(|row| {
            vec![
                Cell::styled(row.name.as_str(), Style::Accent),
                row.total_candidates.to_string().into(),
                row.female_count.to_string().into(),
                target_cell(&row.female_percent, row.female_target.is_met()),
                target_cell(row.female_target.label(), row.female_target.is_met()),
                row.pwd_count.to_string().into(),
                target_cell(&row.pwd_percent, row.pwd_target.is_met()),
                target_cell(row.pwd_target.label(), row.pwd_target.is_met()),
            ]
        })
        .collect();

    let formatter = TableFormatter::new(
        &[
            "Program",
            "Candidates",
            "Female",
            "Female %",
            "Female Target",
            "PWD",
            "PWD %",
            "PWD Target",
        ],
        &rows,
    );
    formatter.print_table(&rows);
}

pub(crate) async fn handle_programs_command(
    matches: &ArgMatches,
    config: &CohortConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.programs_started", json_output = json_output);

    let mut page = ProgramsPage::new(build_client(config)?, TargetPolicy::default());
    if let Err(e) = page.refresh().await {
        error!(event = "cli.programs_failed", error = %e);
        return Err(report_failure("load programs", e));
    }

    let view = page.programs();
    if json_output {
        println!("{}", serde_json::to_string_pretty(&view.rows)?);
    } else if view.is_empty() {
        println!("No programs found.");
        println!(
            "{}",
            color::muted("Upload one with: cohort upload-program <file> --name <name>")
        );
    } else {
        println!("Programs ({}):", format_count(view.rows.len(), "program"));
        print_programs(&view);
    }

    info!(event = "cli.programs_completed", count = view.rows.len());
    Ok(())
}

pub(crate) async fn handle_program_command(
    matches: &ArgMatches,
    config: &CohortConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = matches
        .get_one::<String>("name")
        .ok_or("Program name is required")?;
    let json_output = matches.get_flag("json");
    info!(event = "cli.program_started", program = name.as_str());

    let mut page = ProgramsPage::new(build_client(config)?, TargetPolicy::default());
    if let Err(e) = page.show_program(name).await {
        error!(event = "cli.program_failed", program = name.as_str(), error = %e);
        return Err(report_failure(&format!("load program '{}'", name), e));
    }

    let detail = page.detail().unwrap_or_else(|| CandidatesView {
        program: Some(name.clone()),
        rows: Vec::new(),
    });
    if json_output {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else if detail.is_empty() {
        println!("No candidates in program '{}'.", color::accent(name));
    } else {
        println!(
            "{} ({}):",
            color::accent(name),
            format_count(detail.len(), "candidate")
        );
        print_candidates(&detail);
    }

    info!(
        event = "cli.program_completed",
        program = name.as_str(),
        count = detail.len()
    );
    Ok(())
}

pub(crate) async fn handle_delete_program_command(
    matches: &ArgMatches,
    config: &CohortConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = matches
        .get_one::<String>("name")
        .ok_or("Program name is required")?;
    info!(event = "cli.delete_program_started", program = name.as_str());

    let mut page = ProgramsPage::new(build_client(config)?, TargetPolicy::default());
    let mut confirm = confirmer(matches);
    let mut notifier = TerminalNotifier;

    match page
        .delete_program(name, confirm.as_mut(), &mut notifier)
        .await
    {
        Ok(DeleteOutcome::Declined) => {
            println!("Aborted.");
            info!(event = "cli.delete_program_aborted", program = name.as_str());
            Ok(())
        }
        Ok(DeleteOutcome::Deleted { .. }) => {
            let remaining = page.programs().rows.len();
            println!("{} remaining.", format_count(remaining, "program"));
            info!(event = "cli.delete_program_completed", program = name.as_str());
            Ok(())
        }
        Err(e) => {
            // The notifier already printed the failure.
            error!(
                event = "cli.delete_program_failed",
                program = name.as_str(),
                error = %e
            );
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub(crate) async fn handle_upload_program_command(
    matches: &ArgMatches,
    config: &CohortConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = matches
        .get_one::<PathBuf>("file")
        .ok_or("File argument is required")?;
    let name = matches
        .get_one::<String>("name")
        .ok_or("Program name is required")?;
    info!(
        event = "cli.upload_program_started",
        program = name.as_str(),
        path = %path.display()
    );

    let file = match UploadFile::from_path(path).await {
        Ok(file) => file,
        Err(e) => return Err(report_failure("read upload", e)),
    };

    let mut page = ProgramsPage::new(build_client(config)?, TargetPolicy::default());
    if let Err(e) = page.upload_program(name, &file).await {
        let message = e.to_string();
        eprintln!(
            "{}",
            color::error(&format!("❌ Failed to upload program: {}", message))
        );
        error!(
            event = "cli.upload_program_failed",
            program = name.as_str(),
            error_code = e.error_code(),
            error = %message
        );
        return Err(message.into());
    }

    println!(
        "{}",
        color::good(&format!(
            "✅ Uploaded {} as program '{}'",
            file.file_name,
            name.trim()
        ))
    );
    if let Some(row) = page.programs().find(name.trim()) {
        println!(
            "   {} candidates, {} female, {} PWD",
            row.total_candidates, row.female_percent, row.pwd_percent
        );
    }

    info!(event = "cli.upload_program_completed", program = name.as_str());
    Ok(())
}
