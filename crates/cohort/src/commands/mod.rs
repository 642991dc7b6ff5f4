use clap::ArgMatches;
use tracing::error;

use cohort_core::events;

mod candidates;
mod completions;
mod dashboard;
mod drafts;
mod emails;
mod helpers;
mod programs;

pub async fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = helpers::resolve_config(matches)?;
    if let Some((name, _)) = matches.subcommand() {
        events::log_app_startup(name, config.api.base_url());
    }

    match matches.subcommand() {
        Some(("programs", sub_matches)) => {
            programs::handle_programs_command(sub_matches, &config).await
        }
        Some(("program", sub_matches)) => {
            programs::handle_program_command(sub_matches, &config).await
        }
        Some(("candidates", sub_matches)) => {
            candidates::handle_candidates_command(sub_matches, &config).await
        }
        Some(("delete-candidate", sub_matches)) => {
            candidates::handle_delete_candidate_command(sub_matches, &config).await
        }
        Some(("delete-program", sub_matches)) => {
            programs::handle_delete_program_command(sub_matches, &config).await
        }
        Some(("upload-program", sub_matches)) => {
            programs::handle_upload_program_command(sub_matches, &config).await
        }
        Some(("dashboard", sub_matches)) => {
            dashboard::handle_dashboard_command(sub_matches, &config).await
        }
        Some(("emails", sub_matches)) => emails::handle_emails_command(sub_matches, &config).await,
        Some(("draft", sub_matches)) => drafts::handle_draft_command(sub_matches),
        Some(("completions", sub_matches)) => completions::handle_completions_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
