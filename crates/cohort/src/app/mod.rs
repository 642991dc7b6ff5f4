mod candidates;
mod dashboard;
mod emails;
mod global;
mod misc;
mod programs;

#[cfg(test)]
mod tests;

use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(programs::programs_command())
        .subcommand(programs::program_command())
        .subcommand(candidates::candidates_command())
        .subcommand(candidates::delete_candidate_command())
        .subcommand(programs::delete_program_command())
        .subcommand(programs::upload_program_command())
        .subcommand(dashboard::dashboard_command())
        .subcommand(emails::emails_command())
        .subcommand(emails::draft_command())
        .subcommand(misc::completions_command())
}
