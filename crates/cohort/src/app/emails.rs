use clap::{Arg, ArgAction, Command};

use super::global::json_arg;

fn job_id_arg() -> Arg {
    Arg::new("job-id")
        .help("Job ID returned by 'cohort emails upload'")
        .required(true)
        .index(1)
}

pub fn emails_command() -> Command {
    Command::new("emails")
        .about("Generate and send interview-outcome emails")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("upload")
                .about("Upload an interview outcomes spreadsheet and preview its rows")
                .arg(
                    Arg::new("file")
                        .help("Spreadsheet with name, surname, email, decision and feedback")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("start")
                .about("Start generating (and sending) emails for an uploaded job")
                .arg(job_id_arg())
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .short('m')
                        .help("generate sends the emails; preview-only only renders them")
                        .value_parser(["generate", "preview-only"])
                        .default_value("preview-only"),
                )
                .arg(
                    Arg::new("decision")
                        .long("decision")
                        .short('d')
                        .help("Only process rows with this decision (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .help("HTML template file for the email body")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("use-draft"),
                )
                .arg(
                    Arg::new("use-draft")
                        .long("use-draft")
                        .help("Use the saved draft template and signature")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-watch")
                        .long("no-watch")
                        .help("Return after starting instead of following progress")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Show the current progress of a job")
                .arg(job_id_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("watch")
                .about("Follow a job until it finishes")
                .arg(job_id_arg()),
        )
        .subcommand(
            Command::new("logs")
                .about("Download the email log as CSV")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("File to write (default: email_log.csv)")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("stdout"),
                )
                .arg(
                    Arg::new("stdout")
                        .long("stdout")
                        .help("Print the CSV instead of writing a file")
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub fn draft_command() -> Command {
    Command::new("draft")
        .about("Manage the locally saved email template draft")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("save")
                .about("Save a template and/or signature")
                .arg(
                    Arg::new("template")
                        .long("template")
                        .help("HTML template file")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    Arg::new("signature")
                        .long("signature")
                        .help("HTML signature file")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .group(
                    clap::ArgGroup::new("parts")
                        .args(["template", "signature"])
                        .required(true)
                        .multiple(true),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Print the saved draft")
                .arg(json_arg()),
        )
        .subcommand(Command::new("clear").about("Delete the saved draft"))
}
