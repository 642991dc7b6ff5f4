use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("cohort")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recruitment dashboard client: programs, candidates and interview emails")
        .long_about("cohort talks to the recruitment dashboard backend. It lists programs and candidates with their demographic targets, deletes records after confirmation, summarises the dashboard metrics and runs interview-outcome email jobs.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Backend base URL (overrides config and $COHORT_API_URL)")
                .value_name("URL")
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}

/// `--json` flag shared by the listing commands.
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

/// `--yes` flag that skips the confirmation prompt.
pub fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .help("Do not ask for confirmation")
        .action(ArgAction::SetTrue)
}
