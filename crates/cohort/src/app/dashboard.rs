use clap::{Arg, ArgAction, Command};

use super::global::json_arg;

pub fn dashboard_command() -> Command {
    Command::new("dashboard")
        .about("Show summary cards, charts and race-gender targets")
        .arg(json_arg())
        .arg(
            Arg::new("watch")
                .long("watch")
                .short('w')
                .help("Keep refreshing until Ctrl+C")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .short('i')
                .help("Refresh interval in seconds (overrides config, default: 30)")
                .value_parser(clap::value_parser!(u64).range(1..))
                .requires("watch"),
        )
}
