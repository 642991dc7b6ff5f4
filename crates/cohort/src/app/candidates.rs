use clap::{Arg, Command};

use super::global::{json_arg, yes_arg};

pub fn candidates_command() -> Command {
    Command::new("candidates")
        .about("List every candidate across all programs")
        .arg(json_arg())
}

pub fn delete_candidate_command() -> Command {
    Command::new("delete-candidate")
        .about("Delete one candidate from a program")
        .arg(
            Arg::new("id")
                .help("Candidate ID")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("program")
                .long("program")
                .short('p')
                .help("Program the candidate belongs to")
                .required(true),
        )
        .arg(yes_arg())
}
