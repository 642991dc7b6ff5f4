use clap::{Arg, Command};

use super::global::{json_arg, yes_arg};

pub fn programs_command() -> Command {
    Command::new("programs")
        .about("List programs with their female and PWD targets")
        .arg(json_arg())
}

pub fn program_command() -> Command {
    Command::new("program")
        .about("Show the candidates enrolled in one program")
        .arg(
            Arg::new("name")
                .help("Program name")
                .required(true)
                .index(1),
        )
        .arg(json_arg())
}

pub fn delete_program_command() -> Command {
    Command::new("delete-program")
        .about("Delete a program and all of its candidates")
        .arg(
            Arg::new("name")
                .help("Program name")
                .required(true)
                .index(1),
        )
        .arg(yes_arg())
}

pub fn upload_program_command() -> Command {
    Command::new("upload-program")
        .about("Upload a program spreadsheet (.csv or .xlsx)")
        .arg(
            Arg::new("file")
                .help("Spreadsheet to upload")
                .required(true)
                .index(1)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .short('n')
                .help("Program name (letters, digits, underscores and spaces)")
                .required(true),
        )
}
