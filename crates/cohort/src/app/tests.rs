use super::*;

#[test]
fn test_cli_build() {
    let app = build_cli();
    assert_eq!(app.get_name(), "cohort");
}

#[test]
fn test_cli_requires_subcommand() {
    let app = build_cli();
    let matches = app.try_get_matches_from(vec!["cohort"]);
    assert!(matches.is_err());
}

#[test]
fn test_cli_programs_json_flag() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["cohort", "programs", "--json"])
        .unwrap();
    let programs_matches = matches.subcommand_matches("programs").unwrap();
    assert!(programs_matches.get_flag("json"));
}

#[test]
fn test_cli_program_requires_name() {
    let app = build_cli();
    assert!(app.try_get_matches_from(vec!["cohort", "program"]).is_err());

    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["cohort", "program", "Data Science"])
        .unwrap();
    let program_matches = matches.subcommand_matches("program").unwrap();
    assert_eq!(
        program_matches.get_one::<String>("name").unwrap(),
        "Data Science"
    );
    assert!(!program_matches.get_flag("json"));
}

#[test]
fn test_cli_delete_program_yes_flag() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["cohort", "delete-program", "Data_2024", "-y"])
        .unwrap();
    let delete_matches = matches.subcommand_matches("delete-program").unwrap();
    assert_eq!(delete_matches.get_one::<String>("name").unwrap(), "Data_2024");
    assert!(delete_matches.get_flag("yes"));
}

#[test]
fn test_cli_upload_program_requires_name() {
    let app = build_cli();
    let result = app.try_get_matches_from(vec!["cohort", "upload-program", "cohort.xlsx"]);
    assert!(result.is_err());

    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec![
            "cohort",
            "upload-program",
            "cohort.xlsx",
            "--name",
            "Data Science",
        ])
        .unwrap();
    let upload_matches = matches.subcommand_matches("upload-program").unwrap();
    assert_eq!(
        upload_matches.get_one::<std::path::PathBuf>("file").unwrap(),
        &std::path::PathBuf::from("cohort.xlsx")
    );
    assert_eq!(
        upload_matches.get_one::<String>("name").unwrap(),
        "Data Science"
    );
}

#[test]
fn test_cli_delete_candidate_requires_program() {
    let app = build_cli();
    let result = app.try_get_matches_from(vec!["cohort", "delete-candidate", "42"]);
    assert!(result.is_err());

    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["cohort", "delete-candidate", "42", "-p", "Data"])
        .unwrap();
    let delete_matches = matches.subcommand_matches("delete-candidate").unwrap();
    assert_eq!(delete_matches.get_one::<String>("id").unwrap(), "42");
    assert_eq!(delete_matches.get_one::<String>("program").unwrap(), "Data");
    assert!(!delete_matches.get_flag("yes"));
}

#[test]
fn test_cli_dashboard_watch_interval() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["cohort", "dashboard", "--watch", "--interval", "5"])
        .unwrap();
    let dashboard_matches = matches.subcommand_matches("dashboard").unwrap();
    assert!(dashboard_matches.get_flag("watch"));
    assert_eq!(*dashboard_matches.get_one::<u64>("interval").unwrap(), 5);
}

#[test]
fn test_cli_dashboard_interval_requires_watch() {
    let app = build_cli();
    let result = app.try_get_matches_from(vec!["cohort", "dashboard", "--interval", "5"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_dashboard_rejects_zero_interval() {
    let app = build_cli();
    let result =
        app.try_get_matches_from(vec!["cohort", "dashboard", "--watch", "--interval", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_emails_start_defaults() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["cohort", "emails", "start", "job-7"])
        .unwrap();
    let emails_matches = matches.subcommand_matches("emails").unwrap();
    let start_matches = emails_matches.subcommand_matches("start").unwrap();
    assert_eq!(start_matches.get_one::<String>("job-id").unwrap(), "job-7");
    assert_eq!(
        start_matches.get_one::<String>("mode").unwrap(),
        "preview-only"
    );
    assert!(start_matches.get_many::<String>("decision").is_none());
    assert!(!start_matches.get_flag("use-draft"));
    assert!(!start_matches.get_flag("no-watch"));
}

#[test]
fn test_cli_emails_start_decisions_append() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec![
            "cohort",
            "emails",
            "start",
            "job-7",
            "--mode",
            "generate",
            "-d",
            "Proceed",
            "--decision",
            "Reject",
        ])
        .unwrap();
    let start_matches = matches
        .subcommand_matches("emails")
        .unwrap()
        .subcommand_matches("start")
        .unwrap();
    assert_eq!(start_matches.get_one::<String>("mode").unwrap(), "generate");
    let decisions: Vec<&String> = start_matches
        .get_many::<String>("decision")
        .unwrap()
        .collect();
    assert_eq!(decisions, vec!["Proceed", "Reject"]);
}

#[test]
fn test_cli_emails_start_rejects_unknown_mode() {
    let app = build_cli();
    let result =
        app.try_get_matches_from(vec!["cohort", "emails", "start", "job-7", "--mode", "send"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_emails_template_conflicts_with_draft() {
    let app = build_cli();
    let result = app.try_get_matches_from(vec![
        "cohort",
        "emails",
        "start",
        "job-7",
        "--template",
        "body.html",
        "--use-draft",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_emails_logs_output_conflicts_with_stdout() {
    let app = build_cli();
    let result = app.try_get_matches_from(vec![
        "cohort", "emails", "logs", "-o", "out.csv", "--stdout",
    ]);
    assert!(result.is_err());

    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec!["cohort", "emails", "logs", "--stdout"])
        .unwrap();
    let logs_matches = matches
        .subcommand_matches("emails")
        .unwrap()
        .subcommand_matches("logs")
        .unwrap();
    assert!(logs_matches.get_flag("stdout"));
}

#[test]
fn test_cli_emails_requires_subcommand() {
    let app = build_cli();
    assert!(app.try_get_matches_from(vec!["cohort", "emails"]).is_err());
}

#[test]
fn test_cli_draft_save_requires_a_part() {
    let app = build_cli();
    assert!(
        app.try_get_matches_from(vec!["cohort", "draft", "save"])
            .is_err()
    );

    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec![
            "cohort",
            "draft",
            "save",
            "--template",
            "body.html",
            "--signature",
            "sig.html",
        ])
        .unwrap();
    let save_matches = matches
        .subcommand_matches("draft")
        .unwrap()
        .subcommand_matches("save")
        .unwrap();
    assert!(save_matches.contains_id("template"));
    assert!(save_matches.contains_id("signature"));
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let app = build_cli();
    let matches = app
        .try_get_matches_from(vec![
            "cohort",
            "candidates",
            "--api-url",
            "http://localhost:5000",
            "--no-color",
            "-v",
        ])
        .unwrap();
    assert_eq!(
        matches.get_one::<String>("api-url").unwrap(),
        "http://localhost:5000"
    );
    assert!(matches.get_flag("no-color"));
    assert!(matches.get_flag("verbose"));
}

#[test]
fn test_cli_completions_shell() {
    let app = build_cli();
    assert!(
        app.try_get_matches_from(vec!["cohort", "completions", "zsh"])
            .is_ok()
    );

    let app = build_cli();
    assert!(
        app.try_get_matches_from(vec!["cohort", "completions", "cmd"])
            .is_err()
    );
}
