use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use cohort_core::{Draft, DraftStore, events};
use cohort_paths::CohortPaths;

use super::helpers::report_failure;
use crate::color;

pub(crate) fn handle_draft_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let paths = CohortPaths::resolve().map_err(|e| report_failure("locate drafts", e))?;
    let store = DraftStore::new(&paths);

    match matches.subcommand() {
        Some(("save", sub_matches)) => handle_save(sub_matches, &store),
        Some(("show", sub_matches)) => handle_show(sub_matches, &store),
        Some(("clear", _)) => handle_clear(&store),
        _ => {
            error!(event = "cli.draft.subcommand_unknown");
            Err("Unknown draft subcommand".into())
        }
    }
}

fn read_part(matches: &ArgMatches, name: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let Some(path) = matches.get_one::<PathBuf>(name) else {
        return Ok(None);
    };
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| report_failure(&format!("read '{}'", path.display()), e))
}

/// Overwrite the parts that were given and keep the rest of the saved draft.
fn handle_save(matches: &ArgMatches, store: &DraftStore) -> Result<(), Box<dyn std::error::Error>> {
    let template = read_part(matches, "template")?;
    let signature = read_part(matches, "signature")?;

    let current = store.load();
    let draft = Draft {
        template: template.or(current.template),
        signature: signature.or(current.signature),
        updated_at: None,
    };

    match store.save(&draft) {
        Ok(saved) => {
            println!(
                "{}",
                color::good(&format!("✅ Draft saved to {}", store.path().display()))
            );
            info!(
                event = "cli.draft.save_completed",
                has_template = saved.template.is_some(),
                has_signature = saved.signature.is_some()
            );
            Ok(())
        }
        Err(e) => {
            error!(event = "cli.draft.save_failed", error = %e);
            events::log_app_error(&e);
            eprintln!("{}", color::error(&format!("❌ {}", e)));
            Err(e.into())
        }
    }
}

fn handle_show(matches: &ArgMatches, store: &DraftStore) -> Result<(), Box<dyn std::error::Error>> {
    let draft = store.load();

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&draft)?);
        return Ok(());
    }
    if draft.is_empty() {
        println!("No draft saved.");
        return Ok(());
    }

    if let Some(updated_at) = draft.updated_at {
        println!(
            "{}",
            color::muted(&format!("Saved {}", updated_at.format("%Y-%m-%d %H:%M UTC")))
        );
    }
    println!("{}", color::bold("Template"));
    println!("{}", draft.template.as_deref().unwrap_or("(none)"));
    println!();
    println!("{}", color::bold("Signature"));
    println!("{}", draft.signature.as_deref().unwrap_or("(none)"));
    Ok(())
}

fn handle_clear(store: &DraftStore) -> Result<(), Box<dyn std::error::Error>> {
    match store.clear() {
        Ok(()) => {
            println!("Draft cleared.");
            info!(event = "cli.draft.clear_completed");
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", color::error(&format!("❌ {}", e)));
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
