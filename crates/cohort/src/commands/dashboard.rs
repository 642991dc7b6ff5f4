use std::io::{self, Write};
use std::time::Duration;

use clap::ArgMatches;
use tokio::sync::watch;
use tracing::{error, info};

use cohort_core::pages::DashboardPage;
use cohort_core::views::{DashboardSummary, DashboardView, MetricCard};
use cohort_core::{CohortConfig, TargetPolicy};

use super::helpers::{build_client, cancel_on_ctrl_c, report_failure};
use crate::chart;
use crate::color;
use crate::table::{Cell, Style, TableFormatter, pad};

fn print_card(card: &MetricCard) {
    println!(
        "  {} {}  {}",
        color::bold(&pad(&card.title, 26)),
        color::card(card.status, &card.value),
        color::muted(&card.detail)
    );
}

fn print_race_gender(summary: &DashboardSummary) {
    if summary.race_gender.is_empty() {
        return;
    }
    let rows: Vec<Vec<Cell>> = summary
        .race_gender
        .iter()
        .map(|row| {
            let style = if row.met { Style::Good } else { Style::Warn };
            vec![
                row.race.as_str().into(),
                row.female.to_string().into(),
                row.male.to_string().into(),
                row.total.to_string().into(),
                row.target.to_string().into(),
                Cell::styled(row.progress.as_str(), style),
            ]
        })
        .collect();

    println!("{}", color::bold("Race-Gender Targets"));
    let formatter = TableFormatter::new(
        &["Race", "Female", "Male", "Total", "Target", "Progress"],
        &rows,
    );
    formatter.print_table(&rows);
}

fn print_dashboard(
    view: &DashboardView,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    let Some(summary) = view.summary() else {
        println!("No candidate data yet.");
        println!(
            "{}",
            color::muted("Upload a program with: cohort upload-program <file> --name <name>")
        );
        return Ok(());
    };

    println!("{}", color::bold("Summary"));
    print_card(&summary.total_card);
    print_card(&summary.female_card);
    print_card(&summary.pwd_card);
    println!();

    for series in summary.charts() {
        chart::print_series(series);
    }
    print_race_gender(summary);
    Ok(())
}

pub(crate) async fn handle_dashboard_command(
    matches: &ArgMatches,
    config: &CohortConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let watch_mode = matches.get_flag("watch");
    let interval = matches
        .get_one::<u64>("interval")
        .map(|secs| Duration::from_secs(*secs))
        .unwrap_or_else(|| config.dashboard.refresh_interval());

    info!(
        event = "cli.dashboard_started",
        json_output = json_output,
        watch_mode = watch_mode,
        interval_secs = interval.as_secs()
    );

    let mut page = DashboardPage::new(build_client(config)?, TargetPolicy::default());

    if !watch_mode {
        if let Err(e) = page.refresh().await {
            error!(event = "cli.dashboard_failed", error = %e);
            return Err(report_failure("load dashboard", e));
        }
        print_dashboard(&page.view(), json_output)?;
        info!(event = "cli.dashboard_completed");
        return Ok(());
    }

    let token = cancel_on_ctrl_c();
    let mut views = page.subscribe();
    tokio::select! {
        _ = page.run_periodic(interval, &token) => {}
        result = print_updates(&mut views, json_output, interval) => result?,
    }

    info!(event = "cli.dashboard_watch_stopped");
    Ok(())
}

/// Redraw on every published view until the page goes away.
async fn print_updates(
    views: &mut watch::Receiver<DashboardView>,
    json_output: bool,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    while views.changed().await.is_ok() {
        let view = views.borrow_and_update().clone();
        if !json_output {
            print!("\x1B[2J\x1B[1;1H");
            io::stdout().flush()?;
        }
        print_dashboard(&view, json_output)?;
        if !json_output {
            println!(
                "\n{}",
                color::muted(&format!(
                    "Refreshing every {}s. Press Ctrl+C to exit.",
                    interval.as_secs()
                ))
            );
        }
    }
    Ok(())
}
