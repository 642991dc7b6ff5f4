//! Horizontal text bar charts for the dashboard series.

use cohort_core::views::{ChartSeries, format_percent};

use crate::color;
use crate::table::{display_width, pad};

const BAR_WIDTH: u64 = 30;

/// Bar length for `count`, scaled so `max` fills the full width. Non-zero
/// counts always get at least one block.
fn bar_len(count: u64, max: u64) -> usize {
    if max == 0 || count == 0 {
        return 0;
    }
    (count * BAR_WIDTH / max).max(1) as usize
}

/// One line per point: label, bar, count and share of the series total.
pub fn render_series(series: &ChartSeries) -> Vec<String> {
    let label_width = series
        .points
        .iter()
        .map(|p| display_width(&p.label))
        .max()
        .unwrap_or(0);
    let max = series.max();
    let total = series.total();

    series
        .points
        .iter()
        .map(|point| {
            let share = if total == 0 {
                0.0
            } else {
                point.count as f64 / total as f64 * 100.0
            };
            format!(
                "  {} {} {} {}",
                pad(&point.label, label_width),
                color::accent(&"█".repeat(bar_len(point.count, max))),
                point.count,
                color::muted(&format!("({})", format_percent(share)))
            )
        })
        .collect()
}

pub fn print_series(series: &ChartSeries) {
    println!("{}", color::bold(&series.title));
    if series.points.is_empty() {
        println!("  {}", color::muted("(no data)"));
    }
    for line in render_series(series) {
        println!("{}", line);
    }
    println!();
}
