/// Percentage with one decimal place, e.g. `70.0%`.
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Shorten `label` to at most `max_chars` characters, ending in `...` when cut.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = label.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(70.0), "70.0%");
        assert_eq!(format_percent(66.666), "66.7%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn test_truncate_label_keeps_short_labels() {
        assert_eq!(truncate_label("University of Cape", 20), "University of Cape");
        assert_eq!(truncate_label("exactly twenty chars", 20), "exactly twenty chars");
    }

    #[test]
    fn test_truncate_label_cuts_long_labels() {
        let label = truncate_label("Cape Peninsula University of Technology", 20);
        assert_eq!(label, "Cape Peninsula Un...");
        assert_eq!(label.chars().count(), 20);
    }

    #[test]
    fn test_truncate_label_counts_characters_not_bytes() {
        let label = truncate_label("Université du Québec à Montréal", 20);
        assert_eq!(label, "Université du Qué...");
    }

    #[test]
    fn test_percent_of_zero_whole() {
        assert_eq!(percent_of(5, 0), 0.0);
        assert_eq!(percent_of(1, 4), 25.0);
    }
}
