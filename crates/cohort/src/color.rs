//! CLI colors: dashboard card tiers, table accents and stderr messages.
//!
//! Every function respects `NO_COLOR`, `FORCE_COLOR` and TTY detection through
//! `owo-colors`' `if_supports_color()`. `--no-color` sets an in-process flag
//! that skips owo-colors entirely.

use std::sync::atomic::{AtomicBool, Ordering};

use cohort_core::views::CardStatus;
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

/// Set by `--no-color`.
static NO_COLOR_FLAG: AtomicBool = AtomicBool::new(false);

/// Call once from main.rs when `--no-color` is passed.
pub fn set_no_color() {
    NO_COLOR_FLAG.store(true, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

// Same tiers as the dashboard cards: good, warning, danger.
const ACCENT: Rgb = Rgb::from_hex(0x4A90C2);
const GOOD: Rgb = Rgb::from_hex(0x28A745);
const WARNING: Rgb = Rgb::from_hex(0xFFC107);
const DANGER: Rgb = Rgb::from_hex(0xDC3545);
const MUTED: Rgb = Rgb::from_hex(0x6C757D);

fn no_color() -> bool {
    NO_COLOR_FLAG.load(Ordering::Relaxed)
}

fn paint(text: &str, rgb: Rgb) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.truecolor(rgb.r, rgb.g, rgb.b))
        .to_string()
}

fn paint_stderr(text: &str, rgb: Rgb) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stderr, |t| t.truecolor(rgb.r, rgb.g, rgb.b))
        .to_string()
}

/// Program names and other identifiers.
pub fn accent(text: &str) -> String {
    paint(text, ACCENT)
}

pub fn good(text: &str) -> String {
    paint(text, GOOD)
}

pub fn warn(text: &str) -> String {
    paint(text, WARNING)
}

pub fn danger(text: &str) -> String {
    paint(text, DANGER)
}

/// Secondary info, borders and hints on stdout.
pub fn muted(text: &str) -> String {
    paint(text, MUTED)
}

pub fn bold(text: &str) -> String {
    if no_color() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.bold()).to_string()
}

pub fn card(status: CardStatus, text: &str) -> String {
    match status {
        CardStatus::Good => good(text),
        CardStatus::Warning => warn(text),
        CardStatus::Danger => danger(text),
    }
}

/// Error styling for stderr messages.
pub fn error(text: &str) -> String {
    paint_stderr(text, DANGER)
}

/// Warning styling for stderr messages.
pub fn warning(text: &str) -> String {
    paint_stderr(text, WARNING)
}

/// Hint styling for stderr messages.
pub fn hint(text: &str) -> String {
    paint_stderr(text, MUTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        let c = Rgb::from_hex(0x4A90C2);
        assert_eq!(c.r, 0x4A);
        assert_eq!(c.g, 0x90);
        assert_eq!(c.b, 0xC2);
    }

    #[test]
    fn test_tier_colors_match_hex() {
        assert_eq!((GOOD.r, GOOD.g, GOOD.b), (0x28, 0xA7, 0x45));
        assert_eq!((WARNING.r, WARNING.g, WARNING.b), (0xFF, 0xC1, 0x07));
        assert_eq!((DANGER.r, DANGER.g, DANGER.b), (0xDC, 0x35, 0x45));
    }

    #[test]
    fn test_no_color_flag_disables_all_formatting() {
        NO_COLOR_FLAG.store(true, Ordering::Relaxed);

        assert_eq!(accent("x"), "x");
        assert_eq!(good("x"), "x");
        assert_eq!(danger("x"), "x");
        assert_eq!(bold("x"), "x");
        assert_eq!(card(CardStatus::Warning, "x"), "x");
        assert_eq!(error("x"), "x");
        assert_eq!(hint("x"), "x");

        NO_COLOR_FLAG.store(false, Ordering::Relaxed);
    }

    #[test]
    fn test_colored_text_keeps_original() {
        assert!(card(CardStatus::Good, "72.0%").contains("72.0%"));
        assert!(card(CardStatus::Danger, "4.0%").contains("4.0%"));
        assert!(accent("Data Science").contains("Data Science"));
    }
}
