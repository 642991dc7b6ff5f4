use std::io::{self, BufRead, Write};

use clap::ArgMatches;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use cohort_core::pages::{Confirm, Notice, Notifier};
use cohort_core::{ApiClient, CohortConfig};

use crate::color;

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> CohortConfig {
    match CohortConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "{}",
                color::warning(&format!(
                    "Warning: Could not load config: {}. Using defaults.",
                    e
                ))
            );
            eprintln!(
                "{}",
                color::hint(
                    "Tip: Check ~/.cohort/config.toml and ./.cohort/config.toml for syntax errors."
                )
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            CohortConfig::default()
        }
    }
}

/// Config plus the `--api-url` override, which beats every other source.
/// The override goes through the same validation as the config files.
pub fn resolve_config(matches: &ArgMatches) -> Result<CohortConfig, Box<dyn std::error::Error>> {
    let mut config = load_config_with_warning();
    let Some(url) = matches.get_one::<String>("api-url") else {
        return Ok(config);
    };

    config.api.base_url = Some(url.clone());
    if let Err(e) = config.validate() {
        eprintln!("{}", color::error(&format!("❌ --api-url: {}", e)));
        warn!(event = "cli.config.api_url_invalid", url = url.as_str(), error = %e);
        cohort_core::events::log_app_error(&e);
        return Err(e.into());
    }
    Ok(config)
}

/// Build the HTTP client, reporting a bad base URL on stderr.
pub fn build_client(config: &CohortConfig) -> Result<ApiClient, Box<dyn std::error::Error>> {
    match ApiClient::new(&config.api) {
        Ok(client) => Ok(client),
        Err(e) => {
            eprintln!("{}", color::error(&format!("❌ {}", e)));
            eprintln!(
                "{}",
                color::hint("Set a valid URL with --api-url, $COHORT_API_URL or [api] base_url.")
            );
            Err(e.into())
        }
    }
}

/// Token cancelled on the first Ctrl+C.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!(event = "cli.interrupt_received");
            child.cancel();
        }
    });
    token
}

/// Check if user confirmation input indicates acceptance.
/// Accepts "y" or "yes" (case-insensitive).
pub fn is_confirmation_accepted(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    normalized == "y" || normalized == "yes"
}

/// Asks on stdout and reads the answer from stdin. Anything but y/yes, or a
/// closed stdin, is a no.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(_) => is_confirmation_accepted(&input),
            Err(e) => {
                warn!(event = "cli.confirm.read_failed", error = %e);
                false
            }
        }
    }
}

/// Success notices go to stdout, errors to stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Success(message) => println!("{}", color::good(&format!("✅ {}", message))),
            Notice::Error(message) => eprintln!("{}", color::error(&format!("❌ {}", message))),
        }
    }
}

/// Pick the confirmer for `--yes`.
pub fn confirmer(matches: &ArgMatches) -> Box<dyn Confirm> {
    if matches.get_flag("yes") {
        Box::new(cohort_core::AutoConfirm(true))
    } else {
        Box::new(StdinConfirm)
    }
}

/// Report a failed request on stderr and hand the error back for `?`.
pub fn report_failure<E>(action: &str, error: E) -> Box<dyn std::error::Error>
where
    E: std::error::Error + 'static,
{
    eprintln!("{}", color::error(&format!("❌ Failed to {}: {}", action, error)));
    cohort_core::events::log_app_error(&error);
    Box::new(error)
}

pub fn format_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_accepts_yes_variants() {
        assert!(is_confirmation_accepted("y"));
        assert!(is_confirmation_accepted("YES\n"));
        assert!(is_confirmation_accepted("  Yes  "));
    }

    #[test]
    fn test_confirmation_rejects_everything_else() {
        assert!(!is_confirmation_accepted(""));
        assert!(!is_confirmation_accepted("n"));
        assert!(!is_confirmation_accepted("yep"));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "candidate"), "1 candidate");
        assert_eq!(format_count(0, "program"), "0 programs");
        assert_eq!(format_count(12, "program"), "12 programs");
    }

    #[test]
    fn test_api_url_flag_overrides_config() {
        let matches = crate::app::build_cli()
            .try_get_matches_from(["cohort", "--api-url", "http://10.0.0.5:8080", "programs"])
            .unwrap();
        let config = resolve_config(&matches).unwrap();
        assert_eq!(config.api.base_url(), "http://10.0.0.5:8080");
    }

    #[test]
    fn test_api_url_flag_must_be_http() {
        let matches = crate::app::build_cli()
            .try_get_matches_from(["cohort", "--api-url", "ftp://files.example", "programs"])
            .unwrap();
        let err = resolve_config(&matches).unwrap_err();
        assert!(err.to_string().contains("must start with http:// or https://"));
    }
}
