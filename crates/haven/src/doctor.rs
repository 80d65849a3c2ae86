// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `haven doctor` command implementation.
//!
//! Runs diagnostic checks against the local environment: configuration,
//! record store, and gateway credentials.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use haven_config::model::HavenConfig;
use haven_core::{Adapter, HavenError, HealthStatus};
use haven_gemini::GeminiGateway;
use haven_storage::SqliteRecordStore;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run the `haven doctor` command.
///
/// With `--plain`, disables colored output.
pub async fn run_doctor(config: &HavenConfig, plain: bool) -> Result<(), HavenError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config(config),
        check_record_store(config).await,
        check_gateway_credential(config).await,
    ];

    println!();
    println!("  haven doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        let duration_ms = result.duration.as_millis();
        let line = match result.status {
            CheckStatus::Pass => {
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<16} {} ({duration_ms}ms)",
                        "\u{2713}".green(),
                        result.name,
                        result.message
                    )
                } else {
                    format!(
                        "    [OK]   {:<16} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
            CheckStatus::Warn => {
                warn_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<16} {} ({duration_ms}ms)",
                        "!".yellow(),
                        result.name,
                        result.message.yellow()
                    )
                } else {
                    format!(
                        "    [WARN] {:<16} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
            CheckStatus::Fail => {
                fail_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<16} {} ({duration_ms}ms)",
                        "\u{2717}".red(),
                        result.name,
                        result.message.red()
                    )
                } else {
                    format!(
                        "    [FAIL] {:<16} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
        };
        println!("{line}");
    }

    println!("  {}", "-".repeat(50));
    println!(
        "  {} checks, {} warnings, {} failures\n",
        results.len(),
        warn_count,
        fail_count
    );

    if fail_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn check_config(config: &HavenConfig) -> CheckResult {
    let start = Instant::now();
    // Config already passed load_and_validate to get here.
    CheckResult {
        name: "config".to_string(),
        status: CheckStatus::Pass,
        message: format!(
            "app.name={}, storage at {}",
            config.app.name, config.storage.database_path
        ),
        duration: start.elapsed(),
    }
}

async fn check_record_store(config: &HavenConfig) -> CheckResult {
    let start = Instant::now();
    let store = SqliteRecordStore::new(config.storage.clone());
    let outcome = async {
        store.initialize().await?;
        let status = store.health_check().await?;
        store.shutdown().await?;
        Ok::<_, HavenError>(status)
    }
    .await;

    match outcome {
        Ok(HealthStatus::Healthy) => CheckResult {
            name: "record store".to_string(),
            status: CheckStatus::Pass,
            message: "open, migrated, queryable".to_string(),
            duration: start.elapsed(),
        },
        Ok(other) => CheckResult {
            name: "record store".to_string(),
            status: CheckStatus::Warn,
            message: format!("{other:?}"),
            duration: start.elapsed(),
        },
        Err(e) => CheckResult {
            name: "record store".to_string(),
            status: CheckStatus::Fail,
            message: e.to_string(),
            duration: start.elapsed(),
        },
    }
}

async fn check_gateway_credential(config: &HavenConfig) -> CheckResult {
    let start = Instant::now();
    let gateway = match GeminiGateway::new(config.gemini.clone()) {
        Ok(g) => g,
        Err(e) => {
            return CheckResult {
                name: "gateway".to_string(),
                status: CheckStatus::Fail,
                message: e.to_string(),
                duration: start.elapsed(),
            };
        }
    };

    match gateway.health_check().await {
        Ok(HealthStatus::Healthy) => CheckResult {
            name: "gateway".to_string(),
            status: CheckStatus::Pass,
            message: format!("credential configured, models {}", config.gemini.chat_model),
            duration: start.elapsed(),
        },
        Ok(HealthStatus::Degraded(msg)) => CheckResult {
            name: "gateway".to_string(),
            status: CheckStatus::Warn,
            message: msg,
            duration: start.elapsed(),
        },
        Ok(HealthStatus::Unhealthy(msg)) => CheckResult {
            name: "gateway".to_string(),
            status: CheckStatus::Fail,
            message: msg,
            duration: start.elapsed(),
        },
        Err(e) => CheckResult {
            name: "gateway".to_string(),
            status: CheckStatus::Fail,
            message: e.to_string(),
            duration: start.elapsed(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_config::load_and_validate_str;

    #[tokio::test]
    async fn record_store_check_passes_on_a_temp_database() {
        let dir = tempfile::tempdir().unwrap();
        let toml = format!(
            "[storage]\ndatabase_path = \"{}\"\n",
            dir.path().join("doctor.db").display()
        );
        let config = load_and_validate_str(&toml).unwrap();

        let result = check_record_store(&config).await;
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[tokio::test]
    async fn gateway_check_warns_without_a_key() {
        let config = load_and_validate_str("").unwrap();
        let result = check_gateway_credential(&config).await;
        assert_eq!(result.status, CheckStatus::Warn);
    }

    #[tokio::test]
    async fn gateway_check_passes_with_a_key() {
        let config = load_and_validate_str("[gemini]\napi_key = \"k\"\n").unwrap();
        let result = check_gateway_credential(&config).await;
        assert_eq!(result.status, CheckStatus::Pass);
    }
}
