//! `fhir-primitive`: decode single FHIR primitive values or check a file of them.
//!
//! Usage:
//!   fhir-primitive decode dateTime 2021-01-12T12:12:50+01:00
//!   fhir-primitive --calendar-days check values.tsv

mod check;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ferrum_primitives::{DayOfMonthPolicy, ParseConfig, PrimitiveKind};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(name = "fhir-primitive", version)]
#[clap(about = "Validate FHIR primitive values and print their canonical encoding")]
struct Cli {
    /// YAML parse configuration (dayOfMonth, requireSeconds)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Reject days that do not exist in their month
    #[clap(long, global = true)]
    calendar_days: bool,

    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[clap(long, global = true, default_value = "warn")]
    log_level: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode one value and print its canonical JSON token
    Decode {
        /// FHIR type name, e.g. date, positiveInt
        type_name: String,
        /// The value; JSON for numbers and booleans, plain text for temporal types
        value: String,
    },
    /// Check a file of `TYPE<TAB>VALUE` lines
    Check {
        /// Input file; `#` starts a comment line
        file: PathBuf,
    },
}

impl Cli {
    fn parse_config(&self) -> Result<ParseConfig> {
        let config = match &self.config {
            Some(path) => ParseConfig::from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ParseConfig::default(),
        };
        Ok(if self.calendar_days {
            config.with_day_of_month(DayOfMonthPolicy::Calendar)
        } else {
            config
        })
    }
}

/// Turns command-line text into the JSON token a resource would carry.
///
/// Temporal values are strings on the wire, so their text is taken as is
/// unless it is already a quoted JSON string. Text with surrounding
/// whitespace stays a string so the decoder rejects it.
pub(crate) fn token_for(kind: PrimitiveKind, raw: &str) -> Value {
    if raw.trim() != raw {
        return Value::String(raw.to_string());
    }
    match kind {
        PrimitiveKind::Date
        | PrimitiveKind::Time
        | PrimitiveKind::DateTime
        | PrimitiveKind::Instant => match serde_json::from_str::<Value>(raw) {
            Ok(token @ Value::String(_)) => token,
            _ => Value::String(raw.to_string()),
        },
        _ => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

fn decode(type_name: &str, raw: &str, config: &ParseConfig) -> Result<Value> {
    let kind: PrimitiveKind = type_name.parse()?;
    let value = ferrum_primitives::decode_named_with(type_name, &token_for(kind, raw), config)
        .with_context(|| format!("Invalid {}", kind))?;
    Ok(value.encode())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let config = cli.parse_config()?;
    tracing::debug!(?config, "parse configuration");

    match &cli.command {
        Command::Decode { type_name, value } => {
            let token = decode(type_name, value, &config)?;
            println!("{}", token);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file } => {
            let reader = File::open(file)
                .map(BufReader::new)
                .with_context(|| format!("Failed to open {}", file.display()))?;
            let summary = check::check_lines(reader, io::stdout().lock(), &config)?;
            tracing::info!(checked = summary.checked, failed = summary.failed, "check finished");
            Ok(if summary.failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decode_with_global_flags() {
        let cli = Cli::try_parse_from([
            "fhir-primitive",
            "decode",
            "date",
            "2021-02-30",
            "--calendar-days",
        ])
        .unwrap();
        assert!(cli.calendar_days);
        assert_eq!(cli.log_level, "warn");
        assert!(matches!(
            &cli.command,
            Command::Decode { type_name, value } if type_name == "date" && value == "2021-02-30"
        ));
        assert_eq!(
            cli.parse_config().unwrap().day_of_month,
            DayOfMonthPolicy::Calendar
        );
    }

    #[test]
    fn parses_check_with_config_path() {
        let cli = Cli::try_parse_from([
            "fhir-primitive",
            "--config",
            "strict.yaml",
            "--log-level",
            "debug",
            "check",
            "values.tsv",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("strict.yaml")));
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Command::Check { .. }));
    }

    #[test]
    fn rejects_missing_arguments() {
        assert!(Cli::try_parse_from(["fhir-primitive", "decode", "date"]).is_err());
        assert!(Cli::try_parse_from(["fhir-primitive"]).is_err());
    }

    #[test]
    fn temporal_text_is_always_a_string_token() {
        assert_eq!(token_for(PrimitiveKind::Date, "2021"), Value::String("2021".into()));
        assert_eq!(
            token_for(PrimitiveKind::Date, "\"2021-01\""),
            Value::String("2021-01".into())
        );
        assert_eq!(token_for(PrimitiveKind::Integer, "-17"), serde_json::json!(-17));
        assert_eq!(token_for(PrimitiveKind::Boolean, "yes"), Value::String("yes".into()));
    }

    #[test]
    fn surrounding_whitespace_is_rejected() {
        let config = ParseConfig::default();
        assert_eq!(token_for(PrimitiveKind::Integer, " 5"), Value::String(" 5".into()));
        assert!(decode("integer", " 5", &config).is_err());
        assert!(decode("decimal", "0.5 ", &config).is_err());
        assert!(decode("date", "2021 ", &config).is_err());
        assert!(decode("date", "\" 2021\"", &config).is_err());
    }

    #[test]
    fn decode_prints_canonical_tokens() {
        let config = ParseConfig::default();
        assert_eq!(
            decode("decimal", "0.010", &config).unwrap().to_string(),
            "0.010"
        );
        assert_eq!(
            decode("dateTime", "2021-01-12T12:12:50+01:00", &config).unwrap(),
            Value::String("2021-01-12T12:12:50+01:00".into())
        );
        assert!(decode("positiveInt", "0", &config).is_err());
        assert!(decode("uri", "http://example.org", &config).is_err());
    }
}
