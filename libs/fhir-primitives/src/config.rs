//! Parse configuration
//!
//! The defaults accept exactly the grammar described by the wire tables:
//! day-of-month is only range checked (1..=31) and times may omit seconds.
//! Stricter FHIR profiles can turn on calendar validation and mandatory
//! seconds.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the day of a full date is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayOfMonthPolicy {
    /// Day must be in 1..=31, regardless of month (`2021-02-30` is accepted).
    #[default]
    Permissive,
    /// Day must exist in the proleptic Gregorian calendar.
    Calendar,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseConfig {
    pub day_of_month: DayOfMonthPolicy,
    /// Reject `HH:MM` times; FHIR `time`, `dateTime` and `instant` require seconds.
    pub require_seconds: bool,
}

impl ParseConfig {
    /// Strict FHIR grammar: calendar days and mandatory seconds.
    pub fn strict() -> Self {
        Self {
            day_of_month: DayOfMonthPolicy::Calendar,
            require_seconds: true,
        }
    }

    pub fn with_day_of_month(mut self, policy: DayOfMonthPolicy) -> Self {
        self.day_of_month = policy;
        self
    }

    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
