use super::scan::Scanner;
use crate::config::{DayOfMonthPolicy, ParseConfig};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Partial calendar date: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
///
/// Precision is part of the value: `2021-01` and `2021-01-01` are
/// different dates and neither is ever widened into the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XsDate {
    year: i32,
    month: Option<u8>,
    day: Option<u8>,
}

impl XsDate {
    pub const TYPE_NAME: &'static str = "date";
    pub const MIN_YEAR: i32 = -9999;
    pub const MAX_YEAR: i32 = 9999;

    pub fn new(year: i32, month: Option<u8>, day: Option<u8>) -> Result<Self> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(Error::out_of_range("year", year, "expected -9999..=9999"));
        }
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(Error::out_of_range("month", month, "expected 1..=12"));
            }
        }
        if let Some(day) = day {
            if month.is_none() {
                return Err(Error::inconsistent(format!(
                    "day {} given without a month",
                    day
                )));
            }
            if !(1..=31).contains(&day) {
                return Err(Error::out_of_range("day", day, "expected 1..=31"));
            }
        }
        Ok(Self { year, month, day })
    }

    pub fn year_only(year: i32) -> Result<Self> {
        Self::new(year, None, None)
    }

    pub fn year_month(year: i32, month: u8) -> Result<Self> {
        Self::new(year, Some(month), None)
    }

    pub fn ymd(year: i32, month: u8, day: u8) -> Result<Self> {
        Self::new(year, Some(month), Some(day))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u8> {
        self.month
    }

    pub fn day(&self) -> Option<u8> {
        self.day
    }

    pub fn has_day(&self) -> bool {
        self.day.is_some()
    }

    /// Whether the day exists in the month it names. Partial dates are
    /// always calendar-valid.
    pub fn is_calendar_valid(&self) -> bool {
        match (self.month, self.day) {
            (Some(month), Some(day)) => {
                NaiveDate::from_ymd_opt(self.year, u32::from(month), u32::from(day)).is_some()
            }
            _ => true,
        }
    }

    /// Applies the configured day-of-month policy.
    pub fn validate_with(&self, config: &ParseConfig) -> Result<()> {
        if config.day_of_month == DayOfMonthPolicy::Calendar && !self.is_calendar_valid() {
            return Err(Error::out_of_range(
                "day",
                self,
                "day does not exist in this month",
            ));
        }
        Ok(())
    }

    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, &ParseConfig::default())
    }

    pub fn parse_with(input: &str, config: &ParseConfig) -> Result<Self> {
        let mut scanner = Scanner::new(Self::TYPE_NAME, input);
        let date = Self::scan(&mut scanner, config)?;
        scanner.finish()?;
        Ok(date)
    }

    /// Reads as many components as the text gives and no more.
    pub(crate) fn scan(scanner: &mut Scanner<'_>, config: &ParseConfig) -> Result<Self> {
        let negative = scanner.eat(b'-');
        let magnitude = scanner.fixed_digits(4, "year")? as i32;
        if negative && magnitude == 0 {
            return Err(scanner.malformed("year zero cannot be negative"));
        }
        let year = if negative { -magnitude } else { magnitude };

        let mut month = None;
        let mut day = None;
        if scanner.peek() == Some(b'-') && component_follows(scanner) {
            scanner.eat(b'-');
            month = Some(scanner.fixed_digits(2, "month")? as u8);
            if scanner.peek() == Some(b'-') && component_follows(scanner) {
                scanner.eat(b'-');
                day = Some(scanner.fixed_digits(2, "day")? as u8);
            }
        }

        let date = Self::new(year, month, day)?;
        date.validate_with(config)?;
        Ok(date)
    }
}

/// A `-` after the year or month starts another date component only when
/// a digit follows; otherwise it belongs to whatever comes next.
fn component_follows(scanner: &Scanner<'_>) -> bool {
    scanner.peek_at(1).is_some_and(|b| b.is_ascii_digit())
}

impl fmt::Display for XsDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            f.write_str("-")?;
        }
        write!(f, "{:04}", self.year.unsigned_abs())?;
        if let Some(month) = self.month {
            write!(f, "-{:02}", month)?;
        }
        if let Some(day) = self.day {
            write!(f, "-{:02}", day)?;
        }
        Ok(())
    }
}

impl FromStr for XsDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
