use super::scan::Scanner;
use super::{XsDate, XsTime, XsTimeZone};
use crate::config::ParseConfig;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// `<date>[T<time><timezone>]`.
///
/// A time is only meaningful with a timezone, so `time` and `time_zone`
/// are either both set or both absent. The date keeps whatever precision
/// it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XsDateTime {
    date: XsDate,
    time: Option<XsTime>,
    time_zone: Option<XsTimeZone>,
}

impl XsDateTime {
    pub const TYPE_NAME: &'static str = "dateTime";

    pub fn new(date: XsDate, time: Option<XsTime>, time_zone: Option<XsTimeZone>) -> Result<Self> {
        match (&time, &time_zone) {
            (Some(time), None) => {
                return Err(Error::inconsistent(format!(
                    "time {} given without a timezone",
                    time
                )))
            }
            (None, Some(zone)) => {
                return Err(Error::inconsistent(format!(
                    "timezone {} given without a time",
                    zone
                )))
            }
            _ => {}
        }
        Ok(Self {
            date,
            time,
            time_zone,
        })
    }

    /// A date without a time of day.
    pub fn date_only(date: XsDate) -> Self {
        Self {
            date,
            time: None,
            time_zone: None,
        }
    }

    pub fn with_time(date: XsDate, time: XsTime, time_zone: XsTimeZone) -> Result<Self> {
        Self::new(date, Some(time), Some(time_zone))
    }

    pub fn date(&self) -> &XsDate {
        &self.date
    }

    pub fn time(&self) -> Option<&XsTime> {
        self.time.as_ref()
    }

    pub fn time_zone(&self) -> Option<&XsTimeZone> {
        self.time_zone.as_ref()
    }

    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, &ParseConfig::default())
    }

    /// Splits at the `T`, hands each segment to its own parser and
    /// propagates their failures unchanged.
    pub fn parse_with(input: &str, config: &ParseConfig) -> Result<Self> {
        let mut scanner = Scanner::new(Self::TYPE_NAME, input);
        let date = XsDate::scan(&mut scanner, config)?;

        let time = if scanner.eat(b'T') {
            Some(XsTime::scan(&mut scanner, config)?)
        } else {
            None
        };
        let time_zone = match scanner.peek() {
            Some(b'Z' | b'+' | b'-') => Some(XsTimeZone::scan(&mut scanner)?),
            _ => None,
        };
        scanner.finish()?;

        Self::new(date, time, time_zone)
    }
}

impl From<XsDate> for XsDateTime {
    fn from(date: XsDate) -> Self {
        Self::date_only(date)
    }
}

impl fmt::Display for XsDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        if let Some(time) = &self.time {
            write!(f, "T{}", time)?;
        }
        if let Some(zone) = &self.time_zone {
            write!(f, "{}", zone)?;
        }
        Ok(())
    }
}

impl FromStr for XsDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
