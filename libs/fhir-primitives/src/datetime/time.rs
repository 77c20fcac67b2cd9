use super::scan::Scanner;
use crate::config::ParseConfig;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Wall-clock time `HH:MM[:SS[.fraction]]`.
///
/// The fractional part is kept as the integer written after the `.` plus
/// the number of leading zeros in front of it, so `.000120` is fraction
/// `120` with padding `3`. Trailing zeros are part of the integer and
/// survive a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XsTime {
    hour: u8,
    minute: u8,
    second: Option<u8>,
    fraction_of_second: Option<u64>,
    fraction_padding: Option<u32>,
}

impl XsTime {
    pub const TYPE_NAME: &'static str = "time";

    /// Builds a time. A padding of zero is the same as no padding.
    pub fn new(
        hour: u8,
        minute: u8,
        second: Option<u8>,
        fraction_of_second: Option<u64>,
        fraction_padding: Option<u32>,
    ) -> Result<Self> {
        if hour > 23 {
            return Err(Error::out_of_range("hour", hour, "expected 0..=23"));
        }
        if minute > 59 {
            return Err(Error::out_of_range("minute", minute, "expected 0..=59"));
        }
        if let Some(second) = second {
            if second > 59 {
                return Err(Error::out_of_range("second", second, "expected 0..=59"));
            }
        }
        if fraction_of_second.is_some() && second.is_none() {
            return Err(Error::inconsistent(
                "fraction of second given without seconds",
            ));
        }
        if fraction_padding.is_some() && fraction_of_second.is_none() {
            return Err(Error::inconsistent(
                "fraction padding given without a fraction of second",
            ));
        }
        Ok(Self {
            hour,
            minute,
            second,
            fraction_of_second,
            fraction_padding: fraction_padding.filter(|padding| *padding > 0),
        })
    }

    pub fn hm(hour: u8, minute: u8) -> Result<Self> {
        Self::new(hour, minute, None, None, None)
    }

    pub fn hms(hour: u8, minute: u8, second: u8) -> Result<Self> {
        Self::new(hour, minute, Some(second), None, None)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> Option<u8> {
        self.second
    }

    pub fn fraction_of_second(&self) -> Option<u64> {
        self.fraction_of_second
    }

    pub fn fraction_padding(&self) -> Option<u32> {
        self.fraction_padding
    }

    /// The fractional digits as written, without the leading `.`.
    pub fn fraction_digits(&self) -> Option<String> {
        self.fraction_of_second.map(|fraction| {
            let padding = self.fraction_padding.unwrap_or(0) as usize;
            format!("{}{}", "0".repeat(padding), fraction)
        })
    }

    /// Fraction truncated to nanoseconds.
    pub fn nanoseconds(&self) -> u32 {
        let Some(digits) = self.fraction_digits() else {
            return 0;
        };
        digits
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(9)
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'))
    }

    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, &ParseConfig::default())
    }

    pub fn parse_with(input: &str, config: &ParseConfig) -> Result<Self> {
        let mut scanner = Scanner::new(Self::TYPE_NAME, input);
        let time = Self::scan(&mut scanner, config)?;
        scanner.finish()?;
        Ok(time)
    }

    pub(crate) fn scan(scanner: &mut Scanner<'_>, config: &ParseConfig) -> Result<Self> {
        let hour = scanner.fixed_digits(2, "hour")? as u8;
        scanner.expect(b':', "between hour and minute")?;
        let minute = scanner.fixed_digits(2, "minute")? as u8;

        if !scanner.eat(b':') {
            if config.require_seconds {
                return Err(scanner.malformed("seconds are required"));
            }
            return Self::hm(hour, minute);
        }
        let second = scanner.fixed_digits(2, "second")? as u8;

        if !scanner.eat(b'.') {
            return Self::hms(hour, minute, second);
        }
        let digits = scanner.digit_run();
        if digits.is_empty() {
            return Err(scanner.malformed("expected digits after '.'"));
        }
        let (fraction, padding) = split_fraction(digits)?;
        Self::new(hour, minute, Some(second), Some(fraction), Some(padding))
    }
}

/// Splits fractional digits into the significant integer and the count of
/// leading zeros. An all-zero run keeps one zero as the integer.
pub(crate) fn split_fraction(digits: &str) -> Result<(u64, u32)> {
    let significant = digits.trim_start_matches('0');
    let significant = if significant.is_empty() { "0" } else { significant };
    let padding = (digits.len() - significant.len()) as u32;
    let fraction = significant.parse::<u64>().map_err(|_| {
        Error::out_of_range(
            "fractionOfSecond",
            digits,
            "more significant digits than supported",
        )
    })?;
    Ok((fraction, padding))
}

impl fmt::Display for XsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)?;
        if let Some(second) = self.second {
            write!(f, ":{:02}", second)?;
        }
        if let Some(digits) = self.fraction_digits() {
            write!(f, ".{}", digits)?;
        }
        Ok(())
    }
}

impl FromStr for XsTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
