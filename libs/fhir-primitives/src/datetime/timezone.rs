use super::scan::Scanner;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// UTC offset of a time: either the literal `Z` or `±HH:MM`.
///
/// `Z` and `+00:00` denote the same instant but are kept apart so that
/// the literal written on the wire is reproduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XsTimeZone {
    hour_offset: u8,
    minute_offset: u8,
    positive_offset: bool,
    zero_offset_gmt: bool,
}

impl XsTimeZone {
    pub const TYPE_NAME: &'static str = "timezone";

    /// The `Z` marker.
    pub const UTC: XsTimeZone = XsTimeZone {
        hour_offset: 0,
        minute_offset: 0,
        positive_offset: true,
        zero_offset_gmt: true,
    };

    pub fn new(
        hour_offset: u8,
        minute_offset: u8,
        positive_offset: bool,
        zero_offset_gmt: bool,
    ) -> Result<Self> {
        if hour_offset > 23 {
            return Err(Error::out_of_range(
                "hourOffset",
                hour_offset,
                "expected 0..=23",
            ));
        }
        if minute_offset > 59 {
            return Err(Error::out_of_range(
                "minuteOffset",
                minute_offset,
                "expected 0..=59",
            ));
        }
        if zero_offset_gmt && (hour_offset != 0 || minute_offset != 0 || !positive_offset) {
            return Err(Error::inconsistent(format!(
                "zero offset GMT marker with offset {}{:02}:{:02}",
                if positive_offset { '+' } else { '-' },
                hour_offset,
                minute_offset
            )));
        }
        Ok(Self {
            hour_offset,
            minute_offset,
            positive_offset,
            zero_offset_gmt,
        })
    }

    /// A numeric offset, east of UTC when `positive_offset` is true.
    pub fn offset(hour_offset: u8, minute_offset: u8, positive_offset: bool) -> Result<Self> {
        Self::new(hour_offset, minute_offset, positive_offset, false)
    }

    pub fn hour_offset(&self) -> u8 {
        self.hour_offset
    }

    pub fn minute_offset(&self) -> u8 {
        self.minute_offset
    }

    pub fn is_positive_offset(&self) -> bool {
        self.positive_offset
    }

    pub fn is_zero_offset_gmt(&self) -> bool {
        self.zero_offset_gmt
    }

    /// Signed offset in seconds east of UTC.
    pub fn offset_seconds(&self) -> i32 {
        let magnitude = i32::from(self.hour_offset) * 3600 + i32::from(self.minute_offset) * 60;
        if self.positive_offset {
            magnitude
        } else {
            -magnitude
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let mut scanner = Scanner::new(Self::TYPE_NAME, input);
        let zone = Self::scan(&mut scanner)?;
        scanner.finish()?;
        Ok(zone)
    }

    pub(crate) fn scan(scanner: &mut Scanner<'_>) -> Result<Self> {
        if scanner.eat(b'Z') {
            return Ok(Self::UTC);
        }
        let positive = if scanner.eat(b'+') {
            true
        } else if scanner.eat(b'-') {
            false
        } else {
            return Err(scanner.malformed("expected 'Z', '+' or '-' for the timezone"));
        };
        let hours = scanner.fixed_digits(2, "offset hours")?;
        scanner.expect(b':', "between offset hours and minutes")?;
        let minutes = scanner.fixed_digits(2, "offset minutes")?;
        Self::offset(hours as u8, minutes as u8, positive)
    }
}

impl fmt::Display for XsTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.zero_offset_gmt {
            return f.write_str("Z");
        }
        write!(
            f,
            "{}{:02}:{:02}",
            if self.positive_offset { '+' } else { '-' },
            self.hour_offset,
            self.minute_offset
        )
    }
}

impl FromStr for XsTimeZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn gmt_marker_encodes_as_z() {
        let zone = XsTimeZone::new(0, 0, true, true).unwrap();
        assert_eq!(zone.to_string(), "Z");
        assert_eq!(zone, XsTimeZone::UTC);
    }

    #[test]
    fn numeric_zero_offset_is_not_z() {
        let zone = XsTimeZone::new(0, 0, true, false).unwrap();
        assert_eq!(zone.to_string(), "+00:00");
        assert_ne!(zone, XsTimeZone::UTC);
        assert_eq!(zone.offset_seconds(), XsTimeZone::UTC.offset_seconds());
    }

    #[test]
    fn negative_offsets() {
        let zone = XsTimeZone::offset(5, 30, false).unwrap();
        assert_eq!(zone.to_string(), "-05:30");
        assert_eq!(zone.offset_seconds(), -(5 * 3600 + 30 * 60));
        assert_eq!(XsTimeZone::parse("-05:30").unwrap(), zone);
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        assert_eq!(
            XsTimeZone::new(24, 0, true, false).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            XsTimeZone::new(1, 60, true, false).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            XsTimeZone::parse("+24:00").unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn gmt_marker_requires_zero_positive_offset() {
        for (h, m, positive) in [(1, 0, true), (0, 30, true), (0, 0, false)] {
            let err = XsTimeZone::new(h, m, positive, true).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Inconsistent);
        }
    }

    #[test]
    fn parse_round_trips() {
        for text in ["Z", "+00:00", "-00:00", "+01:00", "-11:45", "+23:59"] {
            assert_eq!(XsTimeZone::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "z", "UTC", "+1:00", "+0100", "+01:0", "01:00", "+01:00Z", "GMT"] {
            let err = XsTimeZone::parse(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Malformed, "{text}");
        }
    }
}
