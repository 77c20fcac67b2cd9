//! Conversions between the Xs values and `chrono`.
//!
//! Going to chrono only succeeds for values precise enough to name a single
//! date, time or instant. Coming from chrono always yields full precision;
//! nanoseconds are written with trailing zeros trimmed.

use super::time::split_fraction;
use super::{XsDate, XsDateTime, XsTime, XsTimeZone};
use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc};

impl XsDate {
    /// The calendar day, if the date has day precision and the day exists.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let (month, day) = (self.month()?, self.day()?);
        NaiveDate::from_ymd_opt(self.year(), u32::from(month), u32::from(day))
    }
}

impl TryFrom<NaiveDate> for XsDate {
    type Error = Error;

    fn try_from(date: NaiveDate) -> Result<Self> {
        XsDate::ymd(date.year(), date.month() as u8, date.day() as u8)
    }
}

impl XsTime {
    /// Missing seconds read as `00`; fractions beyond nanoseconds are truncated.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_nano_opt(
            u32::from(self.hour()),
            u32::from(self.minute()),
            u32::from(self.second().unwrap_or(0)),
            self.nanoseconds(),
        )
    }
}

impl TryFrom<NaiveTime> for XsTime {
    type Error = Error;

    fn try_from(time: NaiveTime) -> Result<Self> {
        let nanos = time.nanosecond();
        if nanos >= 1_000_000_000 {
            return Err(Error::out_of_range(
                "second",
                60,
                "leap seconds are not representable",
            ));
        }
        let (fraction, padding) = if nanos == 0 {
            (None, None)
        } else {
            let digits = format!("{:09}", nanos);
            let (fraction, padding) = split_fraction(digits.trim_end_matches('0'))?;
            (Some(fraction), Some(padding))
        };
        XsTime::new(
            time.hour() as u8,
            time.minute() as u8,
            Some(time.second() as u8),
            fraction,
            padding,
        )
    }
}

impl XsTimeZone {
    pub fn to_fixed_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.offset_seconds())
    }
}

impl TryFrom<FixedOffset> for XsTimeZone {
    type Error = Error;

    /// Always numeric; a zero offset becomes `+00:00`, not `Z`.
    fn try_from(offset: FixedOffset) -> Result<Self> {
        let seconds = offset.local_minus_utc();
        if seconds % 60 != 0 {
            return Err(Error::out_of_range(
                "offset",
                seconds,
                "offset must be a whole number of minutes",
            ));
        }
        let minutes = seconds.unsigned_abs() / 60;
        XsTimeZone::offset((minutes / 60) as u8, (minutes % 60) as u8, seconds >= 0)
    }
}

impl XsDateTime {
    /// The instant named by this value, when it has a time and zone.
    pub fn to_chrono(&self) -> Option<DateTime<FixedOffset>> {
        let date = self.date().to_naive_date()?;
        let time = self.time()?.to_naive_time()?;
        let offset = self.time_zone()?.to_fixed_offset()?;
        date.and_time(time).and_local_timezone(offset).single()
    }
}

impl TryFrom<DateTime<FixedOffset>> for XsDateTime {
    type Error = Error;

    fn try_from(value: DateTime<FixedOffset>) -> Result<Self> {
        let local = value.naive_local();
        XsDateTime::with_time(
            XsDate::try_from(local.date())?,
            XsTime::try_from(local.time())?,
            XsTimeZone::try_from(*value.offset())?,
        )
    }
}

impl TryFrom<DateTime<Utc>> for XsDateTime {
    type Error = Error;

    /// UTC values are written with the `Z` marker.
    fn try_from(value: DateTime<Utc>) -> Result<Self> {
        let naive = value.naive_utc();
        XsDateTime::with_time(
            XsDate::try_from(naive.date())?,
            XsTime::try_from(naive.time())?,
            XsTimeZone::UTC,
        )
    }
}
