use super::{string_token, FhirPrimitive};
use crate::config::ParseConfig;
use crate::datetime::{XsDate, XsDateTime, XsTime};
use crate::error::{Error, Result};
use serde_json::Value;
use std::str::FromStr;

primitive_type! {
    /// FHIR `date`: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, no time of day.
    Date(XsDate) = "date"
}

primitive_type! {
    /// FHIR `time`: a time of day without date or timezone.
    Time(XsTime) = "time"
}

primitive_type! {
    /// FHIR `dateTime`: a date of any precision, optionally with a time
    /// and timezone.
    DateTime(XsDateTime) = "dateTime"
}

primitive_type! {
    /// FHIR `instant`: a `dateTime` pinned to the second, always with a
    /// timezone.
    Instant(XsDateTime) = "instant"
}

impl Date {
    pub fn new(value: XsDate) -> Self {
        Self {
            value,
            element: Default::default(),
        }
    }

    fn decode_token(token: &Value, config: &ParseConfig) -> Result<XsDate> {
        XsDate::parse_with(string_token(Self::TYPE_NAME, token)?, config)
    }

    fn encode_token(value: &XsDate) -> Value {
        Value::String(value.to_string())
    }
}

impl Time {
    pub fn new(value: XsTime) -> Self {
        Self {
            value,
            element: Default::default(),
        }
    }

    fn decode_token(token: &Value, config: &ParseConfig) -> Result<XsTime> {
        XsTime::parse_with(string_token(Self::TYPE_NAME, token)?, config)
    }

    fn encode_token(value: &XsTime) -> Value {
        Value::String(value.to_string())
    }
}

impl DateTime {
    pub fn new(value: XsDateTime) -> Self {
        Self {
            value,
            element: Default::default(),
        }
    }

    fn decode_token(token: &Value, config: &ParseConfig) -> Result<XsDateTime> {
        XsDateTime::parse_with(string_token(Self::TYPE_NAME, token)?, config)
    }

    fn encode_token(value: &XsDateTime) -> Value {
        Value::String(value.to_string())
    }
}

impl Instant {
    pub fn new(value: XsDateTime) -> Result<Self> {
        Self::check(&value)?;
        Ok(Self {
            value,
            element: Default::default(),
        })
    }

    fn check(value: &XsDateTime) -> Result<()> {
        let has_seconds = value.time().is_some_and(|time| time.second().is_some());
        if value.date().has_day() && has_seconds && value.time_zone().is_some() {
            Ok(())
        } else {
            Err(Error::malformed(
                Self::TYPE_NAME,
                value.to_string(),
                "an instant needs a full date, a time with seconds and a timezone",
            ))
        }
    }

    fn decode_token(token: &Value, config: &ParseConfig) -> Result<XsDateTime> {
        let value = XsDateTime::parse_with(string_token(Self::TYPE_NAME, token)?, config)?;
        Self::check(&value)?;
        Ok(value)
    }

    fn encode_token(value: &XsDateTime) -> Value {
        Value::String(value.to_string())
    }
}

impl From<XsDate> for Date {
    fn from(value: XsDate) -> Self {
        Self::new(value)
    }
}

impl From<XsTime> for Time {
    fn from(value: XsTime) -> Self {
        Self::new(value)
    }
}

impl From<XsDateTime> for DateTime {
    fn from(value: XsDateTime) -> Self {
        Self::new(value)
    }
}

impl From<Instant> for DateTime {
    fn from(instant: Instant) -> Self {
        Self {
            value: instant.value,
            element: instant.element,
        }
    }
}

impl TryFrom<XsDateTime> for Instant {
    type Error = Error;

    fn try_from(value: XsDateTime) -> Result<Self> {
        Self::new(value)
    }
}

macro_rules! from_str_via_token {
    ($($name:ident),*) => {$(
        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::decode(&Value::String(s.to_owned()))
            }
        }
    )*};
}

from_str_via_token!(Date, Time, DateTime, Instant);
