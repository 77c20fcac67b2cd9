//! FHIR primitive values with strict lexical validation.
//!
//! - [`datetime`]: XML Schema style partial dates, times and timezones
//!   (`2017`, `2017-11`, `2017-11-29T14:03:00.050+01:00`) that remember the
//!   precision they were written with.
//! - [`primitive`]: the FHIR `boolean`, `integer`, `positiveInt`,
//!   `unsignedInt`, `decimal`, `date`, `time`, `dateTime` and `instant`
//!   types, each decoded from and encoded to its JSON token.
//! - [`codec`]: per-field helpers for the `name` / `_name` split used by
//!   FHIR JSON.
//!
//! Every constructor and decoder re-validates, so a value that exists is a
//! valid one.
//!
//! ```
//! use ferrum_primitives::{DateTime, FhirPrimitive, XsDateTime};
//! use serde_json::json;
//!
//! let value = DateTime::decode(&json!("2017-11-29T14:03:00.050+01:00")).unwrap();
//! assert_eq!(value.value().time().and_then(|t| t.fraction_of_second()), Some(50));
//! assert_eq!(value.encode(), json!("2017-11-29T14:03:00.050+01:00"));
//!
//! assert!(XsDateTime::parse("2017-13").is_err());
//! ```

#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod datetime;
pub mod element;
pub mod error;
pub mod primitive;

pub use codec::{
    decode_named, decode_named_with, read_field, read_field_with, read_list, read_list_with,
    write_field, write_list, AnyPrimitive, PrimitiveKind,
};
pub use config::{DayOfMonthPolicy, ParseConfig};
pub use datetime::{XsDate, XsDateTime, XsTime, XsTimeZone};
pub use element::{Element, Extension};
pub use error::{Error, ErrorKind, Result};
pub use primitive::{
    Boolean, Date, DateTime, Decimal, FhirPrimitive, Instant, Integer, PositiveInteger, Time,
    UnsignedInteger,
};

pub use rust_decimal;
