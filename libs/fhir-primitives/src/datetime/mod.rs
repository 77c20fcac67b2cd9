//! Partial dates, times and timezone offsets in the FHIR/XML Schema grammar.
//!
//! | Type | Wire form |
//! |---|---|
//! | [`XsDate`] | `YYYY`, `YYYY-MM`, `YYYY-MM-DD` |
//! | [`XsTime`] | `HH:MM[:SS[.fraction]]` |
//! | [`XsTimeZone`] | `Z` or `±HH:MM` |
//! | [`XsDateTime`] | `<date>[T<time><timezone>]` |
//!
//! All values are immutable and validated on construction; `Display`
//! produces the wire form and `parse`/`FromStr` is its inverse.

mod chrono_interop;
mod date;
mod date_time;
mod scan;
mod time;
mod timezone;

pub use date::XsDate;
pub use date_time::XsDateTime;
pub use time::XsTime;
pub use timezone::XsTimeZone;
