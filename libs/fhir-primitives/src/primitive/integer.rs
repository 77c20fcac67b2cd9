use super::{integer_token, number_from_text, FhirPrimitive};
use crate::config::ParseConfig;
use crate::error::{Error, Result};
use serde_json::Value;
use std::str::FromStr;

/// Upper bound shared by `positiveInt` and `unsignedInt`.
const MAX_BOUNDED: i64 = i32::MAX as i64;

primitive_type! {
    /// FHIR `integer`: signed 32-bit.
    Integer(i32) = "integer"
}

primitive_type! {
    /// FHIR `positiveInt`: 1..=2147483647.
    PositiveInteger(u32) = "positiveInt"
}

primitive_type! {
    /// FHIR `unsignedInt`: 0..=2147483647.
    UnsignedInteger(u32) = "unsignedInt"
}

impl Integer {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            element: Default::default(),
        }
    }

    fn decode_token(token: &Value, _config: &ParseConfig) -> Result<i32> {
        let value = integer_token(Self::TYPE_NAME, token)?;
        i32::try_from(value)
            .map_err(|_| Error::out_of_range(Self::TYPE_NAME, value, "expected a 32-bit integer"))
    }

    fn encode_token(value: &i32) -> Value {
        Value::from(*value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl PositiveInteger {
    pub fn new(value: i64) -> Result<Self> {
        Ok(Self {
            value: Self::check(value)?,
            element: Default::default(),
        })
    }

    fn check(value: i64) -> Result<u32> {
        if !(1..=MAX_BOUNDED).contains(&value) {
            return Err(Error::out_of_range(
                Self::TYPE_NAME,
                value,
                "expected 1..=2147483647",
            ));
        }
        Ok(value as u32)
    }

    fn decode_token(token: &Value, _config: &ParseConfig) -> Result<u32> {
        Self::check(integer_token(Self::TYPE_NAME, token)?)
    }

    fn encode_token(value: &u32) -> Value {
        Value::from(*value)
    }
}

impl UnsignedInteger {
    pub fn new(value: i64) -> Result<Self> {
        Ok(Self {
            value: Self::check(value)?,
            element: Default::default(),
        })
    }

    fn check(value: i64) -> Result<u32> {
        if !(0..=MAX_BOUNDED).contains(&value) {
            return Err(Error::out_of_range(
                Self::TYPE_NAME,
                value,
                "expected 0..=2147483647",
            ));
        }
        Ok(value as u32)
    }

    fn decode_token(token: &Value, _config: &ParseConfig) -> Result<u32> {
        Self::check(integer_token(Self::TYPE_NAME, token)?)
    }

    fn encode_token(value: &u32) -> Value {
        Value::from(*value)
    }
}

impl TryFrom<i64> for PositiveInteger {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<i64> for UnsignedInteger {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Integer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(&number_from_text(Self::TYPE_NAME, s)?)
    }
}

impl FromStr for PositiveInteger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(&number_from_text(Self::TYPE_NAME, s)?)
    }
}

impl FromStr for UnsignedInteger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(&number_from_text(Self::TYPE_NAME, s)?)
    }
}
