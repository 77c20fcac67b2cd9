use super::FhirPrimitive;
use crate::config::ParseConfig;
use crate::error::{Error, Result};
use serde_json::Value;
use std::str::FromStr;

primitive_type! {
    /// FHIR `boolean`: the JSON literals `true` and `false`.
    Boolean(bool) = "boolean"
}

impl Boolean {
    pub fn new(value: bool) -> Self {
        Self {
            value,
            element: Default::default(),
        }
    }

    fn decode_token(token: &Value, _config: &ParseConfig) -> Result<bool> {
        token.as_bool().ok_or_else(|| {
            Error::malformed(Self::TYPE_NAME, token.to_string(), "expected true or false")
        })
    }

    fn encode_token(value: &bool) -> Value {
        Value::Bool(*value)
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl FromStr for Boolean {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "true" => Ok(Self::new(true)),
            "false" => Ok(Self::new(false)),
            _ => Err(Error::malformed(Self::TYPE_NAME, s, "expected true or false")),
        }
    }
}
