use super::{number_from_text, FhirPrimitive};
use crate::config::ParseConfig;
use crate::error::{Error, Result};
use rust_decimal::Decimal as RustDecimal;
use serde_json::Value;
use std::str::FromStr;

primitive_type! {
    /// FHIR `decimal`.
    ///
    /// Held as a scaled integer and read from the exact numeric text, so the
    /// number of decimal places written on the wire survives a round trip
    /// (`0.010` stays `0.010`). Values needing more than 28 significant
    /// digits are rejected rather than rounded.
    Decimal(RustDecimal) = "decimal"
}

impl Decimal {
    pub fn new(value: RustDecimal) -> Self {
        Self {
            value,
            element: Default::default(),
        }
    }

    /// Digits after the decimal point, as written.
    pub fn scale(&self) -> u32 {
        self.value.scale()
    }

    fn decode_token(token: &Value, _config: &ParseConfig) -> Result<RustDecimal> {
        let Value::Number(number) = token else {
            return Err(Error::malformed(
                Self::TYPE_NAME,
                token.to_string(),
                "expected a JSON number",
            ));
        };
        let text = number.to_string();
        let parsed = if text.contains(['e', 'E']) {
            RustDecimal::from_scientific(&text)
        } else {
            RustDecimal::from_str_exact(&text)
        };
        parsed.map_err(|_| {
            Error::out_of_range(
                Self::TYPE_NAME,
                text,
                "not representable in 28 significant digits",
            )
        })
    }

    fn encode_token(value: &RustDecimal) -> Value {
        let text = value.to_string();
        // Decimal's Display is plain JSON number syntax.
        match serde_json::from_str::<Value>(&text) {
            Ok(number @ Value::Number(_)) => number,
            _ => Value::String(text),
        }
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Self::new(value)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(&number_from_text(Self::TYPE_NAME, s)?)
    }
}
