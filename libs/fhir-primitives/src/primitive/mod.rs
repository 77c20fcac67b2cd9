//! FHIR primitive types and their JSON token codec.
//!
//! Each type wraps a validated value plus its [`Element`] metadata and
//! implements [`FhirPrimitive`]: `decode` reads a raw JSON token and
//! re-validates it, `encode` writes the canonical token. Serde
//! `Serialize`/`Deserialize` route through the same pair, so a malformed
//! primitive fails the enclosing resource parse.

use crate::config::ParseConfig;
use crate::element::Element;
use crate::error::{Error, Result};
use serde_json::Value;

pub trait FhirPrimitive: Sized {
    /// FHIR type name, e.g. `positiveInt`.
    const TYPE_NAME: &'static str;

    fn decode_with(token: &Value, config: &ParseConfig) -> Result<Self>;

    fn encode(&self) -> Value;

    fn element(&self) -> &Element;

    fn element_mut(&mut self) -> &mut Element;

    fn decode(token: &Value) -> Result<Self> {
        Self::decode_with(token, &ParseConfig::default())
    }
}

/// Declares a primitive struct over `$value` and wires it into
/// [`FhirPrimitive`], serde and `Display`. The type itself supplies
/// `decode_token` and `encode_token`. Defined ahead of the submodules so
/// they see it.
macro_rules! primitive_type {
    ($(#[$meta:meta])* $name:ident($value:ty) = $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            value: $value,
            element: $crate::element::Element,
        }

        impl $name {
            pub fn value(&self) -> &$value {
                &self.value
            }

            pub fn into_value(self) -> $value {
                self.value
            }

            pub fn with_element(mut self, element: $crate::element::Element) -> Self {
                self.element = element;
                self
            }
        }

        impl $crate::primitive::FhirPrimitive for $name {
            const TYPE_NAME: &'static str = $type_name;

            fn decode_with(
                token: &serde_json::Value,
                config: &$crate::config::ParseConfig,
            ) -> $crate::error::Result<Self> {
                Ok(Self {
                    value: Self::decode_token(token, config)?,
                    element: $crate::element::Element::default(),
                })
            }

            fn encode(&self) -> serde_json::Value {
                Self::encode_token(&self.value)
            }

            fn element(&self) -> &$crate::element::Element {
                &self.element
            }

            fn element_mut(&mut self) -> &mut $crate::element::Element {
                &mut self.element
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.value, f)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(
                    &$crate::primitive::FhirPrimitive::encode(self),
                    serializer,
                )
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let token = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::primitive::FhirPrimitive>::decode(&token)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

mod boolean;
mod decimal;
mod integer;
mod temporal;

pub use boolean::Boolean;
pub use decimal::Decimal;
pub use integer::{Integer, PositiveInteger, UnsignedInteger};
pub use temporal::{Date, DateTime, Instant, Time};

pub(crate) fn string_token<'a>(type_name: &'static str, token: &'a Value) -> Result<&'a str> {
    token
        .as_str()
        .ok_or_else(|| Error::malformed(type_name, token.to_string(), "expected a JSON string"))
}

/// Reads an integral JSON number. Integral text too large for 64 bits is
/// out of range; fractions and exponents are malformed.
pub(crate) fn integer_token(type_name: &'static str, token: &Value) -> Result<i64> {
    let Value::Number(number) = token else {
        return Err(Error::malformed(
            type_name,
            token.to_string(),
            "expected a JSON number",
        ));
    };
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    let text = number.to_string();
    let digits = text.strip_prefix('-').unwrap_or(&text);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Err(Error::out_of_range(type_name, text, "exceeds 64-bit range"))
    } else {
        Err(Error::malformed(type_name, text, "expected an integral number"))
    }
}

/// Text form of a numeric primitive (as found in XML `value` attributes):
/// exactly one JSON number, no surrounding whitespace.
pub(crate) fn number_from_text(type_name: &'static str, text: &str) -> Result<Value> {
    let malformed = || Error::malformed(type_name, text, "expected a number");
    if text.trim() != text {
        return Err(malformed());
    }
    match serde_json::from_str::<Value>(text) {
        Ok(number @ Value::Number(_)) => Ok(number),
        _ => Err(malformed()),
    }
}
