//! Element metadata carried by every FHIR primitive.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `id` and `extension` of a primitive, written under `_field` in FHIR JSON.
///
/// Passthrough only: nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

impl Element {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            extension: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.extension.is_empty()
    }
}

/// A FHIR extension. Everything besides `url` (`valueString`, nested
/// `extension`, ...) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub url: String,

    #[serde(flatten)]
    pub content: Map<String, Value>,
}

impl Extension {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: Map::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.content.insert(key.into(), value);
        self
    }
}
