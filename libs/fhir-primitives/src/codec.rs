//! Field-level helpers for FHIR JSON's split primitive representation.
//!
//! A primitive field `birthDate` carries its value under `birthDate` and
//! its [`Element`] metadata under `_birthDate`. Repeating fields use two
//! aligned arrays, with `null` in `_name` where an item has no metadata.
//! Resource (de)serializers call these per field; nothing here knows about
//! resource structure.

use crate::config::ParseConfig;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::primitive::{
    Boolean, Date, DateTime, Decimal, FhirPrimitive, Instant, Integer, PositiveInteger, Time,
    UnsignedInteger,
};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

fn meta_key(name: &str) -> String {
    format!("_{}", name)
}

fn element_or_null(element: &Element) -> Result<Value> {
    if element.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(serde_json::to_value(element)?)
    }
}

/// Writes `value` under `name`, and its metadata under `_name` when there is any.
pub fn write_field<P: FhirPrimitive>(
    map: &mut Map<String, Value>,
    name: &str,
    value: &P,
) -> Result<()> {
    map.insert(name.to_string(), value.encode());
    if !value.element().is_empty() {
        map.insert(meta_key(name), element_or_null(value.element())?);
    }
    Ok(())
}

pub fn read_field<P: FhirPrimitive>(map: &Map<String, Value>, name: &str) -> Result<Option<P>> {
    read_field_with(map, name, &ParseConfig::default())
}

/// Reads `name` and merges `_name` into the decoded primitive.
///
/// Returns `Ok(None)` when neither key is present. Metadata without a value
/// is rejected.
pub fn read_field_with<P: FhirPrimitive>(
    map: &Map<String, Value>,
    name: &str,
    config: &ParseConfig,
) -> Result<Option<P>> {
    let key = meta_key(name);
    let meta = map.get(&key).filter(|meta| !meta.is_null());
    let Some(token) = map.get(name) else {
        return match meta {
            None => Ok(None),
            Some(meta) => {
                tracing::debug!(field = name, "metadata without a value");
                Err(Error::malformed(
                    P::TYPE_NAME,
                    meta.to_string(),
                    format!("'{}' present without '{}'", key, name),
                ))
            }
        };
    };

    let mut primitive = decode_logged::<P>(name, token, config)?;
    if let Some(meta) = meta {
        *primitive.element_mut() = serde_json::from_value(meta.clone())?;
    }
    Ok(Some(primitive))
}

/// Writes a repeating field. `_name` is only emitted when some item has metadata.
pub fn write_list<P: FhirPrimitive>(
    map: &mut Map<String, Value>,
    name: &str,
    values: &[P],
) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    map.insert(
        name.to_string(),
        Value::Array(values.iter().map(FhirPrimitive::encode).collect()),
    );
    if values.iter().any(|value| !value.element().is_empty()) {
        let metas = values
            .iter()
            .map(|value| element_or_null(value.element()))
            .collect::<Result<Vec<_>>>()?;
        map.insert(meta_key(name), Value::Array(metas));
    }
    Ok(())
}

pub fn read_list<P: FhirPrimitive>(map: &Map<String, Value>, name: &str) -> Result<Vec<P>> {
    read_list_with(map, name, &ParseConfig::default())
}

/// Reads a repeating field, pairing items with `_name` entries by position.
pub fn read_list_with<P: FhirPrimitive>(
    map: &Map<String, Value>,
    name: &str,
    config: &ParseConfig,
) -> Result<Vec<P>> {
    let key = meta_key(name);
    let tokens = match map.get(name) {
        None if map.contains_key(&key) => {
            return Err(Error::malformed(
                P::TYPE_NAME,
                key.clone(),
                format!("'{}' present without '{}'", key, name),
            ))
        }
        None => return Ok(Vec::new()),
        Some(Value::Array(tokens)) => tokens,
        Some(other) => {
            return Err(Error::malformed(
                P::TYPE_NAME,
                other.to_string(),
                format!("'{}' must be an array", name),
            ))
        }
    };
    let metas = match map.get(&key) {
        None => None,
        Some(Value::Array(metas)) if metas.len() == tokens.len() => Some(metas),
        Some(other) => {
            return Err(Error::malformed(
                P::TYPE_NAME,
                other.to_string(),
                format!("'{}' must be an array aligned with '{}'", key, name),
            ))
        }
    };

    let mut values = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        let mut primitive = decode_logged::<P>(name, token, config)?;
        if let Some(meta) = metas.map(|metas| &metas[index]) {
            if !meta.is_null() {
                *primitive.element_mut() = serde_json::from_value(meta.clone())?;
            }
        }
        values.push(primitive);
    }
    Ok(values)
}

fn decode_logged<P: FhirPrimitive>(field: &str, token: &Value, config: &ParseConfig) -> Result<P> {
    match P::decode_with(token, config) {
        Ok(value) => {
            tracing::trace!(field, type_name = P::TYPE_NAME, "decoded primitive");
            Ok(value)
        }
        Err(err) => {
            tracing::debug!(field, type_name = P::TYPE_NAME, error = %err, "rejected primitive");
            Err(err)
        }
    }
}

/// The FHIR primitive types this crate decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    PositiveInt,
    UnsignedInt,
    Decimal,
    Date,
    Time,
    DateTime,
    Instant,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Integer,
        PrimitiveKind::PositiveInt,
        PrimitiveKind::UnsignedInt,
        PrimitiveKind::Decimal,
        PrimitiveKind::Date,
        PrimitiveKind::Time,
        PrimitiveKind::DateTime,
        PrimitiveKind::Instant,
    ];

    pub fn type_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => Boolean::TYPE_NAME,
            PrimitiveKind::Integer => Integer::TYPE_NAME,
            PrimitiveKind::PositiveInt => PositiveInteger::TYPE_NAME,
            PrimitiveKind::UnsignedInt => UnsignedInteger::TYPE_NAME,
            PrimitiveKind::Decimal => Decimal::TYPE_NAME,
            PrimitiveKind::Date => Date::TYPE_NAME,
            PrimitiveKind::Time => Time::TYPE_NAME,
            PrimitiveKind::DateTime => DateTime::TYPE_NAME,
            PrimitiveKind::Instant => Instant::TYPE_NAME,
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_type_name(s).ok_or_else(|| {
            Error::malformed("primitive type", s, "not a supported FHIR primitive type")
        })
    }
}

/// A decoded primitive of any supported type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyPrimitive {
    Boolean(Boolean),
    Integer(Integer),
    PositiveInt(PositiveInteger),
    UnsignedInt(UnsignedInteger),
    Decimal(Decimal),
    Date(Date),
    Time(Time),
    DateTime(DateTime),
    Instant(Instant),
}

impl AnyPrimitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            AnyPrimitive::Boolean(_) => PrimitiveKind::Boolean,
            AnyPrimitive::Integer(_) => PrimitiveKind::Integer,
            AnyPrimitive::PositiveInt(_) => PrimitiveKind::PositiveInt,
            AnyPrimitive::UnsignedInt(_) => PrimitiveKind::UnsignedInt,
            AnyPrimitive::Decimal(_) => PrimitiveKind::Decimal,
            AnyPrimitive::Date(_) => PrimitiveKind::Date,
            AnyPrimitive::Time(_) => PrimitiveKind::Time,
            AnyPrimitive::DateTime(_) => PrimitiveKind::DateTime,
            AnyPrimitive::Instant(_) => PrimitiveKind::Instant,
        }
    }

    /// Canonical JSON token.
    pub fn encode(&self) -> Value {
        match self {
            AnyPrimitive::Boolean(v) => v.encode(),
            AnyPrimitive::Integer(v) => v.encode(),
            AnyPrimitive::PositiveInt(v) => v.encode(),
            AnyPrimitive::UnsignedInt(v) => v.encode(),
            AnyPrimitive::Decimal(v) => v.encode(),
            AnyPrimitive::Date(v) => v.encode(),
            AnyPrimitive::Time(v) => v.encode(),
            AnyPrimitive::DateTime(v) => v.encode(),
            AnyPrimitive::Instant(v) => v.encode(),
        }
    }

    pub fn element(&self) -> &Element {
        match self {
            AnyPrimitive::Boolean(v) => v.element(),
            AnyPrimitive::Integer(v) => v.element(),
            AnyPrimitive::PositiveInt(v) => v.element(),
            AnyPrimitive::UnsignedInt(v) => v.element(),
            AnyPrimitive::Decimal(v) => v.element(),
            AnyPrimitive::Date(v) => v.element(),
            AnyPrimitive::Time(v) => v.element(),
            AnyPrimitive::DateTime(v) => v.element(),
            AnyPrimitive::Instant(v) => v.element(),
        }
    }
}

impl fmt::Display for AnyPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyPrimitive::Boolean(v) => fmt::Display::fmt(v, f),
            AnyPrimitive::Integer(v) => fmt::Display::fmt(v, f),
            AnyPrimitive::PositiveInt(v) => fmt::Display::fmt(v, f),
            AnyPrimitive::UnsignedInt(v) => fmt::Display::fmt(v, f),
            AnyPrimitive::Decimal(v) => fmt::Display::fmt(v, f),
            AnyPrimitive::Date(v) => fmt::Display::fmt(v, f),
            AnyPrimitive::Time(v) => fmt::Display::fmt(v, f),
            AnyPrimitive::DateTime(v) => fmt::Display::fmt(v, f),
            AnyPrimitive::Instant(v) => fmt::Display::fmt(v, f),
        }
    }
}

pub fn decode_named(type_name: &str, token: &Value) -> Result<AnyPrimitive> {
    decode_named_with(type_name, token, &ParseConfig::default())
}

/// Decodes `token` as the FHIR primitive called `type_name`.
pub fn decode_named_with(
    type_name: &str,
    token: &Value,
    config: &ParseConfig,
) -> Result<AnyPrimitive> {
    let kind: PrimitiveKind = type_name.parse()?;
    let decoded = match kind {
        PrimitiveKind::Boolean => AnyPrimitive::Boolean(Boolean::decode_with(token, config)?),
        PrimitiveKind::Integer => AnyPrimitive::Integer(Integer::decode_with(token, config)?),
        PrimitiveKind::PositiveInt => {
            AnyPrimitive::PositiveInt(PositiveInteger::decode_with(token, config)?)
        }
        PrimitiveKind::UnsignedInt => {
            AnyPrimitive::UnsignedInt(UnsignedInteger::decode_with(token, config)?)
        }
        PrimitiveKind::Decimal => AnyPrimitive::Decimal(Decimal::decode_with(token, config)?),
        PrimitiveKind::Date => AnyPrimitive::Date(Date::decode_with(token, config)?),
        PrimitiveKind::Time => AnyPrimitive::Time(Time::decode_with(token, config)?),
        PrimitiveKind::DateTime => AnyPrimitive::DateTime(DateTime::decode_with(token, config)?),
        PrimitiveKind::Instant => AnyPrimitive::Instant(Instant::decode_with(token, config)?),
    };
    tracing::trace!(type_name, "decoded named primitive");
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Extension;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn absent_field_reads_as_none() {
        let map = object(json!({ "other": 1 }));
        assert!(read_field::<Date>(&map, "birthDate").unwrap().is_none());
    }

    #[test]
    fn metadata_is_merged_and_written_back() {
        let map = object(json!({
            "birthDate": "1970-03-30",
            "_birthDate": { "id": "314159" }
        }));
        let date: Date = read_field(&map, "birthDate").unwrap().unwrap();
        assert_eq!(date.element().id.as_deref(), Some("314159"));

        let mut out = Map::new();
        write_field(&mut out, "birthDate", &date).unwrap();
        assert_eq!(Value::Object(out), Value::Object(map));
    }

    #[test]
    fn metadata_without_value_is_malformed() {
        let map = object(json!({ "_active": { "id": "a1" } }));
        let err = read_field::<Boolean>(&map, "active").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn null_metadata_reads_as_empty() {
        let map = object(json!({ "active": true, "_active": null }));
        let active: Boolean = read_field(&map, "active").unwrap().unwrap();
        assert!(active.element().is_empty());

        let map = object(json!({ "_active": null }));
        assert!(read_field::<Boolean>(&map, "active").unwrap().is_none());
    }

    #[test]
    fn empty_metadata_is_not_written() {
        let mut out = Map::new();
        write_field(&mut out, "active", &Boolean::new(true)).unwrap();
        assert_eq!(Value::Object(out), json!({ "active": true }));
    }

    #[test]
    fn lists_pair_metadata_by_position() {
        let map = object(json!({
            "given": ["2017-01-01", "2018-02", "2019"],
            "_given": [null, { "extension": [{ "url": "http://example.org/x", "valueCode": "a" }] }, null]
        }));
        let dates: Vec<Date> = read_list(&map, "given").unwrap();
        assert_eq!(dates.len(), 3);
        assert!(dates[0].element().is_empty());
        assert_eq!(dates[1].element().extension[0].url, "http://example.org/x");

        let mut out = Map::new();
        write_list(&mut out, "given", &dates).unwrap();
        assert_eq!(Value::Object(out), Value::Object(map));
    }

    #[test]
    fn misaligned_list_metadata_is_rejected() {
        let map = object(json!({ "given": ["2017"], "_given": [null, null] }));
        assert!(read_list::<Date>(&map, "given").is_err());
    }

    #[test]
    fn list_without_metadata_writes_single_key() {
        let values = vec![
            Integer::new(1),
            Integer::new(2).with_element(Element::default()),
        ];
        let mut out = Map::new();
        write_list(&mut out, "counts", &values).unwrap();
        assert_eq!(Value::Object(out), json!({ "counts": [1, 2] }));

        let extended = vec![Integer::new(3).with_element(Element {
            id: None,
            extension: vec![Extension::new("http://example.org/y")],
        })];
        let mut out = Map::new();
        write_list(&mut out, "counts", &extended).unwrap();
        assert_eq!(out["_counts"][0]["extension"][0]["url"], "http://example.org/y");
    }

    #[test]
    fn decode_named_dispatches_on_type_name() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_type_name(kind.type_name()), Some(kind));
        }
        let decoded = decode_named("positiveInt", &json!(5)).unwrap();
        assert_eq!(decoded.kind(), PrimitiveKind::PositiveInt);
        assert_eq!(decoded.encode(), json!(5));

        let err = decode_named("positiveInt", &json!(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        let err = decode_named("string", &json!("x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }
}
