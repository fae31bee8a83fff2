//! Decoding of `.env.yaml` documents into validated key/value sets.
//!
//! Loading never stops at the first bad entry: whatever can be kept is kept,
//! and the first problem is reported next to it. A decoding problem takes
//! precedence over an invalid key.

use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Value;
use serde_yaml::value::TaggedValue;

use crate::error::EnvYamlError;
use crate::shell;
use crate::source::EnvFile;
use crate::types::{Env, Partial};
use crate::validation::validate_key;

impl EnvFile {
    /// Read, decode and validate the file. A missing file gives an empty
    /// set and no error.
    pub fn load(&self) -> Partial<Env> {
        tracing::debug!("loading {}", self.path().display());

        match self.read() {
            Ok(Some(content)) => load_str(&content),
            Ok(None) => Partial::default(),
            Err(e) => Partial::with_error(Env::new(), e),
        }
    }

    /// Sorted `KEY=VALUE` lines for every entry whose key and value are
    /// both valid.
    pub fn shell_escaped(&self) -> Partial<Vec<String>> {
        shell::escape_all(self.load())
    }
}

/// Decode and validate an in-memory document.
pub fn load_str(content: &str) -> Partial<Env> {
    validate_keys(decode(content))
}

/// Decode a document into string pairs without validating keys.
///
/// Scalars keep their text exactly as written (`1.10` stays `1.10`),
/// `null` becomes the empty string. An entry whose key or value is a
/// sequence or mapping is skipped and reported, and decoding goes on with
/// the next entry.
pub fn decode(content: &str) -> Partial<Env> {
    if content.trim().is_empty() {
        return Partial::default();
    }

    // First pass only learns the shape of every entry; the text comes from
    // a second pass over the raw scalars.
    let document: Value = match serde_yaml::from_str(content) {
        Ok(document) => document,
        Err(e) => return Partial::with_error(Env::new(), e.into()),
    };

    let mapping = match untag(document) {
        Value::Null => return Partial::default(),
        Value::Mapping(mapping) => mapping,
        other => {
            return Partial::with_error(
                Env::new(),
                EnvYamlError::Malformed(format!(
                    "expected a mapping at the top level, found a {}",
                    kind(&other)
                )),
            );
        }
    };

    let shapes: Vec<(Shape, Shape)> = mapping
        .iter()
        .map(|(key, value)| (Shape::of(key), Shape::of(value)))
        .collect();

    let entries = match (Entries { shapes: &shapes })
        .deserialize(serde_yaml::Deserializer::from_str(content))
    {
        Ok(entries) => entries,
        Err(e) => return Partial::with_error(Env::new(), e.into()),
    };

    let mut decoded = Partial::ok(Env::with_capacity(entries.len()));
    for (key, value) in entries {
        let key = match key {
            Ok(key) => key,
            Err(found) => {
                decoded.record(EnvYamlError::Malformed(format!(
                    "mapping key is a {}, expected a string",
                    found
                )));
                continue;
            }
        };

        match value {
            Ok(value) => {
                decoded.value.insert(key, value);
            }
            Err(found) => decoded.record(EnvYamlError::Malformed(format!(
                "value for key {:?} is a {}, expected a string",
                key, found
            ))),
        }
    }

    decoded
}

/// Drop every entry whose key fails validation, recording the first
/// failure unless an earlier error already holds the slot.
pub fn validate_keys(decoded: Partial<Env>) -> Partial<Env> {
    let (mut env, error) = decoded.into_parts();
    let mut first_invalid = None;

    env.retain(|key, _| match validate_key(key) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("dropping entry: {}", e);
            first_invalid.get_or_insert(e);
            false
        }
    });

    let mut validated = Partial { value: env, error };
    if let Some(e) = first_invalid {
        validated.record(e);
    }
    validated
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => {
            let TaggedValue { value, .. } = *tagged;
            untag(value)
        }
        other => other,
    }
}

/// How one key or value of the top-level mapping is read.
#[derive(Debug, Clone, Copy)]
enum Shape {
    Text,
    Null,
    Nested(&'static str),
}

impl Shape {
    fn of(value: &Value) -> Shape {
        match value {
            Value::Tagged(tagged) => Shape::of(&tagged.value),
            Value::Null => Shape::Null,
            Value::Sequence(_) | Value::Mapping(_) => Shape::Nested(kind(value)),
            _ => Shape::Text,
        }
    }
}

type Field = Result<String, &'static str>;

impl<'de> DeserializeSeed<'de> for Shape {
    type Value = Field;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Field, D::Error> {
        match self {
            Shape::Text => deserializer.deserialize_str(RawText).map(Ok),
            Shape::Null => {
                IgnoredAny::deserialize(deserializer)?;
                Ok(Ok(String::new()))
            }
            Shape::Nested(found) => {
                IgnoredAny::deserialize(deserializer)?;
                Ok(Err(found))
            }
        }
    }
}

/// Scalar text as it appears in the document.
struct RawText;

impl Visitor<'_> for RawText {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }
}

/// Top-level mapping read entry by entry with the shapes found in the
/// first pass.
struct Entries<'a> {
    shapes: &'a [(Shape, Shape)],
}

impl<'de> DeserializeSeed<'de> for Entries<'_> {
    type Value = Vec<(Field, Field)>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for Entries<'_> {
    type Value = Vec<(Field, Field)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of names to strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(self.shapes.len());
        for &(key_shape, value_shape) in self.shapes {
            let Some(key) = map.next_key_seed(key_shape)? else {
                break;
            };
            let value = map.next_value_seed(value_shape)?;
            entries.push((key, value));
        }
        Ok(entries)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
