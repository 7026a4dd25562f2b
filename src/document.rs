//! The persisted root value and the two shapes it comes in.

use crate::error::{Error, Result};
use crate::record::Record;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Key under which the object-shaped document keeps its records.
pub const WRAPPER_KEY: &str = "candidatos";

/// How the records sit in the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shape {
    /// `[ {...}, {...} ]`
    #[default]
    Bare,
    /// `{ "candidatos": [ {...}, {...} ] }`
    Wrapped,
}

/// All records plus the shape they were loaded in. Saving writes the same
/// shape back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Records in document order.
    pub records: Vec<Record>,
    /// Outer shape to persist with.
    pub shape: Shape,
}

impl Document {
    /// An empty bare array, the state of a store that has never been written.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap `records` in the given shape.
    #[must_use]
    pub fn new(records: Vec<Record>, shape: Shape) -> Self {
        Self { records, shape }
    }

    /// Interpret an already-parsed JSON value.
    ///
    /// Anything other than an array, or an object holding an array under
    /// [`WRAPPER_KEY`], is [`Error::Corrupt`].
    pub fn from_value(value: Value) -> Result<Self> {
        let (records, shape) = match value {
            Value::Array(_) => (value, Shape::Bare),
            Value::Object(mut map) => {
                let inner = map.remove(WRAPPER_KEY).ok_or_else(|| {
                    Error::Corrupt(format!("object without a `{WRAPPER_KEY}` key"))
                })?;
                if !inner.is_array() {
                    return Err(Error::Corrupt(format!("`{WRAPPER_KEY}` is not an array")));
                }
                if !map.is_empty() {
                    let dropped: Vec<&String> = map.keys().collect();
                    tracing::warn!(?dropped, "ignoring unrecognized top-level keys");
                }
                (inner, Shape::Wrapped)
            }
            other => {
                return Err(Error::Corrupt(format!(
                    "expected an array or object at the top level, found {}",
                    kind(&other)
                )))
            }
        };
        let records = serde_json::from_value(records).map_err(|e| Error::Corrupt(e.to_string()))?;
        Ok(Self { records, shape })
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.shape {
            Shape::Bare => self.records.serialize(serializer),
            Shape::Wrapped => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(WRAPPER_KEY, &self.records)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_value(value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array() {
        let doc = Document::from_value(json!([{ "ID": 1 }])).unwrap();
        assert_eq!(doc.shape, Shape::Bare);
        assert_eq!(doc.len(), 1);
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!([{ "ID": 1 }]));
    }

    #[test]
    fn wrapped_object() {
        let doc = Document::from_value(json!({ "candidatos": [{ "ID": 2 }] })).unwrap();
        assert_eq!(doc.shape, Shape::Wrapped);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({ "candidatos": [{ "ID": 2 }] })
        );
    }

    #[test]
    fn empty_wrapped_stays_wrapped() {
        let doc = Document::from_value(json!({ "candidatos": [] })).unwrap();
        assert!(doc.is_empty());
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({ "candidatos": [] }));
    }

    #[test]
    fn unexpected_shapes_are_corrupt() {
        for bad in [
            json!(null),
            json!(17),
            json!("text"),
            json!({ "otros": [] }),
            json!({ "candidatos": {} }),
            json!([1, 2, 3]),
        ] {
            let err = Document::from_value(bad.clone()).unwrap_err();
            assert!(matches!(err, Error::Corrupt(_)), "{bad} gave {err:?}");
        }
    }
}
