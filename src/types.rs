use serde_json::{Number, Value as JsonValue};

/// A JSON value as seen by the SASS serializer
///
/// Maps keep their entries in insertion order; the serializer walks them
/// front to back so the emitted SASS follows the source document.
#[derive(Debug, Clone, PartialEq)]
pub enum SassValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<SassValue>),
    Map(Vec<(String, SassValue)>),
}

impl SassValue {
    /// Name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            SassValue::Null => "null",
            SassValue::Bool(_) => "boolean",
            SassValue::Number(_) => "number",
            SassValue::String(_) => "string",
            SassValue::List(_) => "array",
            SassValue::Map(_) => "object",
        }
    }

    /// Nesting depth: scalars are 0, a list or map adds one level
    pub fn depth(&self) -> usize {
        match self {
            SassValue::List(items) => 1 + items.iter().map(SassValue::depth).max().unwrap_or(0),
            SassValue::Map(entries) => {
                1 + entries
                    .iter()
                    .map(|(_, v)| v.depth())
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Top-level entries when the value is a map
    pub fn as_map(&self) -> Option<&[(String, SassValue)]> {
        match self {
            SassValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<JsonValue> for SassValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => SassValue::Null,
            JsonValue::Bool(b) => SassValue::Bool(b),
            JsonValue::Number(n) => SassValue::Number(n),
            JsonValue::String(s) => SassValue::String(s),
            JsonValue::Array(arr) => SassValue::List(arr.into_iter().map(SassValue::from).collect()),
            JsonValue::Object(map) => SassValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, SassValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&JsonValue> for SassValue {
    fn from(value: &JsonValue) -> Self {
        SassValue::from(value.clone())
    }
}
