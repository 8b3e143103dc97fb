use crate::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A generic record stored in the backend.
///
/// Every record type flows through this type. Built-in fields (`id`,
/// `created_date`, ...) sit next to the schema fields in one flat object,
/// exactly as the backend returns them. Reports only ever read from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wraps an already-decoded JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Converts an arbitrary JSON value, rejecting anything but an object.
    pub fn from_value(value: Value) -> ModelResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(ModelError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// The backend-assigned identifier, if present.
    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    /// Raw value of a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Extract a string value.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Extract a boolean value.
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.0.get(field).and_then(Value::as_bool)
    }

    /// Extract a numeric value.
    pub fn get_number(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(Value::as_f64)
    }

    /// All fields, in the order the backend sent them.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
