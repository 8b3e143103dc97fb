use crate::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describes a record type's fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub record_type: String,
    pub fields: Vec<FieldDescriptor>,
}

impl RecordSchema {
    pub fn new(record_type: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            record_type: record_type.into(),
            fields,
        }
    }

    /// Builds a schema from the backend's JSON-schema-like description:
    /// `{"properties": {"title": {"type": "string", "description": "..."}, ...}}`.
    ///
    /// Property order is kept as declared, which is why the workspace enables
    /// `serde_json`'s `preserve_order` feature. A missing `properties` object
    /// yields an empty schema.
    pub fn from_json(record_type: impl Into<String>, value: &Value) -> ModelResult<Self> {
        let record_type = record_type.into();
        let Some(root) = value.as_object() else {
            return Err(ModelError::InvalidSchema {
                record_type,
                reason: "schema must be a JSON object".to_string(),
            });
        };

        let properties = match root.get("properties") {
            None | Some(Value::Null) => return Ok(Self::new(record_type, Vec::new())),
            Some(Value::Object(props)) => props,
            Some(_) => {
                return Err(ModelError::InvalidSchema {
                    record_type,
                    reason: "`properties` must be an object".to_string(),
                });
            }
        };

        let fields = properties
            .iter()
            .map(|(name, property)| FieldDescriptor::from_property(name, property))
            .collect();

        Ok(Self::new(record_type, fields))
    }

    /// Looks up a declared (non built-in) field.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True when `name` is a built-in field or declared by this schema.
    pub fn is_known_field(&self, name: &str) -> bool {
        BuiltInField::from_name(name).is_some() || self.field(name).is_some()
    }

    /// Resolves the human-facing label of a field.
    ///
    /// Built-in fields use a fixed table; schema fields use their display
    /// label; anything else falls back to the raw name.
    pub fn label(&self, name: &str) -> String {
        if let Some(builtin) = BuiltInField::from_name(name) {
            return builtin.label().to_string();
        }
        self.field(name)
            .map(|f| f.display_label.clone())
            .unwrap_or_else(|| name.to_string())
    }
}

/// Metadata for one declared field of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Allowed values, in declared order. Only set when `kind` is `Enumerated`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    /// Defaults to `name` when the schema carries no description.
    pub display_label: String,
    /// Raw `format` hint from the schema (e.g. `date`, `uri`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FieldDescriptor {
    fn simple(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            allowed_values: None,
            display_label: name.into(),
            format: None,
        }
    }

    /// Shorthand for a free-text field.
    pub fn text(name: &str) -> Self {
        Self::simple(name, FieldKind::Text)
    }

    /// Shorthand for a numeric field.
    pub fn number(name: &str) -> Self {
        Self::simple(name, FieldKind::Number)
    }

    /// Shorthand for a date field (`type: string, format: date`).
    pub fn date(name: &str) -> Self {
        Self {
            format: Some("date".into()),
            ..Self::simple(name, FieldKind::Date)
        }
    }

    pub fn boolean(name: &str) -> Self {
        Self::simple(name, FieldKind::Boolean)
    }

    pub fn array(name: &str) -> Self {
        Self::simple(name, FieldKind::Array)
    }

    pub fn object(name: &str) -> Self {
        Self::simple(name, FieldKind::Object)
    }

    /// Shorthand for an enumerated field with fixed options.
    pub fn enumeration(name: &str, options: Vec<String>) -> Self {
        Self {
            allowed_values: Some(options),
            ..Self::simple(name, FieldKind::Enumerated)
        }
    }

    /// Replaces the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = label.into();
        self
    }

    fn from_property(name: &str, property: &Value) -> Self {
        let description = property
            .get("description")
            .and_then(Value::as_str)
            .filter(|d| !d.trim().is_empty());
        let format = property
            .get("format")
            .and_then(Value::as_str)
            .map(str::to_string);
        let allowed_values = property.get("enum").and_then(Value::as_array).map(|values| {
            values
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
        });

        let kind = if allowed_values.is_some() {
            FieldKind::Enumerated
        } else {
            FieldKind::from_schema_type(primary_type(property), format.as_deref())
        };

        Self {
            name: name.to_string(),
            kind,
            allowed_values,
            display_label: description.unwrap_or(name).to_string(),
            format,
        }
    }
}

/// `type` may be a string or a list such as `["string", "null"]`.
fn primary_type(property: &Value) -> Option<&str> {
    match property.get("type") {
        Some(Value::String(t)) => Some(t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    }
}

/// The value kind of a field.
///
/// A closed set: every consumer dispatches with an exhaustive `match`, so a
/// new kind has to be handled everywhere before the workspace compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Enumerated,
    Boolean,
    Array,
    Object,
}

impl FieldKind {
    fn from_schema_type(schema_type: Option<&str>, format: Option<&str>) -> Self {
        match (schema_type, format) {
            (Some("string"), Some("date" | "date-time")) => Self::Date,
            (Some("number" | "integer"), _) => Self::Number,
            (Some("boolean"), _) => Self::Boolean,
            (Some("array"), _) => Self::Array,
            (Some("object"), _) => Self::Object,
            _ => Self::Text,
        }
    }

    /// Whether the report filter builder offers this kind.
    pub fn is_filterable(self) -> bool {
        match self {
            Self::Text | Self::Date | Self::Number | Self::Enumerated => true,
            Self::Boolean | Self::Array | Self::Object => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Enumerated => "enumerated",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// System-managed fields present on every record type but never declared
/// in its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInField {
    Id,
    CreatedDate,
    UpdatedDate,
    CreatedBy,
}

impl BuiltInField {
    pub const ALL: [BuiltInField; 4] = [
        BuiltInField::Id,
        BuiltInField::CreatedDate,
        BuiltInField::UpdatedDate,
        BuiltInField::CreatedBy,
    ];

    /// Field name as it appears on records.
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreatedDate => "created_date",
            Self::UpdatedDate => "updated_date",
            Self::CreatedBy => "created_by",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "المعرف",
            Self::CreatedDate => "تاريخ الإنشاء",
            Self::UpdatedDate => "تاريخ التحديث",
            Self::CreatedBy => "المنشئ",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}
