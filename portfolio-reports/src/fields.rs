//! Field selection: which fields a report can show and filter on.

use portfolio_model::{BuiltInField, FieldDescriptor, FieldKind, RecordSchema};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of filter inputs offered for one record type.
pub const MAX_FILTERABLE_FIELDS: usize = 5;

/// The first [`MAX_FILTERABLE_FIELDS`] schema fields, in declaration order,
/// whose kind is text, number, or enumerated. Empty when no schema is loaded.
pub fn filterable_fields(schema: Option<&RecordSchema>) -> Vec<&FieldDescriptor> {
    let Some(schema) = schema else {
        return Vec::new();
    };
    schema
        .fields
        .iter()
        .filter(|f| f.kind.is_filterable())
        .take(MAX_FILTERABLE_FIELDS)
        .collect()
}

/// One entry of the field picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableField {
    pub name: String,
    pub label: String,
    /// `None` for built-in fields.
    pub kind: Option<FieldKind>,
}

impl SelectableField {
    pub fn is_built_in(&self) -> bool {
        self.kind.is_none()
    }
}

/// The four built-in fields, followed by every declared field.
pub fn selectable_fields(schema: &RecordSchema) -> Vec<SelectableField> {
    let built_in = BuiltInField::ALL.iter().map(|b| SelectableField {
        name: b.name().to_string(),
        label: b.label().to_string(),
        kind: None,
    });
    let declared = schema.fields.iter().map(|f| SelectableField {
        name: f.name.clone(),
        label: f.display_label.clone(),
        kind: Some(f.kind),
    });
    built_in.chain(declared).collect()
}

/// Ordered, duplicate-free list of selected field names.
///
/// Order is selection order, and it becomes the column order of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection(Vec<String>);

impl FieldSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` at the end if absent, removes it otherwise.
    /// Returns whether the field is selected afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        if let Some(pos) = self.0.iter().position(|n| n == name) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(name.to_string());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<'a> IntoIterator for &'a FieldSelection {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
