//! Filter builder: the constraint set and one input widget per filterable field.

use crate::fields::filterable_fields;
use crate::locale::Locale;
use portfolio_model::{FieldDescriptor, FieldKind, RecordSchema};
use portfolio_store::Filters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field name to constraint value. A field that is absent is unconstrained.
///
/// Values are kept exactly as entered; interpretation (substring, exact
/// match, numeric coercion) is left to the record store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, String>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the constraint for `field`. An empty value removes it.
    pub fn set(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.0.remove(field);
        } else {
            self.0.insert(field.to_string(), value.to_string());
        }
        self
    }

    /// Builder-style [`FilterSet::set`].
    #[must_use]
    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The query sent to the record store.
    pub fn to_query(&self) -> Filters {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }
}

/// One option of a choice input. `value: None` is the "no constraint" entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: Option<String>,
    pub label: String,
}

/// The kind of input control rendered for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterInput {
    /// Pick one of the options; the first option always clears the filter.
    Choice { options: Vec<ChoiceOption> },
    Date,
    Number,
    Text,
}

/// A labelled input bound to one field and its current constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputWidget {
    pub field: String,
    pub label: String,
    pub input: FilterInput,
    /// Current value, empty when unconstrained.
    pub value: String,
    pub placeholder: Option<String>,
}

/// Chooses and fills the input control for one field.
///
/// Dispatch is on the field kind alone, so any schema works without
/// per-type code.
pub fn render_input(field: &FieldDescriptor, current: Option<&str>, locale: &Locale) -> InputWidget {
    let (input, placeholder) = match field.kind {
        FieldKind::Enumerated => {
            let values = field.allowed_values.clone().unwrap_or_default();
            (
                choice(locale, values.into_iter().map(|v| (v.clone(), v))),
                Some(&locale.choose_placeholder),
            )
        }
        FieldKind::Boolean => (
            choice(
                locale,
                [
                    ("true".to_string(), locale.yes.clone()),
                    ("false".to_string(), locale.no.clone()),
                ],
            ),
            Some(&locale.choose_placeholder),
        ),
        FieldKind::Date => (FilterInput::Date, None),
        FieldKind::Number => (FilterInput::Number, Some(&locale.number_placeholder)),
        FieldKind::Text | FieldKind::Array | FieldKind::Object => {
            (FilterInput::Text, Some(&locale.search_placeholder))
        }
    };

    InputWidget {
        field: field.name.clone(),
        label: field.display_label.clone(),
        input,
        value: current.unwrap_or_default().to_string(),
        placeholder: placeholder.cloned(),
    }
}

fn choice(locale: &Locale, values: impl IntoIterator<Item = (String, String)>) -> FilterInput {
    let any = ChoiceOption {
        value: None,
        label: locale.any_option.clone(),
    };
    let options = std::iter::once(any)
        .chain(values.into_iter().map(|(value, label)| ChoiceOption {
            value: Some(value),
            label,
        }))
        .collect();
    FilterInput::Choice { options }
}

/// Widgets for every filterable field of `schema`, bound to `filters`.
pub fn filter_widgets(
    schema: Option<&RecordSchema>,
    filters: &FilterSet,
    locale: &Locale,
) -> Vec<InputWidget> {
    filterable_fields(schema)
        .into_iter()
        .map(|f| render_input(f, filters.get(&f.name), locale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_removes_constraint() {
        let mut filters = FilterSet::new().with("level", "Basic");
        filters.set("level", "");
        assert!(filters.is_empty());
        assert_eq!(filters.get("level"), None);
    }

    #[test]
    fn whitespace_value_is_a_constraint() {
        let mut filters = FilterSet::new().with("title", "Basic");
        filters.set("title", "   ");
        assert_eq!(filters.get("title"), Some("   "));
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn values_are_kept_verbatim() {
        let filters = FilterSet::new().with("title", " Class ");
        assert_eq!(filters.get("title"), Some(" Class "));
    }

    #[test]
    fn query_has_string_values() {
        let filters = FilterSet::new().with("hours", "20").with("level", "Basic");
        let query = filters.to_query();
        assert_eq!(query.get("hours"), Some(&Value::String("20".into())));
        assert_eq!(query.len(), 2);
    }
}
