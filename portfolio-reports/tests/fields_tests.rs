use portfolio_model::{FieldDescriptor, FieldKind, RecordSchema};
use portfolio_reports::fields::MAX_FILTERABLE_FIELDS;
use portfolio_reports::{
    FilterInput, FilterSet, Locale, filter_widgets, filterable_fields, render_input,
    selectable_fields,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn descriptor(name: &str, kind: FieldKind) -> FieldDescriptor {
    match kind {
        FieldKind::Text => FieldDescriptor::text(name),
        FieldKind::Number => FieldDescriptor::number(name),
        FieldKind::Date => FieldDescriptor::date(name),
        FieldKind::Enumerated => {
            FieldDescriptor::enumeration(name, vec!["A".to_string(), "B".to_string()])
        }
        FieldKind::Boolean => FieldDescriptor::boolean(name),
        FieldKind::Array => FieldDescriptor::array(name),
        FieldKind::Object => FieldDescriptor::object(name),
    }
}

fn any_kind() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::Text),
        Just(FieldKind::Number),
        Just(FieldKind::Date),
        Just(FieldKind::Enumerated),
        Just(FieldKind::Boolean),
        Just(FieldKind::Array),
        Just(FieldKind::Object),
    ]
}

// ── Filterable fields ───────────────────────────────────────────

proptest! {
    #[test]
    fn filterable_fields_are_bounded_ordered_and_typed(kinds in prop::collection::vec(any_kind(), 0..16)) {
        let fields: Vec<_> = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| descriptor(&format!("f{i}"), *kind))
            .collect();
        let schema = RecordSchema::new("Generated", fields);

        let filterable = filterable_fields(Some(&schema));

        prop_assert!(filterable.len() <= MAX_FILTERABLE_FIELDS);
        for field in &filterable {
            prop_assert!(matches!(
                field.kind,
                FieldKind::Text | FieldKind::Number | FieldKind::Enumerated
            ));
        }

        let expected: Vec<&str> = schema
            .fields
            .iter()
            .filter(|f| f.kind.is_filterable())
            .take(MAX_FILTERABLE_FIELDS)
            .map(|f| f.name.as_str())
            .collect();
        let actual: Vec<&str> = filterable.iter().map(|f| f.name.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn booleans_and_lists_are_not_filterable() {
    let schema = RecordSchema::new(
        "Mixed",
        vec![
            FieldDescriptor::boolean("active"),
            FieldDescriptor::array("tags"),
            FieldDescriptor::object("meta"),
            FieldDescriptor::text("title"),
        ],
    );
    let names: Vec<_> = filterable_fields(Some(&schema))
        .into_iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["title".to_string()]);
}

#[test]
fn date_field_is_offered_with_a_date_input() {
    let schema = RecordSchema::new(
        "Evidence",
        vec![FieldDescriptor::text("title"), FieldDescriptor::date("date")],
    );
    let names: Vec<_> = filterable_fields(Some(&schema))
        .into_iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["title", "date"]);

    let filters = FilterSet::new().with("date", "2026-02-01");
    let widgets = filter_widgets(Some(&schema), &filters, &Locale::default());
    assert_eq!(widgets[1].field, "date");
    assert_eq!(widgets[1].input, FilterInput::Date);
    assert_eq!(widgets[1].value, "2026-02-01");
}

#[test]
fn sixth_filterable_field_is_dropped() {
    let fields = (0..7).map(|i| FieldDescriptor::text(&format!("t{i}"))).collect();
    let schema = RecordSchema::new("Wide", fields);
    let filterable = filterable_fields(Some(&schema));
    assert_eq!(filterable.len(), 5);
    assert_eq!(filterable[4].name, "t4");
}

// ── Selectable fields ───────────────────────────────────────────

#[test]
fn selectable_fields_start_with_built_ins() {
    let schema = RecordSchema::new(
        "Certificate",
        vec![FieldDescriptor::text("title").with_label("العنوان")],
    );
    let fields = selectable_fields(&schema);
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["id", "created_date", "updated_date", "created_by", "title"]
    );
    assert!(fields[0].is_built_in());
    assert_eq!(fields[0].label, "المعرف");
    assert_eq!(fields[4].label, "العنوان");
    assert!(!fields[4].is_built_in());
}

// ── Filter inputs ───────────────────────────────────────────────

#[test]
fn enumerated_input_offers_any_then_values() {
    let locale = Locale::default();
    let field = FieldDescriptor::enumeration("level", vec!["Basic".into(), "Advanced".into()]);
    let widget = render_input(&field, Some("Advanced"), &locale);

    let FilterInput::Choice { options } = &widget.input else {
        panic!("expected a choice input, got {:?}", widget.input);
    };
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["الكل", "Basic", "Advanced"]);
    assert_eq!(options[0].value, None);
    assert_eq!(options[2].value.as_deref(), Some("Advanced"));
    assert_eq!(widget.value, "Advanced");
}

#[test]
fn text_number_and_date_inputs() {
    let locale = Locale::default();

    let text = render_input(&FieldDescriptor::text("title"), None, &locale);
    assert_eq!(text.input, FilterInput::Text);
    assert_eq!(text.placeholder.as_deref(), Some("ابحث..."));
    assert_eq!(text.value, "");

    let number = render_input(&FieldDescriptor::number("hours"), Some("20"), &locale);
    assert_eq!(number.input, FilterInput::Number);
    assert_eq!(number.value, "20");

    let date = render_input(&FieldDescriptor::date("issued_on"), Some("2026-01-10"), &locale);
    assert_eq!(date.input, FilterInput::Date);
    assert_eq!(date.placeholder, None);
}

#[test]
fn boolean_input_is_a_choice() {
    let widget = render_input(&FieldDescriptor::boolean("active"), None, &Locale::default());
    let FilterInput::Choice { options } = widget.input else {
        panic!("expected a choice input");
    };
    let values: Vec<_> = options.iter().map(|o| o.value.clone()).collect();
    assert_eq!(values, vec![None, Some("true".into()), Some("false".into())]);
}

#[test]
fn widgets_follow_filterable_fields_and_current_values() {
    let schema = RecordSchema::new(
        "Certificate",
        vec![
            FieldDescriptor::text("title"),
            FieldDescriptor::date("issued_on"),
            FieldDescriptor::number("hours"),
        ],
    );
    let filters = FilterSet::new().with("hours", "20");
    let widgets = filter_widgets(Some(&schema), &filters, &Locale::default());
    let bound: Vec<_> = widgets
        .iter()
        .map(|w| (w.field.as_str(), w.value.as_str()))
        .collect();
    assert_eq!(bound, vec![("title", ""), ("issued_on", ""), ("hours", "20")]);

    assert!(filter_widgets(None, &filters, &Locale::default()).is_empty());
}
