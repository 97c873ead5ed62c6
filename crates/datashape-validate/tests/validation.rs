use datashape_core::schema::{self, CustomSchema, ellipsis, item, optional};
use datashape_core::{Path, Schema, Value};
use datashape_validate::{ValidateHook, ValidationError, Validator};
use indexmap::IndexMap;

fn errors(schema: impl Into<Schema>, value: Value) -> Vec<ValidationError> {
    Validator::new()
        .validate(&schema.into(), &value)
        .unwrap()
        .into_errors()
}

fn dict_value(entries: &[(&str, Value)]) -> Value {
    let mut map = IndexMap::new();
    for (key, value) in entries {
        map.insert(key.to_string(), value.clone());
    }
    Value::Dict(map)
}

#[test]
fn type_mismatch_short_circuits() {
    let found = errors(schema::int().min(10).unwrap(), Value::Str("x".to_string()));
    assert_eq!(found.len(), 1);
    assert!(matches!(found[0], ValidationError::Type { expected: "int", .. }));
}

#[test]
fn int_range_violations_accumulate() {
    let sch = schema::int().min(10).unwrap().max(20).unwrap();
    assert!(errors(sch.clone(), Value::Int(15)).is_empty());
    let found = errors(sch, Value::Int(5));
    assert_eq!(found.len(), 1);
    assert!(matches!(found[0], ValidationError::MinValue { .. }));
}

#[test]
fn float_equality_is_close_not_exact() {
    let sch = schema::float().value(0.3).unwrap();
    assert!(errors(sch.clone(), Value::Float(0.1 + 0.2)).is_empty());
    assert!(!errors(sch, Value::Float(0.31)).is_empty());
}

#[test]
fn float_precision_compares_scaled() {
    let sch = schema::float().value(1.234).unwrap().precision(2).unwrap();
    assert!(errors(sch.clone(), Value::Float(1.229)).is_empty());
    assert!(!errors(sch, Value::Float(1.24)).is_empty());
}

#[test]
fn date_values_compare_exactly() {
    let day = chrono::NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
    let sch = schema::date().value(day).unwrap();
    assert!(errors(sch.clone(), Value::Date(day)).is_empty());

    let other = day.succ_opt().unwrap();
    let found = errors(sch.clone(), Value::Date(other));
    assert!(matches!(found[0], ValidationError::Value { .. }));

    let found = errors(sch, Value::Str("2026-08-28".to_string()));
    assert!(matches!(found[0], ValidationError::Type { expected: "date", .. }));
}

#[test]
fn str_constraints_report_each_violation() {
    let sch = schema::str().min_len(5).unwrap().alphabet("abc").unwrap();
    let found = errors(sch, Value::Str("xz".to_string()));
    assert_eq!(found.len(), 2);
    assert!(matches!(found[0], ValidationError::MinLength { min: 5, actual: 2, .. }));
    assert!(matches!(found[1], ValidationError::Alphabet { .. }));
}

#[test]
fn str_pattern_uses_search_semantics() {
    let sch = schema::str().regex(r"\d\d").unwrap();
    assert!(errors(sch.clone(), Value::Str("order 42".to_string())).is_empty());
    let found = errors(sch, Value::Str("none".to_string()));
    assert!(matches!(found[0], ValidationError::Pattern { .. }));
}

#[test]
fn exact_template_flags_extra_and_missing_elements() {
    let sch = schema::list()
        .elements(vec![item(schema::int()), item(schema::str())])
        .unwrap();
    assert!(errors(
        sch.clone(),
        Value::List(vec![Value::Int(1), Value::Str("a".to_string())])
    )
    .is_empty());

    let found = errors(sch.clone(), Value::List(vec![Value::Int(1)]));
    assert_eq!(found.len(), 1);
    assert!(matches!(found[0], ValidationError::MissingElement { index: 1, .. }));

    let found = errors(
        sch,
        Value::List(vec![
            Value::Int(1),
            Value::Str("a".to_string()),
            Value::Bool(true),
        ]),
    );
    assert!(matches!(found[0], ValidationError::ExtraElement { index: 2, .. }));
}

#[test]
fn head_template_ignores_the_tail() {
    let sch = schema::list()
        .elements(vec![item(schema::int().value(1).unwrap()), ellipsis()])
        .unwrap();
    assert!(errors(
        sch,
        Value::List(vec![Value::Int(1), Value::Str("anything".to_string())])
    )
    .is_empty());
}

#[test]
fn tail_template_matches_against_the_end() {
    let sch = schema::list()
        .elements(vec![ellipsis(), item(schema::int().value(9).unwrap())])
        .unwrap();
    assert!(errors(sch.clone(), Value::List(vec![Value::Null, Value::Int(9)])).is_empty());
    let found = errors(sch, Value::List(vec![Value::Int(9), Value::Null]));
    assert!(!found.is_empty());
}

#[test]
fn body_template_finds_the_best_offset() {
    let sch = schema::list()
        .elements(vec![
            ellipsis(),
            item(schema::int().value(2).unwrap()),
            item(schema::int().value(3).unwrap()),
            ellipsis(),
        ])
        .unwrap();
    let value = Value::List(vec![
        Value::Int(1),
        Value::Int(2),
        Value::Int(3),
        Value::Int(4),
    ]);
    assert!(errors(sch.clone(), value).is_empty());

    // No offset fits: the fewest-errors attempt is reported.
    let found = errors(sch, Value::List(vec![Value::Int(2), Value::Int(9)]));
    assert_eq!(found.len(), 1);
}

#[test]
fn unique_lists_report_the_duplicate() {
    let sch = schema::list().of(schema::int()).unwrap().unique().unwrap();
    let found = errors(sch, Value::List(vec![Value::Int(1), Value::Int(1)]));
    assert_eq!(found.len(), 1);
    assert!(matches!(
        &found[0],
        ValidationError::Unique { duplicate, .. } if *duplicate == Value::Int(1)
    ));
}

#[test]
fn dict_checks_required_and_extra_keys() {
    let sch = schema::dict()
        .keys(vec![
            ("id".into(), schema::int().into()),
            (optional("note"), schema::str().into()),
        ])
        .unwrap();

    assert!(errors(sch.clone(), dict_value(&[("id", Value::Int(1))])).is_empty());

    let found = errors(sch.clone(), dict_value(&[("other", Value::Int(1))]));
    assert_eq!(found.len(), 2);
    assert!(matches!(&found[0], ValidationError::MissingKey { key, .. } if key == "id"));
    assert!(matches!(&found[1], ValidationError::ExtraKey { key, .. } if key == "other"));

    let relaxed = sch.relaxed().unwrap();
    assert!(errors(
        relaxed,
        dict_value(&[("id", Value::Int(1)), ("other", Value::Null)])
    )
    .is_empty());
}

#[test]
fn nested_errors_carry_their_path() {
    let sch = schema::dict()
        .keys(vec![(
            "items".into(),
            schema::list().of(schema::int()).unwrap().into(),
        )])
        .unwrap();
    let found = errors(
        sch,
        dict_value(&[("items", Value::List(vec![Value::Str("x".to_string())]))]),
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].path(), &Path::root().key("items").index(0));
}

#[test]
fn union_accepts_the_first_matching_alternative() {
    let sch = schema::any()
        .alternatives(vec![schema::int().into(), schema::str().into()])
        .unwrap();
    assert!(errors(sch.clone(), Value::Int(1)).is_empty());
    assert!(errors(sch.clone(), Value::Str("x".to_string())).is_empty());

    let found = errors(sch, Value::Bool(true));
    assert_eq!(found.len(), 1);
    let ValidationError::SchemaMismatch { alternatives, .. } = &found[0] else {
        panic!("expected a schema mismatch");
    };
    assert_eq!(alternatives.len(), 2);
}

#[test]
fn uuid_version_is_checked_before_value() {
    let sch = schema::uuid4();
    let found = errors(sch, Value::Uuid(uuid::Uuid::nil()));
    assert!(matches!(
        found[0],
        ValidationError::InvalidUuidVersion { version: 0, .. }
    ));
}

#[test]
fn alias_delegates_to_the_inner_schema() {
    let sch = schema::alias("UserId", schema::int().min(1).unwrap());
    assert!(errors(sch.clone(), Value::Int(7)).is_empty());
    assert!(!errors(sch, Value::Int(0)).is_empty());
}

#[test]
fn lenient_mode_skips_missing_keys_but_not_extras() {
    let sch: Schema = schema::dict()
        .keys(vec![
            ("id".into(), schema::int().into()),
            ("name".into(), schema::str().into()),
        ])
        .unwrap()
        .into();
    let value = dict_value(&[("id", Value::Int(1))]);
    assert!(Validator::lenient().validate(&sch, &value).unwrap().is_ok());

    let extra = dict_value(&[("id", Value::Int(1)), ("other", Value::Null)]);
    let result = Validator::lenient().validate(&sch, &extra).unwrap();
    assert!(matches!(result.errors()[0], ValidationError::ExtraKey { .. }));
}

#[test]
fn custom_variants_need_a_hook() {
    let custom = CustomSchema::new("Port").unwrap();
    let sch: Schema = custom.into();
    let err = Validator::new().validate(&sch, &Value::Int(80)).unwrap_err();
    assert_eq!(err.hook, "validate");

    struct PortHook;
    impl ValidateHook for PortHook {
        fn validate(
            &self,
            _schema: &CustomSchema,
            value: &Value,
            path: &Path,
        ) -> Vec<ValidationError> {
            match value {
                Value::Int(port) if (1..=65535).contains(port) => Vec::new(),
                _ => vec![ValidationError::Type {
                    path: path.clone(),
                    expected: "int",
                    value: value.clone(),
                }],
            }
        }
    }

    let mut validator = Validator::new();
    validator.register_hook("Port", Box::new(PortHook));
    assert!(validator.validate(&sch, &Value::Int(80)).unwrap().is_ok());
    assert!(validator.validate(&sch, &Value::Null).unwrap().has_errors());
}
