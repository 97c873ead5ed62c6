//! Schema-directed validation walk.

use std::collections::HashMap;

use datashape_core::schema::{CustomSchema, DictProps, ListProps, StrProps, TemplateShape};
use datashape_core::{CapabilityError, Path, Schema, Value};
use tracing::trace;

use crate::errors::ValidationError;
use crate::result::ValidationResult;

/// Validation hook for a custom schema variant.
pub trait ValidateHook: Send + Sync {
    fn validate(&self, schema: &CustomSchema, value: &Value, path: &Path) -> Vec<ValidationError>;
}

/// Relative tolerance used for float equality, matching the usual
/// close-enough comparison for doubles.
const FLOAT_REL_TOL: f64 = 1e-9;

fn float_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= FLOAT_REL_TOL * a.abs().max(b.abs())
}

/// Walks a schema and a value together, collecting every mismatch.
///
/// The lenient mode relaxes container checks for substitution: dicts may
/// omit declared keys and list uniqueness is not enforced.
pub struct Validator {
    hooks: HashMap<String, Box<dyn ValidateHook>>,
    lenient: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
            lenient: false,
        }
    }

    pub fn lenient() -> Self {
        Self {
            hooks: HashMap::new(),
            lenient: true,
        }
    }

    /// Register the validation hook for a custom type name. The last
    /// registration for a name wins.
    pub fn register_hook(&mut self, type_name: impl Into<String>, hook: Box<dyn ValidateHook>) {
        self.hooks.insert(type_name.into(), hook);
    }

    /// Validate `value` against `schema`, reporting every mismatch.
    ///
    /// A custom variant without a registered hook aborts the walk with a
    /// capability error instead of a validation error.
    pub fn validate(
        &self,
        schema: &Schema,
        value: &Value,
    ) -> Result<ValidationResult, CapabilityError> {
        trace!(kind = schema.kind(), "validate");
        let errors = self.validate_at(schema, value, &Path::root())?;
        Ok(ValidationResult::from_errors(errors))
    }

    fn validate_at(
        &self,
        schema: &Schema,
        value: &Value,
        path: &Path,
    ) -> Result<Vec<ValidationError>, CapabilityError> {
        let type_error = |expected: &'static str| {
            vec![ValidationError::Type {
                path: path.clone(),
                expected,
                value: value.clone(),
            }]
        };

        match schema {
            Schema::None => Ok(match value {
                Value::Null => Vec::new(),
                _ => type_error("none"),
            }),
            Schema::Bool(props) => {
                let Value::Bool(actual) = value else {
                    return Ok(type_error("bool"));
                };
                Ok(match props.value {
                    Some(expected) if expected != *actual => vec![ValidationError::Value {
                        path: path.clone(),
                        expected: Value::Bool(expected),
                        actual: value.clone(),
                    }],
                    _ => Vec::new(),
                })
            }
            Schema::Int(props) | Schema::Int32(props) => {
                let Value::Int(actual) = value else {
                    return Ok(type_error(schema.kind()));
                };
                let mut errors = Vec::new();
                if let Some(expected) = props.value {
                    if *actual != expected {
                        errors.push(ValidationError::Value {
                            path: path.clone(),
                            expected: Value::Int(expected),
                            actual: value.clone(),
                        });
                        return Ok(errors);
                    }
                }
                if let Some(min) = props.min {
                    if *actual < min {
                        errors.push(ValidationError::MinValue {
                            path: path.clone(),
                            min: Value::Int(min),
                            actual: value.clone(),
                        });
                    }
                }
                if let Some(max) = props.max {
                    if *actual > max {
                        errors.push(ValidationError::MaxValue {
                            path: path.clone(),
                            max: Value::Int(max),
                            actual: value.clone(),
                        });
                    }
                }
                if let Some(multiple_of) = props.multiple_of {
                    if actual.rem_euclid(multiple_of) != 0 {
                        errors.push(ValidationError::MultipleOf {
                            path: path.clone(),
                            multiple_of,
                            actual: *actual,
                        });
                    }
                }
                Ok(errors)
            }
            Schema::Float(props) => {
                let Value::Float(actual) = value else {
                    return Ok(type_error("float"));
                };
                let mut errors = Vec::new();
                if let Some(expected) = props.value {
                    let close = match props.precision {
                        // Compare at the declared precision exactly.
                        Some(precision) => {
                            let scale = 10f64.powi(precision as i32);
                            (actual * scale).round() == (expected * scale).round()
                        }
                        None => float_close(*actual, expected),
                    };
                    if !close {
                        errors.push(ValidationError::Value {
                            path: path.clone(),
                            expected: Value::Float(expected),
                            actual: value.clone(),
                        });
                        return Ok(errors);
                    }
                }
                if let Some(min) = props.min {
                    if *actual < min {
                        errors.push(ValidationError::MinValue {
                            path: path.clone(),
                            min: Value::Float(min),
                            actual: value.clone(),
                        });
                    }
                }
                if let Some(max) = props.max {
                    if *actual > max {
                        errors.push(ValidationError::MaxValue {
                            path: path.clone(),
                            max: Value::Float(max),
                            actual: value.clone(),
                        });
                    }
                }
                Ok(errors)
            }
            Schema::Str(props) => {
                let Value::Str(actual) = value else {
                    return Ok(type_error("str"));
                };
                Ok(self.validate_str(props, actual, path))
            }
            Schema::Bytes(props) => {
                let Value::Bytes(actual) = value else {
                    return Ok(type_error("bytes"));
                };
                Ok(match &props.value {
                    Some(expected) if expected != actual => vec![ValidationError::Value {
                        path: path.clone(),
                        expected: Value::Bytes(expected.clone()),
                        actual: value.clone(),
                    }],
                    _ => Vec::new(),
                })
            }
            Schema::List(props) => {
                let Value::List(elements) = value else {
                    return Ok(type_error("list"));
                };
                self.validate_list(props, elements, path)
            }
            Schema::Dict(props) => {
                let Value::Dict(entries) = value else {
                    return Ok(type_error("dict"));
                };
                self.validate_dict(props, entries, path)
            }
            Schema::Any(props) => {
                let Some(types) = &props.types else {
                    return Ok(Vec::new());
                };
                let mut alternatives = Vec::with_capacity(types.len());
                for alternative in types {
                    let errors = self.validate_at(alternative, value, path)?;
                    if errors.is_empty() {
                        return Ok(Vec::new());
                    }
                    alternatives.push(errors);
                }
                Ok(vec![ValidationError::SchemaMismatch {
                    path: path.clone(),
                    actual: value.clone(),
                    alternatives,
                }])
            }
            Schema::Uuid4(props) => {
                let Value::Uuid(actual) = value else {
                    return Ok(type_error("uuid4"));
                };
                if actual.get_version_num() != 4 {
                    return Ok(vec![ValidationError::InvalidUuidVersion {
                        path: path.clone(),
                        value: *actual,
                        version: actual.get_version_num(),
                    }]);
                }
                Ok(match props.value {
                    Some(expected) if expected != *actual => vec![ValidationError::Value {
                        path: path.clone(),
                        expected: Value::Uuid(expected),
                        actual: value.clone(),
                    }],
                    _ => Vec::new(),
                })
            }
            Schema::Date(props) => {
                let Value::Date(actual) = value else {
                    return Ok(type_error("date"));
                };
                Ok(match props.value {
                    Some(expected) if expected != *actual => vec![ValidationError::Value {
                        path: path.clone(),
                        expected: Value::Date(expected),
                        actual: value.clone(),
                    }],
                    _ => Vec::new(),
                })
            }
            Schema::DateTime(props) => {
                let Value::DateTime(actual) = value else {
                    return Ok(type_error("datetime"));
                };
                Ok(match props.value {
                    Some(expected) if expected != *actual => vec![ValidationError::Value {
                        path: path.clone(),
                        expected: Value::DateTime(expected),
                        actual: value.clone(),
                    }],
                    _ => Vec::new(),
                })
            }
            Schema::Alias(props) => self.validate_at(&props.inner, value, path),
            Schema::Custom(custom) => {
                let hook = self
                    .hooks
                    .get(custom.name())
                    .ok_or_else(|| CapabilityError::new(custom.name(), "validate"))?;
                Ok(hook.validate(custom, value, path))
            }
        }
    }

    fn validate_str(&self, props: &StrProps, actual: &str, path: &Path) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if let Some(expected) = &props.value {
            if actual != expected {
                errors.push(ValidationError::Value {
                    path: path.clone(),
                    expected: Value::Str(expected.clone()),
                    actual: Value::Str(actual.to_string()),
                });
                return errors;
            }
        }
        if let Some(pattern) = &props.pattern {
            // Patterns are compiled at declaration time, so this cannot fail.
            let matched = regex::Regex::new(pattern)
                .map(|re| re.is_match(actual))
                .unwrap_or(false);
            if !matched {
                errors.push(ValidationError::Pattern {
                    path: path.clone(),
                    pattern: pattern.clone(),
                    actual: actual.to_string(),
                });
                return errors;
            }
        }
        let char_len = actual.chars().count();
        if let Some(len) = props.len {
            if char_len != len {
                errors.push(ValidationError::Length {
                    path: path.clone(),
                    expected: len,
                    actual: char_len,
                });
            }
        }
        if let Some(min_len) = props.min_len {
            if char_len < min_len {
                errors.push(ValidationError::MinLength {
                    path: path.clone(),
                    min: min_len,
                    actual: char_len,
                });
            }
        }
        if let Some(max_len) = props.max_len {
            if char_len > max_len {
                errors.push(ValidationError::MaxLength {
                    path: path.clone(),
                    max: max_len,
                    actual: char_len,
                });
            }
        }
        if let Some(substr) = &props.substr {
            if !actual.contains(substr.as_str()) {
                errors.push(ValidationError::Substr {
                    path: path.clone(),
                    substr: substr.clone(),
                    actual: actual.to_string(),
                });
            }
        }
        if let Some(alphabet) = &props.alphabet {
            if actual.chars().any(|c| !alphabet.contains(c)) {
                errors.push(ValidationError::Alphabet {
                    path: path.clone(),
                    alphabet: alphabet.clone(),
                    actual: actual.to_string(),
                });
            }
        }
        errors
    }

    fn validate_list(
        &self,
        props: &ListProps,
        elements: &[Value],
        path: &Path,
    ) -> Result<Vec<ValidationError>, CapabilityError> {
        if let Some(len) = props.len {
            if elements.len() != len {
                return Ok(vec![ValidationError::Length {
                    path: path.clone(),
                    expected: len,
                    actual: elements.len(),
                }]);
            }
        }
        if let Some(min_len) = props.min_len {
            if elements.len() < min_len {
                return Ok(vec![ValidationError::MinLength {
                    path: path.clone(),
                    min: min_len,
                    actual: elements.len(),
                }]);
            }
        }
        if let Some(max_len) = props.max_len {
            if elements.len() > max_len {
                return Ok(vec![ValidationError::MaxLength {
                    path: path.clone(),
                    max: max_len,
                    actual: elements.len(),
                }]);
            }
        }

        if props.unique && !self.lenient {
            for (index, element) in elements.iter().enumerate() {
                if elements[..index].contains(element) {
                    return Ok(vec![ValidationError::Unique {
                        path: path.clone(),
                        duplicate: element.clone(),
                    }]);
                }
            }
        }

        if let Some(element_schema) = &props.of {
            let mut errors = Vec::new();
            for (index, element) in elements.iter().enumerate() {
                errors.extend(self.validate_at(element_schema, element, &path.index(index))?);
            }
            return Ok(errors);
        }

        let Some(items) = &props.elements else {
            return Ok(Vec::new());
        };

        match datashape_core::schema::template_shape(items) {
            TemplateShape::Exact(schemas) => {
                let mut errors = self.validate_slice(&schemas, elements, 0, path)?;
                for index in schemas.len()..elements.len() {
                    errors.push(ValidationError::ExtraElement {
                        path: path.clone(),
                        index,
                    });
                }
                Ok(errors)
            }
            TemplateShape::Head(schemas) => self.validate_slice(&schemas, elements, 0, path),
            TemplateShape::Tail(schemas) => {
                let start = elements.len().saturating_sub(schemas.len());
                self.validate_slice(&schemas, elements, start, path)
            }
            TemplateShape::Body(schemas) => {
                if elements.is_empty() {
                    return self.validate_slice(&schemas, elements, 0, path);
                }
                // Slide the fixed middle over every offset and keep the
                // attempt with the fewest errors, ties going to the
                // earliest offset.
                let mut best: Option<Vec<ValidationError>> = None;
                for offset in 0..elements.len() {
                    let errors = self.validate_slice(&schemas, elements, offset, path)?;
                    if errors.is_empty() {
                        return Ok(errors);
                    }
                    if best.as_ref().is_none_or(|b| errors.len() < b.len()) {
                        best = Some(errors);
                    }
                }
                Ok(best.unwrap_or_default())
            }
        }
    }

    /// Validate consecutive schemas against `elements` starting at
    /// `start`; running off the end reports one missing element and stops.
    fn validate_slice(
        &self,
        schemas: &[&Schema],
        elements: &[Value],
        start: usize,
        path: &Path,
    ) -> Result<Vec<ValidationError>, CapabilityError> {
        let mut errors = Vec::new();
        for (offset, schema) in schemas.iter().enumerate() {
            let index = start + offset;
            match elements.get(index) {
                None => {
                    errors.push(ValidationError::MissingElement {
                        path: path.clone(),
                        index,
                    });
                    break;
                }
                Some(element) => {
                    errors.extend(self.validate_at(schema, element, &path.index(index))?);
                }
            }
        }
        Ok(errors)
    }

    fn validate_dict(
        &self,
        props: &DictProps,
        entries: &indexmap::IndexMap<String, Value>,
        path: &Path,
    ) -> Result<Vec<ValidationError>, CapabilityError> {
        let Some(keys) = &props.keys else {
            return Ok(Vec::new());
        };
        let mut errors = Vec::new();
        for (name, entry) in keys {
            match entries.get(name) {
                Some(element) => {
                    errors.extend(self.validate_at(&entry.schema, element, &path.key(name))?);
                }
                None => {
                    if !entry.optional && !self.lenient {
                        errors.push(ValidationError::MissingKey {
                            path: path.clone(),
                            key: name.clone(),
                        });
                    }
                }
            }
        }
        if !props.relaxed {
            for name in entries.keys() {
                if !keys.contains_key(name) {
                    errors.push(ValidationError::ExtraKey {
                        path: path.clone(),
                        key: name.clone(),
                    });
                }
            }
        }
        Ok(errors)
    }
}
