use std::fmt;

use datashape_core::{Path, Value};
use thiserror::Error;
use uuid::Uuid;

const DEFAULT_ROOT: &str = "_";

fn plural(count: usize) -> &'static str {
    if count == 1 { "element" } else { "elements" }
}

/// One mismatch between a schema and a value, anchored at the path where
/// it was found.
///
/// `Display` renders the message with `_` as the root name; [`message`]
/// takes the name the formatter was configured with.
///
/// [`message`]: ValidationError::message
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    Type {
        path: Path,
        expected: &'static str,
        value: Value,
    },
    Value {
        path: Path,
        expected: Value,
        actual: Value,
    },
    MinValue {
        path: Path,
        min: Value,
        actual: Value,
    },
    MaxValue {
        path: Path,
        max: Value,
        actual: Value,
    },
    MultipleOf {
        path: Path,
        multiple_of: i64,
        actual: i64,
    },
    Length {
        path: Path,
        expected: usize,
        actual: usize,
    },
    MinLength { path: Path, min: usize, actual: usize },
    MaxLength { path: Path, max: usize, actual: usize },
    Alphabet {
        path: Path,
        alphabet: String,
        actual: String,
    },
    Substr {
        path: Path,
        substr: String,
        actual: String,
    },
    Pattern {
        path: Path,
        pattern: String,
        actual: String,
    },
    MissingElement { path: Path, index: usize },
    ExtraElement { path: Path, index: usize },
    MissingKey { path: Path, key: String },
    ExtraKey { path: Path, key: String },
    SchemaMismatch {
        path: Path,
        actual: Value,
        /// Errors collected per alternative, in declaration order.
        alternatives: Vec<Vec<ValidationError>>,
    },
    InvalidUuidVersion {
        path: Path,
        value: Uuid,
        version: usize,
    },
    Unique { path: Path, duplicate: Value },
}

impl ValidationError {
    pub fn path(&self) -> &Path {
        match self {
            ValidationError::Type { path, .. }
            | ValidationError::Value { path, .. }
            | ValidationError::MinValue { path, .. }
            | ValidationError::MaxValue { path, .. }
            | ValidationError::MultipleOf { path, .. }
            | ValidationError::Length { path, .. }
            | ValidationError::MinLength { path, .. }
            | ValidationError::MaxLength { path, .. }
            | ValidationError::Alphabet { path, .. }
            | ValidationError::Substr { path, .. }
            | ValidationError::Pattern { path, .. }
            | ValidationError::MissingElement { path, .. }
            | ValidationError::ExtraElement { path, .. }
            | ValidationError::MissingKey { path, .. }
            | ValidationError::ExtraKey { path, .. }
            | ValidationError::SchemaMismatch { path, .. }
            | ValidationError::InvalidUuidVersion { path, .. }
            | ValidationError::Unique { path, .. } => path,
        }
    }

    /// Render the message with `root` as the display name of the
    /// validated value.
    pub fn message(&self, root: &str) -> String {
        let at = |path: &Path| {
            if path.is_root() {
                String::new()
            } else {
                format!(" at {root}{path}")
            }
        };
        let locate = |path: &Path| format!("{root}{path}");
        match self {
            ValidationError::Type { path, expected, value } => format!(
                "value {value}{} must be `{expected}`, but `{}` given",
                at(path),
                value.type_name()
            ),
            ValidationError::Value { path, expected, actual } => {
                format!("value{} must be equal to {expected}, but {actual} given", at(path))
            }
            ValidationError::MinValue { path, min, actual } => format!(
                "value{} must be greater than or equal to {min}, but {actual} given",
                at(path)
            ),
            ValidationError::MaxValue { path, max, actual } => format!(
                "value{} must be less than or equal to {max}, but {actual} given",
                at(path)
            ),
            ValidationError::MultipleOf { path, multiple_of, actual } => format!(
                "value{} must be a multiple of {multiple_of}, but {actual} given",
                at(path)
            ),
            ValidationError::Length { path, expected, actual } => format!(
                "value{} must have exactly {expected} {}, but it has {actual} {}",
                at(path),
                plural(*expected),
                plural(*actual)
            ),
            ValidationError::MinLength { path, min, actual } => format!(
                "value{} must have at least {min} {}, but it has {actual} {}",
                at(path),
                plural(*min),
                plural(*actual)
            ),
            ValidationError::MaxLength { path, max, actual } => format!(
                "value{} must have at most {max} {}, but it has {actual} {}",
                at(path),
                plural(*max),
                plural(*actual)
            ),
            ValidationError::Alphabet { path, alphabet, actual } => format!(
                "value{} must contain only {alphabet:?}, but {actual:?} given",
                at(path)
            ),
            ValidationError::Substr { path, substr, actual } => {
                format!("value{} must contain {substr:?}, but {actual:?} given", at(path))
            }
            ValidationError::Pattern { path, pattern, actual } => format!(
                "value{} must match pattern {pattern:?}, but {actual:?} given",
                at(path)
            ),
            ValidationError::MissingElement { path, index } => {
                format!("element {}[{index}] does not exist", locate(path))
            }
            ValidationError::ExtraElement { path, index } => {
                format!("value{} contains extra element at index {index}", at(path))
            }
            ValidationError::MissingKey { path, key } => {
                format!("key {}[{key:?}] does not exist", locate(path))
            }
            ValidationError::ExtraKey { path, key } => {
                format!("value{} contains extra key {key:?}", at(path))
            }
            ValidationError::SchemaMismatch { path, actual, alternatives } => format!(
                "value {actual}{} must match one of {} alternatives",
                at(path),
                alternatives.len()
            ),
            ValidationError::InvalidUuidVersion { path, value, version } => format!(
                "value{} must be a version 4 UUID, but {value} version {version} given",
                at(path)
            ),
            ValidationError::Unique { path, duplicate } => format!(
                "value{} must contain unique elements, but {duplicate} appears more than once",
                at(path)
            ),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(DEFAULT_ROOT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_anchor_at_the_root_symbol() {
        let err = ValidationError::Type {
            path: Path::root().key("id"),
            expected: "int",
            value: Value::Str("x".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "value \"x\" at _[\"id\"] must be `int`, but `str` given"
        );

        let root = ValidationError::Value {
            path: Path::root(),
            expected: Value::Int(1),
            actual: Value::Int(2),
        };
        assert_eq!(root.to_string(), "value must be equal to 1, but 2 given");
    }

    #[test]
    fn missing_entries_render_the_full_location() {
        let err = ValidationError::MissingKey {
            path: Path::root().index(0),
            key: "name".to_string(),
        };
        assert_eq!(err.to_string(), "key _[0][\"name\"] does not exist");

        let err = ValidationError::MissingElement {
            path: Path::root(),
            index: 2,
        };
        assert_eq!(err.to_string(), "element _[2] does not exist");
    }

    #[test]
    fn messages_take_a_caller_chosen_root_name() {
        let err = ValidationError::MissingKey {
            path: Path::root(),
            key: "id".to_string(),
        };
        assert_eq!(err.message("user"), "key user[\"id\"] does not exist");

        let err = ValidationError::MinValue {
            path: Path::root().key("age"),
            min: Value::Int(0),
            actual: Value::Int(-1),
        };
        assert_eq!(
            err.message("user"),
            "value at user[\"age\"] must be greater than or equal to 0, but -1 given"
        );
    }
}
