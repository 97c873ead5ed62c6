//! Human-readable rendering of validation results.

use crate::errors::ValidationError;
use crate::result::ValidationResult;

/// Renders validation errors one per line, expanding union mismatches
/// into an indented block showing why every alternative was rejected.
///
/// The validated value is named `_` in messages unless a root name is
/// given.
#[derive(Debug, Clone)]
pub struct Formatter {
    indent: usize,
    root: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            indent: 4,
            root: "_".to_string(),
        }
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(indent: usize) -> Self {
        Self {
            indent,
            ..Self::new()
        }
    }

    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::new()
        }
    }

    pub fn format_error(&self, error: &ValidationError) -> String {
        let mut out = String::new();
        self.write_error(&mut out, error, 0);
        out
    }

    /// One line (or block) per error, each introduced by `- `.
    pub fn format_result(&self, result: &ValidationResult) -> String {
        result
            .errors()
            .iter()
            .map(|error| format!("- {}", self.format_error(error)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn write_error(&self, out: &mut String, error: &ValidationError, depth: usize) {
        let pad = " ".repeat(depth * self.indent);
        out.push_str(&pad);
        out.push_str(&error.message(&self.root));
        if let ValidationError::SchemaMismatch { alternatives, .. } = error {
            for (index, errors) in alternatives.iter().enumerate() {
                out.push('\n');
                out.push_str(&pad);
                out.push_str(&" ".repeat(self.indent));
                out.push_str(&format!("alternative {}:", index + 1));
                for nested in errors {
                    out.push('\n');
                    self.write_error(out, nested, depth + 2);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use datashape_core::{Path, Value};

    use super::*;

    #[test]
    fn results_render_one_error_per_line() {
        let result = ValidationResult::from_errors(vec![
            ValidationError::MissingKey {
                path: Path::root(),
                key: "id".to_string(),
            },
            ValidationError::ExtraKey {
                path: Path::root(),
                key: "extra".to_string(),
            },
        ]);
        let formatted = Formatter::new().format_result(&result);
        assert_eq!(
            formatted,
            "- key _[\"id\"] does not exist\n- value contains extra key \"extra\""
        );
    }

    #[test]
    fn the_root_name_is_configurable() {
        let result = ValidationResult::from_errors(vec![
            ValidationError::MissingKey {
                path: Path::root(),
                key: "id".to_string(),
            },
            ValidationError::Type {
                path: Path::root().key("name"),
                expected: "str",
                value: Value::Int(1),
            },
        ]);
        let formatted = Formatter::with_root("user").format_result(&result);
        assert_eq!(
            formatted,
            "- key user[\"id\"] does not exist\n- value 1 at user[\"name\"] must be `str`, but `int` given"
        );
    }

    #[test]
    fn union_mismatches_expand_alternatives() {
        let error = ValidationError::SchemaMismatch {
            path: Path::root(),
            actual: Value::Null,
            alternatives: vec![
                vec![ValidationError::Type {
                    path: Path::root(),
                    expected: "int",
                    value: Value::Null,
                }],
                vec![ValidationError::Type {
                    path: Path::root(),
                    expected: "str",
                    value: Value::Null,
                }],
            ],
        };
        let formatted = Formatter::new().format_error(&error);
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("value null must match one of 2 alternatives"));
        assert_eq!(lines[1], "    alternative 1:");
        assert!(lines[2].trim_start().starts_with("value null must be `int`"));
    }
}
