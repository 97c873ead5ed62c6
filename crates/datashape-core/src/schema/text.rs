use std::collections::BTreeSet;

use crate::error::DeclarationError;

use super::Schema;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrProps {
    pub value: Option<String>,
    pub len: Option<usize>,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub alphabet: Option<String>,
    pub substr: Option<String>,
    pub pattern: Option<String>,
}

/// String schema with value/length/alphabet/substring/pattern constraints.
///
/// `pattern` is mutually exclusive with the character-level constraints; a
/// declared pattern is compiled eagerly so malformed regexes fail here, not
/// at generation or validation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrSchema {
    props: StrProps,
}

impl StrSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(&self) -> &StrProps {
        &self.props
    }

    fn conflict(constraint: &'static str) -> DeclarationError {
        DeclarationError::AlreadyDeclared {
            schema: "str",
            constraint,
        }
    }

    pub fn value(self, value: impl Into<String>) -> Result<Self, DeclarationError> {
        if self.props.value.is_some()
            || self.props.len.is_some()
            || self.props.min_len.is_some()
            || self.props.max_len.is_some()
            || self.props.alphabet.is_some()
            || self.props.substr.is_some()
            || self.props.pattern.is_some()
        {
            return Err(Self::conflict("value"));
        }
        Ok(Self {
            props: StrProps {
                value: Some(value.into()),
                ..self.props
            },
        })
    }

    /// Exact character count.
    pub fn len(self, len: usize) -> Result<Self, DeclarationError> {
        if self.props.len.is_some() || self.props.min_len.is_some() || self.props.max_len.is_some()
        {
            return Err(Self::conflict("len"));
        }
        if self.props.pattern.is_some() {
            return Err(Self::conflict("len"));
        }
        if let Some(value) = &self.props.value {
            if value.chars().count() != len {
                return Err(DeclarationError::IncorrectLen {
                    schema: "str",
                    expected: value.chars().count(),
                    given: len,
                });
            }
        }
        Ok(Self {
            props: StrProps {
                len: Some(len),
                ..self.props
            },
        })
    }

    pub fn min_len(self, min_len: usize) -> Result<Self, DeclarationError> {
        if self.props.len.is_some() || self.props.min_len.is_some() {
            return Err(Self::conflict("min_len"));
        }
        if self.props.pattern.is_some() {
            return Err(Self::conflict("min_len"));
        }
        if let Some(value) = &self.props.value {
            if min_len > value.chars().count() {
                return Err(DeclarationError::IncorrectMinLen {
                    schema: "str",
                    expected: value.chars().count(),
                    given: min_len,
                });
            }
        }
        if let Some(max_len) = self.props.max_len {
            if min_len > max_len {
                return Err(DeclarationError::InvertedLenRange {
                    schema: "str",
                    min_len,
                    max_len,
                });
            }
        }
        Ok(Self {
            props: StrProps {
                min_len: Some(min_len),
                ..self.props
            },
        })
    }

    pub fn max_len(self, max_len: usize) -> Result<Self, DeclarationError> {
        if self.props.len.is_some() || self.props.max_len.is_some() {
            return Err(Self::conflict("max_len"));
        }
        if self.props.pattern.is_some() {
            return Err(Self::conflict("max_len"));
        }
        if let Some(value) = &self.props.value {
            if max_len < value.chars().count() {
                return Err(DeclarationError::IncorrectMaxLen {
                    schema: "str",
                    expected: value.chars().count(),
                    given: max_len,
                });
            }
        }
        if let Some(min_len) = self.props.min_len {
            if min_len > max_len {
                return Err(DeclarationError::InvertedLenRange {
                    schema: "str",
                    min_len,
                    max_len,
                });
            }
        }
        Ok(Self {
            props: StrProps {
                max_len: Some(max_len),
                ..self.props
            },
        })
    }

    /// Restrict generated and accepted characters to `letters`.
    pub fn alphabet(self, letters: impl Into<String>) -> Result<Self, DeclarationError> {
        let letters = letters.into();
        if self.props.alphabet.is_some() || self.props.pattern.is_some() {
            return Err(Self::conflict("alphabet"));
        }
        if let Some(value) = &self.props.value {
            let allowed: BTreeSet<char> = letters.chars().collect();
            let missing: BTreeSet<char> =
                value.chars().filter(|c| !allowed.contains(c)).collect();
            if !missing.is_empty() {
                return Err(DeclarationError::AlphabetMissingLetters {
                    letters: missing.into_iter().collect(),
                });
            }
        }
        Ok(Self {
            props: StrProps {
                alphabet: Some(letters),
                ..self.props
            },
        })
    }

    /// Require `substr` to occur in the value.
    pub fn contains(self, substr: impl Into<String>) -> Result<Self, DeclarationError> {
        let substr = substr.into();
        if self.props.substr.is_some() || self.props.pattern.is_some() {
            return Err(Self::conflict("substr"));
        }
        if let Some(value) = &self.props.value {
            if !value.contains(&substr) {
                return Err(DeclarationError::SubstrNotInValue {
                    value: value.clone(),
                    substr,
                });
            }
        }
        Ok(Self {
            props: StrProps {
                substr: Some(substr),
                ..self.props
            },
        })
    }

    /// Require the value to match `pattern` (unanchored search).
    pub fn regex(self, pattern: impl Into<String>) -> Result<Self, DeclarationError> {
        let pattern = pattern.into();
        if self.props.pattern.is_some()
            || self.props.alphabet.is_some()
            || self.props.len.is_some()
            || self.props.min_len.is_some()
            || self.props.max_len.is_some()
            || self.props.substr.is_some()
        {
            return Err(Self::conflict("pattern"));
        }
        let compiled = regex::Regex::new(&pattern)
            .map_err(|err| DeclarationError::InvalidPattern {
                detail: err.to_string(),
            })?;
        if let Some(value) = &self.props.value {
            if !compiled.is_match(value) {
                return Err(DeclarationError::PatternNotMatched {
                    value: value.clone(),
                    pattern,
                });
            }
        }
        Ok(Self {
            props: StrProps {
                pattern: Some(pattern),
                ..self.props
            },
        })
    }
}

impl From<StrSchema> for Schema {
    fn from(schema: StrSchema) -> Schema {
        Schema::Str(schema.props)
    }
}
