use crate::error::DeclarationError;

use super::Schema;

pub const FLOAT_PRECISION_MAX: u32 = 15;

const INT32_MIN: i64 = i32::MIN as i64;
const INT32_MAX: i64 = i32::MAX as i64;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntProps {
    pub value: Option<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub multiple_of: Option<i64>,
}

/// Integer schema with value/range/multiplicity constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntSchema {
    props: IntProps,
}

impl IntSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(&self) -> &IntProps {
        &self.props
    }

    /// Fix the schema to one concrete value; excludes a declared range.
    pub fn value(self, value: i64) -> Result<Self, DeclarationError> {
        if self.props.value.is_some() || self.props.min.is_some() || self.props.max.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "int",
                constraint: "value",
            });
        }
        if let Some(multiple_of) = self.props.multiple_of {
            if value % multiple_of != 0 {
                return Err(DeclarationError::NotMultipleOf { value, multiple_of });
            }
        }
        Ok(Self {
            props: IntProps {
                value: Some(value),
                ..self.props
            },
        })
    }

    pub fn min(self, min: i64) -> Result<Self, DeclarationError> {
        if self.props.min.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "int",
                constraint: "min",
            });
        }
        if let Some(value) = self.props.value {
            if min > value {
                return Err(DeclarationError::IncorrectMin {
                    schema: "int",
                    limit: value.to_string(),
                    given: min.to_string(),
                });
            }
        }
        if let Some(max) = self.props.max {
            if min > max {
                return Err(DeclarationError::InvertedRange {
                    schema: "int",
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }
        Ok(Self {
            props: IntProps {
                min: Some(min),
                ..self.props
            },
        })
    }

    pub fn max(self, max: i64) -> Result<Self, DeclarationError> {
        if self.props.max.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "int",
                constraint: "max",
            });
        }
        if let Some(value) = self.props.value {
            if max < value {
                return Err(DeclarationError::IncorrectMax {
                    schema: "int",
                    limit: value.to_string(),
                    given: max.to_string(),
                });
            }
        }
        if let Some(min) = self.props.min {
            if min > max {
                return Err(DeclarationError::InvertedRange {
                    schema: "int",
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }
        Ok(Self {
            props: IntProps {
                max: Some(max),
                ..self.props
            },
        })
    }

    pub fn multiple_of(self, multiple_of: i64) -> Result<Self, DeclarationError> {
        if self.props.multiple_of.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "int",
                constraint: "multiple_of",
            });
        }
        if multiple_of <= 0 {
            return Err(DeclarationError::IncorrectMultipleOf { given: multiple_of });
        }
        if let Some(value) = self.props.value {
            if value % multiple_of != 0 {
                return Err(DeclarationError::NotMultipleOf { value, multiple_of });
            }
        }
        Ok(Self {
            props: IntProps {
                multiple_of: Some(multiple_of),
                ..self.props
            },
        })
    }
}

impl From<IntSchema> for Schema {
    fn from(schema: IntSchema) -> Schema {
        Schema::Int(schema.props)
    }
}

/// Integer schema preconstrained to the 32-bit range; the presets can be
/// tightened once, never widened.
#[derive(Debug, Clone, PartialEq)]
pub struct Int32Schema {
    props: IntProps,
}

impl Default for Int32Schema {
    fn default() -> Self {
        Self {
            props: IntProps {
                value: None,
                min: Some(INT32_MIN),
                max: Some(INT32_MAX),
                multiple_of: None,
            },
        }
    }
}

impl Int32Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(&self) -> &IntProps {
        &self.props
    }

    fn check_int32(value: i64) -> Result<(), DeclarationError> {
        if !(INT32_MIN..=INT32_MAX).contains(&value) {
            return Err(DeclarationError::OutOfInt32Range { given: value });
        }
        Ok(())
    }

    pub fn value(self, value: i64) -> Result<Self, DeclarationError> {
        Self::check_int32(value)?;
        if self.props.value.is_some()
            || self.props.min != Some(INT32_MIN)
            || self.props.max != Some(INT32_MAX)
        {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "int32",
                constraint: "value",
            });
        }
        Ok(Self {
            props: IntProps {
                value: Some(value),
                ..self.props
            },
        })
    }

    pub fn min(self, min: i64) -> Result<Self, DeclarationError> {
        Self::check_int32(min)?;
        if self.props.min != Some(INT32_MIN) {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "int32",
                constraint: "min",
            });
        }
        if let Some(value) = self.props.value {
            if min > value {
                return Err(DeclarationError::IncorrectMin {
                    schema: "int32",
                    limit: value.to_string(),
                    given: min.to_string(),
                });
            }
        }
        Ok(Self {
            props: IntProps {
                min: Some(min),
                ..self.props
            },
        })
    }

    pub fn max(self, max: i64) -> Result<Self, DeclarationError> {
        Self::check_int32(max)?;
        if self.props.max != Some(INT32_MAX) {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "int32",
                constraint: "max",
            });
        }
        if let Some(value) = self.props.value {
            if max < value {
                return Err(DeclarationError::IncorrectMax {
                    schema: "int32",
                    limit: value.to_string(),
                    given: max.to_string(),
                });
            }
        }
        if let Some(min) = self.props.min {
            if min != INT32_MIN && min > max {
                return Err(DeclarationError::InvertedRange {
                    schema: "int32",
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }
        Ok(Self {
            props: IntProps {
                max: Some(max),
                ..self.props
            },
        })
    }
}

impl From<Int32Schema> for Schema {
    fn from(schema: Int32Schema) -> Schema {
        Schema::Int32(schema.props)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloatProps {
    pub value: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub precision: Option<u32>,
}

/// Floating-point schema with value/range/precision constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloatSchema {
    props: FloatProps,
}

impl FloatSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(&self) -> &FloatProps {
        &self.props
    }

    pub fn value(self, value: f64) -> Result<Self, DeclarationError> {
        if self.props.value.is_some() || self.props.min.is_some() || self.props.max.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "float",
                constraint: "value",
            });
        }
        Ok(Self {
            props: FloatProps {
                value: Some(value),
                ..self.props
            },
        })
    }

    pub fn min(self, min: f64) -> Result<Self, DeclarationError> {
        if self.props.min.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "float",
                constraint: "min",
            });
        }
        if let Some(value) = self.props.value {
            if min > value {
                return Err(DeclarationError::IncorrectMin {
                    schema: "float",
                    limit: value.to_string(),
                    given: min.to_string(),
                });
            }
        }
        if let Some(max) = self.props.max {
            if min > max {
                return Err(DeclarationError::InvertedRange {
                    schema: "float",
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }
        Ok(Self {
            props: FloatProps {
                min: Some(min),
                ..self.props
            },
        })
    }

    pub fn max(self, max: f64) -> Result<Self, DeclarationError> {
        if self.props.max.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "float",
                constraint: "max",
            });
        }
        if let Some(value) = self.props.value {
            if max < value {
                return Err(DeclarationError::IncorrectMax {
                    schema: "float",
                    limit: value.to_string(),
                    given: max.to_string(),
                });
            }
        }
        if let Some(min) = self.props.min {
            if min > max {
                return Err(DeclarationError::InvertedRange {
                    schema: "float",
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }
        Ok(Self {
            props: FloatProps {
                max: Some(max),
                ..self.props
            },
        })
    }

    /// Decimal precision used by generation and fixed-value comparison.
    pub fn precision(self, precision: i64) -> Result<Self, DeclarationError> {
        if self.props.precision.is_some() {
            return Err(DeclarationError::AlreadyDeclared {
                schema: "float",
                constraint: "precision",
            });
        }
        if precision < 1 || precision > i64::from(FLOAT_PRECISION_MAX) {
            return Err(DeclarationError::IncorrectPrecision {
                given: precision,
                max: FLOAT_PRECISION_MAX,
            });
        }
        Ok(Self {
            props: FloatProps {
                precision: Some(precision as u32),
                ..self.props
            },
        })
    }
}

impl From<FloatSchema> for Schema {
    fn from(schema: FloatSchema) -> Schema {
        Schema::Float(schema.props)
    }
}
