use thiserror::Error;

/// Errors raised while declaring or refining a schema.
///
/// These are programmer errors: they surface immediately at declaration
/// time and are never produced by validating bad data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeclarationError {
    #[error("`{schema}` constraint `{constraint}` is already declared")]
    AlreadyDeclared {
        schema: &'static str,
        constraint: &'static str,
    },
    #[error("`{schema}` min value must be less than or equal to {limit}, {given} given")]
    IncorrectMin {
        schema: &'static str,
        limit: String,
        given: String,
    },
    #[error("`{schema}` max value must be greater than or equal to {limit}, {given} given")]
    IncorrectMax {
        schema: &'static str,
        limit: String,
        given: String,
    },
    #[error("`{schema}` len must be equal to {expected}, {given} given")]
    IncorrectLen {
        schema: &'static str,
        expected: usize,
        given: usize,
    },
    #[error("`{schema}` min len must be less than or equal to {expected}, {given} given")]
    IncorrectMinLen {
        schema: &'static str,
        expected: usize,
        given: usize,
    },
    #[error("`{schema}` max len must be greater than or equal to {expected}, {given} given")]
    IncorrectMaxLen {
        schema: &'static str,
        expected: usize,
        given: usize,
    },
    #[error("`{schema}` min len must be less than or equal to max len ({min_len} > {max_len})")]
    InvertedLenRange {
        schema: &'static str,
        min_len: usize,
        max_len: usize,
    },
    #[error("`{schema}` min must be less than or equal to max ({min} > {max})")]
    InvertedRange {
        schema: &'static str,
        min: String,
        max: String,
    },
    #[error("`float` precision must be within 1..={max}, {given} given")]
    IncorrectPrecision { given: i64, max: u32 },
    #[error("`int` multiple_of must be greater than 0, {given} given")]
    IncorrectMultipleOf { given: i64 },
    #[error("`int` value {value} is not a multiple of {multiple_of}")]
    NotMultipleOf { value: i64, multiple_of: i64 },
    #[error("`int32` value {given} is out of the 32-bit range")]
    OutOfInt32Range { given: i64 },
    #[error("`str` alphabet is missing letters: {letters:?}")]
    AlphabetMissingLetters { letters: String },
    #[error("`str` value {value:?} does not contain {substr:?}")]
    SubstrNotInValue { value: String, substr: String },
    #[error("`str` value {value:?} does not match {pattern:?}")]
    PatternNotMatched { value: String, pattern: String },
    #[error("invalid pattern ({detail})")]
    InvalidPattern { detail: String },
    #[error("`list` rest marker must be the first or last element")]
    MisplacedEllipsis,
    #[error("`any` requires at least one alternative")]
    EmptyUnion,
    #[error("invalid custom type name {name:?}")]
    InvalidTypeName { name: String },
}

/// A custom schema variant was handed to an engine that has no hook
/// registered for it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("custom type {type_name:?} has no registered {hook} hook")]
pub struct CapabilityError {
    pub type_name: String,
    pub hook: &'static str,
}

impl CapabilityError {
    pub fn new(type_name: impl Into<String>, hook: &'static str) -> Self {
        Self {
            type_name: type_name.into(),
            hook,
        }
    }
}

/// A native value could not be converted into a minimal schema.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert {0} to a schema")]
pub struct FromNativeError(pub String);
