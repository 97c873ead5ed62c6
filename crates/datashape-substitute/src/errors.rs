use datashape_core::{CapabilityError, FromNativeError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubstitutionError {
    /// The value does not fit the schema; carries the formatted
    /// validation errors, one per line.
    #[error("value does not match the schema:\n{formatted}")]
    Mismatch { formatted: String },
    #[error("unknown key {key:?}")]
    UnknownKey { key: String },
    #[error("index {index} out of range")]
    IndexOutOfRange { index: usize },
    #[error("no template offset fits the value")]
    NoMatchingOffset,
    #[error("no union alternative accepts the value")]
    NoMatchingAlternative,
    #[error(transparent)]
    CannotConvert(#[from] FromNativeError),
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}
