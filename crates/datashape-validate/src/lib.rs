//! Validation of concrete values against Datashape schemas.
//!
//! [`Validator`] walks a schema and a [`datashape_core::Value`] in
//! lockstep, collecting every mismatch into a [`ValidationResult`].
//! [`Formatter`] renders collected errors as human-readable one-liners
//! rooted at `_`.

pub mod errors;
pub mod format;
pub mod result;
pub mod validator;

pub use errors::ValidationError;
pub use format::Formatter;
pub use result::ValidationResult;
pub use validator::{ValidateHook, Validator};
