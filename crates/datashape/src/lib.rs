//! Datashape: declarative data description with generation, validation,
//! substitution, and canonical rendering.
//!
//! Schemas are declared with the builders in [`schema`]:
//!
//! ```
//! use datashape::schema;
//!
//! let user = schema::dict().keys(vec![
//!     ("id".into(), schema::int().min(1)?.into()),
//!     ("name".into(), schema::str().min_len(1)?.into()),
//! ])?;
//!
//! let value = datashape::fake(&user.clone().into())?;
//! assert!(datashape::validate(&user.into(), &value)?.is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The free functions here drive a thread-local generator; use the
//! engine types directly for custom hooks or an owned random stream.

use std::cell::RefCell;

use thiserror::Error;

pub use datashape_core::schema;
pub use datashape_core::{
    CapabilityError, DeclarationError, FromNativeError, Path, Schema, Segment, Value, from_native,
};
pub use datashape_generate::{GenerateHook, GenerationError, Generator, RandomSource};
pub use datashape_render::{RepresentHook, Representor};
pub use datashape_substitute::{SubstituteHook, SubstitutionError, Substitutor};
pub use datashape_validate::{
    Formatter, ValidateHook, ValidationError, ValidationResult, Validator,
};

thread_local! {
    static GENERATOR: RefCell<Generator> = RefCell::new(Generator::from_entropy());
}

/// Reseed the thread-local generator, making subsequent [`fake`] calls
/// reproducible on this thread.
pub fn seed(seed: u64) {
    GENERATOR.with(|generator| *generator.borrow_mut() = Generator::with_seed(seed));
}

/// Generate a value admitted by `schema` using the thread-local
/// generator.
pub fn fake(schema: &Schema) -> Result<Value, GenerationError> {
    GENERATOR.with(|generator| generator.borrow_mut().generate(schema))
}

/// Validate `value` against `schema`, collecting every mismatch.
pub fn validate(schema: &Schema, value: &Value) -> Result<ValidationResult, CapabilityError> {
    Validator::new().validate(schema, value)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationFailure {
    #[error("value does not match the schema:\n{formatted}")]
    Invalid { formatted: String },
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

/// Validate `value` against `schema` and fail with formatted errors on
/// the first mismatch.
pub fn validate_or_fail(schema: &Schema, value: &Value) -> Result<(), ValidationFailure> {
    let result = validate(schema, value)?;
    if result.has_errors() {
        return Err(ValidationFailure::Invalid {
            formatted: Formatter::new().format_result(&result),
        });
    }
    Ok(())
}

/// Return a copy of `schema` narrowed to `value`.
pub fn substitute(schema: &Schema, value: &Value) -> Result<Schema, SubstitutionError> {
    Substitutor::new().substitute(schema, value)
}

/// Render `schema` as the builder chain that would declare it.
pub fn represent(schema: &Schema) -> String {
    Representor::new().represent(schema)
}
