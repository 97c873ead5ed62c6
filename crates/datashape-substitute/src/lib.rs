//! Refinement of Datashape schemas with concrete values.
//!
//! [`Substitutor`] takes a schema and a value, checks the value against
//! the schema in lenient mode, and returns a new schema narrowed to that
//! value. The input schema is never mutated.

pub mod errors;
pub mod substitutor;

pub use errors::SubstitutionError;
pub use substitutor::{SubstituteHook, Substitutor};
