//! Core contracts for Datashape.
//!
//! This crate defines the immutable schema data model, the concrete value
//! model, structural paths for error reporting, and the plumbing shared by
//! the generate/validate/substitute/represent engines.

pub mod error;
pub mod native;
pub mod path;
pub mod props;
pub mod schema;
pub mod value;

pub use error::{CapabilityError, DeclarationError, FromNativeError};
pub use native::from_native;
pub use path::{Path, Segment};
pub use props::{PropValue, Props};
pub use schema::{Schema, optional};
pub use value::Value;
