//! Random value generation for Datashape schemas.
//!
//! The [`Generator`] walks a schema and produces a concrete [`datashape_core::Value`]
//! admitted by it, driven by a seedable [`RandomSource`] so runs are
//! reproducible. String patterns are generated from the regex AST by
//! [`RegexGenerator`].

pub mod consts;
pub mod engine;
pub mod errors;
pub mod random;
pub mod regex;

pub use engine::{GenerateHook, Generator};
pub use errors::GenerationError;
pub use random::RandomSource;
pub use regex::RegexGenerator;
