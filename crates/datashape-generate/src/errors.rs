use datashape_core::CapabilityError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// A uniqueness search proved the schema cannot yield enough distinct
    /// values.
    #[error("cannot generate {required} distinct values for `{schema}`")]
    ValueSpaceExhausted {
        schema: &'static str,
        required: usize,
    },
    /// A uniqueness search ran out of attempts without proving exhaustion.
    #[error("failed to generate a distinct value after {attempts} attempts")]
    RetryBudgetExceeded { attempts: usize },
    /// The pattern uses a construct the generator does not model.
    #[error("unsupported pattern construct: {detail}")]
    UnsupportedPattern { detail: String },
    #[error("invalid pattern ({detail})")]
    InvalidPattern { detail: String },
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}
