//! Default ranges used when a schema leaves a dimension unconstrained.

pub const INT_MIN: i64 = i64::MIN;
pub const INT_MAX: i64 = i64::MAX;

pub const FLOAT_MIN: f64 = -9_223_372_036_854_775_808.0;
pub const FLOAT_MAX: f64 = 9_223_372_036_854_775_808.0;

pub const STR_LEN_MIN: usize = 1;
pub const STR_LEN_MAX: usize = 32;

pub const BYTES_LEN_MIN: usize = 1;
pub const BYTES_LEN_MAX: usize = 32;

pub const LIST_LEN_MIN: usize = 1;
pub const LIST_LEN_MAX: usize = 10;

pub const STR_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Ceiling applied to unbounded regex repetitions (`*`, `+`, `{n,}`).
pub const MAX_REPEAT: u32 = 32;

/// Retry budget for uniqueness searches.
pub const MAX_ATTEMPTS: usize = 64;

/// Day window around today for unconstrained date generation.
pub const DATE_DAYS_SPAN: i64 = 100_000;
