//! Application-level error types

/// A rejected request payload.
///
/// Services raise this (inside `anyhow::Error`) for input-shape problems so
/// the HTTP layer can answer 400 instead of 500; repository and downstream
/// failures stay untyped.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Shorthand for failing a validation check
macro_rules! invalid {
    ($($arg:tt)*) => {
        return Err($crate::application::error::ValidationError::new(format!($($arg)*)))
    };
}

pub(crate) use invalid;
