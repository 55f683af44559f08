use thiserror::Error;

/// Errors raised by the handicap and score pad engines.
///
/// The engines do no I/O, so the only failure is input that breaks an
/// invariant. It is detected before any computation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
