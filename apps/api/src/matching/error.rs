use thiserror::Error;

/// Failures of the matching engine. A rejected candidate is not an error.
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    /// The inputs do not have the expected shape; the engine declines to guess.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid matching configuration: {0}")]
    InvalidConfig(String),
}

impl MatchError {
    pub(crate) fn invalid_field(field: &str, err: impl std::fmt::Display) -> Self {
        MatchError::InvalidInput(format!("{field}: {err}"))
    }
}
