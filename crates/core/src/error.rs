use thiserror::Error;

/// Errors raised by the rules crates and the search engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("No legal moves available")]
    NoLegalMoves,
}

/// Convenience Result type for rules and search operations
pub type Result<T> = std::result::Result<T, CoreError>;
