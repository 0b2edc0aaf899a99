//! Error type shared by the simulation, parser and plan loader

use thiserror::Error;

/// Everything that can go wrong while building or driving a level.
///
/// Operations validate their inputs before mutating anything, so an `Err`
/// always leaves the receiver untouched.
#[derive(Debug, Error)]
pub enum SimError {
    /// A value had the wrong shape (e.g. a plan row that is not a string)
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: String },

    /// A required argument was not supplied
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// `x` and `!` are obstacle symbols and cannot spawn actors
    #[error("symbol {0:?} is reserved for obstacles")]
    ReservedSymbol(char),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
