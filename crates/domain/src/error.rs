//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.

/// Top-level domain error.
#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    #[error("validation failed")]
    Validation(#[from] ValidationError),
}

/// Invariant violations detected while building domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown room {0:?}")]
    UnknownRoom(String),
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
}
