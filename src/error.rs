//! Error types
//!
//! The simulation itself is total and never fails. Errors only come from the
//! edges: reading configuration and finding something to draw on.

use thiserror::Error;

/// Configuration could not be read or holds values the game cannot run with
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// The drawing surface is not available for this frame
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("no element with id `{0}`")]
    MissingElement(String),

    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),

    #[error("canvas `{0}` has no 2d context")]
    NoContext(String),
}
