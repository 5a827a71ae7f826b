//! Error types for tagdemux.

use crate::negotiation::NegotiationError;
use thiserror::Error;

/// Result type alias using tagdemux's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tagdemux operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Caps negotiation failed while binding the source pad.
    #[error("negotiation failed: {0}")]
    Negotiation(#[from] NegotiationError),

    /// Pipeline-level error (wrong state, closed link).
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// Error originated by a child stage (demuxer or detector).
    #[error("element error in {element}: {message}")]
    Element {
        /// Name of the failing element.
        element: String,
        /// What went wrong.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an element error.
    pub fn element(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Element {
            element: element.into(),
            message: message.into(),
        }
    }
}
