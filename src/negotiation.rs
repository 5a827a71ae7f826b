//! Negotiation error types.

use thiserror::Error;

/// Error during caps negotiation.
///
/// The only error this crate originates itself. Everything else a
/// [`TagDemuxBin`](crate::elements::TagDemuxBin) returns is passed through from
/// its child stages untouched.
#[derive(Debug, Error)]
pub enum NegotiationError {
    /// The detector rejected the resolved caps when binding the source pad.
    #[error("{element} rejected caps {caps}")]
    CapsRejected {
        /// Name of the rejecting element.
        element: String,
        /// Display form of the rejected caps.
        caps: String,
    },

    /// Caps could not be fixated to a single format.
    #[error("cannot fixate caps {caps}: {reason}")]
    CannotFixate {
        /// Display form of the unfixed caps.
        caps: String,
        /// Reason for failure.
        reason: String,
    },
}

impl NegotiationError {
    /// Create a "caps rejected" error.
    pub fn caps_rejected(element: impl Into<String>, caps: impl ToString) -> Self {
        Self::CapsRejected {
            element: element.into(),
            caps: caps.to_string(),
        }
    }
}
