//! Message bus for out-of-band reporting from the composite bin.
//!
//! The bin never panics and never halts on its own; state changes, pad
//! lifecycle and negotiation failures are posted here for the enclosing
//! pipeline to act on. Absence of a detection is deliberately not a
//! message: silence is not an error.

use crate::format::Caps;
use std::fmt;

/// Messages emitted by a [`TagDemuxBin`](crate::elements::TagDemuxBin).
#[derive(Debug, Clone)]
pub enum BinMessage {
    /// The bin's state has changed.
    StateChanged {
        /// Previous state.
        from: crate::elements::BinState,
        /// New state.
        to: crate::elements::BinState,
    },

    /// The dynamic source pad was created and is now connectable.
    PadAdded {
        /// The resolved caps the pad advertises.
        caps: Caps,
    },

    /// The dynamic source pad was destroyed.
    PadRemoved,

    /// An error occurred inside the bin (negotiation failure).
    Error {
        /// The error message.
        message: String,
    },
}

impl fmt::Display for BinMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinMessage::StateChanged { from, to } => {
                write!(f, "StateChanged: {:?} -> {:?}", from, to)
            }
            BinMessage::PadAdded { caps } => write!(f, "PadAdded: {}", caps),
            BinMessage::PadRemoved => write!(f, "PadRemoved"),
            BinMessage::Error { message } => write!(f, "Error: {}", message),
        }
    }
}

/// Bus carrying [`BinMessage`]s from the bin to interested consumers.
///
/// Posting never blocks (the underlying channel is unbounded) and never
/// fails: if nobody subscribed, messages simply accumulate until the bus is
/// dropped.
pub struct MessageBus {
    tx: kanal::Sender<BinMessage>,
    rx: kanal::Receiver<BinMessage>,
}

impl MessageBus {
    /// Create a new bus.
    pub fn new() -> Self {
        let (tx, rx) = kanal::unbounded();
        Self { tx, rx }
    }

    /// Post a message onto the bus.
    pub fn post(&self, message: BinMessage) {
        tracing::trace!(%message, "bus post");
        // Ignore a closed bus: the bin keeps working without listeners.
        let _ = self.tx.send(message);
    }

    /// Subscribe to messages on this bus.
    pub fn subscribe(&self) -> MessageReceiver {
        MessageReceiver {
            inner: self.rx.clone(),
        }
    }

    /// Get a posting handle that can be handed to a component of the bin.
    pub fn sender(&self) -> MessageSender {
        MessageSender {
            inner: self.tx.clone(),
        }
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting handle for a [`MessageBus`].
#[derive(Clone)]
pub struct MessageSender {
    inner: kanal::Sender<BinMessage>,
}

impl MessageSender {
    /// Post a message onto the bus.
    pub fn post(&self, message: BinMessage) {
        tracing::trace!(%message, "bus post");
        let _ = self.inner.send(message);
    }
}

/// Receiving handle for a [`MessageBus`].
#[derive(Clone)]
pub struct MessageReceiver {
    inner: kanal::Receiver<BinMessage>,
}

impl MessageReceiver {
    /// Try to receive the next message without blocking.
    pub fn try_recv(&self) -> Option<BinMessage> {
        match self.inner.try_recv() {
            Ok(Some(message)) => Some(message),
            _ => None,
        }
    }

    /// Drain all currently pending messages.
    pub fn drain(&self) -> Vec<BinMessage> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
