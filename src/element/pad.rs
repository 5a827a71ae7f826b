//! Pad abstraction for element inputs and outputs.
//!
//! Pads represent the connection points of elements. A composite element
//! additionally uses [`GhostPad`]s: externally visible pads that proxy an
//! internal child-stage pad to the outside world.

use crate::error::Result;
use crate::event::Item;
use crate::format::Caps;
use crate::link::{LocalLink, LocalReceiver, LocalSender};
use std::sync::Arc;

/// Direction of a pad (input or output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadDirection {
    /// An input pad (receives items from upstream).
    Input,
    /// An output pad (sends items downstream).
    Output,
}

/// Whether a pad is always present or created dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadPresence {
    /// Pad is always present on the element.
    Always,
    /// Pad is created on demand (e.g., once a demuxer or detector has
    /// discovered what it is dealing with).
    Sometimes,
    /// Pad is created when requested.
    Request,
}

/// Template for creating pads.
///
/// Pad templates define the characteristics of pads that an element can
/// have, including the caps a pad created from them may carry.
#[derive(Debug, Clone)]
pub struct PadTemplate {
    /// Name pattern for this pad (e.g., "src", "sink").
    pub name: String,
    /// Direction of this pad.
    pub direction: PadDirection,
    /// Whether this pad is always present or created on demand.
    pub presence: PadPresence,
    /// Caps constraint for pads created from this template.
    pub caps: Caps,
}

impl PadTemplate {
    /// Create a new pad template.
    pub fn new(
        name: impl Into<String>,
        direction: PadDirection,
        presence: PadPresence,
        caps: Caps,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            presence,
            caps,
        }
    }

    /// Create a template for an always-present input pad.
    pub fn input(name: impl Into<String>, caps: Caps) -> Self {
        Self::new(name, PadDirection::Input, PadPresence::Always, caps)
    }

    /// Create a template for a sometimes-present output pad.
    pub fn sometimes_output(name: impl Into<String>, caps: Caps) -> Self {
        Self::new(name, PadDirection::Output, PadPresence::Sometimes, caps)
    }
}

/// A pad instance on an element.
#[derive(Debug, Clone)]
pub struct Pad {
    /// Unique name of this pad within the element.
    name: String,
    /// Direction of this pad.
    direction: PadDirection,
    /// The template this pad was created from (if any).
    template: Option<Arc<PadTemplate>>,
}

impl Pad {
    /// Create a new pad.
    pub fn new(name: impl Into<String>, direction: PadDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            template: None,
        }
    }

    /// Create a pad from a template.
    pub fn from_template(template: Arc<PadTemplate>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: template.direction,
            template: Some(template),
        }
    }

    /// Create a standard input pad named "sink".
    pub fn sink() -> Self {
        Self::new("sink", PadDirection::Input)
    }

    /// Create a standard output pad named "src".
    pub fn src() -> Self {
        Self::new("src", PadDirection::Output)
    }

    /// Get the pad's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the pad's direction.
    pub fn direction(&self) -> PadDirection {
        self.direction
    }

    /// Check if this is an input pad.
    pub fn is_input(&self) -> bool {
        self.direction == PadDirection::Input
    }

    /// Check if this is an output pad.
    pub fn is_output(&self) -> bool {
        self.direction == PadDirection::Output
    }

    /// Get the template this pad was created from.
    pub fn template(&self) -> Option<&Arc<PadTemplate>> {
        self.template.as_ref()
    }
}

/// An externally visible pad proxying an internal child-stage output.
///
/// A ghost pad is created with its caps already resolved; no negotiation
/// round-trip happens after creation. Items pushed through it land in the
/// [`LocalLink`] a consumer attaches to. Dropping the ghost pad closes the
/// link, which is how a downstream consumer learns the pad is gone.
pub struct GhostPad {
    pad: Pad,
    caps: Caps,
    tx: LocalSender,
    rx: Option<LocalReceiver>,
}

impl GhostPad {
    /// Create a ghost src pad with resolved caps.
    ///
    /// The receiving half of the pad's link is held inside the pad until a
    /// consumer claims it with [`take_receiver`](Self::take_receiver);
    /// items pushed in the meantime queue up in order.
    pub fn src(caps: Caps) -> Self {
        let (tx, rx) = LocalLink::unbounded();
        Self {
            pad: Pad::src(),
            caps,
            tx,
            rx: Some(rx),
        }
    }

    /// Get the underlying pad.
    pub fn pad(&self) -> &Pad {
        &self.pad
    }

    /// Get the resolved caps this pad advertises.
    pub fn caps(&self) -> &Caps {
        &self.caps
    }

    /// Push an item through the pad to the consumer side.
    pub fn push(&self, item: Item) -> Result<()> {
        self.tx.send(item)
    }

    /// Take the consumer half of the pad's link.
    ///
    /// Returns `None` if it was already taken.
    pub fn take_receiver(&mut self) -> Option<LocalReceiver> {
        self.rx.take()
    }
}

impl std::fmt::Debug for GhostPad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GhostPad")
            .field("pad", &self.pad)
            .field("caps", &self.caps)
            .field("pending", &self.tx.len())
            .finish()
    }
}
