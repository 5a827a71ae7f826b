//! Collaborator traits for the composite bin.
//!
//! The composite bin does not parse containers or sniff bytes itself; both
//! jobs belong to collaborators supplied by the caller. These traits pin
//! down exactly what the bin needs from them and nothing more.

use crate::buffer::Buffer;
use crate::error::Result;
use crate::event::Item;
use crate::format::Caps;

/// A metadata (tag) demultiplexer.
///
/// Accepts the outer container byte stream on its single sink and produces,
/// on its single internal source, the stripped payload plus any tag events
/// for metadata it recognized. Tag events are emitted regardless of whether
/// anything downstream is connected yet; compensating for that is the
/// composite bin's job.
pub trait TagDemux: Send {
    /// Process one input buffer into zero or more output items, in the
    /// order they should travel downstream.
    fn process(&mut self, buffer: Buffer) -> Result<Vec<Item>>;

    /// Caps accepted on the sink pad: the single recognized container type.
    fn sink_caps(&self) -> Caps;

    /// Get the name of this demuxer (for debugging/logging).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A detected payload format, reported by a [`TypeFind`].
#[derive(Debug, Clone)]
pub struct DetectedFormat {
    /// The resolved format descriptor.
    pub caps: Caps,
    /// Detection confidence, 0..=100. Consumed for logging only.
    pub probability: u32,
}

impl DetectedFormat {
    /// Maximum detection confidence.
    pub const MAXIMUM: u32 = 100;

    /// Create a detection with the given confidence.
    pub fn new(caps: Caps, probability: u32) -> Self {
        Self { caps, probability }
    }

    /// Create a detection with maximum confidence.
    pub fn certain(caps: Caps) -> Self {
        Self::new(caps, Self::MAXIMUM)
    }
}

/// Result of feeding one item to a [`TypeFind`].
#[derive(Debug, Default)]
pub struct TypeFindOutput {
    /// Items to forward downstream, in order.
    pub forward: Vec<Item>,
    /// A format detection raised by this feed, if any.
    pub detected: Option<DetectedFormat>,
}

impl TypeFindOutput {
    /// Nothing to forward, nothing detected.
    pub fn none() -> Self {
        Self::default()
    }

    /// Forward a single item, no detection.
    pub fn pass(item: Item) -> Self {
        Self {
            forward: vec![item],
            detected: None,
        }
    }

    /// Attach a detection to this output.
    pub fn with_detection(mut self, found: DetectedFormat) -> Self {
        self.detected = Some(found);
        self
    }
}

/// A payload type detector.
///
/// Consumes the demuxer's output, inspects content, and raises exactly one
/// [`DetectedFormat`] per successful detection episode. The bin applies the
/// resolved caps back onto the detector via
/// [`accept_src_caps`](TypeFind::accept_src_caps) before exposing them on
/// its own source pad; a detector may reject caps it cannot actually
/// produce, which surfaces as a negotiation error.
pub trait TypeFind: Send {
    /// Feed one item from the internal link.
    ///
    /// Items fed before detection may be held back or forwarded at the
    /// detector's discretion; items fed afterwards are expected to be
    /// forwarded transparently.
    fn feed(&mut self, item: Item) -> Result<TypeFindOutput>;

    /// Offer the resolved output caps to the detector.
    ///
    /// Returns `false` to reject them, in which case no source pad is
    /// created and the rejection is reported as a negotiation error.
    fn accept_src_caps(&mut self, caps: &Caps) -> bool;

    /// Get the name of this detector (for debugging/logging).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;

    #[test]
    fn test_detected_format() {
        let found = DetectedFormat::certain(Caps::any());
        assert_eq!(found.probability, DetectedFormat::MAXIMUM);
    }

    #[test]
    fn test_typefind_output() {
        let none = TypeFindOutput::none();
        assert!(none.forward.is_empty());
        assert!(none.detected.is_none());

        let out = TypeFindOutput::pass(Buffer::from_static(b"x").into())
            .with_detection(DetectedFormat::certain(Caps::any()));
        assert_eq!(out.forward.len(), 1);
        assert!(out.detected.is_some());
    }
}
