//! # tagdemux
//!
//! A composite pipeline element that wraps a tag demultiplexer and a payload
//! type detector, exposing a single source pad that is created lazily once
//! the payload format is known.
//!
//! Container formats that lead with a metadata block (ID3 being the classic
//! case) pose a bootstrapping problem: the pipeline cannot advertise what
//! the element outputs until the leading block has been parsed and the
//! payload sniffed. [`elements::TagDemuxBin`] solves this by:
//!
//! - deferring creation of its source pad until the detector reports a
//!   format,
//! - intercepting tag events emitted by the demuxer *before* the pad exists
//!   and replaying them, in order, through the freshly created pad,
//! - tearing the pad down cleanly on state transitions so a consumer never
//!   sees a stale pad.
//!
//! The demuxer and detector themselves are collaborators supplied by the
//! caller via the [`element::TagDemux`] and [`element::TypeFind`] traits;
//! this crate only orchestrates them.
//!
//! ## Quick Start
//!
//! ```rust
//! use tagdemux::prelude::*;
//! use tagdemux::elements::testing::{SniffTypeFind, TagStripDemux};
//!
//! # fn main() -> tagdemux::Result<()> {
//! let mut bin = TagDemuxBin::new(
//!     Box::new(TagStripDemux::new()),
//!     Box::new(SniffTypeFind::with_default_mappings()),
//! );
//!
//! bin.transition(BinState::Active)?;
//! bin.push(Buffer::from_static(b"TAG:My Song"))?;
//! bin.push(Buffer::from_static(b"\xff\xfbpayload"))?;
//!
//! // The pad now exists; the tag event captured above has been replayed.
//! let rx = bin.take_src_receiver().unwrap();
//! assert!(rx.try_recv().unwrap().is_event());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod bus;
pub mod element;
pub mod elements;
pub mod error;
pub mod event;
pub mod format;
pub mod link;
pub mod metadata;
pub mod negotiation;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::elements::{BinState, TagDemuxBin};
    pub use crate::buffer::Buffer;
    pub use crate::bus::BinMessage;
    pub use crate::element::{DetectedFormat, TagDemux, TypeFind, TypeFindOutput};
    pub use crate::error::{Error, Result};
    pub use crate::event::{Event, Item, TagList};
    pub use crate::format::{Caps, MediaFormat};
}

pub use error::{Error, Result};
