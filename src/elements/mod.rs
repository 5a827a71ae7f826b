//! Concrete pipeline elements.
//!
//! - [`TagDemuxBin`]: the composite tag-demux element with a lazily
//!   created source pad.
//! - [`testing`]: deterministic collaborator implementations for tests.

mod demux_bin;
pub mod testing;

pub use demux_bin::{BinState, TagDemuxBin};
