//! Test and utility collaborator elements.
//!
//! - [`TagStripDemux`]: Strips a leading `TAG:` block into a tags event
//! - [`SniffTypeFind`]: Detects payload formats by magic-byte prefix

mod demux;
mod typefind;

pub use demux::TagStripDemux;
pub use typefind::SniffTypeFind;
