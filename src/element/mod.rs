//! Element system: pads and collaborator traits.
//!
//! - [`Pad`], [`PadTemplate`], [`GhostPad`]: connection points and the
//!   proxy pad a composite element publishes for a child stage.
//! - [`TagDemux`]: the metadata demultiplexer collaborator.
//! - [`TypeFind`]: the payload type detector collaborator.
//!
//! Elements follow the "sync processing, sync orchestration" principle:
//! `process`/`feed` are synchronous and run in the caller's context, which
//! is what lets the composite bin reason about capture and replay ordering
//! without locks beyond its own state mutex.

mod pad;
mod traits;

pub use pad::{GhostPad, Pad, PadDirection, PadPresence, PadTemplate};
pub use traits::{DetectedFormat, TagDemux, TypeFind, TypeFindOutput};
