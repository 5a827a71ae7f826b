//! Buffer metadata types.

use std::time::Duration;

/// Flags indicating buffer properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferFlags {
    /// Buffer marks end of stream.
    pub eos: bool,
    /// Buffer contains a sync point (keyframe equivalent).
    pub sync_point: bool,
    /// Buffer is corrupted or incomplete.
    pub corrupted: bool,
}

/// Metadata associated with a buffer.
///
/// Contains timing information, a sequence number, and flags. Sequence
/// numbers are assigned by whatever produces the buffer and are used for
/// ordering checks in tests and logs.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Presentation timestamp.
    pub pts: Option<Duration>,
    /// Monotonic sequence number.
    pub sequence: u64,
    /// Buffer flags.
    pub flags: BufferFlags,
}

impl Metadata {
    /// Create metadata with a sequence number.
    pub fn with_sequence(sequence: u64) -> Self {
        Self {
            sequence,
            ..Default::default()
        }
    }

    /// Set the presentation timestamp.
    pub fn with_pts(mut self, pts: Duration) -> Self {
        self.pts = Some(pts);
        self
    }
}
