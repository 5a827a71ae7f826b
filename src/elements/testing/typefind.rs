//! SniffTypeFind element for exercising the composite bin.

use crate::element::{DetectedFormat, TypeFind, TypeFindOutput};
use crate::error::Result;
use crate::event::Item;
use crate::format::{AudioCodec, Caps, MediaFormat};

/// A toy payload detector that matches buffers against a table of
/// magic-byte prefixes.
///
/// A detection is raised the first time a prefix matches, and again
/// whenever a later buffer matches a prefix whose format differs from the
/// caps last accepted via [`accept_src_caps`](TypeFind::accept_src_caps).
/// Events and unmatched buffers are forwarded untouched.
///
/// # Example
///
/// ```rust
/// use tagdemux::buffer::Buffer;
/// use tagdemux::element::TypeFind;
/// use tagdemux::elements::testing::SniffTypeFind;
///
/// let mut typefind = SniffTypeFind::with_default_mappings();
/// let out = typefind.feed(Buffer::from_static(b"\xff\xfbframe").into()).unwrap();
/// assert!(out.detected.is_some());
/// ```
pub struct SniffTypeFind {
    name: String,
    mappings: Vec<(Vec<u8>, MediaFormat)>,
    accepted: Option<Caps>,
    rejected: Vec<Caps>,
}

impl SniffTypeFind {
    /// Create a detector with an empty mapping table.
    pub fn new() -> Self {
        Self {
            name: "snifftypefind".to_string(),
            mappings: Vec::new(),
            accepted: None,
            rejected: Vec::new(),
        }
    }

    /// Create a detector preloaded with a couple of audio magics:
    /// an MPEG audio sync word and the Ogg capture pattern.
    pub fn with_default_mappings() -> Self {
        Self::new()
            .map(b"\xff\xfb", MediaFormat::Audio(AudioCodec::Mp3))
            .map(b"OggS", MediaFormat::Audio(AudioCodec::Vorbis))
    }

    /// Set a custom name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a magic-prefix mapping. Prefixes are tried in insertion order.
    pub fn map(mut self, magic: &[u8], format: MediaFormat) -> Self {
        self.mappings.push((magic.to_vec(), format));
        self
    }

    /// Mark caps to refuse when they are offered back after detection.
    pub fn reject(mut self, caps: Caps) -> Self {
        self.rejected.push(caps);
        self
    }

    fn sniff(&self, data: &[u8]) -> Option<MediaFormat> {
        self.mappings
            .iter()
            .find(|(magic, _)| data.starts_with(magic))
            .map(|(_, format)| *format)
    }
}

impl Default for SniffTypeFind {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeFind for SniffTypeFind {
    fn feed(&mut self, item: Item) -> Result<TypeFindOutput> {
        let format = match &item {
            Item::Buffer(buffer) => self.sniff(buffer.as_bytes()),
            Item::Event(_) => None,
        };

        match format {
            Some(format) if self.accepted.as_ref() != Some(&Caps::new(format)) => {
                let found = DetectedFormat::certain(Caps::new(format));
                Ok(TypeFindOutput::pass(item).with_detection(found))
            }
            _ => Ok(TypeFindOutput::pass(item)),
        }
    }

    fn accept_src_caps(&mut self, caps: &Caps) -> bool {
        if self.rejected.iter().any(|r| r == caps) {
            return false;
        }
        self.accepted = Some(caps.clone());
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
