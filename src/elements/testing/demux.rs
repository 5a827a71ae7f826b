//! TagStripDemux element for exercising the composite bin.

use crate::buffer::Buffer;
use crate::element::TagDemux;
use crate::error::Result;
use crate::event::{Event, Item, TagList, TagsEvent};
use crate::format::{Caps, ContainerFormat, MediaFormat};

/// Marker prefix recognized as a metadata block.
const TAG_PREFIX: &[u8] = b"TAG:";

/// A toy tag demuxer that treats any buffer starting with `TAG:` as a
/// metadata block.
///
/// A `TAG:` buffer is consumed whole and turned into a tags event whose
/// `title` is the text after the prefix. Every other buffer is forwarded
/// untouched as payload. This is just enough demuxing to drive the
/// composite bin through its capture, replay, and teardown paths.
///
/// # Example
///
/// ```rust
/// use tagdemux::buffer::Buffer;
/// use tagdemux::element::TagDemux;
/// use tagdemux::elements::testing::TagStripDemux;
///
/// let mut demux = TagStripDemux::new();
/// let out = demux.process(Buffer::from_static(b"TAG:My Song")).unwrap();
/// assert!(out[0].is_event());
/// ```
pub struct TagStripDemux {
    name: String,
}

impl TagStripDemux {
    /// Create a demuxer with the default name.
    pub fn new() -> Self {
        Self {
            name: "tagstripdemux".to_string(),
        }
    }

    /// Set a custom name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for TagStripDemux {
    fn default() -> Self {
        Self::new()
    }
}

impl TagDemux for TagStripDemux {
    fn process(&mut self, buffer: Buffer) -> Result<Vec<Item>> {
        let data = buffer.as_bytes();
        if let Some(rest) = data.strip_prefix(TAG_PREFIX) {
            let mut tags = TagList::new();
            tags.set("title", String::from_utf8_lossy(rest).into_owned());
            Ok(vec![Item::Event(Event::Tags(TagsEvent::new(tags)))])
        } else {
            Ok(vec![Item::Buffer(buffer)])
        }
    }

    fn sink_caps(&self) -> Caps {
        Caps::new(MediaFormat::Container(ContainerFormat::Id3))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
