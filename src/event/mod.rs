//! Events and tagging system for pipelines.
//!
//! This module provides out-of-band events that flow through pipelines
//! alongside buffers, enabling stream metadata (tags), stream identity, and
//! end-of-stream signaling.
//!
//! The interceptor in [`crate::elements`] cares about exactly one kind:
//! [`Event::Tags`], the out-of-band informational events that would be lost
//! if they crossed the internal link before the bin's source pad exists.
//!
//! # Example
//!
//! ```rust
//! use tagdemux::event::{Event, TagList, TagMergeMode, TagsEvent};
//!
//! let mut tags = TagList::new();
//! tags.set_title("My Song");
//!
//! let event = Event::Tags(TagsEvent::new(tags));
//! assert_eq!(event.name(), "tags");
//! assert!(event.is_tags());
//! ```

mod tags;

pub use tags::{TagList, TagMergeMode, TagValue};

use crate::buffer::Buffer;

/// Events that flow through the pipeline.
///
/// Events provide out-of-band signaling for control flow and metadata.
/// All events defined here flow downstream, with the data.
#[derive(Debug, Clone)]
pub enum Event {
    /// Start of a new logical stream.
    StreamStart(StreamStartEvent),

    /// Stream tags (metadata like title, artist, duration).
    Tags(TagsEvent),

    /// End of stream - no more data will be produced.
    Eos,

    /// Custom application event.
    Custom(CustomEvent),
}

impl Event {
    /// Check if this is a tags event.
    ///
    /// Tag events are the out-of-band informational kind the composite bin
    /// captures while its source pad does not exist yet.
    pub fn is_tags(&self) -> bool {
        matches!(self, Event::Tags(_))
    }

    /// Get a human-readable name for this event type.
    pub fn name(&self) -> &str {
        match self {
            Event::StreamStart(_) => "stream-start",
            Event::Tags(_) => "tags",
            Event::Eos => "eos",
            Event::Custom(c) => &c.name,
        }
    }
}

/// Stream start event - begins a new logical stream.
#[derive(Debug, Clone)]
pub struct StreamStartEvent {
    /// Unique stream identifier.
    pub stream_id: String,
}

impl StreamStartEvent {
    /// Create a new stream start event.
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
        }
    }
}

/// Tags event - stream metadata.
#[derive(Debug, Clone)]
pub struct TagsEvent {
    /// The tag list.
    pub tags: TagList,
    /// How to merge with existing tags.
    pub mode: TagMergeMode,
}

impl TagsEvent {
    /// Create a new tags event with the default merge mode.
    pub fn new(tags: TagList) -> Self {
        Self {
            tags,
            mode: TagMergeMode::default(),
        }
    }

    /// Create with a specific merge mode.
    pub fn with_mode(tags: TagList, mode: TagMergeMode) -> Self {
        Self { tags, mode }
    }
}

/// Custom application event.
#[derive(Debug, Clone)]
pub struct CustomEvent {
    /// Event name.
    pub name: String,
    /// Event data as key-value pairs.
    pub data: std::collections::HashMap<String, TagValue>,
}

impl CustomEvent {
    /// Create a new custom event.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: std::collections::HashMap::new(),
        }
    }

    /// Add data to the event.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Item that flows through the pipeline - either a buffer or an event.
///
/// This unified type allows buffers and events to travel the same link,
/// which is what keeps serialized events ordered with the data around them.
#[derive(Debug, Clone)]
pub enum Item {
    /// A data buffer.
    Buffer(Buffer),
    /// An event.
    Event(Event),
}

impl Item {
    /// Check if this is a buffer.
    pub fn is_buffer(&self) -> bool {
        matches!(self, Item::Buffer(_))
    }

    /// Check if this is an event.
    pub fn is_event(&self) -> bool {
        matches!(self, Item::Event(_))
    }

    /// Get the buffer if this is a buffer.
    pub fn as_buffer(&self) -> Option<&Buffer> {
        match self {
            Item::Buffer(b) => Some(b),
            _ => None,
        }
    }

    /// Get the event if this is an event.
    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Item::Event(e) => Some(e),
            _ => None,
        }
    }

    /// Take the buffer if this is a buffer.
    pub fn into_buffer(self) -> Option<Buffer> {
        match self {
            Item::Buffer(b) => Some(b),
            _ => None,
        }
    }

    /// Take the event if this is an event.
    pub fn into_event(self) -> Option<Event> {
        match self {
            Item::Event(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Buffer> for Item {
    fn from(buffer: Buffer) -> Self {
        Item::Buffer(buffer)
    }
}

impl From<Event> for Item {
    fn from(event: Event) -> Self {
        Item::Event(event)
    }
}
