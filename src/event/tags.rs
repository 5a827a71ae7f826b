//! Tag system for stream metadata.
//!
//! Tags provide metadata about streams such as title, artist, codec info,
//! and other descriptive information. In a tag-demuxing bin they are the
//! out-of-band cargo the interceptor must not let fall on the floor.
//!
//! # Example
//!
//! ```rust
//! use tagdemux::event::{TagList, TagValue};
//!
//! let mut tags = TagList::new();
//! tags.set_title("My Song");
//! tags.set("bitrate", 128_000u64);
//!
//! assert_eq!(tags.title(), Some("My Song"));
//! assert_eq!(tags.get_uint("bitrate"), Some(128_000));
//! ```

use std::collections::HashMap;

/// Value that can be stored in a tag list.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// String value.
    String(String),
    /// Unsigned integer (durations, bitrates, track numbers).
    UInt(u64),
    /// Signed integer.
    Int(i64),
    /// Floating point value.
    Double(f64),
    /// Boolean value.
    Bool(bool),
    /// Binary data (cover art, raw frames).
    Binary(Vec<u8>),
}

impl TagValue {
    /// Get as string if this is a String variant.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            TagValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as u64 if this is a UInt variant.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            TagValue::UInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int variant.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TagValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as f64 if this is a Double variant.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            TagValue::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool variant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TagValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as bytes if this is a Binary variant.
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            TagValue::Binary(b) => Some(b),
            _ => None,
        }
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::String(s)
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::String(s.to_string())
    }
}

impl From<u64> for TagValue {
    fn from(n: u64) -> Self {
        TagValue::UInt(n)
    }
}

impl From<i64> for TagValue {
    fn from(n: i64) -> Self {
        TagValue::Int(n)
    }
}

impl From<f64> for TagValue {
    fn from(n: f64) -> Self {
        TagValue::Double(n)
    }
}

impl From<bool> for TagValue {
    fn from(b: bool) -> Self {
        TagValue::Bool(b)
    }
}

impl From<Vec<u8>> for TagValue {
    fn from(b: Vec<u8>) -> Self {
        TagValue::Binary(b)
    }
}

/// How to merge an incoming tag list with an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMergeMode {
    /// Incoming tags overwrite existing ones, others are kept.
    #[default]
    Append,
    /// Incoming tags fully replace the existing list.
    Replace,
    /// Existing tags win; only new keys are added.
    Keep,
}

/// A collection of stream metadata tags.
///
/// Tags are key-value pairs where keys are strings and values can be
/// various types (string, number, binary, etc.).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagList {
    tags: HashMap<String, TagValue>,
}

impl TagList {
    /// Create a new empty tag list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tag value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<TagValue>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Get a tag value.
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(key)
    }

    /// Get a tag as a string.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(TagValue::as_string)
    }

    /// Get a tag as a u64.
    pub fn get_uint(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(TagValue::as_uint)
    }

    /// Check if a tag exists.
    pub fn contains(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    /// Get the number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over all tags.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge another tag list into this one.
    pub fn merge(&mut self, other: &TagList, mode: TagMergeMode) {
        match mode {
            TagMergeMode::Replace => {
                self.tags = other.tags.clone();
            }
            TagMergeMode::Append => {
                for (k, v) in &other.tags {
                    self.tags.insert(k.clone(), v.clone());
                }
            }
            TagMergeMode::Keep => {
                for (k, v) in &other.tags {
                    self.tags.entry(k.clone()).or_insert_with(|| v.clone());
                }
            }
        }
    }

    /// Get the title tag.
    pub fn title(&self) -> Option<&str> {
        self.get_string("title")
    }

    /// Set the title tag.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.set("title", title.into());
    }

    /// Get the artist tag.
    pub fn artist(&self) -> Option<&str> {
        self.get_string("artist")
    }

    /// Set the artist tag.
    pub fn set_artist(&mut self, artist: impl Into<String>) {
        self.set("artist", artist.into());
    }

    /// Get the album tag.
    pub fn album(&self) -> Option<&str> {
        self.get_string("album")
    }

    /// Set the album tag.
    pub fn set_album(&mut self, album: impl Into<String>) {
        self.set("album", album.into());
    }
}
