//! Media format and capabilities types.
//!
//! This module provides type-safe media format descriptions for buffers and
//! element capabilities (caps) for format negotiation.
//!
//! Caps answer two questions for the composite bin: what container the fixed
//! sink pad accepts, and what resolved format the dynamic source pad
//! advertises once the detector has spoken.

use smallvec::SmallVec;
use std::fmt;

/// Encoded audio codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCodec {
    /// MPEG-1 Layer III.
    Mp3,
    /// Advanced Audio Coding.
    Aac,
    /// Vorbis.
    Vorbis,
    /// Free Lossless Audio Codec.
    Flac,
}

/// Encoded video codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoCodec {
    /// H.264 / AVC.
    H264,
    /// H.265 / HEVC.
    H265,
}

/// Container format whose payload type is not known until parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    /// ID3-tagged stream (leading ID3v2 / trailing ID3v1 block).
    Id3,
    /// Ogg container.
    Ogg,
    /// APE-tagged stream.
    Ape,
}

/// A concrete media format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    /// Encoded audio (compressed).
    Audio(AudioCodec),
    /// Encoded video (compressed).
    Video(VideoCodec),
    /// An outer container format.
    Container(ContainerFormat),
    /// Raw bytes (no format constraints).
    Bytes,
}

impl MediaFormat {
    /// Check compatibility (can data flow between these formats?).
    ///
    /// Two formats are compatible if either is `Bytes` (accepts anything)
    /// or they are the same variant with matching parameters.
    pub fn compatible(&self, other: &MediaFormat) -> bool {
        match (self, other) {
            (Self::Bytes, _) | (_, Self::Bytes) => true,
            (Self::Audio(a), Self::Audio(b)) => a == b,
            (Self::Video(a), Self::Video(b)) => a == b,
            (Self::Container(a), Self::Container(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio(AudioCodec::Mp3) => write!(f, "audio/mpeg"),
            Self::Audio(AudioCodec::Aac) => write!(f, "audio/aac"),
            Self::Audio(AudioCodec::Vorbis) => write!(f, "audio/x-vorbis"),
            Self::Audio(AudioCodec::Flac) => write!(f, "audio/x-flac"),
            Self::Video(VideoCodec::H264) => write!(f, "video/x-h264"),
            Self::Video(VideoCodec::H265) => write!(f, "video/x-h265"),
            Self::Container(ContainerFormat::Id3) => write!(f, "application/x-id3"),
            Self::Container(ContainerFormat::Ogg) => write!(f, "application/ogg"),
            Self::Container(ContainerFormat::Ape) => write!(f, "application/x-ape"),
            Self::Bytes => write!(f, "application/octet-stream"),
        }
    }
}

/// Capabilities: what formats an element accepts/produces.
///
/// Caps describe the formats an element can handle. They're used for pad
/// validation (ensuring a consumer can connect) and negotiation (choosing
/// the format a connection carries).
///
/// # Examples
///
/// ```rust
/// use tagdemux::format::{AudioCodec, Caps, MediaFormat};
///
/// // Element that accepts any format
/// let any_caps = Caps::any();
///
/// // Element that only produces MP3
/// let mp3_caps = Caps::new(MediaFormat::Audio(AudioCodec::Mp3));
///
/// // Element that accepts multiple formats
/// let multi_caps = Caps::many([
///     MediaFormat::Audio(AudioCodec::Mp3),
///     MediaFormat::Audio(AudioCodec::Aac),
/// ]);
///
/// assert!(mp3_caps.intersects(&multi_caps));
/// assert!(mp3_caps.intersects(&any_caps));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Caps(SmallVec<[MediaFormat; 2]>);

impl Caps {
    /// Create caps that accept any format.
    pub fn any() -> Self {
        Self(SmallVec::new())
    }

    /// Create caps with a single format.
    pub fn new(format: MediaFormat) -> Self {
        let mut v = SmallVec::new();
        v.push(format);
        Self(v)
    }

    /// Create caps with multiple acceptable formats.
    ///
    /// The first format is the preferred one.
    pub fn many(formats: impl IntoIterator<Item = MediaFormat>) -> Self {
        Self(formats.into_iter().collect())
    }

    /// Is this "any format"?
    #[inline]
    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }

    /// Is this a single fixed format?
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.0.len() == 1
    }

    /// Get the formats.
    #[inline]
    pub fn formats(&self) -> &[MediaFormat] {
        &self.0
    }

    /// Get the preferred format (first one).
    #[inline]
    pub fn preferred(&self) -> Option<&MediaFormat> {
        self.0.first()
    }

    /// Check if compatible with another caps.
    ///
    /// Two caps are compatible if there exists at least one format that
    /// both can handle.
    pub fn intersects(&self, other: &Caps) -> bool {
        if self.is_any() || other.is_any() {
            return true;
        }
        self.0
            .iter()
            .any(|a| other.0.iter().any(|b| a.compatible(b)))
    }

    /// Find the first compatible format between two caps.
    ///
    /// Returns the format from `self` that is compatible with `other`.
    /// If either is "any", returns the other's preferred format.
    pub fn negotiate(&self, other: &Caps) -> Option<MediaFormat> {
        if self.is_any() {
            return other.preferred().copied();
        }
        if other.is_any() {
            return self.preferred().copied();
        }
        self.0
            .iter()
            .find(|a| other.0.iter().any(|b| a.compatible(b)))
            .copied()
    }
}

impl fmt::Display for Caps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return write!(f, "ANY");
        }
        for (i, format) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", format)?;
        }
        Ok(())
    }
}

impl From<MediaFormat> for Caps {
    fn from(format: MediaFormat) -> Self {
        Self::new(format)
    }
}
