//! Buffer type for data passing.

use crate::metadata::Metadata;
use bytes::Bytes;

/// A buffer containing payload data and metadata.
///
/// Buffers are the primary data container in tagdemux pipelines. The payload
/// is backed by [`Bytes`], so cloning a buffer is cheap (reference count
/// increment); the data itself is never copied during pipeline operation.
///
/// # Example
///
/// ```rust
/// use tagdemux::buffer::Buffer;
/// use tagdemux::metadata::Metadata;
///
/// let buffer = Buffer::from_bytes(vec![1, 2, 3], Metadata::with_sequence(0));
/// assert_eq!(buffer.len(), 3);
///
/// // Clone is O(1)
/// let buffer2 = buffer.clone();
/// assert_eq!(buffer.as_bytes().as_ptr(), buffer2.as_bytes().as_ptr());
/// ```
#[derive(Debug, Clone)]
pub struct Buffer {
    /// Payload bytes.
    data: Bytes,
    /// Buffer metadata.
    metadata: Metadata,
}

impl Buffer {
    /// Create a new buffer from payload bytes and metadata.
    pub fn new(data: Bytes, metadata: Metadata) -> Self {
        Self { data, metadata }
    }

    /// Create a buffer from owned bytes with the given metadata.
    pub fn from_bytes(data: impl Into<Bytes>, metadata: Metadata) -> Self {
        Self::new(data.into(), metadata)
    }

    /// Create a buffer from a static byte slice with default metadata.
    pub fn from_static(data: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(data), Metadata::default())
    }

    /// Get a reference to the buffer's metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Get a mutable reference to the buffer's metadata.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Get the buffer data as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the length of the buffer data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Create a sub-buffer (a view into a portion of this buffer).
    ///
    /// The new buffer shares the same backing storage and metadata.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len > self.len()`.
    pub fn slice(&self, offset: usize, len: usize) -> Buffer {
        assert!(offset + len <= self.len(), "sub-buffer exceeds parent bounds");
        Self {
            data: self.data.slice(offset..offset + len),
            metadata: self.metadata.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_buffer(size: usize) -> Buffer {
        Buffer::from_bytes(vec![0xabu8; size], Metadata::with_sequence(42))
    }

    #[test]
    fn test_buffer_creation() {
        let buffer = make_test_buffer(1024);
        assert_eq!(buffer.len(), 1024);
        assert_eq!(buffer.metadata().sequence, 42);
    }

    #[test]
    fn test_buffer_clone_is_cheap() {
        let buffer = make_test_buffer(1024);
        let buffer2 = buffer.clone();

        // Both should point to the same memory
        assert_eq!(buffer.as_bytes().as_ptr(), buffer2.as_bytes().as_ptr());
    }

    #[test]
    fn test_buffer_slice() {
        let buffer = make_test_buffer(1024);
        let sub = buffer.slice(100, 200);

        assert_eq!(sub.len(), 200);
        assert_eq!(sub.metadata().sequence, 42);
    }

    #[test]
    #[should_panic(expected = "sub-buffer exceeds parent bounds")]
    fn test_buffer_slice_out_of_bounds() {
        let buffer = make_test_buffer(1024);
        let _ = buffer.slice(900, 200); // 900 + 200 > 1024
    }
}
