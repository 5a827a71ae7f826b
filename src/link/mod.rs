//! Links between pipeline stages.
//!
//! Two abstractions live here:
//!
//! - [`LocalLink`]: an in-process channel carrying [`Item`]s between an
//!   element and its downstream consumer (a thin wrapper around kanal).
//! - [`ObservedLink`]: the internal link between two child stages of a
//!   composite element, which invokes registered [`LinkProbe`]s
//!   synchronously on every item that crosses it.

use crate::error::{Error, Result};
use crate::event::Item;

/// A local link for passing items between elements in the same process.
///
/// # Example
///
/// ```rust
/// use tagdemux::buffer::Buffer;
/// use tagdemux::event::Item;
/// use tagdemux::link::LocalLink;
///
/// let (tx, rx) = LocalLink::unbounded();
/// tx.send(Buffer::from_static(b"hello").into()).unwrap();
///
/// let received = rx.recv().unwrap();
/// assert!(received.is_buffer());
/// ```
pub struct LocalLink;

impl LocalLink {
    /// Create a bounded local link with the specified capacity.
    pub fn bounded(capacity: usize) -> (LocalSender, LocalReceiver) {
        let (tx, rx) = kanal::bounded(capacity);
        (LocalSender { inner: tx }, LocalReceiver { inner: rx })
    }

    /// Create an unbounded local link.
    ///
    /// Sends on an unbounded link never block, which is what the composite
    /// bin relies on while replaying captured events with its state lock
    /// held.
    pub fn unbounded() -> (LocalSender, LocalReceiver) {
        let (tx, rx) = kanal::unbounded();
        (LocalSender { inner: tx }, LocalReceiver { inner: rx })
    }
}

/// Sender half of a local link.
#[derive(Clone)]
pub struct LocalSender {
    inner: kanal::Sender<Item>,
}

impl LocalSender {
    /// Send an item through the link.
    ///
    /// Blocks if the channel is full (for bounded links).
    pub fn send(&self, item: Item) -> Result<()> {
        self.inner
            .send(item)
            .map_err(|_| Error::Pipeline("link closed".into()))
    }

    /// Try to send without blocking.
    ///
    /// Returns `Err` if the channel is full or closed.
    pub fn try_send(&self, item: Item) -> Result<()> {
        match self.inner.try_send(item) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::Pipeline("link full".into())),
            Err(_) => Err(Error::Pipeline("link closed".into())),
        }
    }

    /// Check if the channel is closed.
    pub fn is_closed(&self) -> bool {
        self.inner.is_disconnected()
    }

    /// Get the number of pending items in the channel.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the channel is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Receiver half of a local link.
pub struct LocalReceiver {
    inner: kanal::Receiver<Item>,
}

impl LocalReceiver {
    /// Receive an item from the link.
    ///
    /// Blocks until an item is available or the channel is closed.
    /// Returns `None` if the channel is closed and empty.
    pub fn recv(&self) -> Option<Item> {
        self.inner.recv().ok()
    }

    /// Try to receive without blocking.
    ///
    /// Returns `None` if no item is available.
    pub fn try_recv(&self) -> Option<Item> {
        match self.inner.try_recv() {
            Ok(Some(item)) => Some(item),
            _ => None,
        }
    }

    /// Check if the channel is closed.
    pub fn is_closed(&self) -> bool {
        self.inner.is_disconnected()
    }

    /// Get the number of pending items in the channel.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the channel is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Create an iterator over received items.
    pub fn iter(&self) -> impl Iterator<Item = Item> + '_ {
        std::iter::from_fn(|| self.recv())
    }
}

/// A passive observer attached to an [`ObservedLink`].
///
/// Probes see every item that crosses the link, synchronously, in the
/// producing stage's execution context. A probe has no authority to drop,
/// reorder, or delay traffic; it only observes and may record what it saw
/// on the side.
pub trait LinkProbe: Send {
    /// Called for every item crossing the link, in arrival order.
    fn on_item(&mut self, item: &Item);
}

/// The internal link between two child stages of a composite element.
///
/// Traffic is pushed through by the owning element; every registered probe
/// observes each item before it is handed to the consuming stage. The item
/// always continues downstream unchanged.
#[derive(Default)]
pub struct ObservedLink {
    probes: Vec<Box<dyn LinkProbe>>,
}

impl ObservedLink {
    /// Create a link with no probes attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a probe. Probes run in attachment order.
    pub fn add_probe(&mut self, probe: Box<dyn LinkProbe>) {
        self.probes.push(probe);
    }

    /// Number of attached probes.
    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }

    /// Push an item across the link, running every probe on it.
    ///
    /// Returns the item untouched for delivery to the consuming stage.
    pub fn push(&mut self, item: Item) -> Item {
        for probe in &mut self.probes {
            probe.on_item(&item);
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::event::Event;
    use crate::metadata::Metadata;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn make_item(seq: u64) -> Item {
        Buffer::from_bytes(vec![0u8; 8], Metadata::with_sequence(seq)).into()
    }

    #[test]
    fn test_local_link_basic() {
        let (tx, rx) = LocalLink::bounded(16);

        tx.send(make_item(1)).unwrap();
        tx.send(make_item(2)).unwrap();

        let b1 = rx.recv().unwrap().into_buffer().unwrap();
        let b2 = rx.recv().unwrap().into_buffer().unwrap();

        assert_eq!(b1.metadata().sequence, 1);
        assert_eq!(b2.metadata().sequence, 2);
    }

    #[test]
    fn test_local_link_threaded() {
        let (tx, rx) = LocalLink::bounded(16);
        let count = 100u64;

        let producer = thread::spawn(move || {
            for i in 0..count {
                tx.send(make_item(i)).unwrap();
            }
        });

        let consumer = thread::spawn(move || {
            let mut received = Vec::new();
            for item in rx.iter().take(count as usize) {
                received.push(item.into_buffer().unwrap().metadata().sequence);
            }
            received
        });

        producer.join().unwrap();
        let received = consumer.join().unwrap();

        assert_eq!(received.len(), count as usize);
        for (i, seq) in received.iter().enumerate() {
            assert_eq!(*seq, i as u64);
        }
    }

    #[test]
    fn test_local_link_closed() {
        let (tx, rx) = LocalLink::bounded(16);

        tx.send(make_item(1)).unwrap();
        drop(tx);

        // Can still receive pending
        assert!(rx.recv().is_some());
        // Now closed
        assert!(rx.recv().is_none());
        assert!(rx.is_closed());
    }

    #[test]
    fn test_local_link_try_send() {
        let (tx, rx) = LocalLink::bounded(2);

        assert!(tx.try_send(make_item(1)).is_ok());
        assert!(tx.try_send(make_item(2)).is_ok());
        // Channel full
        assert!(tx.try_send(make_item(3)).is_err());

        // Drain one
        rx.recv();
        // Now can send
        assert!(tx.try_send(make_item(3)).is_ok());
    }

    struct CountingProbe {
        buffers: Arc<AtomicUsize>,
        events: Arc<AtomicUsize>,
    }

    impl LinkProbe for CountingProbe {
        fn on_item(&mut self, item: &Item) {
            match item {
                Item::Buffer(_) => self.buffers.fetch_add(1, Ordering::SeqCst),
                Item::Event(_) => self.events.fetch_add(1, Ordering::SeqCst),
            };
        }
    }

    #[test]
    fn test_observed_link_probes_see_everything() {
        let buffers = Arc::new(AtomicUsize::new(0));
        let events = Arc::new(AtomicUsize::new(0));

        let mut link = ObservedLink::new();
        link.add_probe(Box::new(CountingProbe {
            buffers: buffers.clone(),
            events: events.clone(),
        }));
        assert_eq!(link.probe_count(), 1);

        let out = link.push(make_item(0));
        assert!(out.is_buffer());
        let out = link.push(Event::Eos.into());
        assert!(out.is_event());

        assert_eq!(buffers.load(Ordering::SeqCst), 1);
        assert_eq!(events.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_observed_link_passes_items_unchanged() {
        let mut link = ObservedLink::new();
        let item = link.push(make_item(7));
        assert_eq!(item.into_buffer().unwrap().metadata().sequence, 7);
    }
}
