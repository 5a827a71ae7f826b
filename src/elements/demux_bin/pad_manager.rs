//! Lifecycle management for the bin's dynamic source pad.

use super::interceptor::SharedState;
use crate::bus::{BinMessage, MessageSender};
use crate::element::{DetectedFormat, GhostPad, TypeFind};
use crate::event::Item;
use crate::negotiation::NegotiationError;

/// Owns the create / replay / destroy cycle of the dynamic source pad.
///
/// Invoked synchronously from the detection path, so a successful
/// [`bind_and_replay`](SrcPadManager::bind_and_replay) runs to completion
/// before any traffic the detector emits afterwards; replay therefore
/// happens-before all live data through the new pad.
pub(crate) struct SrcPadManager {
    shared: SharedState,
    bus: MessageSender,
}

impl SrcPadManager {
    pub(crate) fn new(shared: SharedState, bus: MessageSender) -> Self {
        Self { shared, bus }
    }

    /// Bind the source pad to a freshly detected format and replay any
    /// captured events through it.
    ///
    /// Binding is atomic from the outside: either it fully succeeds with
    /// the queue drained, or it fails with no pad created and the queue
    /// left intact for a later detection attempt. A pad left over from an
    /// earlier detection in the same episode is destroyed first either way.
    pub(crate) fn bind_and_replay(
        &mut self,
        found: &DetectedFormat,
        typefind: &mut dyn TypeFind,
    ) -> Result<(), NegotiationError> {
        let mut shared = self.shared.lock().unwrap();

        // Get rid of old before adding new; a second detection within one
        // episode must not leak the first pad.
        if let Some(old) = shared.src_pad.take() {
            tracing::debug!(caps = %old.caps(), "removing stale src pad");
            drop(old);
            self.bus.post(BinMessage::PadRemoved);
        }

        if !typefind.accept_src_caps(&found.caps) {
            // Queue stays intact for a possible retry.
            return Err(NegotiationError::caps_rejected(
                typefind.name(),
                &found.caps,
            ));
        }

        let pad = GhostPad::src(found.caps.clone());
        tracing::debug!(
            caps = %pad.caps(),
            probability = found.probability,
            "created src pad"
        );
        self.bus.post(BinMessage::PadAdded {
            caps: found.caps.clone(),
        });

        // FIFO replay: downstream sees the events in the order they were
        // originally produced, ahead of any payload that follows detection.
        let replayed = shared.queue.len();
        for event in shared.queue.drain(..) {
            tracing::debug!(event = event.name(), "replaying captured event");
            // Unbounded pad link with a live sender; send cannot fail here.
            let _ = pad.push(Item::Event(event));
        }
        if replayed > 0 {
            tracing::debug!(replayed, "replay complete");
        }

        shared.src_pad = Some(pad);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MessageBus;
    use crate::element::TypeFindOutput;
    use crate::error::Result;
    use crate::event::{Event, TagList, TagsEvent};
    use crate::format::{AudioCodec, Caps, MediaFormat};
    use super::super::interceptor::{BinShared, SharedState};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    fn shared_with_tags(titles: &[&str]) -> SharedState {
        let mut queue = VecDeque::new();
        for title in titles {
            let mut tags = TagList::new();
            tags.set_title(*title);
            queue.push_back(Event::Tags(TagsEvent::new(tags)));
        }
        Arc::new(Mutex::new(BinShared {
            queue,
            src_pad: None,
        }))
    }

    struct FixedTypeFind {
        accept: bool,
    }

    impl TypeFind for FixedTypeFind {
        fn feed(&mut self, item: Item) -> Result<TypeFindOutput> {
            Ok(TypeFindOutput::pass(item))
        }

        fn accept_src_caps(&mut self, _caps: &Caps) -> bool {
            self.accept
        }

        fn name(&self) -> &str {
            "fixed-typefind"
        }
    }

    fn mp3() -> DetectedFormat {
        DetectedFormat::certain(Caps::new(MediaFormat::Audio(AudioCodec::Mp3)))
    }

    #[test]
    fn test_bind_creates_pad_and_replays_fifo() {
        let shared = shared_with_tags(&["one", "two"]);
        let bus = MessageBus::new();
        let rx = bus.subscribe();
        let mut manager = SrcPadManager::new(shared.clone(), bus.sender());
        let mut tf = FixedTypeFind { accept: true };

        manager.bind_and_replay(&mp3(), &mut tf).unwrap();

        let mut guard = shared.lock().unwrap();
        assert!(guard.queue.is_empty());
        let pad = guard.src_pad.as_mut().unwrap();
        let pad_rx = pad.take_receiver().unwrap();
        drop(guard);

        let titles: Vec<String> = std::iter::from_fn(|| pad_rx.try_recv())
            .map(|item| match item.into_event().unwrap() {
                Event::Tags(t) => t.tags.title().unwrap().to_string(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(titles, ["one", "two"]);

        let messages = rx.drain();
        assert!(matches!(messages[0], BinMessage::PadAdded { .. }));
    }

    #[test]
    fn test_rejected_caps_leave_queue_intact() {
        let shared = shared_with_tags(&["kept"]);
        let bus = MessageBus::new();
        let mut manager = SrcPadManager::new(shared.clone(), bus.sender());
        let mut tf = FixedTypeFind { accept: false };

        let err = manager.bind_and_replay(&mp3(), &mut tf).unwrap_err();
        assert!(matches!(err, NegotiationError::CapsRejected { .. }));

        let guard = shared.lock().unwrap();
        assert_eq!(guard.queue.len(), 1);
        assert!(guard.src_pad.is_none());
    }

    #[test]
    fn test_second_detection_replaces_pad() {
        let shared = shared_with_tags(&[]);
        let bus = MessageBus::new();
        let rx = bus.subscribe();
        let mut manager = SrcPadManager::new(shared.clone(), bus.sender());
        let mut tf = FixedTypeFind { accept: true };

        manager.bind_and_replay(&mp3(), &mut tf).unwrap();
        let first_rx = shared
            .lock()
            .unwrap()
            .src_pad
            .as_mut()
            .unwrap()
            .take_receiver()
            .unwrap();

        let vorbis = DetectedFormat::certain(Caps::new(MediaFormat::Audio(AudioCodec::Vorbis)));
        manager.bind_and_replay(&vorbis, &mut tf).unwrap();

        // First pad fully destroyed: its link is closed.
        assert!(first_rx.recv().is_none());

        let guard = shared.lock().unwrap();
        let pad = guard.src_pad.as_ref().unwrap();
        assert_eq!(pad.caps(), &vorbis.caps);

        let kinds: Vec<String> = rx.drain().iter().map(|m| m.to_string()).collect();
        assert_eq!(
            kinds,
            [
                "PadAdded: audio/mpeg",
                "PadRemoved",
                "PadAdded: audio/x-vorbis"
            ]
        );
    }

    #[test]
    fn test_rejection_after_first_pad_still_removes_it() {
        let shared = shared_with_tags(&[]);
        let bus = MessageBus::new();
        let mut manager = SrcPadManager::new(shared.clone(), bus.sender());

        let mut accepting = FixedTypeFind { accept: true };
        manager.bind_and_replay(&mp3(), &mut accepting).unwrap();

        // Re-detection with a rejecting detector: old pad gone, no new one.
        let mut rejecting = FixedTypeFind { accept: false };
        assert!(manager.bind_and_replay(&mp3(), &mut rejecting).is_err());
        assert!(shared.lock().unwrap().src_pad.is_none());
    }
}
