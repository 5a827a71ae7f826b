//! Tag-event interception on the internal link.

use crate::event::{Event, Item};
use crate::link::LinkProbe;
use crate::element::GhostPad;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// State shared between the interceptor, the pad manager, and the bin.
///
/// The capture queue and the source pad reference are guarded by one mutex,
/// held for the full duration of a capture, a bind-and-replay, or a
/// teardown. That single lock is what keeps the bin correct even if a host
/// framework delivers probe and detection callbacks from distinct threads.
#[derive(Default)]
pub(crate) struct BinShared {
    /// Captured tag events, in arrival order.
    pub queue: VecDeque<Event>,
    /// The dynamic source pad, present only between a detection and the
    /// next teardown.
    pub src_pad: Option<GhostPad>,
}

pub(crate) type SharedState = Arc<Mutex<BinShared>>;

/// A passive probe that captures tag events crossing the internal link
/// while the bin's source pad does not exist yet.
///
/// Tag events sent before the detector is done would otherwise be lost:
/// there is no source pad for them to leave through, so the detector's
/// output simply discards them. The interceptor keeps an owned copy of each
/// one so the pad manager can replay them once the pad is created.
///
/// The capture predicate is evaluated on every item, even though in
/// practice all relevant events arrive before detection completes;
/// detection timing is not otherwise synchronized with the link.
pub(crate) struct TagInterceptor {
    shared: SharedState,
}

impl TagInterceptor {
    pub(crate) fn new(shared: SharedState) -> Self {
        Self { shared }
    }
}

impl LinkProbe for TagInterceptor {
    fn on_item(&mut self, item: &Item) {
        let Item::Event(event) = item else {
            return;
        };
        if !event.is_tags() {
            return;
        }
        let mut shared = self.shared.lock().unwrap();
        if shared.src_pad.is_none() {
            tracing::debug!(len = shared.queue.len() + 1, "captured tag event");
            shared.queue.push_back(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::event::{TagList, TagsEvent};
    use crate::format::Caps;

    fn tags_item(title: &str) -> Item {
        let mut tags = TagList::new();
        tags.set_title(title);
        Event::Tags(TagsEvent::new(tags)).into()
    }

    fn shared() -> SharedState {
        Arc::new(Mutex::new(BinShared::default()))
    }

    #[test]
    fn test_captures_tags_while_pad_absent() {
        let state = shared();
        let mut probe = TagInterceptor::new(state.clone());

        probe.on_item(&tags_item("one"));
        probe.on_item(&tags_item("two"));

        let guard = state.lock().unwrap();
        assert_eq!(guard.queue.len(), 2);
        let titles: Vec<_> = guard
            .queue
            .iter()
            .map(|e| match e {
                Event::Tags(t) => t.tags.title().unwrap().to_string(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(titles, ["one", "two"]);
    }

    #[test]
    fn test_ignores_buffers_and_other_events() {
        let state = shared();
        let mut probe = TagInterceptor::new(state.clone());

        probe.on_item(&Buffer::from_static(b"payload").into());
        probe.on_item(&Event::Eos.into());

        assert!(state.lock().unwrap().queue.is_empty());
    }

    #[test]
    fn test_stops_capturing_once_pad_exists() {
        let state = shared();
        state.lock().unwrap().src_pad = Some(GhostPad::src(Caps::any()));

        let mut probe = TagInterceptor::new(state.clone());
        probe.on_item(&tags_item("late"));

        assert!(state.lock().unwrap().queue.is_empty());
    }
}
