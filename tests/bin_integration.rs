//! End-to-end tests for the composite tag-demux bin.
//!
//! These drive a full `TagStripDemux` + `SniffTypeFind` pairing through the
//! bin's public API: capture before the pad exists, replay on detection,
//! re-detection with pad replacement, negotiation failure, and teardown.

use tagdemux::elements::testing::{SniffTypeFind, TagStripDemux};
use tagdemux::format::AudioCodec;
use tagdemux::prelude::*;

fn make_bin() -> TagDemuxBin {
    TagDemuxBin::new(
        Box::new(TagStripDemux::new()),
        Box::new(SniffTypeFind::with_default_mappings()),
    )
}

fn tag_title(item: &Item) -> Option<&str> {
    match item.as_event()? {
        Event::Tags(tags) => tags.tags.title(),
        _ => None,
    }
}

#[test]
fn test_tags_before_detection_are_replayed_in_order() {
    let mut bin = make_bin();
    bin.transition(BinState::Active).unwrap();

    bin.push(Buffer::from_static(b"TAG:first")).unwrap();
    bin.push(Buffer::from_static(b"TAG:second")).unwrap();
    assert_eq!(bin.pending_captures(), 2);
    assert!(bin.src_pad_caps().is_none());

    bin.push(Buffer::from_static(b"\xff\xfbpayload")).unwrap();
    assert_eq!(bin.pending_captures(), 0);

    let rx = bin.take_src_receiver().unwrap();
    let items: Vec<Item> = std::iter::from_fn(|| rx.try_recv()).collect();
    assert_eq!(items.len(), 3);
    assert_eq!(tag_title(&items[0]), Some("first"));
    assert_eq!(tag_title(&items[1]), Some("second"));
    assert!(items[2].is_buffer());
}

#[test]
fn test_detection_without_tags_creates_bare_pad() {
    let mut bin = make_bin();
    bin.transition(BinState::Active).unwrap();

    bin.push(Buffer::from_static(b"\xff\xfbpayload")).unwrap();

    assert_eq!(
        bin.src_pad_caps().unwrap().preferred(),
        Some(&MediaFormat::Audio(AudioCodec::Mp3))
    );

    let rx = bin.take_src_receiver().unwrap();
    assert!(rx.try_recv().unwrap().is_buffer());
    assert!(rx.try_recv().is_none());
}

#[test]
fn test_pad_lifecycle_is_visible_on_the_bus() {
    let mut bin = make_bin();
    let rx = bin.bus().subscribe();
    bin.transition(BinState::Active).unwrap();

    bin.push(Buffer::from_static(b"TAG:only")).unwrap();
    bin.push(Buffer::from_static(b"\xff\xfbpayload")).unwrap();
    bin.transition(BinState::Idle).unwrap();

    let rendered: Vec<String> = rx.drain().iter().map(|m| m.to_string()).collect();
    assert!(rendered.iter().any(|m| m.contains("PadAdded")));
    assert!(rendered.iter().any(|m| m.contains("PadRemoved")));
}

#[test]
fn test_tags_after_detection_flow_live() {
    let mut bin = make_bin();
    bin.transition(BinState::Active).unwrap();

    bin.push(Buffer::from_static(b"\xff\xfbpayload")).unwrap();
    let rx = bin.take_src_receiver().unwrap();
    assert!(rx.try_recv().unwrap().is_buffer());

    // With the pad in place nothing is captured; the event goes straight
    // through.
    bin.push(Buffer::from_static(b"TAG:late")).unwrap();
    assert_eq!(bin.pending_captures(), 0);
    let item = rx.try_recv().unwrap();
    assert_eq!(tag_title(&item), Some("late"));
}

#[test]
fn test_redetection_replaces_the_pad() {
    let mut bin = make_bin();
    bin.transition(BinState::Active).unwrap();

    bin.push(Buffer::from_static(b"\xff\xfbmp3")).unwrap();
    let first_rx = bin.take_src_receiver().unwrap();
    assert!(first_rx.try_recv().unwrap().is_buffer());

    bin.push(Buffer::from_static(b"OggSpage")).unwrap();

    assert_eq!(
        bin.src_pad_caps().unwrap().preferred(),
        Some(&MediaFormat::Audio(AudioCodec::Vorbis))
    );
    // The old pad's link is gone; the new payload arrives on the new one.
    assert!(first_rx.try_recv().is_none());
    assert!(first_rx.is_closed());

    let second_rx = bin.take_src_receiver().unwrap();
    assert!(second_rx.try_recv().unwrap().is_buffer());
}

#[test]
fn test_caps_rejection_keeps_captures_and_reports() {
    let mut bin = TagDemuxBin::new(
        Box::new(TagStripDemux::new()),
        Box::new(
            SniffTypeFind::with_default_mappings()
                .reject(Caps::new(MediaFormat::Audio(AudioCodec::Mp3))),
        ),
    );
    let bus_rx = bin.bus().subscribe();
    bin.transition(BinState::Active).unwrap();

    bin.push(Buffer::from_static(b"TAG:kept")).unwrap();
    bin.push(Buffer::from_static(b"\xff\xfbpayload")).unwrap();

    // Negotiation failed: no pad, captures intact, error on the bus.
    assert!(bin.src_pad_caps().is_none());
    assert_eq!(bin.pending_captures(), 1);
    assert!(bus_rx
        .drain()
        .iter()
        .any(|m| matches!(m, BinMessage::Error { .. })));

    // A later detection with acceptable caps still replays the capture.
    bin.push(Buffer::from_static(b"OggSpage")).unwrap();
    assert_eq!(bin.pending_captures(), 0);

    let rx = bin.take_src_receiver().unwrap();
    let first = rx.try_recv().unwrap();
    assert_eq!(tag_title(&first), Some("kept"));
    assert!(rx.try_recv().unwrap().is_buffer());
}

#[test]
fn test_teardown_mid_episode_discards_captures() {
    let mut bin = make_bin();
    bin.transition(BinState::Active).unwrap();

    bin.push(Buffer::from_static(b"TAG:stale")).unwrap();
    assert_eq!(bin.pending_captures(), 1);

    bin.transition(BinState::Idle).unwrap();
    assert_eq!(bin.pending_captures(), 0);
    assert!(bin.src_pad_caps().is_none());

    // A fresh episode starts clean: no stale event precedes the payload.
    bin.transition(BinState::Active).unwrap();
    bin.push(Buffer::from_static(b"\xff\xfbpayload")).unwrap();

    let rx = bin.take_src_receiver().unwrap();
    assert!(rx.try_recv().unwrap().is_buffer());
    assert!(rx.try_recv().is_none());
}

#[test]
fn test_push_requires_active_state() {
    let mut bin = make_bin();
    assert!(bin.push(Buffer::from_static(b"\xff\xfb")).is_err());

    bin.transition(BinState::Active).unwrap();
    bin.transition(BinState::Idle).unwrap();
    assert!(bin.push(Buffer::from_static(b"\xff\xfb")).is_err());
}
