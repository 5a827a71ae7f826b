//! The composite tag-demux bin.
//!
//! [`TagDemuxBin`] owns a [`TagDemux`] and a [`TypeFind`] collaborator,
//! watches the internal link between them, and manages the dynamic source
//! pad that only comes into existence once the detector has named the
//! payload format. See the crate docs for the problem this solves.

mod interceptor;
mod pad_manager;

use crate::buffer::Buffer;
use crate::bus::{BinMessage, MessageBus};
use crate::element::{Pad, PadTemplate, TagDemux, TypeFind};
use crate::error::{Error, Result};
use crate::event::Item;
use crate::format::Caps;
use crate::link::{LocalReceiver, ObservedLink};
use interceptor::{BinShared, SharedState, TagInterceptor};
use pad_manager::SrcPadManager;
use std::sync::{Arc, Mutex};

/// State of a [`TagDemuxBin`].
///
/// The bin's behavior on a transition is selected by matching on the
/// target variant; there is no dispatch table behind this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinState {
    /// Children idle; no traffic expected; no source pad.
    #[default]
    Idle,
    /// Traffic may flow; the source pad appears on first detection.
    Active,
}

/// A composite element wrapping `tag-demux ! typefind` with a lazily
/// created source pad.
///
/// The fixed sink pad (a proxy for the demuxer's sink) exists for the
/// bin's whole lifetime. The source pad exists only between a format
/// detection and the next transition back to [`BinState::Idle`]. Tag
/// events the demuxer emits before the source pad exists are captured on
/// the internal link and replayed through the pad the moment it is
/// created, ahead of any payload.
///
/// All operations are synchronous and run in the caller's context; see the
/// module docs of [`crate::link`] for the probe model.
pub struct TagDemuxBin {
    // Child stages; dropped first, before the shared pad/queue state.
    demux: Box<dyn TagDemux>,
    typefind: Box<dyn TypeFind>,
    /// Internal link demux -> typefind, with the tag interceptor attached.
    link: ObservedLink,
    /// Capture queue + source pad, under the bin's single lock.
    shared: SharedState,
    pad_manager: SrcPadManager,
    sink_pad: Pad,
    sink_caps: Caps,
    state: BinState,
    bus: MessageBus,
}

impl TagDemuxBin {
    /// Create a bin around the two child stages.
    ///
    /// The bin starts in [`BinState::Idle`] with an empty capture queue,
    /// the interceptor attached to the internal link, and no source pad.
    pub fn new(demux: Box<dyn TagDemux>, typefind: Box<dyn TypeFind>) -> Self {
        let shared: SharedState = Arc::new(Mutex::new(BinShared::default()));
        let bus = MessageBus::new();

        let mut link = ObservedLink::new();
        link.add_probe(Box::new(TagInterceptor::new(shared.clone())));

        let sink_caps = demux.sink_caps();
        let sink_template = Arc::new(PadTemplate::input("sink", sink_caps.clone()));
        let sink_pad = Pad::from_template(sink_template, "sink");

        let pad_manager = SrcPadManager::new(shared.clone(), bus.sender());

        tracing::debug!(
            demux = demux.name(),
            typefind = typefind.name(),
            sink = %sink_caps,
            "created tag-demux bin"
        );

        Self {
            demux,
            typefind,
            link,
            shared,
            pad_manager,
            sink_pad,
            sink_caps,
            state: BinState::Idle,
            bus,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> BinState {
        self.state
    }

    /// Get the fixed sink pad.
    pub fn sink_pad(&self) -> &Pad {
        &self.sink_pad
    }

    /// Caps accepted on the sink pad: the recognized container type.
    pub fn sink_caps(&self) -> &Caps {
        &self.sink_caps
    }

    /// Get the message bus for this bin.
    pub fn bus(&self) -> &MessageBus {
        &self.bus
    }

    /// Caps advertised by the source pad, if it currently exists.
    pub fn src_pad_caps(&self) -> Option<Caps> {
        self.shared
            .lock()
            .unwrap()
            .src_pad
            .as_ref()
            .map(|pad| pad.caps().clone())
    }

    /// Number of captured-but-unreplayed tag events.
    pub fn pending_captures(&self) -> usize {
        self.shared.lock().unwrap().queue.len()
    }

    /// Claim the consumer half of the source pad's link.
    ///
    /// Returns `None` while the pad does not exist or if the receiver was
    /// already taken. Replayed events are already queued on it, in order.
    pub fn take_src_receiver(&self) -> Option<LocalReceiver> {
        self.shared
            .lock()
            .unwrap()
            .src_pad
            .as_mut()
            .and_then(|pad| pad.take_receiver())
    }

    /// Drive the bin's state machine.
    ///
    /// Transitioning to [`BinState::Idle`] runs teardown unconditionally,
    /// from any state and idempotently: the source pad (if any) is
    /// destroyed and every queued event is discarded. Transitioning to
    /// [`BinState::Active`] changes no topology; it only makes
    /// [`push`](Self::push) legal.
    pub fn transition(&mut self, target: BinState) -> Result<()> {
        let from = self.state;
        match target {
            BinState::Idle => self.teardown(),
            BinState::Active => {}
        }
        self.state = target;
        if from != target {
            tracing::debug!(?from, ?target, "state changed");
            self.bus.post(BinMessage::StateChanged { from, to: target });
        }
        Ok(())
    }

    /// Push one container buffer into the bin's sink pad.
    ///
    /// The demuxer turns it into items; every item crosses the internal
    /// link (where the interceptor sees it) and is fed to the detector.
    /// Whatever the detector forwards goes out the source pad if one
    /// exists, and is dropped otherwise. A detection raised along the way
    /// triggers bind-and-replay before any of the items that followed it
    /// are forwarded.
    ///
    /// Errors from the child stages propagate untouched. A negotiation
    /// failure while binding the pad is not returned here; it is reported
    /// on the bus, and the bin keeps running without a source pad.
    pub fn push(&mut self, buffer: Buffer) -> Result<()> {
        if self.state != BinState::Active {
            return Err(Error::Pipeline(
                "cannot push while the bin is idle".into(),
            ));
        }

        for item in self.demux.process(buffer)? {
            let item = self.link.push(item);
            self.feed_typefind(item)?;
        }
        Ok(())
    }

    fn feed_typefind(&mut self, item: Item) -> Result<()> {
        let output = self.typefind.feed(item)?;

        if let Some(found) = output.detected {
            tracing::debug!(
                caps = %found.caps,
                probability = found.probability,
                "found type"
            );
            if let Err(err) = self
                .pad_manager
                .bind_and_replay(&found, self.typefind.as_mut())
            {
                tracing::warn!(%err, "src pad negotiation failed");
                self.bus.post(BinMessage::Error {
                    message: err.to_string(),
                });
            }
        }

        for item in output.forward {
            self.forward(item);
        }
        Ok(())
    }

    /// Forward a detector-emitted item through the source pad.
    fn forward(&mut self, item: Item) {
        let shared = self.shared.lock().unwrap();
        match shared.src_pad.as_ref() {
            Some(pad) => {
                // Unbounded link; a send only fails if the consumer side
                // vanished, which is not the bin's problem to solve.
                let _ = pad.push(item);
            }
            None => {
                tracing::trace!(
                    kind = if item.is_event() { "event" } else { "buffer" },
                    "no src pad yet, dropping item"
                );
            }
        }
    }

    /// Destroy the source pad and discard unreplayed captures.
    ///
    /// Safe to run at any point: before detection, after replay, or with
    /// nothing to clean up. Runs on every Idle-class transition, not only
    /// when a pad exists, so a teardown mid-detection still clears the
    /// queue.
    fn teardown(&mut self) {
        let mut shared = self.shared.lock().unwrap();
        if let Some(pad) = shared.src_pad.take() {
            tracing::debug!(caps = %pad.caps(), "removing src pad");
            drop(pad);
            self.bus.post(BinMessage::PadRemoved);
        }
        if !shared.queue.is_empty() {
            tracing::debug!(discarded = shared.queue.len(), "discarding captured events");
            shared.queue.clear();
        }
    }
}

impl std::fmt::Debug for TagDemuxBin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagDemuxBin")
            .field("demux", &self.demux.name())
            .field("typefind", &self.typefind.name())
            .field("state", &self.state)
            .field("src_pad_caps", &self.src_pad_caps())
            .field("pending_captures", &self.pending_captures())
            .finish()
    }
}
