//! Minimal walkthrough of the composite tag-demux bin.
//!
//! Feeds a tag block and an MPEG-audio payload through the bin and prints
//! what comes out of the dynamically created source pad.
//!
//! Run with: `cargo run --example basic`

use tagdemux::elements::testing::{SniffTypeFind, TagStripDemux};
use tagdemux::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut bin = TagDemuxBin::new(
        Box::new(TagStripDemux::new()),
        Box::new(SniffTypeFind::with_default_mappings()),
    );
    let bus = bin.bus().subscribe();

    bin.transition(BinState::Active)?;

    // The tag block arrives before anything downstream could exist.
    bin.push(Buffer::from_static(b"TAG:My Song"))?;
    println!(
        "after tag block: src pad = {:?}, captured events = {}",
        bin.src_pad_caps(),
        bin.pending_captures()
    );

    // The first payload buffer resolves the format and creates the pad.
    bin.push(Buffer::from_static(b"\xff\xfbpayload"))?;
    println!("after payload:   src pad = {:?}", bin.src_pad_caps());

    let rx = bin.take_src_receiver().expect("pad exists after detection");
    while let Some(item) = rx.try_recv() {
        match item {
            Item::Event(event) => println!("  event:  {}", event.name()),
            Item::Buffer(buffer) => println!("  buffer: {} bytes", buffer.len()),
        }
    }

    bin.transition(BinState::Idle)?;
    for message in bus.drain() {
        println!("bus: {message}");
    }
    Ok(())
}
