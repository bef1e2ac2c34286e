//! Image codecs that hide a bit stream in a [`PixelBuffer`].
//!
//! Every codec divides the carrier into cells that hold one bit each, a pixel
//! channel for LSB, an 8x8 block for DCT and a 2x2 quad for DWT. The cells are
//! fed by a [`BitCursor`](crate::bit_stream::BitCursor) so the storage mode
//! decides what goes into the cells behind the payload.

mod dct;
pub mod dct_codec;
mod haar;
pub mod dwt_codec;
mod iterators;
pub mod lsb_codec;

use enum_dispatch::enum_dispatch;
use log::warn;

use crate::error::StegoError;
use crate::media::{ChannelSelection, CodecOptions, PixelBuffer, StorageMode};
use crate::reconstruct::repair;
use crate::result::Result;

pub use dct_codec::DctCodec;
pub use dwt_codec::DwtCodec;
pub use lsb_codec::LsbCodec;

#[enum_dispatch]
pub trait Hide {
    /// number of bits that fit into `carrier` (per channel for transform codecs)
    fn capacity(&self, carrier: &PixelBuffer) -> usize;

    /// returns a copy of `carrier` with `data` hidden in it, bits that exceed the capacity are dropped
    fn hide(&self, carrier: &PixelBuffer, data: &[u8]) -> Result<PixelBuffer>;
}

#[enum_dispatch]
pub trait Unveil {
    /// extracts every cell of `secret` as raw bytes, `reference` is the unmodified carrier
    /// for codecs that need it.
    fn unveil(&self, secret: &PixelBuffer, reference: Option<&PixelBuffer>) -> Result<Vec<u8>>;
}

#[enum_dispatch(Hide, Unveil)]
#[derive(Debug, Clone, PartialEq)]
pub enum ImageCodec {
    LsbCodec,
    DctCodec,
    DwtCodec,
}

impl From<CodecOptions> for ImageCodec {
    fn from(options: CodecOptions) -> Self {
        match options {
            CodecOptions::Lsb(o) => LsbCodec::new(o).into(),
            CodecOptions::Dct(o) => DctCodec::new(o).into(),
            CodecOptions::Dwt(o) => DwtCodec::new(o).into(),
        }
    }
}

/// resolves a channel selection to channel indices of `carrier`
pub(crate) fn resolve_channels(selection: ChannelSelection, carrier: &PixelBuffer) -> Result<Vec<usize>> {
    let available = carrier.color_channels();
    let channels = selection.resolve(available);
    match channels.iter().find(|c| **c >= available) {
        Some(channel) => Err(StegoError::InvalidChannel {
            channel: *channel,
            available,
        }),
        None => Ok(channels),
    }
}

/// merges the data unveiled from several channels by majority vote
pub(crate) fn merge_channel_copies(mut copies: Vec<Vec<u8>>) -> Vec<u8> {
    match copies.len() {
        0 | 1 => copies.pop().unwrap_or_default(),
        _ => repair(&copies),
    }
}

/// logs when a payload does not fit into the available cells
pub(crate) fn check_capacity(technique: &str, capacity: usize, data: &[u8], mode: StorageMode) {
    let bits = data.len() * 8;
    if bits > capacity {
        warn!(
            "{technique}: payload of {bits} bits exceeds the capacity of {capacity} bits, storing {mode:?} truncated"
        );
    }
}
