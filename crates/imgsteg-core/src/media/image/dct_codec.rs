use log::debug;

use super::dct::{self, Block, BLOCK_SIZE};
use super::{check_capacity, merge_channel_copies, resolve_channels, Hide, Unveil};
use crate::bit_stream::{pack_bits, BitCursor};
use crate::media::{DctCodecOptions, PixelBuffer};
use crate::result::Result;

/// coefficient that is the bigger one of the pair for a `1` bit, as (row, column)
const COEFF_A: (usize, usize) = (6, 7);
/// coefficient that is the bigger one of the pair for a `0` bit
const COEFF_B: (usize, usize) = (5, 1);
/// each retry doubles the strength, so the last attempt uses 128 times the persistence
const MAX_EMBED_ATTEMPTS: usize = 8;

/// Hides one bit per 8x8 block in the relation of two mid frequency DCT coefficients.
///
/// A block carries `1` when coefficient (6, 7) is greater than coefficient (5, 1).
/// Their distance is pushed to the configured persistence, which lets the bit
/// survive moderate JPEG compression.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DctCodec {
    options: DctCodecOptions,
}

impl DctCodec {
    pub fn new(options: DctCodecOptions) -> Self {
        Self { options }
    }
}

/// Top left pixel of every block that carries a bit, column after column.
///
/// The grid has `width / 8` by `height / 8` blocks, the last block column and
/// the last block row are left out.
fn block_origins(carrier: &PixelBuffer) -> impl Iterator<Item = (usize, usize)> {
    let grid_w = carrier.width() as usize / BLOCK_SIZE;
    let grid_h = carrier.height() as usize / BLOCK_SIZE;

    (1..grid_w).flat_map(move |x| (1..grid_h).map(move |y| ((x - 1) * BLOCK_SIZE, (y - 1) * BLOCK_SIZE)))
}

fn read_block(plane: &[f32], width: usize, (x0, y0): (usize, usize)) -> Block {
    let mut block = [0.0; BLOCK_SIZE * BLOCK_SIZE];
    for (y, row) in block.chunks_exact_mut(BLOCK_SIZE).enumerate() {
        let start = (y0 + y) * width + x0;
        row.copy_from_slice(&plane[start..start + BLOCK_SIZE]);
    }
    block
}

fn write_block(plane: &mut [f32], width: usize, (x0, y0): (usize, usize), block: &Block) {
    for (y, row) in block.chunks_exact(BLOCK_SIZE).enumerate() {
        let start = (y0 + y) * width + x0;
        plane[start..start + BLOCK_SIZE].copy_from_slice(row);
    }
}

#[inline]
fn coeff((row, col): (usize, usize)) -> usize {
    row * BLOCK_SIZE + col
}

/// orders the coefficient pair by `bit` and sets their distance to `persistence`
fn embed_bit(coeffs: &mut Block, bit: bool, persistence: f32) {
    let (mut a, mut b) = (coeffs[coeff(COEFF_A)], coeffs[coeff(COEFF_B)]);
    if (a > b) != bit {
        std::mem::swap(&mut a, &mut b);
    }

    // for a tie the bit decides, so that a == b still ends up as a > b for `1`
    let gap = if bit { a - b } else { b - a };
    let shift = (persistence - gap) / 2.0;
    if bit {
        a += shift;
        b -= shift;
    } else {
        a -= shift;
        b += shift;
    }

    coeffs[coeff(COEFF_A)] = a;
    coeffs[coeff(COEFF_B)] = b;
}

#[inline]
fn extract_bit(coeffs: &Block) -> bool {
    coeffs[coeff(COEFF_A)] > coeffs[coeff(COEFF_B)]
}

/// snaps the pixels of a block onto the values a `u8` channel can hold
fn quantize(block: &mut Block) {
    block.iter_mut().for_each(|p| *p = p.round().clamp(0.0, 255.0));
}

/// Embeds `bit` into a block of pixels and returns the quantized pixels.
///
/// Rounding to whole pixel values can swap a narrow coefficient pair back,
/// so the quantized block is transformed again and the embedding is repeated
/// with a doubled strength until the bit reads back.
fn embed_block(pixels: &Block, bit: bool, persistence: f32) -> Block {
    let coeffs = dct::forward(pixels);
    let mut strength = persistence;
    let mut embedded = *pixels;
    for _ in 0..MAX_EMBED_ATTEMPTS {
        let mut attempt = coeffs;
        embed_bit(&mut attempt, bit, strength);
        embedded = dct::inverse(&attempt);
        quantize(&mut embedded);
        if extract_bit(&dct::forward(&embedded)) == bit {
            return embedded;
        }
        strength = (strength * 2.0).max(1.0);
    }

    debug!("dct: block saturated, bit {bit} did not survive quantization");
    embedded
}

impl Hide for DctCodec {
    fn capacity(&self, carrier: &PixelBuffer) -> usize {
        let grid_w = carrier.width() as usize / BLOCK_SIZE;
        let grid_h = carrier.height() as usize / BLOCK_SIZE;

        grid_w.saturating_sub(1) * grid_h.saturating_sub(1)
    }

    fn hide(&self, carrier: &PixelBuffer, data: &[u8]) -> Result<PixelBuffer> {
        let channels = resolve_channels(self.options.channel, carrier)?;
        let mode = self.options.storage_mode;
        check_capacity("dct", self.capacity(carrier), data, mode);

        let width = carrier.width() as usize;
        let mut secret = carrier.clone();
        for channel in channels {
            let mut plane = secret.plane(channel);
            let mut blocks = 0;
            for (origin, bit) in block_origins(carrier).zip(BitCursor::new(data, mode)) {
                let block = embed_block(&read_block(&plane, width, origin), bit, self.options.persistence);
                write_block(&mut plane, width, origin, &block);
                blocks += 1;
            }
            secret.store_plane(channel, &plane);
            debug!("dct: wrote {blocks} blocks into channel {channel}");
        }

        Ok(secret)
    }
}

impl Unveil for DctCodec {
    fn unveil(&self, secret: &PixelBuffer, _reference: Option<&PixelBuffer>) -> Result<Vec<u8>> {
        let width = secret.width() as usize;
        let copies = resolve_channels(self.options.channel, secret)?
            .into_iter()
            .map(|channel| {
                let plane = secret.plane(channel);
                pack_bits(
                    block_origins(secret)
                        .map(|origin| extract_bit(&dct::forward(&read_block(&plane, width, origin)))),
                )
            })
            .collect::<std::io::Result<Vec<_>>>()?;

        Ok(merge_channel_copies(copies))
    }
}
