use std::iter::{Enumerate, Skip, Take};
use std::slice::{ChunksExact, ChunksExactMut, Iter, IterMut};

use crate::media::{LsbLayout, PixelBuffer};

/// which color channels of the pixel with index `pixel` are visited, as `(skip, take)`
#[inline]
fn visited_channels(layout: LsbLayout, pixel: usize, color_channels: usize) -> (usize, usize) {
    match layout {
        LsbLayout::AllChannels => (0, color_channels),
        LsbLayout::Alternating => (pixel % color_channels, 1),
    }
}

/// Row based mutable access to the color channels of every pixel, alpha is never visited.
pub(crate) struct ColorIterMut<'a> {
    pixels: Enumerate<ChunksExactMut<'a, u8>>,
    colors: Option<Take<Skip<IterMut<'a, u8>>>>,
    color_channels: usize,
    layout: LsbLayout,
}

impl<'a> ColorIterMut<'a> {
    pub fn new(buffer: &'a mut PixelBuffer, layout: LsbLayout) -> Self {
        let channels = buffer.channels() as usize;
        let color_channels = buffer.color_channels();

        Self {
            pixels: buffer.as_raw_mut().chunks_exact_mut(channels).enumerate(),
            colors: None,
            color_channels,
            layout,
        }
    }
}

impl<'a> Iterator for ColorIterMut<'a> {
    type Item = &'a mut u8;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(color) = self.colors.as_mut().and_then(Iterator::next) {
                return Some(color);
            }
            let (i, pixel) = self.pixels.next()?;
            let (skip, take) = visited_channels(self.layout, i, self.color_channels);
            self.colors = Some(pixel.iter_mut().skip(skip).take(take));
        }
    }
}

/// Row based readonly access to the color channels of every pixel, alpha is never visited.
pub(crate) struct ColorIter<'a> {
    pixels: Enumerate<ChunksExact<'a, u8>>,
    colors: Option<Take<Skip<Iter<'a, u8>>>>,
    color_channels: usize,
    layout: LsbLayout,
}

impl<'a> ColorIter<'a> {
    pub fn new(buffer: &'a PixelBuffer, layout: LsbLayout) -> Self {
        Self {
            pixels: buffer
                .as_raw()
                .chunks_exact(buffer.channels() as usize)
                .enumerate(),
            colors: None,
            color_channels: buffer.color_channels(),
            layout,
        }
    }
}

impl<'a> Iterator for ColorIter<'a> {
    type Item = &'a u8;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(color) = self.colors.as_mut().and_then(Iterator::next) {
                return Some(color);
            }
            let (i, pixel) = self.pixels.next()?;
            let (skip, take) = visited_channels(self.layout, i, self.color_channels);
            self.colors = Some(pixel.iter().skip(skip).take(take));
        }
    }
}
