use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageError, ImageOutputFormat, RgbImage, RgbaImage};
use log::{debug, error};

use crate::error::StegoError;
use crate::media::codec_options::DEFAULT_JPEG_QUALITY;
use crate::result::Result;

use super::Persist;

/// An owned 8-bit raster image with 1 to 4 interleaved channels per pixel.
///
/// Pixels are stored row by row, the channels of one pixel next to each other.
/// Channel order is the one of the `image` crate, e.g. R, G, B, (A).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// takes ownership of raw interleaved pixel data
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if !(1..=4).contains(&channels) || data.len() != expected {
            return Err(StegoError::InvalidPixelBuffer {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// builds an image by calling `f(x, y, channel)` for every channel of every pixel
    ///
    /// `channels` is clamped to `1..=4`.
    pub fn from_fn<F>(width: u32, height: u32, channels: u8, mut f: F) -> Self
    where
        F: FnMut(u32, u32, u8) -> u8,
    {
        let channels = channels.clamp(1, 4);
        let mut data = Vec::with_capacity(width as usize * height as usize * channels as usize);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    data.push(f(x, y, c));
                }
            }
        }

        Self {
            width,
            height,
            channels,
            data,
        }
    }

    pub fn from_file(f: &Path) -> Result<Self> {
        let img = image::open(f).map_err(|e| {
            error!("Error opening image {f:?}: {e}");
            match e {
                ImageError::IoError(source) => StegoError::ReadError { source },
                ImageError::Unsupported(_) => StegoError::UnsupportedMedia,
                _ => StegoError::InvalidImageMedia,
            }
        })?;

        let buffer = Self::from(img);
        debug!(
            "loaded {f:?} as {}x{} with {} channel(s)",
            buffer.width, buffer.height, buffer.channels
        );
        Ok(buffer)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// number of interleaved channels per pixel, alpha included
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// number of channels that carry color (or gray) information, alpha excluded
    pub fn color_channels(&self) -> usize {
        match self.channels {
            2 => 1,
            4 => 3,
            c => c as usize,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32, channel: u8) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize + channel as usize
    }

    pub fn get(&self, x: u32, y: u32, channel: u8) -> u8 {
        self.data[self.index(x, y, channel)]
    }

    pub fn set(&mut self, x: u32, y: u32, channel: u8, value: u8) {
        let i = self.index(x, y, channel);
        self.data[i] = value;
    }

    /// copies one channel into a row-major floating point plane
    pub(crate) fn plane(&self, channel: usize) -> Vec<f32> {
        self.data
            .iter()
            .skip(channel)
            .step_by(self.channels as usize)
            .map(|v| *v as f32)
            .collect()
    }

    /// writes a plane back into one channel, values are rounded and saturated to `0..=255`
    pub(crate) fn store_plane(&mut self, channel: usize, plane: &[f32]) {
        let channels = self.channels as usize;
        for (v, p) in self.data.iter_mut().skip(channel).step_by(channels).zip(plane) {
            *v = p.round().clamp(0.0, 255.0) as u8;
        }
    }

    pub fn into_dynamic_image(self) -> Result<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let img = match self.channels {
            1 => GrayImage::from_raw(w, h, self.data).map(DynamicImage::ImageLuma8),
            2 => GrayAlphaImage::from_raw(w, h, self.data).map(DynamicImage::ImageLumaA8),
            3 => RgbImage::from_raw(w, h, self.data).map(DynamicImage::ImageRgb8),
            _ => RgbaImage::from_raw(w, h, self.data).map(DynamicImage::ImageRgba8),
        };

        img.ok_or(StegoError::ImageEncodingError)
    }

    pub fn save_to_writer<W: Write + Seek>(&self, mut writer: W, format: OutputFormat) -> Result<()> {
        let img = self.clone().into_dynamic_image()?;
        let (img, format) = match format {
            OutputFormat::Png => (img, ImageOutputFormat::Png),
            OutputFormat::Bmp => (img, ImageOutputFormat::Bmp),
            // JPEG has no alpha channel
            OutputFormat::Jpeg { quality } => {
                let img = if img.color().has_color() {
                    DynamicImage::ImageRgb8(img.to_rgb8())
                } else {
                    DynamicImage::ImageLuma8(img.to_luma8())
                };
                (img, ImageOutputFormat::Jpeg(quality.clamp(1, 100)))
            }
        };

        img.write_to(&mut writer, format).map_err(|e| {
            error!("Error saving image: {e}");
            StegoError::ImageEncodingError
        })
    }
}

impl From<DynamicImage> for PixelBuffer {
    fn from(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let color = img.color();
        let (channels, data) = match (color.has_color(), color.has_alpha()) {
            (false, false) => (1, img.to_luma8().into_raw()),
            (false, true) => (2, img.to_luma_alpha8().into_raw()),
            (true, false) => (3, img.to_rgb8().into_raw()),
            (true, true) => (4, img.to_rgba8().into_raw()),
        };

        Self {
            width,
            height,
            channels,
            data,
        }
    }
}

/// The file formats a carrier can be written as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Bmp,
    /// lossy, `quality` in `1..=100`
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// picks the format by the file extension, `quality` only matters for JPEG
    pub fn from_path(file: &Path, quality: Option<u8>) -> Result<Self> {
        let ext = file
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or(StegoError::UnsupportedMedia)?;

        match ext.as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            "jpg" | "jpeg" => Ok(Self::Jpeg {
                quality: quality.unwrap_or(DEFAULT_JPEG_QUALITY),
            }),
            _ => Err(StegoError::UnsupportedMedia),
        }
    }

    pub fn is_lossy(&self) -> bool {
        matches!(self, OutputFormat::Jpeg { .. })
    }
}

impl Persist for PixelBuffer {
    fn save_as(&self, file: &Path, quality: Option<u8>) -> Result<()> {
        let format = OutputFormat::from_path(file, quality)?;
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            StegoError::WriteError { source: e }
        })?;
        let mut writer = BufWriter::new(f);
        self.save_to_writer(&mut writer, format)?;
        writer
            .flush()
            .map_err(|source| StegoError::WriteError { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    use crate::test_utils::prepare_textured_image;

    #[test]
    fn should_reject_raw_data_of_the_wrong_size() {
        assert!(PixelBuffer::from_raw(2, 2, 3, vec![0; 12]).is_ok());
        assert!(matches!(
            PixelBuffer::from_raw(2, 2, 3, vec![0; 11]),
            Err(StegoError::InvalidPixelBuffer { expected: 12, actual: 11, .. })
        ));
        assert!(PixelBuffer::from_raw(1, 1, 5, vec![0; 5]).is_err());
    }

    #[test]
    fn should_address_channels_row_by_row() {
        let img = PixelBuffer::from_fn(3, 2, 3, |x, y, c| (y * 30 + x * 3) as u8 + c);

        assert_eq!(img.get(2, 1, 1), 30 + 6 + 1);
        assert_eq!(&img.as_raw()[..6], &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn planes_should_round_trip() {
        let mut img = prepare_textured_image(5, 4, 3);
        let original = img.clone();
        let mut plane = img.plane(1);
        assert_eq!(plane.len(), 20);
        assert_eq!(plane[6], original.get(1, 1, 1) as f32);

        img.store_plane(1, &plane);
        assert_eq!(img, original);

        plane[0] = 300.7;
        plane[1] = -4.0;
        plane[2] = 17.5;
        img.store_plane(1, &plane);
        assert_eq!(img.get(0, 0, 1), 255);
        assert_eq!(img.get(1, 0, 1), 0);
        assert_eq!(img.get(2, 0, 1), 18);
        assert_eq!(img.get(0, 0, 0), original.get(0, 0, 0));
    }

    #[test]
    fn should_know_its_color_channels() {
        assert_eq!(PixelBuffer::from_fn(1, 1, 4, |_, _, _| 0).color_channels(), 3);
        assert_eq!(PixelBuffer::from_fn(1, 1, 2, |_, _, _| 0).color_channels(), 1);
        assert_eq!(PixelBuffer::from_fn(1, 1, 3, |_, _, _| 0).color_channels(), 3);
    }

    #[test]
    fn should_pick_the_output_format_by_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.PNG"), Some(10)).unwrap(), OutputFormat::Png);
        assert_eq!(
            OutputFormat::from_path(Path::new("a.jpg"), None).unwrap(),
            OutputFormat::Jpeg { quality: DEFAULT_JPEG_QUALITY }
        );
        assert!(matches!(
            OutputFormat::from_path(Path::new("a.wav"), None),
            Err(StegoError::UnsupportedMedia)
        ));
        assert!(OutputFormat::from_path(Path::new("noext"), None).is_err());
    }

    #[test]
    fn should_save_and_load_png_losslessly() {
        let out_dir = TempDir::new().unwrap();
        let file = out_dir.path().join("carrier.png");
        let img = prepare_textured_image(17, 9, 3);

        img.save_as(&file, None).unwrap();

        assert_eq!(PixelBuffer::from_file(&file).unwrap(), img);
    }

    #[test]
    fn should_write_jpeg_without_alpha() {
        let img = prepare_textured_image(16, 16, 4);
        let mut out = Cursor::new(Vec::new());
        img.save_to_writer(&mut out, OutputFormat::Jpeg { quality: 80 }).unwrap();

        let decoded = PixelBuffer::from(image::load_from_memory(out.get_ref()).unwrap());
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(decoded.channels(), 3);
    }

    #[test]
    fn should_fail_for_missing_files() {
        let result = PixelBuffer::from_file(Path::new("some_random_file.png"));
        assert!(matches!(result, Err(StegoError::ReadError { .. })));
    }
}
