use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::frame::encode_tlv;
use crate::media::image::{Hide, ImageCodec};
use crate::media::{CodecOptions, OutputFormat, Persist, PixelBuffer};
use crate::{Result, StegoError};

use super::read_payload;

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Debug)]
enum Payload {
    Data(Vec<u8>),
    File(PathBuf),
}

#[derive(Default, Debug)]
pub struct HideApi {
    payload: Option<Payload>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    jpeg_quality: Option<u8>,
    options: CodecOptions,
}

/// What an executed hide did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideReport {
    /// the written image
    pub output: PathBuf,
    /// bits of the framed payload
    pub payload_bits: usize,
    /// bits the carrier can hold (per channel for DCT and DWT)
    pub capacity: usize,
}

impl HideReport {
    pub fn is_truncated(&self) -> bool {
        self.payload_bits > self.capacity
    }
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// hides the UTF-8 bytes of `message`, replaces any payload set before
    pub fn with_message(mut self, message: &str) -> Self {
        self.payload = Some(Payload::Data(message.as_bytes().to_vec()));
        self
    }

    /// hides `data` as it is, replaces any payload set before
    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(Payload::Data(data.into()));
        self
    }

    /// hides the content of `data_file`, replaces any payload set before
    pub fn with_file<A: AsRef<Path>>(mut self, data_file: A) -> Self {
        self.payload = Some(Payload::File(data_file.as_ref().to_path_buf()));
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// If `None` is passed, the output goes next to the image, see [`default_output_for`]
    pub fn use_output<A: AsRef<Path>>(mut self, output: Option<A>) -> Self {
        self.output = output.map(|o| o.as_ref().to_path_buf());
        self
    }

    /// quality used when the output is a JPEG file
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn execute(self) -> Result<HideReport> {
        let Some(payload) = self.payload else {
            return Err(StegoError::MissingMessage);
        };
        let Some(image) = self.image else {
            return Err(StegoError::CarrierNotSet);
        };
        let output = self
            .output
            .unwrap_or_else(|| default_output_for(&image, &self.options));

        let data = match payload {
            Payload::Data(data) => data,
            Payload::File(file) => read_payload(file)?,
        };
        let framed = encode_tlv(&data)?;

        let carrier = PixelBuffer::from_file(&image)?;
        let codec = ImageCodec::from(self.options);
        let capacity = codec.capacity(&carrier);
        debug!(
            "hiding {} bytes with {} ({:?}) in {image:?} ({}x{}, capacity {capacity} bits)",
            data.len(),
            self.options.technique(),
            self.options.storage_mode(),
            carrier.width(),
            carrier.height()
        );

        if !self.options.tolerates_lossy_output() && OutputFormat::from_path(&output, None)?.is_lossy() {
            warn!("{output:?} is stored lossy, {} data will not survive", self.options.technique());
        }

        codec
            .hide(&carrier, &framed)?
            .save_as(&output, self.jpeg_quality)?;

        Ok(HideReport {
            output,
            payload_bits: framed.len() * 8,
            capacity,
        })
    }
}

/// Output file for `image` when none was given: `<stem>.<technique>.png` for LSB,
/// `<stem>.<technique>.jpg` for the transform codecs.
pub fn default_output_for(image: &Path, options: &CodecOptions) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "secret".to_string());
    let ext = if options.tolerates_lossy_output() { "jpg" } else { "png" };

    image.with_file_name(format!("{stem}.{}.{ext}", options.technique()))
}
