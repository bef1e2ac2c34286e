use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::media::image::{ImageCodec, Unveil};
use crate::media::{CodecOptions, PixelBuffer};
use crate::{Result, StegoError};

use super::load_original;

pub fn prepare() -> UnveilRawApi {
    UnveilRawApi::default()
}

/// Dumps every bit a codec can read from an image, without looking for a frame
#[derive(Default, Debug)]
pub struct UnveilRawApi {
    secret_media: Option<PathBuf>,
    original_media: Option<PathBuf>,
    destination_file: Option<PathBuf>,
    options: CodecOptions,
}

impl UnveilRawApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the secret image that contains the data to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// The unmodified carrier, needed by DWT
    pub fn use_original_image<P: AsRef<Path>>(mut self, original: Option<P>) -> Self {
        self.original_media = original.map(|o| o.as_ref().to_path_buf());
        self
    }

    /// This is the raw file where all data will be saved to
    pub fn into_raw_file(mut self, destination_file: impl AsRef<Path>) -> Self {
        self.destination_file = Some(destination_file.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<()> {
        let Some(secret_media) = self.secret_media else {
            return Err(StegoError::CarrierNotSet);
        };
        let Some(destination_file) = self.destination_file else {
            return Err(StegoError::TargetNotSet);
        };

        let secret = PixelBuffer::from_file(&secret_media)?;
        let original = load_original(self.original_media.as_ref())?;
        let raw = ImageCodec::from(self.options).unveil(&secret, original.as_ref())?;
        debug!("writing {} raw bytes to {destination_file:?}", raw.len());

        let mut destination_file =
            File::create(destination_file).map_err(|source| StegoError::WriteError { source })?;

        destination_file
            .write_all(&raw)
            .map_err(|source| StegoError::WriteError { source })
    }
}
