use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::frame::decode_tlv;
use crate::media::image::{ImageCodec, Unveil};
use crate::media::{CodecOptions, PixelBuffer};
use crate::{Result, StegoError};

use super::load_original;

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    original_media: Option<PathBuf>,
    output_file: Option<PathBuf>,
    options: CodecOptions,
}

impl UnveilApi {
    /// Use the given codec options, they have to match the ones used for hiding
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
    pub fn with_original_image(mut self, original: impl AsRef<Path>) -> Self {
        self.original_media = Some(original.as_ref().to_path_buf());
        self
    }

    pub fn use_original_image<P: AsRef<Path>>(mut self, original: Option<P>) -> Self {
        self.original_media = original.map(|o| o.as_ref().to_path_buf());
        self
    }

    /// The unveiled payload is written to this file in addition to being returned
    pub fn into_output_file(mut self, output_file: impl AsRef<Path>) -> Self {
        self.output_file = Some(output_file.as_ref().to_path_buf());
        self
    }

    pub fn use_output_file<P: AsRef<Path>>(mut self, output_file: Option<P>) -> Self {
        self.output_file = output_file.map(|o| o.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process and return the payload
    pub fn execute(self) -> Result<Vec<u8>> {
        let Some(secret_media) = self.secret_media else {
            return Err(StegoError::CarrierNotSet);
        };

        let secret = PixelBuffer::from_file(&secret_media)?;
        let original = load_original(self.original_media.as_ref())?;
        let raw = ImageCodec::from(self.options).unveil(&secret, original.as_ref())?;
        let payload = decode_tlv(&raw).ok_or(StegoError::NoSecretData)?;
        debug!("unveiled {} bytes from {secret_media:?}", payload.len());

        if let Some(output_file) = self.output_file {
            let mut f = File::create(output_file).map_err(|source| StegoError::WriteError { source })?;
            f.write_all(&payload)
                .map_err(|source| StegoError::WriteError { source })?;
        }

        Ok(payload)
    }
}
