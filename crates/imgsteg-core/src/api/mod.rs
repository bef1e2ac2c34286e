//! Builder style entry points that tie image files, payload framing and the
//! codecs together.

pub mod hide;
pub mod unveil;
pub mod unveil_raw;

use std::path::{Path, PathBuf};

use log::error;

use crate::media::PixelBuffer;
use crate::{Result, StegoError};

/// reads the whole content of a payload file
pub fn read_payload(file: impl AsRef<Path>) -> Result<Vec<u8>> {
    let file = file.as_ref();
    std::fs::read(file).map_err(|source| {
        error!("Error reading payload {file:?}: {source}");
        StegoError::ReadError { source }
    })
}

/// loads the unmodified original image, if one was given
fn load_original(original: Option<&PathBuf>) -> Result<Option<PixelBuffer>> {
    original.map(|f| PixelBuffer::from_file(f)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn should_read_payload_files() {
        let out_dir = TempDir::new().unwrap();
        let file = out_dir.path().join("payload.bin");
        std::fs::write(&file, [0u8, 1, 2, 255]).unwrap();

        assert_eq!(read_payload(&file).unwrap(), vec![0u8, 1, 2, 255]);
        assert!(matches!(
            read_payload(out_dir.path().join("missing.bin")),
            Err(StegoError::ReadError { .. })
        ));
    }
}
