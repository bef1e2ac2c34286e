pub mod codec_options;
pub mod image;
mod primitives;
mod types;

use std::path::Path;

pub use codec_options::*;
pub use primitives::*;
pub use types::*;

pub trait Persist {
    /// writes to `file`, the format follows the file extension.
    /// `quality` is only used by lossy formats.
    fn save_as(&self, file: &Path, quality: Option<u8>) -> crate::Result<()>;
}
