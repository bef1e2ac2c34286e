//! # imgsteg core
//!
//! Hides data in raster images and reads it back. Three techniques are
//! available, selected by [`CodecOptions`]:
//! - LSB, one bit in the least significant bit of a color channel, needs lossless output
//! - DCT, one bit per 8x8 block in the order of two mid frequency coefficients
//! - DWT, one bit per 2x2 quad in the diagonal Haar subband, unveil needs the original image
//!
//! Payloads are framed with a small length header (see [`frame`]) so that
//! unveil knows where the data ends.
//!
//! # Usage Examples
//!
//! ## Hide a message inside an image
//!
//! ```rust,no_run
//! imgsteg_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_image("holiday.png")
//!     .with_output("holiday-with-secret.png")
//!     .execute()
//!     .expect("Failed to hide message in image");
//! ```
//!
//! ## Unveil a message hidden with DWT
//!
//! ```rust,no_run
//! use imgsteg_core::{CodecOptions, DwtCodecOptions};
//!
//! let message = imgsteg_core::api::unveil::prepare()
//!     .from_secret_file("holiday.dwt.jpg")
//!     .with_original_image("holiday.png")
//!     .with_options(CodecOptions::Dwt(DwtCodecOptions::default()))
//!     .execute()
//!     .expect("Failed to unveil message from image");
//! ```
//!
//! ## Work on pixel buffers directly
//!
//! ```rust
//! use imgsteg_core::media::image::{Hide, LsbCodec, Unveil};
//! use imgsteg_core::PixelBuffer;
//!
//! let carrier = PixelBuffer::from_fn(10, 10, 3, |x, y, c| (x * 20 + y * 7) as u8 + c);
//! let codec = LsbCodec::default();
//!
//! let secret = codec.hide(&carrier, b"AB").unwrap();
//! let raw = codec.unveil(&secret, None).unwrap();
//! assert_eq!(&raw[..2], b"AB");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod bit_stream;
pub mod error;
pub mod frame;
pub mod media;
pub mod reconstruct;
pub mod result;

pub use crate::error::StegoError;
pub use crate::media::{
    ChannelSelection, CodecOptions, DctCodecOptions, DwtCodecOptions, LsbCodecOptions, LsbLayout,
    OutputFormat, Persist, PixelBuffer, StorageMode,
};
pub use crate::reconstruct::{repair, similarity};
pub use crate::result::Result;
