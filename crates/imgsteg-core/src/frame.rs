//! Length framing for hidden payloads.
//!
//! A frame is `[i32 length][i32 !length][payload]`, both header fields in
//! native byte order. The second field is no real tag, it is derived from the
//! length so that garbage read from a carrier without a message fails the
//! check `complement == !length`.

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};

use crate::error::StegoError;
use crate::result::Result;

/// Size of the frame header in bytes
pub const HEADER_LEN: usize = 2 * std::mem::size_of::<i32>();

/// Wraps `payload` into a frame.
pub fn encode_tlv(payload: &[u8]) -> Result<Vec<u8>> {
    let size = i32::try_from(payload.len()).map_err(|_| StegoError::PayloadTooLarge(payload.len()))?;

    let mut framed = Vec::with_capacity(HEADER_LEN + payload.len());
    framed.write_i32::<NativeEndian>(size)?;
    framed.write_i32::<NativeEndian>(!size)?;
    framed.extend_from_slice(payload);

    Ok(framed)
}

/// Unwraps the payload of a frame found at the start of `blob`.
///
/// Returns `None` when the header is missing, negative or fails the complement
/// check. A length pointing past the end of `blob` is cut to what is available.
pub fn decode_tlv(blob: &[u8]) -> Option<Vec<u8>> {
    let mut header = blob.get(..HEADER_LEN)?;
    let size = header.read_i32::<NativeEndian>().ok()?;
    let xize = header.read_i32::<NativeEndian>().ok()?;

    if xize != !size || size < 0 {
        log::debug!("frame check failed: length {size}, complement {xize}");
        return None;
    }

    let body = &blob[HEADER_LEN..];
    let len = (size as usize).min(body.len());
    if len < size as usize {
        log::warn!("frame announces {size} bytes, only {len} available");
    }

    Some(body[..len].to_vec())
}
