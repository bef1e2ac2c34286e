use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    /// Represents an unsupported carrier media. For example, a TIFF or a movie file
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a raw pixel buffer whose length does not match its dimensions
    #[error("Pixel buffer of {width}x{height} with {channels} channels needs {expected} bytes, got {actual}")]
    InvalidPixelBuffer {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a channel index that the carrier does not have as a color channel
    #[error("Channel {channel} is not available, the image has {available} color channel(s)")]
    InvalidChannel { channel: usize, available: usize },

    /// Represents an original and a secret image that do not share the same geometry
    #[error("Image dimensions differ: original is {0}x{1}x{2}, secret is {3}x{4}x{5}")]
    DimensionMismatch(u32, u32, u8, u32, u32, u8),

    /// Represents a DWT intensity outside of `0.0..=0.5`
    #[error("Alpha {0} is out of range, expected a value within 0.0..=0.5")]
    InvalidAlpha(f32),

    /// Represents an unveil with a codec that needs the unmodified original image
    #[error("The original image is required to unveil data hidden with this technique")]
    MissingReference,

    /// Represents a payload whose length does not fit into the frame header
    #[error("Payload of {0} bytes does not fit into the length header")]
    PayloadTooLarge(usize),

    /// Represents an unveil of no secret data. For example when the frame header check failed
    #[error("No secret data found")]
    NoSecretData,

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
