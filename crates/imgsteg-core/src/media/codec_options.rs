/// Codec configuration for steganography encoding/decoding
///
/// The codec choice determines the embedding technique:
/// - `Lsb` → pixel color channel low bits, needs a lossless output (PNG, BMP)
/// - `Dct` → coefficient pairs of 8x8 cosine transformed blocks, tolerates JPEG output
/// - `Dwt` → diagonal Haar subband, tolerates JPEG output, unveil needs the original image
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodecOptions {
    Lsb(LsbCodecOptions),
    Dct(DctCodecOptions),
    Dwt(DwtCodecOptions),
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self::Lsb(LsbCodecOptions::default())
    }
}

impl CodecOptions {
    pub fn storage_mode(&self) -> StorageMode {
        match self {
            CodecOptions::Lsb(o) => o.storage_mode,
            CodecOptions::Dct(o) => o.storage_mode,
            CodecOptions::Dwt(o) => o.storage_mode,
        }
    }

    /// short name used for file suffixes and logs
    pub fn technique(&self) -> &'static str {
        match self {
            CodecOptions::Lsb(_) => "lsb",
            CodecOptions::Dct(_) => "dct",
            CodecOptions::Dwt(_) => "dwt",
        }
    }

    /// true if the technique survives a lossy re-encoding of the carrier
    pub fn tolerates_lossy_output(&self) -> bool {
        !matches!(self, CodecOptions::Lsb(_))
    }
}

/// What happens with the capacity of a carrier that is left after the payload
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Stores the payload once, the rest of the carrier stays untouched
    #[default]
    Once,
    /// Stores the payload once and fills the rest of the carrier with zero bits
    Full,
    /// Stores the payload over and over until the carrier is full
    Repeat,
}

/// The color channels a transform codec works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSelection {
    /// The same data goes into every color channel (alpha excluded),
    /// unveil merges the channels by majority vote
    AllChannels,
    /// Only the channel with this 0-based index is used
    Channel(usize),
}

impl Default for ChannelSelection {
    fn default() -> Self {
        Self::Channel(0)
    }
}

impl ChannelSelection {
    /// resolves the selection to channel indices of an image with `color_channels` color channels
    pub fn resolve(&self, color_channels: usize) -> Vec<usize> {
        match self {
            ChannelSelection::AllChannels => (0..color_channels).collect(),
            ChannelSelection::Channel(c) => vec![*c],
        }
    }
}

/// How the LSB codec walks over the color channels of a pixel
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LsbLayout {
    /// One bit in every color channel of every pixel
    #[default]
    AllChannels,
    /// One bit per pixel, hopping to the next channel on every pixel
    Alternating,
}

/// Options for LSB (Least Significant Bit) image encoding
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LsbCodecOptions {
    pub layout: LsbLayout,
    pub storage_mode: StorageMode,
}

/// Default minimal distance between the two DCT coefficients of a block
pub const DEFAULT_PERSISTENCE: f32 = 30.0;

/// Options for DCT (Discrete Cosine Transformation) image encoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DctCodecOptions {
    pub storage_mode: StorageMode,
    pub channel: ChannelSelection,
    /// The distance enforced between the two coefficients that carry a bit.
    /// Higher values survive stronger compression but are more visible.
    pub persistence: f32,
}

impl Default for DctCodecOptions {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::Full,
            channel: ChannelSelection::default(),
            persistence: DEFAULT_PERSISTENCE,
        }
    }
}

/// Default offset added to or subtracted from a diagonal Haar coefficient
pub const DEFAULT_ALPHA: f32 = 0.05;

/// Options for DWT (Discrete Wavelet Transformation) image encoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DwtCodecOptions {
    pub storage_mode: StorageMode,
    pub channel: ChannelSelection,
    /// The encoding intensity, relative to the full range of a channel (`0.0..=0.5`, anything else is rejected)
    pub alpha: f32,
}

impl Default for DwtCodecOptions {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::Full,
            channel: ChannelSelection::default(),
            alpha: DEFAULT_ALPHA,
        }
    }
}

/// Default JPEG quality for lossy output (1-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 90;
