use clap::{Args, Parser, Subcommand, ValueEnum};
use imgsteg_core::{
    ChannelSelection, CodecOptions, DctCodecOptions, DwtCodecOptions, LsbCodecOptions, LsbLayout,
    StorageMode,
};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    UnveilRaw(unveil_raw::UnveilRawArgs),
    Compare(compare::CompareArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Technique {
    /// least significant bit of every color channel, lossless output only
    Lsb,
    /// least significant bit of one color channel per pixel, lossless output only
    LsbAlt,
    /// coefficient pairs of 8x8 cosine transformed blocks
    Dct,
    /// diagonal Haar wavelet subband, unveil needs the original image
    Dwt,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Storage {
    Once,
    Full,
    Repeat,
}

impl From<Storage> for StorageMode {
    fn from(value: Storage) -> Self {
        match value {
            Storage::Once => StorageMode::Once,
            Storage::Full => StorageMode::Full,
            Storage::Repeat => StorageMode::Repeat,
        }
    }
}

fn parse_channel(s: &str) -> Result<ChannelSelection, String> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(ChannelSelection::AllChannels);
    }
    s.parse::<usize>()
        .map(ChannelSelection::Channel)
        .map_err(|_| format!("`{s}` is neither `all` nor a channel index"))
}

fn parse_alpha(s: &str) -> Result<f32, String> {
    let alpha = s.parse::<f32>().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if (0.0..=0.5).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(format!("{alpha} is not within 0.0..=0.5"))
    }
}

/// The codec flags shared by all subcommands
#[derive(Args, Debug, Clone)]
pub struct CodecArgs {
    /// The steganography technique
    #[arg(short, long, value_enum, default_value_t = Technique::Lsb)]
    pub technique: Technique,

    /// What to do with the capacity left after the data,
    /// defaults to `once` for LSB and `full` for DCT and DWT
    #[arg(short, long, value_enum)]
    pub storage: Option<Storage>,

    /// Color channel used by DCT and DWT: `all` or a 0-based index
    #[arg(short, long, value_parser = parse_channel, default_value = "0")]
    pub channel: ChannelSelection,

    /// DCT: distance between the two coefficients that carry a bit
    #[arg(long, default_value_t = imgsteg_core::media::DEFAULT_PERSISTENCE)]
    pub persistence: f32,

    /// DWT: intensity added to the diagonal subband, relative to the channel range
    #[arg(long, value_parser = parse_alpha, default_value_t = imgsteg_core::media::DEFAULT_ALPHA)]
    pub alpha: f32,
}

impl CodecArgs {
    pub fn options(&self) -> CodecOptions {
        match self.technique {
            Technique::Lsb | Technique::LsbAlt => {
                let mut o = LsbCodecOptions::default();
                if self.technique == Technique::LsbAlt {
                    o.layout = LsbLayout::Alternating;
                }
                if let Some(s) = self.storage {
                    o.storage_mode = s.into();
                }
                CodecOptions::Lsb(o)
            }
            Technique::Dct => {
                let mut o = DctCodecOptions {
                    channel: self.channel,
                    persistence: self.persistence,
                    ..Default::default()
                };
                if let Some(s) = self.storage {
                    o.storage_mode = s.into();
                }
                CodecOptions::Dct(o)
            }
            Technique::Dwt => {
                let mut o = DwtCodecOptions {
                    channel: self.channel,
                    alpha: self.alpha,
                    ..Default::default()
                };
                if let Some(s) = self.storage {
                    o.storage_mode = s.into();
                }
                CodecOptions::Dwt(o)
            }
        }
    }
}
