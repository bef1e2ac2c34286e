use log::debug;

use super::haar;
use super::{check_capacity, merge_channel_copies, resolve_channels, Hide, Unveil};
use crate::bit_stream::{pack_bits, BitCursor};
use crate::error::StegoError;
use crate::media::{DwtCodecOptions, PixelBuffer};
use crate::result::Result;

/// Hides one bit per 2x2 pixel quad in the diagonal subband of a Haar transform.
///
/// A `1` adds alpha to the diagonal coefficient, a `0` subtracts it. Reading the
/// bits back compares against the unmodified original, so unveil needs both images.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DwtCodec {
    options: DwtCodecOptions,
}

impl DwtCodec {
    pub fn new(options: DwtCodecOptions) -> Self {
        Self { options }
    }

    /// Alpha is clamped away from both ends of `0..=1`, which only works up to one half.
    fn check_alpha(&self) -> Result<()> {
        let alpha = self.options.alpha;
        if (0.0..=0.5).contains(&alpha) {
            Ok(())
        } else {
            Err(StegoError::InvalidAlpha(alpha))
        }
    }

    /// One channel scaled to `0..=1` and clamped to `alpha..=1 - alpha`,
    /// so that adding alpha later can not saturate.
    fn normalized_plane(&self, buffer: &PixelBuffer, channel: usize) -> Vec<f32> {
        let alpha = self.options.alpha;
        let mut plane = buffer.plane(channel);
        plane
            .iter_mut()
            .for_each(|p| *p = (*p / 255.0).clamp(alpha, 1.0 - alpha));
        plane
    }
}

impl Hide for DwtCodec {
    fn capacity(&self, carrier: &PixelBuffer) -> usize {
        haar::quad_count(carrier.width() as usize, carrier.height() as usize)
    }

    fn hide(&self, carrier: &PixelBuffer, data: &[u8]) -> Result<PixelBuffer> {
        self.check_alpha()?;
        let channels = resolve_channels(self.options.channel, carrier)?;
        let mode = self.options.storage_mode;
        check_capacity("dwt", self.capacity(carrier), data, mode);

        let (width, height) = (carrier.width() as usize, carrier.height() as usize);
        let alpha = self.options.alpha;
        let mut secret = carrier.clone();
        for channel in channels {
            let mut plane = self.normalized_plane(carrier, channel);
            let mut bands = haar::decompose(&plane, width, height);
            let written = bands
                .diagonal
                .iter_mut()
                .zip(BitCursor::new(data, mode))
                .map(|(dd, bit)| *dd += if bit { alpha } else { -alpha })
                .count();
            haar::reconstruct(&bands, &mut plane, width);

            plane.iter_mut().for_each(|p| *p *= 255.0);
            secret.store_plane(channel, &plane);
            debug!("dwt: wrote {written} bits into channel {channel}");
        }

        Ok(secret)
    }
}

impl Unveil for DwtCodec {
    fn unveil(&self, secret: &PixelBuffer, reference: Option<&PixelBuffer>) -> Result<Vec<u8>> {
        self.check_alpha()?;
        let original = reference.ok_or(StegoError::MissingReference)?;
        // alpha never carries bits, a JPEG secret of an RGBA original has just lost it
        if original.dimensions() != secret.dimensions() || original.color_channels() != secret.color_channels() {
            return Err(StegoError::DimensionMismatch(
                original.width(),
                original.height(),
                original.color_channels() as u8,
                secret.width(),
                secret.height(),
                secret.color_channels() as u8,
            ));
        }

        let (width, height) = (secret.width() as usize, secret.height() as usize);
        let copies = resolve_channels(self.options.channel, secret)?
            .into_iter()
            .map(|channel| {
                // both sides get the same clamping, so identical images yield only zeros
                let before = haar::decompose(&self.normalized_plane(original, channel), width, height);
                let after = haar::decompose(&self.normalized_plane(secret, channel), width, height);
                pack_bits(
                    after
                        .diagonal
                        .iter()
                        .zip(&before.diagonal)
                        .map(|(s, o)| s - o > 0.0),
                )
            })
            .collect::<std::io::Result<Vec<_>>>()?;

        Ok(merge_channel_copies(copies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{ChannelSelection, StorageMode};
    use crate::test_utils::prepare_textured_image;

    fn codec(channel: ChannelSelection, storage_mode: StorageMode, alpha: f32) -> DwtCodec {
        DwtCodec::new(DwtCodecOptions {
            storage_mode,
            channel,
            alpha,
        })
    }

    #[test]
    fn capacity_should_count_whole_quads() {
        let codec = DwtCodec::default();

        assert_eq!(codec.capacity(&prepare_textured_image(10, 10, 3)), 25);
        assert_eq!(codec.capacity(&prepare_textured_image(11, 7, 3)), 15);
        assert_eq!(codec.capacity(&prepare_textured_image(1, 7, 3)), 0);
    }

    #[test]
    fn should_hide_and_unveil_with_the_original() {
        let carrier = prepare_textured_image(40, 40, 3);
        let codec = DwtCodec::default();

        let secret = codec.hide(&carrier, b"Hello Haar").unwrap();
        let unveiled = codec.unveil(&secret, Some(&carrier)).unwrap();

        assert_eq!(unveiled.len(), 400 / 8);
        assert_eq!(&unveiled[..10], b"Hello Haar");
        assert!(unveiled[10..].iter().all(|b| *b == 0));
    }

    #[test]
    fn should_survive_small_alphas() {
        let carrier = prepare_textured_image(32, 32, 1);
        let codec = codec(ChannelSelection::Channel(0), StorageMode::Once, 0.01);

        let secret = codec.hide(&carrier, b"tiny").unwrap();
        assert_eq!(&codec.unveil(&secret, Some(&carrier)).unwrap()[..4], b"tiny");
    }

    #[test]
    fn identical_images_should_unveil_only_zeros() {
        let carrier = PixelBuffer::from_fn(20, 20, 3, |x, y, c| ((x * 50 + y * 13) as u8).wrapping_add(c));

        let unveiled = DwtCodec::default().unveil(&carrier, Some(&carrier)).unwrap();

        assert_eq!(unveiled.len(), 100 / 8 + 1);
        assert!(unveiled.iter().all(|b| *b == 0));
    }

    #[test]
    fn should_work_on_saturated_images() {
        let carrier = PixelBuffer::from_fn(16, 16, 1, |x, _, _| if x % 3 == 0 { 255 } else { 0 });
        let codec = DwtCodec::default();

        let secret = codec.hide(&carrier, &[0b1010_0110, 0xff]).unwrap();
        let unveiled = codec.unveil(&secret, Some(&carrier)).unwrap();

        assert_eq!(&unveiled[..2], &[0b1010_0110, 0xff]);
    }

    #[test]
    fn should_repeat_the_payload() {
        let carrier = prepare_textured_image(16, 16, 3);
        let codec = codec(ChannelSelection::Channel(2), StorageMode::Repeat, 0.05);

        let unveiled = codec
            .unveil(&codec.hide(&carrier, b"ab").unwrap(), Some(&carrier))
            .unwrap();

        assert_eq!(unveiled, b"abababab".to_vec());
    }

    #[test]
    fn should_hide_in_every_channel_and_repair() {
        let carrier = prepare_textured_image(24, 24, 4);
        let codec = codec(ChannelSelection::AllChannels, StorageMode::Full, 0.05);

        let mut secret = codec.hide(&carrier, b"vote").unwrap();
        // flip the first quad of the red channel back to the original
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            secret.set(x, y, 0, carrier.get(x, y, 0));
        }

        assert_eq!(&codec.unveil(&secret, Some(&carrier)).unwrap()[..4], b"vote");
        // alpha is no carrier channel
        for (a, b) in carrier.as_raw().iter().zip(secret.as_raw()).skip(3).step_by(4) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn should_ignore_an_alpha_channel_the_secret_has_lost() {
        let carrier = prepare_textured_image(24, 24, 4);
        let codec = DwtCodec::default();

        let secret = codec.hide(&carrier, b"no alpha").unwrap();
        let without_alpha = PixelBuffer::from_fn(24, 24, 3, |x, y, c| secret.get(x, y, c));

        assert_eq!(&codec.unveil(&without_alpha, Some(&carrier)).unwrap()[..8], b"no alpha");
        // the same holds the other way round
        let opaque_original = PixelBuffer::from_fn(24, 24, 3, |x, y, c| carrier.get(x, y, c));
        assert_eq!(&codec.unveil(&secret, Some(&opaque_original)).unwrap()[..8], b"no alpha");
    }

    #[test]
    fn should_reject_alphas_out_of_range() {
        let carrier = prepare_textured_image(16, 16, 3);

        for alpha in [0.6, -0.1, f32::NAN, f32::INFINITY] {
            let codec = codec(ChannelSelection::Channel(0), StorageMode::Full, alpha);
            assert!(matches!(codec.hide(&carrier, b"x"), Err(StegoError::InvalidAlpha(_))));
            assert!(matches!(
                codec.unveil(&carrier, Some(&carrier)),
                Err(StegoError::InvalidAlpha(_))
            ));
        }
        assert!(codec(ChannelSelection::Channel(0), StorageMode::Full, 0.5)
            .hide(&carrier, b"x")
            .is_ok());
    }

    #[test]
    fn unveil_needs_a_matching_original() {
        let carrier = prepare_textured_image(16, 16, 3);
        let codec = DwtCodec::default();

        assert!(matches!(codec.unveil(&carrier, None), Err(StegoError::MissingReference)));
        assert!(matches!(
            codec.unveil(&carrier, Some(&prepare_textured_image(16, 18, 3))),
            Err(StegoError::DimensionMismatch(16, 18, 3, 16, 16, 3))
        ));
        assert!(matches!(
            codec.unveil(&carrier, Some(&prepare_textured_image(16, 16, 1))),
            Err(StegoError::DimensionMismatch(..))
        ));
    }
}
