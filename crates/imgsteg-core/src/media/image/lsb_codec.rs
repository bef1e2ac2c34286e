use log::debug;

use super::iterators::{ColorIter, ColorIterMut};
use super::{check_capacity, Hide, Unveil};
use crate::bit_stream::{pack_bits, BitCursor};
use crate::media::{HideBit, LsbCodecOptions, LsbLayout, PixelBuffer, UnveilBit};
use crate::result::Result;

/// Hides one bit in the least significant bit of a color channel.
///
/// The output must be stored losslessly, any lossy re-encoding destroys the data.
///
/// The alpha channel of a gray-alpha or RGBA image never carries data. The capacity
/// is `width * height * color_channels` bits when every color channel is used and
/// `width * height` bits for the alternating layout, so a 4 channel image holds
/// 3 bits per pixel and a 2 channel image 1 bit per pixel.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LsbCodec {
    options: LsbCodecOptions,
}

impl LsbCodec {
    pub fn new(options: LsbCodecOptions) -> Self {
        Self { options }
    }
}

impl Hide for LsbCodec {
    fn capacity(&self, carrier: &PixelBuffer) -> usize {
        match self.options.layout {
            LsbLayout::AllChannels => carrier.pixel_count() * carrier.color_channels(),
            LsbLayout::Alternating => carrier.pixel_count(),
        }
    }

    fn hide(&self, carrier: &PixelBuffer, data: &[u8]) -> Result<PixelBuffer> {
        let mode = self.options.storage_mode;
        check_capacity("lsb", self.capacity(carrier), data, mode);

        let mut secret = carrier.clone();
        let written = ColorIterMut::new(&mut secret, self.options.layout)
            .zip(BitCursor::new(data, mode))
            .map(|(color, bit)| color.hide_bit(bit))
            .count();
        debug!("lsb: wrote {written} bits");

        Ok(secret)
    }
}

impl Unveil for LsbCodec {
    fn unveil(&self, secret: &PixelBuffer, _reference: Option<&PixelBuffer>) -> Result<Vec<u8>> {
        let bits = ColorIter::new(secret, self.options.layout).map(|color| color.unveil_bit());

        Ok(pack_bits(bits)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::StorageMode;
    use crate::test_utils::prepare_textured_image;

    fn codec(layout: LsbLayout, storage_mode: StorageMode) -> LsbCodec {
        LsbCodec::new(LsbCodecOptions { layout, storage_mode })
    }

    #[test]
    fn should_hide_and_unveil_in_all_channels() {
        let carrier = prepare_textured_image(10, 10, 3);
        let codec = LsbCodec::default();

        let secret = codec.hide(&carrier, b"Hello World!").unwrap();
        let unveiled = codec.unveil(&secret, None).unwrap();

        assert_eq!(codec.capacity(&carrier), 300);
        assert_eq!(unveiled.len(), 300 / 8 + 1);
        assert_eq!(&unveiled[..12], b"Hello World!");
    }

    #[test]
    fn should_only_change_the_lowest_bits() {
        let carrier = prepare_textured_image(8, 8, 4);
        let secret = LsbCodec::default().hide(&carrier, &[0xa5; 64]).unwrap();

        for (a, b) in carrier.as_raw().iter().zip(secret.as_raw()) {
            assert!(a.abs_diff(*b) <= 1);
        }
        // alpha stays untouched
        for (a, b) in carrier.as_raw().iter().zip(secret.as_raw()).skip(3).step_by(4) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn capacity_should_leave_out_alpha() {
        let all = codec(LsbLayout::AllChannels, StorageMode::Full);
        let alternating = codec(LsbLayout::Alternating, StorageMode::Full);

        for (channels, bits_per_pixel) in [(1, 1), (2, 1), (3, 3), (4, 3)] {
            let carrier = prepare_textured_image(6, 5, channels);
            assert_eq!(all.capacity(&carrier), 30 * bits_per_pixel, "{channels} channels");
            assert_eq!(alternating.capacity(&carrier), 30, "{channels} channels");
        }
    }

    #[test]
    fn should_hide_in_alternating_channels() {
        let carrier = prepare_textured_image(9, 9, 3);
        let codec = codec(LsbLayout::Alternating, StorageMode::Once);

        let secret = codec.hide(&carrier, b"Hey!").unwrap();

        assert_eq!(codec.capacity(&carrier), 81);
        assert_eq!(&codec.unveil(&secret, None).unwrap()[..4], b"Hey!");
        // the third pixel carries its bit in the blue channel only
        assert_eq!(secret.get(2, 0, 0), carrier.get(2, 0, 0));
        assert_eq!(secret.get(2, 0, 1), carrier.get(2, 0, 1));
    }

    #[test]
    fn should_leave_the_rest_untouched_when_storing_once() {
        let carrier = prepare_textured_image(10, 10, 3);
        let secret = codec(LsbLayout::AllChannels, StorageMode::Once)
            .hide(&carrier, b"AB")
            .unwrap();

        assert_eq!(&secret.as_raw()[16..], &carrier.as_raw()[16..]);
    }

    #[test]
    fn should_fill_with_zeros_when_storing_full() {
        let carrier = prepare_textured_image(10, 10, 3);
        let codec = codec(LsbLayout::AllChannels, StorageMode::Full);
        let unveiled = codec.unveil(&codec.hide(&carrier, b"AB").unwrap(), None).unwrap();

        assert_eq!(&unveiled[..2], b"AB");
        assert!(unveiled[2..].iter().all(|b| *b == 0));
    }

    #[test]
    fn should_repeat_the_payload() {
        let carrier = prepare_textured_image(10, 10, 3);
        let codec = codec(LsbLayout::AllChannels, StorageMode::Repeat);
        let unveiled = codec.unveil(&codec.hide(&carrier, b"AB").unwrap(), None).unwrap();

        // 300 bits hold 18 full copies and 12 bits of the 19th
        for chunk in unveiled[..36].chunks(2) {
            assert_eq!(chunk, b"AB");
        }
        assert_eq!(unveiled[36], b'A');
    }

    #[test]
    fn should_truncate_payloads_exceeding_the_capacity() {
        let carrier = prepare_textured_image(2, 2, 3);
        let codec = LsbCodec::default();
        let unveiled = codec.unveil(&codec.hide(&carrier, b"too long").unwrap(), None).unwrap();

        assert_eq!(unveiled.len(), 2);
        assert_eq!(unveiled[0], b't');
        assert_eq!(unveiled[1] & 0x0f, b'o' & 0x0f);
    }
}
