//! Bit level access to byte buffers.
//!
//! Bits are addressed LSB first: bit `b` lives in byte `b / 8` at position
//! `b % 8`, which is the `LittleEndian` order of `bitstream-io`.

use bitstream_io::{BitWrite, BitWriter, LittleEndian};

use crate::media::StorageMode;

/// reads bit `b` of `buf`
#[inline]
pub fn get_bit(buf: &[u8], b: usize) -> bool {
    (buf[b / 8] >> (b % 8)) & 1 == 1
}

/// clears and then sets bit `b` of `buf` to `v`
#[inline]
pub fn set_bit(buf: &mut [u8], b: usize, v: bool) {
    let mask = 1u8 << (b % 8);
    buf[b / 8] = (buf[b / 8] & !mask) | if v { mask } else { 0 };
}

/// number of bytes needed to hold `bits` bits
#[inline]
pub fn bytes_for_bits(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Collects a sequence of bits into bytes, the last byte is zero padded.
pub fn pack_bits<I: IntoIterator<Item = bool>>(bits: I) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut writer = BitWriter::endian(&mut buf, LittleEndian);
        for bit in bits {
            writer.write_bit(bit)?;
        }
        writer.byte_align()?;
    }

    Ok(buf)
}

/// Yields the payload bits one carrier cell after another.
///
/// What happens once the payload is exhausted is decided by the [`StorageMode`]:
/// `Once` ends the iteration, `Full` yields zeros forever and `Repeat` starts
/// over with the first payload bit.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    data: &'a [u8],
    cell: usize,
    mode: StorageMode,
}

impl<'a> BitCursor<'a> {
    pub fn new(data: &'a [u8], mode: StorageMode) -> Self {
        Self {
            data,
            cell: 0,
            mode,
        }
    }

    pub fn payload_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// The bit that belongs to carrier cell `cell`, `None` if nothing is stored there.
    ///
    /// Depends only on `cell`, so cells can be processed in any order.
    pub fn bit_at(&self, cell: usize) -> Option<bool> {
        let bits = self.payload_bits();
        if cell < bits {
            return Some(get_bit(self.data, cell));
        }

        match self.mode {
            StorageMode::Once => None,
            StorageMode::Full => Some(false),
            StorageMode::Repeat if bits == 0 => Some(false),
            StorageMode::Repeat => Some(get_bit(self.data, cell % bits)),
        }
    }
}

impl Iterator for BitCursor<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let bit = self.bit_at(self.cell)?;
        self.cell += 1;
        Some(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitstream_io::{BitRead, BitReader};

    // String: H           e
    // Binary: 0b01001000  0b01100001
    const HE: [u8; 2] = [0b0100_1000, 0b0110_0001];

    #[test]
    fn should_return_the_8_bits_of_h_in_little_endian_order() {
        let expected = [false, false, false, true, false, false, true, false];
        for (b, bit) in expected.iter().enumerate() {
            assert_eq!(get_bit(&HE, b), *bit, "bit {b} not correct");
        }
    }

    #[test]
    fn should_behave_as_the_bit_reader() {
        let mut reader = BitReader::endian(&HE[..], LittleEndian);

        for b in 0..16 {
            assert_eq!(get_bit(&HE, b), reader.read_bit().unwrap(), "{b} bit not correct");
        }
    }

    #[test]
    fn set_bit_should_clear_before_setting() {
        let mut buf = [0xff, 0x00];
        set_bit(&mut buf, 3, false);
        set_bit(&mut buf, 9, true);
        set_bit(&mut buf, 9, true);

        assert_eq!(buf, [0b1111_0111, 0b0000_0010]);
    }

    #[test]
    fn pack_bits_should_pad_the_last_byte() {
        let bits = (0..16).map(|b| get_bit(&HE, b)).chain([true]);
        let packed = pack_bits(bits).unwrap();

        assert_eq!(packed, vec![HE[0], HE[1], 0b0000_0001]);
        assert_eq!(bytes_for_bits(17), 3);
        assert_eq!(bytes_for_bits(16), 2);
    }

    #[test]
    fn cursor_should_stop_after_payload_when_storing_once() {
        let cursor = BitCursor::new(&HE, StorageMode::Once);

        assert_eq!(cursor.payload_bits(), 16);
        assert_eq!(cursor.count(), 16);
    }

    #[test]
    fn cursor_should_pad_with_zeros_when_storing_full() {
        let bits: Vec<bool> = BitCursor::new(&[0xff], StorageMode::Full).take(12).collect();

        assert!(bits[..8].iter().all(|b| *b));
        assert!(bits[8..].iter().all(|b| !*b));
    }

    #[test]
    fn cursor_should_wrap_around_when_repeating() {
        let cursor = BitCursor::new(&HE, StorageMode::Repeat);
        let bits: Vec<bool> = cursor.clone().take(48).collect();

        assert_eq!(pack_bits(bits).unwrap(), vec![HE[0], HE[1], HE[0], HE[1], HE[0], HE[1]]);
        assert_eq!(cursor.bit_at(16 + 3), Some(true));
    }

    #[test]
    fn cursor_should_not_get_stuck_on_empty_payloads() {
        assert_eq!(BitCursor::new(&[], StorageMode::Once).next(), None);
        assert_eq!(BitCursor::new(&[], StorageMode::Repeat).take(3).count(), 3);
        assert!(BitCursor::new(&[], StorageMode::Full).take(3).all(|b| !b));
    }
}
