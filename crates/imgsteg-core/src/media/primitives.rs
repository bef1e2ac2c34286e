/// stores one bit in the least significant bit of a color channel
pub trait HideBit {
    fn hide_bit(self, bit: bool);
}

/// reads the least significant bit of a color channel
pub trait UnveilBit {
    fn unveil_bit(self) -> bool;
}

impl HideBit for &mut u8 {
    #[inline]
    fn hide_bit(self, bit: bool) {
        *self = (*self & !1) | bit as u8;
    }
}

impl UnveilBit for &u8 {
    #[inline]
    fn unveil_bit(self) -> bool {
        *self & 1 == 1
    }
}
