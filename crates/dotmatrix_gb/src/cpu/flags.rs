use bitflags::bitflags;

bitflags! {
    /// The F register.
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    /// - bits 0-3 always read as zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags: u8 {
        const ZERO = 1 << 7;
        const SUBTRACT = 1 << 6;
        const HALF_CARRY = 1 << 5;
        const CARRY = 1 << 4;
    }
}

impl Flags {
    /// Build from a raw byte, masking out the unused low nibble.
    #[inline]
    pub fn from_byte(value: u8) -> Self {
        Self::from_bits_truncate(value)
    }

    #[inline]
    pub fn zero(self) -> bool {
        self.contains(Self::ZERO)
    }

    #[inline]
    pub fn subtract(self) -> bool {
        self.contains(Self::SUBTRACT)
    }

    #[inline]
    pub fn half_carry(self) -> bool {
        self.contains(Self::HALF_CARRY)
    }

    #[inline]
    pub fn carry(self) -> bool {
        self.contains(Self::CARRY)
    }

    #[inline]
    pub fn set_zero(&mut self, value: bool) {
        self.set(Self::ZERO, value);
    }

    #[inline]
    pub fn set_subtract(&mut self, value: bool) {
        self.set(Self::SUBTRACT, value);
    }

    #[inline]
    pub fn set_half_carry(&mut self, value: bool) {
        self.set(Self::HALF_CARRY, value);
    }

    #[inline]
    pub fn set_carry(&mut self, value: bool) {
        self.set(Self::CARRY, value);
    }
}
