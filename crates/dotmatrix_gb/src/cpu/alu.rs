use super::Cpu;

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true). ADC folds the
    /// incoming carry into the operand before the nibble/overflow rules are
    /// applied, so the flag computation always sees a single operand.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let operand = if use_carry && self.regs.f.carry() {
            value.wrapping_add(1)
        } else {
            value
        };

        let a = self.regs.a;
        let full = (a as u16) + (operand as u16);
        let result = full as u8;

        self.regs.f.set_zero(result == 0);
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry((a & 0x0F) + (operand & 0x0F) > 0x0F);
        self.regs.f.set_carry(full > 0xFF);
        self.regs.a = result;
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true); the carry is
    /// folded into the operand the same way as in `alu_add`.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let operand = if use_carry && self.regs.f.carry() {
            value.wrapping_add(1)
        } else {
            value
        };

        let a = self.regs.a;
        self.regs.f.set_subtract(true);
        self.regs.f.set_half_carry((operand & 0x0F) > (a & 0x0F));
        self.regs.f.set_carry(operand > a);
        let result = a.wrapping_sub(operand);
        self.regs.f.set_zero(result == 0);
        self.regs.a = result;
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        let a = self.regs.a;
        self.alu_sub(value, false);
        self.regs.a = a;
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;

        self.regs.f.set_zero(result == 0);
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry(true);
        self.regs.f.set_carry(false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;

        self.regs.f.set_zero(result == 0);
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_carry(false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;

        self.regs.f.set_zero(result == 0);
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_carry(false);
    }

    /// 8-bit increment helper used by INC r and INC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.f.set_zero(result == 0);
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry((value & 0x0F) + 1 > 0x0F);
        result
    }

    /// 8-bit decrement helper used by DEC r and DEC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.f.set_zero(result == 0);
        self.regs.f.set_subtract(true);
        self.regs.f.set_half_carry((value & 0x0F) == 0);
        result
    }

    /// 16-bit add used by ADD HL,rr and the SP-relative signed-offset forms.
    ///
    /// Unlike the 8-bit path, carry comes from bit 15 overflow and
    /// half-carry from bit 11 overflow of the addition. Z is left alone;
    /// N is cleared.
    #[inline]
    pub(super) fn alu_add16(&mut self, lhs: u16, rhs: u16) -> u16 {
        self.regs.f.set_subtract(false);
        self.regs
            .f
            .set_half_carry((lhs & 0x0FFF) + (rhs & 0x0FFF) > 0x0FFF);
        self.regs.f.set_carry((lhs as u32) + (rhs as u32) > 0xFFFF);
        lhs.wrapping_add(rhs)
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H, N, and A to compute a correction value; updates A, Z, H,
    /// C and leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.regs.f.carry() { 0x60 } else { 0x00 };
        if self.regs.f.half_carry() {
            adjust |= 0x06;
        }

        if !self.regs.f.subtract() {
            // After an addition.
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            // After a subtraction.
            a = a.wrapping_sub(adjust);
        }

        self.regs.f.set_carry(adjust >= 0x60);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_zero(a == 0);
        self.regs.a = a;
    }
}
