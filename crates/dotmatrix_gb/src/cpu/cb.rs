use super::{Bus, Cpu};

impl Cpu {
    /// Extended (0xCB-prefixed) instructions: rotates, shifts, swap, and the
    /// bit test/reset/set rows.
    ///
    /// The second opcode byte sits at PC+1. Its high nibble selects the row;
    /// within the rotate/shift rows the low nibble picks the left variant
    /// (0-7) or the right variant (8-F), and the operand index is the low
    /// nibble modulo 8 over B,C,D,E,H,L,(HL),A. None of these touch PC.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B) -> Option<u16> {
        let cb = bus.read8(self.regs.pc.wrapping_add(1));
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;

        match x {
            0 => {
                let mut value = self.read_reg8(bus, z);

                match y {
                    // RLC r
                    0 => {
                        let carry = (value & 0x80) != 0;
                        value = value.rotate_left(1);
                        self.set_rotate_flags(value, carry);
                    }
                    // RRC r
                    1 => {
                        let carry = (value & 0x01) != 0;
                        value = value.rotate_right(1);
                        self.set_rotate_flags(value, carry);
                    }
                    // RL r
                    2 => {
                        let carry_out = (value & 0x80) != 0;
                        let carry_in = if self.regs.f.carry() { 1 } else { 0 };
                        value = (value << 1) | carry_in;
                        self.set_rotate_flags(value, carry_out);
                    }
                    // RR r
                    3 => {
                        let carry_out = (value & 0x01) != 0;
                        let carry_in = if self.regs.f.carry() { 0x80 } else { 0 };
                        value = (value >> 1) | carry_in;
                        self.set_rotate_flags(value, carry_out);
                    }
                    // SLA r
                    4 => {
                        let carry = (value & 0x80) != 0;
                        value <<= 1;
                        self.set_rotate_flags(value, carry);
                    }
                    // SRA r
                    5 => {
                        let carry = (value & 0x01) != 0;
                        let msb = value & 0x80;
                        value = (value >> 1) | msb;
                        self.set_rotate_flags(value, carry);
                    }
                    // SWAP r
                    6 => {
                        value = (value << 4) | (value >> 4);
                        self.set_rotate_flags(value, false);
                    }
                    // SRL r
                    7 => {
                        let carry = (value & 0x01) != 0;
                        value >>= 1;
                        self.set_rotate_flags(value, carry);
                    }
                    _ => unreachable!(),
                }

                self.write_reg8(bus, z, value);
            }
            // BIT b, r: Z from the tested bit, H set, N cleared, C preserved.
            1 => {
                let value = self.read_reg8(bus, z);
                let bit_set = (value & (1 << y)) != 0;
                self.regs.f.set_zero(!bit_set);
                self.regs.f.set_subtract(false);
                self.regs.f.set_half_carry(true);
            }
            // RES b, r
            2 => {
                let value = self.read_reg8(bus, z) & !(1 << y);
                self.write_reg8(bus, z, value);
            }
            // SET b, r
            3 => {
                let value = self.read_reg8(bus, z) | (1 << y);
                self.write_reg8(bus, z, value);
            }
            _ => unreachable!(),
        }
        None
    }

    #[inline]
    fn set_rotate_flags(&mut self, result: u8, carry: bool) {
        self.regs.f.set_zero(result == 0);
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_carry(carry);
    }
}
