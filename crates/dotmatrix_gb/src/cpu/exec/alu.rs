use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// Accumulator ALU family, opcodes 0x80-0xBF.
    ///
    /// The high nibble selects the operation pair, the low nibble both the
    /// operand (modulo 8 over B,C,D,E,H,L,(HL),A) and which half of the pair
    /// applies: low nibble 0-7 selects the plain variant, 8-F the
    /// carry/alternate variant.
    pub(super) fn exec_alu_reg_group<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!((0x80..=0xBF).contains(&opcode));

        let low = opcode & 0x0F;
        let alt = low >= 0x08;
        let value = self.read_reg8(bus, low);

        match opcode >> 4 {
            0x8 => self.alu_add(value, alt),
            0x9 => self.alu_sub(value, alt),
            0xA => {
                if alt {
                    self.alu_xor(value)
                } else {
                    self.alu_and(value)
                }
            }
            0xB => {
                if alt {
                    self.alu_cp(value)
                } else {
                    self.alu_or(value)
                }
            }
            _ => unreachable!(),
        }
        None
    }

    /// Accumulator ALU with an immediate operand: 0xC6/0xCE/.../0xFE.
    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(
            opcode,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE
        ));

        let value = self.imm8(bus);
        match opcode {
            0xC6 => self.alu_add(value, false),
            0xCE => self.alu_add(value, true),
            0xD6 => self.alu_sub(value, false),
            0xDE => self.alu_sub(value, true),
            0xE6 => self.alu_and(value),
            0xEE => self.alu_xor(value),
            0xF6 => self.alu_or(value),
            0xFE => self.alu_cp(value),
            _ => unreachable!(),
        }
        None
    }

    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));

        let value = match opcode {
            0x09 => self.regs.bc(),
            0x19 => self.regs.de(),
            0x29 => self.regs.hl(),
            0x39 => self.regs.sp,
            _ => unreachable!(),
        };
        let result = self.alu_add16(self.regs.hl(), value);
        self.regs.set_hl(result);
        None
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> Option<u16> {
        let offset = self.imm8(bus) as i8 as i16 as u16;
        let result = self.alu_add16(self.regs.sp, offset);
        self.regs.f.set_zero(false);
        self.regs.sp = result;
        None
    }

    pub(super) fn exec_daa(&mut self) -> Option<u16> {
        self.alu_daa();
        None
    }

    pub(super) fn exec_cpl(&mut self) -> Option<u16> {
        self.regs.a = !self.regs.a;
        self.regs.f.set_subtract(true);
        self.regs.f.set_half_carry(true);
        None
    }

    pub(super) fn exec_scf(&mut self) -> Option<u16> {
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_carry(true);
        None
    }

    pub(super) fn exec_ccf(&mut self) -> Option<u16> {
        let carry = self.regs.f.carry();
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_carry(!carry);
        None
    }

    /// Rotate A instructions (unprefixed 0x07/0x0F/0x17/0x1F).
    ///
    /// Similar to the extended-table rotates but always operate on A and
    /// always clear Z.
    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));

        let a = self.regs.a;
        let (result, carry_out) = match opcode {
            // RLCA
            0x07 => (a.rotate_left(1), (a & 0x80) != 0),
            // RRCA
            0x0F => (a.rotate_right(1), (a & 0x01) != 0),
            // RLA
            0x17 => {
                let carry_in = if self.regs.f.carry() { 1 } else { 0 };
                ((a << 1) | carry_in, (a & 0x80) != 0)
            }
            // RRA
            0x1F => {
                let carry_in = if self.regs.f.carry() { 0x80 } else { 0 };
                ((a >> 1) | carry_in, (a & 0x01) != 0)
            }
            _ => unreachable!(),
        };

        self.regs.a = result;
        self.regs.f.set_zero(false);
        self.regs.f.set_subtract(false);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_carry(carry_out);
        None
    }
}
