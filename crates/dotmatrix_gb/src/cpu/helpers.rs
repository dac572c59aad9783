use super::{Bus, Cpu};

impl Cpu {
    /// 8-bit immediate operand: the byte following the opcode.
    ///
    /// Operands are read relative to PC without consuming them; the driver
    /// moves PC past the whole instruction afterwards via `advance`.
    #[inline]
    pub(super) fn imm8<B: Bus>(&self, bus: &mut B) -> u8 {
        bus.read8(self.regs.pc.wrapping_add(1))
    }

    /// 16-bit immediate operand, little-endian: low byte at PC+1, high byte
    /// at PC+2.
    #[inline]
    pub(super) fn imm16<B: Bus>(&self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.pc.wrapping_add(1)) as u16;
        let hi = bus.read8(self.regs.pc.wrapping_add(2)) as u16;
        (hi << 8) | lo
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        // Stack grows downward: memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write8(self.regs.sp, value as u8);
        bus.write8(self.regs.sp.wrapping_add(1), (value >> 8) as u8);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp) as u16;
        let hi = bus.read8(self.regs.sp.wrapping_add(1)) as u16;
        self.regs.sp = self.regs.sp.wrapping_add(2);
        (hi << 8) | lo
    }

    /// Read an 8-bit register or (HL) by operand index.
    ///
    /// The encoding matches the standard Game Boy register order used by
    /// opcode tables: 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A. Indices
    /// wrap modulo 8 so the low nibble of a family opcode can be passed
    /// directly.
    #[inline]
    pub(super) fn read_reg8<B: Bus>(&mut self, bus: &mut B, index: u8) -> u8 {
        match index % 8 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            6 => bus.read8(self.regs.hl()),
            _ => self.regs.a,
        }
    }

    /// Write an 8-bit register or (HL) by operand index.
    ///
    /// The encoding matches `read_reg8`.
    #[inline]
    pub(super) fn write_reg8<B: Bus>(&mut self, bus: &mut B, index: u8, value: u8) {
        match index % 8 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            6 => bus.write8(self.regs.hl(), value),
            _ => self.regs.a = value,
        }
    }

    /// Relative jump helper used by JR/JR cc.
    ///
    /// The displacement is a signed 8-bit offset relative to the address of
    /// the following instruction (PC + 2).
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Option<u16> {
        let offset = self.imm8(bus) as i8;
        if cond {
            let base = self.regs.pc.wrapping_add(2);
            Some(base.wrapping_add(offset as i16 as u16))
        } else {
            None
        }
    }

    /// Absolute jump helper used by JP a16 / JP cc,a16.
    pub(super) fn jp_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Option<u16> {
        let addr = self.imm16(bus);
        if cond {
            Some(addr)
        } else {
            None
        }
    }

    /// Conditional call helper used by CALL a16 / CALL cc,a16.
    ///
    /// The return address is the instruction following the 3-byte call.
    pub(super) fn call_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Option<u16> {
        let addr = self.imm16(bus);
        if cond {
            let ret = self.regs.pc.wrapping_add(3);
            self.push_u16(bus, ret);
            Some(addr)
        } else {
            None
        }
    }

    /// Conditional return helper used by RET cc.
    pub(super) fn ret_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Option<u16> {
        if cond {
            Some(self.pop_u16(bus))
        } else {
            None
        }
    }
}
