use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0x01 | 0x11 | 0x21 | 0x31));

        let value = self.imm16(bus);
        match opcode {
            0x01 => self.regs.set_bc(value),
            0x11 => self.regs.set_de(value),
            0x21 => self.regs.set_hl(value),
            0x31 => self.regs.sp = value,
            _ => unreachable!(),
        }
        None
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(
            opcode,
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E
        ));

        let value = self.imm8(bus);
        let dst = (opcode >> 3) & 0x07;
        self.write_reg8(bus, dst, value);
        None
    }

    /// LD r1, r2 family (0x40-0x7F), plus HALT at 0x76.
    ///
    /// Destination group in bits 3-5, source index in bits 0-2; index 6 on
    /// either side means the HL-addressed memory cell.
    pub(super) fn exec_ld_rr_or_halt<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!((0x40..=0x7F).contains(&opcode));

        if opcode == 0x76 {
            // HALT. Interrupt servicing is out of scope, so this only
            // latches the low-power state for the driver to observe.
            self.halted = true;
            return None;
        }

        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.write_reg8(bus, dst, value);
        None
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0x02 | 0x12 | 0x22 | 0x32));

        let addr = match opcode {
            0x02 => self.regs.bc(),
            0x12 => self.regs.de(),
            _ => self.regs.hl(),
        };
        bus.write8(addr, self.regs.a);

        // The HL+/HL- forms post-adjust HL.
        match opcode {
            0x22 => self.regs.set_hl(addr.wrapping_add(1)),
            0x32 => self.regs.set_hl(addr.wrapping_sub(1)),
            _ => {}
        }
        None
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0x0A | 0x1A | 0x2A | 0x3A));

        let addr = match opcode {
            0x0A => self.regs.bc(),
            0x1A => self.regs.de(),
            _ => self.regs.hl(),
        };
        self.regs.a = bus.read8(addr);

        match opcode {
            0x2A => self.regs.set_hl(addr.wrapping_add(1)),
            0x3A => self.regs.set_hl(addr.wrapping_sub(1)),
            _ => {}
        }
        None
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> Option<u16> {
        let addr = self.imm16(bus);
        let sp = self.regs.sp;
        bus.write8(addr, sp as u8);
        bus.write8(addr.wrapping_add(1), (sp >> 8) as u8);
        None
    }

    pub(super) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0xE0 | 0xF0));

        let offset = self.imm8(bus) as u16;
        let addr = 0xFF00u16.wrapping_add(offset);
        if opcode == 0xE0 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        None
    }

    pub(super) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0xE2 | 0xF2));

        let addr = 0xFF00u16.wrapping_add(self.regs.c as u16);
        if opcode == 0xE2 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        None
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0xEA | 0xFA));

        let addr = self.imm16(bus);
        if opcode == 0xEA {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        None
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> Option<u16> {
        let offset = self.imm8(bus) as i8 as i16 as u16;
        let result = self.alu_add16(self.regs.sp, offset);
        self.regs.f.set_zero(false);
        self.regs.set_hl(result);
        None
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> Option<u16> {
        self.regs.sp = self.regs.hl();
        None
    }
}
