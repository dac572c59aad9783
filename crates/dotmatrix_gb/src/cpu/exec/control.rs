use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// Branch condition decode shared by JR/JP/CALL/RET: 0=NZ, 1=Z, 2=NC, 3=C.
    #[inline]
    fn cc_condition(&self, cc: u8) -> bool {
        match cc {
            0 => !self.regs.f.zero(),
            1 => self.regs.f.zero(),
            2 => !self.regs.f.carry(),
            3 => self.regs.f.carry(),
            _ => false,
        }
    }

    pub(super) fn exec_jr_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0x20 | 0x28 | 0x30 | 0x38));
        let cc = (opcode >> 3) & 0x03;
        self.jr(bus, self.cc_condition(cc))
    }

    pub(super) fn exec_jp_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0xC2 | 0xCA | 0xD2 | 0xDA));
        let cc = (opcode >> 3) & 0x03;
        self.jp_cond(bus, self.cc_condition(cc))
    }

    pub(super) fn exec_jp_hl(&mut self) -> Option<u16> {
        Some(self.regs.hl())
    }

    pub(super) fn exec_call_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0xC4 | 0xCC | 0xD4 | 0xDC));
        let cc = (opcode >> 3) & 0x03;
        self.call_cond(bus, self.cc_condition(cc))
    }

    pub(super) fn exec_ret_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<u16> {
        debug_assert!(matches!(opcode, 0xC0 | 0xC8 | 0xD0 | 0xD8));
        let cc = (opcode >> 3) & 0x03;
        self.ret_cond(bus, self.cc_condition(cc))
    }
}
