use crate::cpu::Cpu;

impl Cpu {
    pub(super) fn exec_di(&mut self) -> Option<u16> {
        self.ime = false;
        None
    }

    pub(super) fn exec_ei(&mut self) -> Option<u16> {
        self.ime = true;
        None
    }

    /// STOP. The padding byte at PC+1 is accounted for by the instruction's
    /// declared length; like HALT this only latches the idle state.
    pub(super) fn exec_stop(&mut self) -> Option<u16> {
        self.halted = true;
        None
    }
}
