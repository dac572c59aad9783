mod alu;
mod bus;
mod cb;
mod exec;
mod flags;
mod helpers;
mod init;
mod regs;

#[cfg(test)]
mod tests;

pub use bus::Bus;
pub use flags::Flags;
pub use init::BootProfile;
pub use regs::{Registers, Snapshot};

/// Game Boy CPU core (SM83 / LR35902).
///
/// The core owns the register file and the per-step register snapshot; all
/// memory traffic goes through a [`Bus`] reference supplied per call, so the
/// bus always outlives any single step. One call to [`Cpu::execute`] runs one
/// instruction; [`Cpu::advance`] then moves PC by the instruction's byte
/// length unless the instruction already repositioned control flow.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable. Modeled as storage toggled by DI/EI/RETI;
    /// this core never dispatches interrupts on its own.
    pub ime: bool,
    /// Latched by HALT/STOP. The driver decides what to do with it.
    pub halted: bool,
    profile: BootProfile,
    snapshot: Snapshot,
    unknown_opcode: bool,
    executed: u64,
}

impl Cpu {
    /// Execute the instruction at the current PC.
    ///
    /// Returns `Some(new_pc)` when the instruction repositioned the program
    /// counter (jumps, calls, returns, RST, taken conditional branches) and
    /// `None` otherwise. PC itself is left untouched either way; the caller
    /// applies the outcome via [`Cpu::advance`]. Immediate operands are read
    /// at PC+1/PC+2 without being consumed.
    pub fn execute<B: Bus>(&mut self, bus: &mut B) -> Option<u16> {
        self.snapshot = Snapshot::capture(&self.regs);
        self.executed = self.executed.wrapping_add(1);
        let opcode = bus.read8(self.regs.pc);
        self.exec_opcode(bus, opcode)
    }

    /// Move PC past the instruction that [`Cpu::execute`] just ran.
    ///
    /// `length` is the instruction's byte length from external opcode
    /// metadata; `target` is the value `execute` returned. A `Some` target
    /// wins over the length-based increment.
    pub fn advance(&mut self, length: u16, target: Option<u16>) {
        match target {
            Some(pc) => self.regs.pc = pc,
            None => self.regs.pc = self.regs.pc.wrapping_add(length),
        }
    }

    /// Restore all six register values captured at the start of the most
    /// recent `execute` call. Memory is not rolled back.
    pub fn rewind(&mut self) {
        let snap = self.snapshot;
        self.regs.set_af(snap.af);
        self.regs.set_bc(snap.bc);
        self.regs.set_de(snap.de);
        self.regs.set_hl(snap.hl);
        self.regs.sp = snap.sp;
        self.regs.pc = snap.pc;
    }

    /// Register values captured at the start of the most recent step.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }

    /// Sticky signal: an opcode with no handler was executed.
    pub fn hit_unknown_opcode(&self) -> bool {
        self.unknown_opcode
    }

    pub fn clear_unknown_opcode(&mut self) {
        self.unknown_opcode = false;
    }

    /// Number of `execute` calls since construction or reset.
    pub fn instructions_executed(&self) -> u64 {
        self.executed
    }
}
