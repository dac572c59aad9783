use super::{Cpu, Flags, Registers, Snapshot};

/// Post-boot register profile applied at construction and on reset.
///
/// `Dmg` matches the original Game Boy boot ROM's hand-off state as
/// documented in Pan Docs; `Cgb` matches the alternate state used by
/// Color-mode reference emulators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BootProfile {
    #[default]
    Dmg,
    Cgb,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_profile(BootProfile::Dmg)
    }

    pub fn with_profile(profile: BootProfile) -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            profile,
            snapshot: Snapshot::default(),
            unknown_opcode: false,
            executed: 0,
        };
        cpu.apply_boot_state();
        cpu
    }

    /// Reset the CPU to its power-on state using the configured profile.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.ime = false;
        self.halted = false;
        self.snapshot = Snapshot::default();
        self.unknown_opcode = false;
        self.executed = 0;
        self.apply_boot_state();
    }

    pub fn profile(&self) -> BootProfile {
        self.profile
    }

    /// Initialize registers to the boot ROM hand-off state for the selected
    /// profile. Both profiles start at PC 0x0100 with SP 0xFFFE.
    fn apply_boot_state(&mut self) {
        match self.profile {
            BootProfile::Dmg => {
                self.regs.a = 0x01;
                self.regs.f = Flags::from_byte(0xB0); // Z, H, C set
                self.regs.b = 0x00;
                self.regs.c = 0x13;
                self.regs.d = 0x00;
                self.regs.e = 0xD8;
                self.regs.h = 0x01;
                self.regs.l = 0x4D;
            }
            BootProfile::Cgb => {
                self.regs.a = 0x11;
                self.regs.f = Flags::from_byte(0x80); // Z set
                self.regs.b = 0x00;
                self.regs.c = 0x00;
                self.regs.d = 0xFF;
                self.regs.e = 0x56;
                self.regs.h = 0x00;
                self.regs.l = 0x0D;
            }
        }
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;

        // IME is clear when control is handed to the cartridge at 0x0100;
        // the program re-enables it via EI/RETI as needed.
        self.ime = false;
    }
}
