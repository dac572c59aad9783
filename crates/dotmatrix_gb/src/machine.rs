pub mod opcodes;


use std::fmt::Write as _;
use std::path::Path;

use anyhow::{ensure, Context, Result};

use crate::cpu::{BootProfile, Bus, Cpu};
use crate::memory::MemoryBus;

pub use opcodes::instruction_length;

/// High-level machine: the CPU core plus the memory bus, stepped one
/// instruction per call.
///
/// `step` follows the mandated driver ordering: read the opcode at the
/// current PC, look up its byte length, execute, then advance. Length is
/// always taken from the pre-increment PC's opcode, consistent with how the
/// instruction read its immediate operands.
pub struct GameBoy {
    pub cpu: Cpu,
    pub bus: MemoryBus,
    serial_buffer: String,
}

impl GameBoy {
    pub fn new(rom: &[u8]) -> Self {
        Self::with_profile(rom, BootProfile::Dmg)
    }

    pub fn with_profile(rom: &[u8], profile: BootProfile) -> Self {
        Self {
            cpu: Cpu::with_profile(profile),
            bus: MemoryBus::new(rom),
            serial_buffer: String::new(),
        }
    }

    /// Load a ROM image from disk and build a machine around it.
    pub fn from_rom_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let rom = std::fs::read(path)
            .with_context(|| format!("failed to read ROM '{}'", path.display()))?;
        ensure!(!rom.is_empty(), "ROM image '{}' is empty", path.display());
        Ok(Self::new(&rom))
    }

    /// Execute one instruction.
    pub fn step(&mut self) {
        let opcode = self.bus.read8(self.cpu.regs.pc);
        let length = instruction_length(opcode);
        let target = self.cpu.execute(&mut self.bus);
        self.cpu.advance(length, target);
        self.pump_serial();
    }

    pub fn step_n(&mut self, count: u64) {
        for _ in 0..count {
            self.step();
        }
    }

    /// Reset registers to the boot profile and zero-fill all RAM-backed
    /// regions. ROM and the interrupt registers keep their contents.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset_ram();
        self.serial_buffer.clear();
    }

    /// Text written by the program through the serial port so far.
    ///
    /// Test ROMs report results this way: a byte in SC (0xFF02) of 0x81
    /// means "transfer the byte sitting in SB (0xFF01)".
    pub fn serial_output(&self) -> &str {
        &self.serial_buffer
    }

    fn pump_serial(&mut self) {
        if self.bus.peek8(0xFF02) == 0x81 {
            let byte = self.bus.peek8(0xFF01);
            self.serial_buffer.push(byte as char);
            self.bus.poke8(0xFF02, 0);
        }
    }

    /// One reference-log style line describing the current CPU state and
    /// the next four bytes at PC. Reads bypass the access observer.
    pub fn trace_line(&mut self) -> String {
        let regs = self.cpu.regs;
        let mut line = String::with_capacity(80);
        let _ = write!(
            line,
            "A: {:02X} F: {:02X} B: {:02X} C: {:02X} D: {:02X} E: {:02X} \
             H: {:02X} L: {:02X} SP: {:04X} PC: 00:{:04X}",
            regs.a,
            regs.f.bits(),
            regs.b,
            regs.c,
            regs.d,
            regs.e,
            regs.h,
            regs.l,
            regs.sp,
            regs.pc,
        );
        let _ = write!(
            line,
            " ({:02X} {:02X} {:02X} {:02X})",
            self.bus.peek8(regs.pc),
            self.bus.peek8(regs.pc.wrapping_add(1)),
            self.bus.peek8(regs.pc.wrapping_add(2)),
            self.bus.peek8(regs.pc.wrapping_add(3)),
        );
        line
    }
}
