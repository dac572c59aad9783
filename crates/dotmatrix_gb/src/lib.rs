pub mod cpu;
pub mod machine;
pub mod memory;

pub use cpu::{BootProfile, Bus, Cpu, Flags, Registers, Snapshot};
pub use machine::GameBoy;
pub use memory::MemoryBus;

/// Address the DMG boot ROM hands control to.
pub const ENTRY_POINT: u16 = 0x0100;
