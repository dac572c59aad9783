
use log::warn;

use crate::cpu::Bus;

/// Addressable ROM window (banking beyond it is out of scope).
pub const ROM_SIZE: usize = 0x8000;
const WRAM_BANK_SIZE: usize = 0x1000;
const VRAM_SIZE: usize = 0x2000;
const HRAM_SIZE: usize = 0x7F;
const IO_SIZE: usize = 0x80;

/// Callback invoked with the address of every observed bus access.
///
/// Used by debuggers for watch-address breakpoints; diagnostics that must
/// not re-trigger instrumentation go through [`MemoryBus::peek8`] /
/// [`MemoryBus::poke8`] instead.
pub type AccessObserver = Box<dyn FnMut(u16)>;

/// Storage region a 16-bit address resolves to.
///
/// Every address maps to exactly one variant; the payload is the offset into
/// the region's backing array where one exists. Single-address registers and
/// the unmapped case carry no offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Region {
    Rom(usize),
    Wram0(usize),
    Wram1(usize),
    Hram(usize),
    Vram(usize),
    InterruptEnable,
    InterruptFlag,
    Scanline,
    Io(usize),
    Unmapped,
}

/// Resolve an address to its region, in priority order. Pure function so the
/// range boundaries can be tested exhaustively.
pub(crate) fn decode(addr: u16) -> Region {
    let a = addr as usize;
    match addr {
        0x0000..=0x7FFF => Region::Rom(a),
        0xC000..=0xCFFF => Region::Wram0(a - 0xC000),
        0xD000..=0xDFFF => Region::Wram1(a - 0xD000),
        0xFF80..=0xFFFE => Region::Hram(a - 0xFF80),
        0x8000..=0x9FFF => Region::Vram(a - 0x8000),
        0xFFFF => Region::InterruptEnable,
        0xFF0F => Region::InterruptFlag,
        0xFF44 => Region::Scanline,
        0xFF00..=0xFF7F => Region::Io(a - 0xFF00),
        _ => Region::Unmapped,
    }
}

/// Memory bus: owns all addressable storage and dispatches 16-bit addresses
/// across ROM, the two working-RAM banks, video RAM, high RAM, the IO block,
/// and the interrupt-enable/-flag registers.
///
/// Reads and writes go through an explicit `read8`/`write8` pair rather than
/// handing out interior references. Unmapped accesses never fail; they set a
/// sticky signal and route through a shared sink byte so emulation keeps
/// advancing deterministically.
pub struct MemoryBus {
    rom: Vec<u8>,
    wram0: [u8; WRAM_BANK_SIZE],
    wram1: [u8; WRAM_BANK_SIZE],
    vram: [u8; VRAM_SIZE],
    hram: [u8; HRAM_SIZE],
    io: [u8; IO_SIZE],
    ie_reg: u8,
    if_reg: u8,
    /// Shared destination for all unmapped accesses. Writes land here and
    /// are lost; reads return whatever was last written.
    sink: u8,
    invalid_access: bool,
    observer: Option<AccessObserver>,
}

impl MemoryBus {
    /// Build a bus around a ROM image. The image is padded with zeroes up to
    /// the 32 KiB addressable window; all other regions start zero-filled.
    pub fn new(rom: &[u8]) -> Self {
        let mut rom = rom.to_vec();
        if rom.len() < ROM_SIZE {
            rom.resize(ROM_SIZE, 0);
        }
        Self {
            rom,
            wram0: [0; WRAM_BANK_SIZE],
            wram1: [0; WRAM_BANK_SIZE],
            vram: [0; VRAM_SIZE],
            hram: [0; HRAM_SIZE],
            io: [0; IO_SIZE],
            ie_reg: 0,
            if_reg: 0,
            sink: 0,
            invalid_access: false,
            observer: None,
        }
    }

    /// Read without notifying the access observer. Diagnostics (trace
    /// formatting, memory dumps) use this so instrumented reads do not
    /// re-trigger watch callbacks.
    pub fn peek8(&mut self, addr: u16) -> u8 {
        match decode(addr) {
            Region::Rom(i) => self.rom[i],
            Region::Wram0(i) => self.wram0[i],
            Region::Wram1(i) => self.wram1[i],
            Region::Hram(i) => self.hram[i],
            Region::Vram(i) => self.vram[i],
            Region::InterruptEnable => self.ie_reg,
            Region::InterruptFlag => self.if_reg,
            Region::Scanline => {
                // LY always reads as the "safe to draw" line so self-test
                // ROMs polling it never hang.
                self.io[0x44] = 0x90;
                0x90
            }
            Region::Io(i) => self.io[i],
            Region::Unmapped => {
                warn!("read from unmapped address {addr:#06x}");
                self.invalid_access = true;
                self.sink
            }
        }
    }

    /// Write without notifying the access observer.
    pub fn poke8(&mut self, addr: u16, value: u8) {
        match decode(addr) {
            Region::Rom(i) => self.rom[i] = value,
            Region::Wram0(i) => self.wram0[i] = value,
            Region::Wram1(i) => self.wram1[i] = value,
            Region::Hram(i) => self.hram[i] = value,
            Region::Vram(i) => self.vram[i] = value,
            Region::InterruptEnable => self.ie_reg = value,
            Region::InterruptFlag => self.if_reg = value,
            // The stored value is clobbered back to 0x90 on the next read.
            Region::Scanline => self.io[0x44] = value,
            Region::Io(i) => self.io[i] = value,
            Region::Unmapped => {
                warn!("write to unmapped address {addr:#06x}");
                self.invalid_access = true;
                self.sink = value;
            }
        }
    }

    /// Install the access observer. At most one observer is held at a time.
    pub fn set_access_observer(&mut self, observer: AccessObserver) {
        self.observer = Some(observer);
    }

    pub fn take_access_observer(&mut self) -> Option<AccessObserver> {
        self.observer.take()
    }

    /// Sticky signal: some access resolved to no known region. Cleared only
    /// by [`MemoryBus::clear_invalid_access`].
    pub fn had_invalid_access(&self) -> bool {
        self.invalid_access
    }

    pub fn clear_invalid_access(&mut self) {
        self.invalid_access = false;
    }

    pub fn interrupt_enable(&self) -> u8 {
        self.ie_reg
    }

    pub fn interrupt_flag(&self) -> u8 {
        self.if_reg
    }

    /// Zero-fill every RAM-backed region in place. ROM content and the
    /// interrupt registers are unaffected.
    pub fn reset_ram(&mut self) {
        self.wram0.fill(0);
        self.wram1.fill(0);
        self.vram.fill(0);
        self.hram.fill(0);
        self.io.fill(0);
    }

    #[inline]
    fn notify(&mut self, addr: u16) {
        if let Some(observer) = self.observer.as_mut() {
            observer(addr);
        }
    }
}

impl Bus for MemoryBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.notify(addr);
        self.peek8(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.notify(addr);
        self.poke8(addr, value);
    }
}
