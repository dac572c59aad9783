/// Abstraction over the memory bus (memory and IO).
///
/// The CPU core holds no bus of its own; callers pass a bus into each step,
/// which keeps ownership with the machine and lets tests substitute a flat
/// 64 KiB array.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
}
