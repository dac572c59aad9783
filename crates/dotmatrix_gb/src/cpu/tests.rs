use super::*;

/// Flat 64 KiB bus for CPU-only tests.
struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

/// CPU at PC 0x0100 with the given bytes placed there.
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    bus.memory[0x0100..0x0100 + program.len()].copy_from_slice(program);
    (Cpu::new(), bus)
}

#[test]
fn add_flags_exhaustive() {
    let mut cpu = Cpu::new();
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            cpu.regs.a = a;
            cpu.regs.f = Flags::empty();
            cpu.alu_add(b, false);

            let sum = a as u16 + b as u16;
            assert_eq!(cpu.regs.a, sum as u8);
            assert_eq!(cpu.regs.f.zero(), sum as u8 == 0);
            assert_eq!(cpu.regs.f.half_carry(), (a & 0x0F) + (b & 0x0F) > 0x0F);
            assert_eq!(cpu.regs.f.carry(), sum > 0xFF);
            assert!(!cpu.regs.f.subtract());
        }
    }
}

#[test]
fn sub_flags_exhaustive() {
    let mut cpu = Cpu::new();
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            cpu.regs.a = a;
            cpu.regs.f = Flags::empty();
            cpu.alu_sub(b, false);

            assert_eq!(cpu.regs.a, a.wrapping_sub(b));
            assert_eq!(cpu.regs.f.zero(), a == b);
            assert_eq!(cpu.regs.f.half_carry(), (b & 0x0F) > (a & 0x0F));
            assert_eq!(cpu.regs.f.carry(), b > a);
            assert!(cpu.regs.f.subtract());
        }
    }
}

#[test]
fn adc_folds_carry_into_operand() {
    let mut cpu = Cpu::new();
    cpu.regs.a = 0x0F;
    cpu.regs.f = Flags::CARRY;
    cpu.alu_add(0x00, true);

    // Operand becomes 0x01, so the low nibble overflows.
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.regs.f.half_carry());
    assert!(!cpu.regs.f.carry());
}

#[test]
fn adc_operand_fold_wraps_at_ff() {
    // With carry in, an operand of 0xFF folds to 0x00 before the flag
    // rules apply, so the add is observably A + 0x00: no carry out, no
    // half-carry.
    let mut cpu = Cpu::new();
    cpu.regs.a = 0x00;
    cpu.regs.f = Flags::CARRY;
    cpu.alu_add(0xFF, true);

    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.f.zero());
    assert!(!cpu.regs.f.half_carry());
    assert!(!cpu.regs.f.carry());

    // Mirror for SBC: the folded operand 0x00 means nothing is borrowed.
    let mut cpu = Cpu::new();
    cpu.regs.a = 0x42;
    cpu.regs.f = Flags::CARRY;
    cpu.alu_sub(0xFF, true);

    assert_eq!(cpu.regs.a, 0x42);
    assert!(!cpu.regs.f.half_carry());
    assert!(!cpu.regs.f.carry());
    assert!(cpu.regs.f.subtract());
}

#[test]
fn sbc_folds_carry_into_operand() {
    let mut cpu = Cpu::new();
    cpu.regs.a = 0x10;
    cpu.regs.f = Flags::CARRY;
    cpu.alu_sub(0x0F, true);

    // Operand becomes 0x10: result 0, no borrow.
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.f.zero());
    assert!(!cpu.regs.f.carry());
}

#[test]
fn compare_leaves_a_unchanged() {
    let mut cpu = Cpu::new();
    cpu.regs.a = 0x42;
    cpu.alu_cp(0x42);
    assert_eq!(cpu.regs.a, 0x42);
    assert!(cpu.regs.f.zero());
    assert!(cpu.regs.f.subtract());

    cpu.alu_cp(0x50);
    assert_eq!(cpu.regs.a, 0x42);
    assert!(cpu.regs.f.carry());
}

#[test]
fn inc_dec_preserve_carry() {
    let (mut cpu, mut bus) = setup(&[0x3C]); // INC A
    cpu.regs.a = 0x0F;
    cpu.regs.f = Flags::CARRY;

    let target = cpu.execute(&mut bus);
    assert_eq!(target, None);
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.regs.f.half_carry());
    assert!(!cpu.regs.f.zero());
    assert!(!cpu.regs.f.subtract());
    assert!(cpu.regs.f.carry(), "INC must leave carry untouched");

    // Same with carry clear.
    let (mut cpu, mut bus) = setup(&[0x3C]);
    cpu.regs.a = 0x0F;
    cpu.regs.f = Flags::empty();
    cpu.execute(&mut bus);
    assert!(!cpu.regs.f.carry());

    // DEC through the HL cell preserves carry too.
    let (mut cpu, mut bus) = setup(&[0x35]); // DEC (HL)
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x01;
    cpu.regs.f = Flags::CARRY;
    cpu.execute(&mut bus);
    assert_eq!(bus.memory[0xC000], 0x00);
    assert!(cpu.regs.f.zero());
    assert!(cpu.regs.f.subtract());
    assert!(cpu.regs.f.carry());
}

#[test]
fn add16_uses_wide_overflow_bits() {
    let mut cpu = Cpu::new();
    cpu.regs.f = Flags::ZERO;
    let result = cpu.alu_add16(0x0FFF, 0x0001);
    assert_eq!(result, 0x1000);
    assert!(cpu.regs.f.half_carry(), "half-carry comes from bit 11");
    assert!(!cpu.regs.f.carry());
    assert!(cpu.regs.f.zero(), "Z is left alone by 16-bit adds");

    let result = cpu.alu_add16(0xFFFF, 0x0001);
    assert_eq!(result, 0x0000);
    assert!(cpu.regs.f.carry(), "carry comes from bit 15");
}

#[test]
fn daa_adjusts_bcd_addition() {
    let mut cpu = Cpu::new();
    cpu.regs.a = 0x15;
    cpu.regs.f = Flags::empty();
    cpu.alu_add(0x27, false);
    cpu.alu_daa();
    assert_eq!(cpu.regs.a, 0x42);
    assert!(!cpu.regs.f.carry());
}

#[test]
fn register_pairs_round_trip() {
    let mut regs = Registers::default();
    for value in [0x0000u16, 0x00FF, 0xABCD, 0xFFFF] {
        regs.set_bc(value);
        assert_eq!(regs.bc(), value);
        regs.set_de(value);
        assert_eq!(regs.de(), value);
        regs.set_hl(value);
        assert_eq!(regs.hl(), value);
        // AF masks the low nibble of F.
        regs.set_af(value);
        assert_eq!(regs.af(), value & 0xFFF0);
    }
    // High byte first.
    regs.set_bc(0x1234);
    assert_eq!(regs.b, 0x12);
    assert_eq!(regs.c, 0x34);
}

#[test]
fn flags_mask_unused_bits() {
    let f = Flags::from_byte(0xFF);
    assert_eq!(f.bits(), 0xF0);
    let mut f = Flags::from_byte(0xB0);
    assert!(f.zero());
    assert!(!f.subtract());
    assert!(f.half_carry());
    assert!(f.carry());
    f.set_carry(false);
    assert_eq!(f.bits(), 0xA0);
}

#[test]
fn stack_round_trip() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    cpu.regs.sp = 0xFFFE;

    cpu.push_u16(&mut bus, 0xBEEF);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0xEF, "low byte at the lower address");
    assert_eq!(bus.memory[0xFFFD], 0xBE);

    let value = cpu.pop_u16(&mut bus);
    assert_eq!(value, 0xBEEF);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn nop_changes_nothing_but_pc() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    let before = Snapshot::capture(&cpu.regs);

    let target = cpu.execute(&mut bus);
    cpu.advance(1, target);

    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.regs.af(), before.af);
    assert_eq!(cpu.regs.bc(), before.bc);
    assert_eq!(cpu.regs.de(), before.de);
    assert_eq!(cpu.regs.hl(), before.hl);
    assert_eq!(cpu.regs.sp, before.sp);
}

#[test]
fn ld_a_d8_reads_following_byte() {
    let (mut cpu, mut bus) = setup(&[0x3E, 0x42]);
    let target = cpu.execute(&mut bus);
    cpu.advance(2, target);

    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn jp_a16_repositions_pc_exactly() {
    let (mut cpu, mut bus) = setup(&[0xC3, 0x50, 0x01]);
    let target = cpu.execute(&mut bus);
    assert_eq!(target, Some(0x0150));

    cpu.advance(3, target);
    assert_eq!(cpu.regs.pc, 0x0150, "no further offset after a jump");
}

#[test]
fn jr_is_relative_to_next_instruction() {
    let (mut cpu, mut bus) = setup(&[0x18, 0x05]); // JR +5
    let target = cpu.execute(&mut bus);
    assert_eq!(target, Some(0x0107));

    // Negative displacement.
    let (mut cpu, mut bus) = setup(&[0x18, 0xFE]); // JR -2
    let target = cpu.execute(&mut bus);
    assert_eq!(target, Some(0x0100));

    // Condition not met: fall through to the length-based advance.
    let (mut cpu, mut bus) = setup(&[0x20, 0x05]); // JR NZ
    cpu.regs.f.set_zero(true);
    let target = cpu.execute(&mut bus);
    assert_eq!(target, None);
    cpu.advance(2, target);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn call_pushes_return_address_and_ret_restores_it() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x02]); // CALL 0x0200
    bus.memory[0x0200] = 0xC9; // RET
    let sp_before = cpu.regs.sp;

    let target = cpu.execute(&mut bus);
    cpu.advance(3, target);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.regs.sp, sp_before.wrapping_sub(2));

    let target = cpu.execute(&mut bus);
    cpu.advance(1, target);
    assert_eq!(cpu.regs.pc, 0x0103, "RET returns past the 3-byte call");
    assert_eq!(cpu.regs.sp, sp_before);
}

#[test]
fn conditional_call_gated_on_zero_flag() {
    let (mut cpu, mut bus) = setup(&[0xC4, 0x00, 0x02]); // CALL NZ, 0x0200
    cpu.regs.f.set_zero(true);
    let sp_before = cpu.regs.sp;

    let target = cpu.execute(&mut bus);
    assert_eq!(target, None);
    assert_eq!(cpu.regs.sp, sp_before, "nothing pushed when not taken");
    cpu.advance(3, target);
    assert_eq!(cpu.regs.pc, 0x0103);
}

#[test]
fn rst_jumps_to_fixed_vector() {
    let (mut cpu, mut bus) = setup(&[0xEF]); // RST 28h
    let target = cpu.execute(&mut bus);
    assert_eq!(target, Some(0x0028));
    // Return address is the byte after the RST.
    assert_eq!(bus.memory[cpu.regs.sp as usize], 0x01);
    assert_eq!(bus.memory[cpu.regs.sp as usize + 1], 0x01);
}

#[test]
fn push_pop_af_masks_flag_low_nibble() {
    let (mut cpu, mut bus) = setup(&[0xF5, 0xF1]); // PUSH AF; POP AF
    cpu.regs.a = 0x12;
    cpu.regs.f = Flags::from_byte(0xF0);

    let target = cpu.execute(&mut bus);
    cpu.advance(1, target);

    // Corrupt the pushed low nibble, then pop.
    let sp = cpu.regs.sp as usize;
    bus.memory[sp] |= 0x0F;
    let target = cpu.execute(&mut bus);
    cpu.advance(1, target);

    assert_eq!(cpu.regs.af(), 0x12F0);
}

#[test]
fn ld_family_routes_index_six_through_hl() {
    let (mut cpu, mut bus) = setup(&[0x66]); // LD H, (HL)
    cpu.regs.set_hl(0xC123);
    bus.memory[0xC123] = 0x99;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.h, 0x99);

    let (mut cpu, mut bus) = setup(&[0x70]); // LD (HL), B
    cpu.regs.set_hl(0xC123);
    cpu.regs.b = 0x55;
    cpu.execute(&mut bus);
    assert_eq!(bus.memory[0xC123], 0x55);
}

#[test]
fn alu_family_selects_variant_by_low_nibble() {
    // 0x80 = ADD A,B; 0x88 = ADC A,B.
    let (mut cpu, mut bus) = setup(&[0x88]);
    cpu.regs.a = 0x01;
    cpu.regs.b = 0x01;
    cpu.regs.f = Flags::CARRY;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0x03);

    // 0xB8 = CP A,B leaves A alone.
    let (mut cpu, mut bus) = setup(&[0xB8]);
    cpu.regs.a = 0x10;
    cpu.regs.b = 0x20;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.regs.f.carry());

    // 0xAF = XOR A clears A and sets Z.
    let (mut cpu, mut bus) = setup(&[0xAF]);
    cpu.regs.a = 0x5A;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.f.zero());
}

#[test]
fn extended_table_swaps_and_shifts() {
    let (mut cpu, mut bus) = setup(&[0xCB, 0x37]); // SWAP A
    cpu.regs.a = 0xAB;
    let target = cpu.execute(&mut bus);
    assert_eq!(target, None);
    assert_eq!(cpu.regs.a, 0xBA);
    assert!(!cpu.regs.f.carry());

    let (mut cpu, mut bus) = setup(&[0xCB, 0x38]); // SRL B
    cpu.regs.b = 0x01;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.b, 0x00);
    assert!(cpu.regs.f.zero());
    assert!(cpu.regs.f.carry());

    // Memory target through HL.
    let (mut cpu, mut bus) = setup(&[0xCB, 0x06]); // RLC (HL)
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x80;
    cpu.execute(&mut bus);
    assert_eq!(bus.memory[0xC000], 0x01);
    assert!(cpu.regs.f.carry());
}

#[test]
fn extended_table_bit_ops() {
    let (mut cpu, mut bus) = setup(&[0xCB, 0x7F]); // BIT 7, A
    cpu.regs.a = 0x80;
    cpu.regs.f = Flags::CARRY;
    cpu.execute(&mut bus);
    assert!(!cpu.regs.f.zero());
    assert!(cpu.regs.f.half_carry());
    assert!(cpu.regs.f.carry(), "BIT preserves carry");

    let (mut cpu, mut bus) = setup(&[0xCB, 0x87]); // RES 0, A
    cpu.regs.a = 0xFF;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0xFE);

    let (mut cpu, mut bus) = setup(&[0xCB, 0xC7]); // SET 0, A
    cpu.regs.a = 0x00;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0x01);
}

#[test]
fn unknown_opcode_is_sticky_noop() {
    let (mut cpu, mut bus) = setup(&[0xD3]);
    let a_before = cpu.regs.a;

    let target = cpu.execute(&mut bus);
    assert_eq!(target, None);
    assert!(cpu.hit_unknown_opcode());
    assert_eq!(cpu.regs.a, a_before);

    // Driver still advances by the externally supplied length.
    cpu.advance(1, target);
    assert_eq!(cpu.regs.pc, 0x0101);

    // Sticky until explicitly cleared; a known opcode does not set it back.
    cpu.clear_unknown_opcode();
    cpu.execute(&mut bus); // NOP at 0x0101
    assert!(!cpu.hit_unknown_opcode());
}

#[test]
fn rewind_restores_pre_step_registers() {
    let (mut cpu, mut bus) = setup(&[0x3E, 0x42]);
    let pc_before = cpu.regs.pc;
    let a_before = cpu.regs.a;

    let target = cpu.execute(&mut bus);
    cpu.advance(2, target);
    assert_eq!(cpu.regs.a, 0x42);

    cpu.rewind();
    assert_eq!(cpu.regs.pc, pc_before);
    assert_eq!(cpu.regs.a, a_before);
}

#[test]
fn boot_profiles() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);

    let cpu = Cpu::with_profile(BootProfile::Cgb);
    assert_eq!(cpu.regs.af(), 0x1180);
    assert_eq!(cpu.regs.bc(), 0x0000);
    assert_eq!(cpu.regs.de(), 0xFF56);
    assert_eq!(cpu.regs.hl(), 0x000D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn reset_reapplies_profile_and_clears_signals() {
    let (mut cpu, mut bus) = setup(&[0xD3]);
    cpu.execute(&mut bus);
    assert!(cpu.hit_unknown_opcode());
    assert_eq!(cpu.instructions_executed(), 1);

    cpu.reset();
    assert!(!cpu.hit_unknown_opcode());
    assert_eq!(cpu.instructions_executed(), 0);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert_eq!(cpu.regs.af(), 0x01B0);
}

#[test]
fn di_ei_reti_toggle_ime() {
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3]);
    cpu.execute(&mut bus);
    assert!(cpu.ime);

    cpu.advance(1, None);
    cpu.execute(&mut bus);
    assert!(!cpu.ime);

    // RETI re-enables on return.
    let (mut cpu, mut bus) = setup(&[0xD9]);
    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x00;
    bus.memory[0xFFFD] = 0x02;
    let target = cpu.execute(&mut bus);
    assert_eq!(target, Some(0x0200));
    assert!(cpu.ime);
}

#[test]
fn hl_postincrement_loads() {
    let (mut cpu, mut bus) = setup(&[0x2A]); // LD A, (HL+)
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x77;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0x77);
    assert_eq!(cpu.regs.hl(), 0xC001);

    let (mut cpu, mut bus) = setup(&[0x32]); // LD (HL-), A
    cpu.regs.set_hl(0xC001);
    cpu.regs.a = 0x66;
    cpu.execute(&mut bus);
    assert_eq!(bus.memory[0xC001], 0x66);
    assert_eq!(cpu.regs.hl(), 0xC000);
}

#[test]
fn sp_relative_arithmetic() {
    let (mut cpu, mut bus) = setup(&[0xF8, 0x10]); // LD HL, SP+0x10
    cpu.regs.sp = 0xFF00;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.hl(), 0xFF10);
    assert!(!cpu.regs.f.zero());

    let (mut cpu, mut bus) = setup(&[0xE8, 0xFE]); // ADD SP, -2
    cpu.regs.sp = 0xFFFE;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.sp, 0xFFFC);
}
