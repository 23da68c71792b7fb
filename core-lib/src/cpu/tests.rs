use pretty_assertions::assert_eq;
use proptest::prelude::*;
use test_case::test_case;

use super::alu;
use super::{Cpu, Flags, StepError};
use crate::mmu::{MemoryBus, Mmu};

/// A CPU and a bus with the given program loaded at the entry point.
fn harness(program: &[u8]) -> (Cpu, Mmu) {
    let mut image = vec![0u8; 0x8000];
    image[0x100..0x100 + program.len()].copy_from_slice(program);
    let mut mmu = Mmu::new();
    mmu.load_image(&image).unwrap();
    (Cpu::new(), mmu)
}

#[test]
fn reset_leaves_post_boot_state() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);
    assert!(!cpu.halted);
    assert_eq!(cpu.clock.t_cycles(), 0);
}

#[test]
fn reset_is_idempotent() {
    let (mut cpu, mut mmu) = harness(&[0x04]); // INC B
    cpu.step(&mut mmu).unwrap();
    cpu.reset();
    let before = format!("{:?}", Cpu::new().regs);
    assert_eq!(format!("{:?}", cpu.regs), before);
    assert_eq!(cpu.clock.t_cycles(), 0);
}

#[test]
fn nop_advances_pc_and_costs_four_cycles() {
    let (mut cpu, mut mmu) = harness(&[0x00]);
    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.clock.t_cycles(), 4);
    assert_eq!(cpu.clock.m_cycles(), 1);
}

#[test]
fn add_a_b_sets_result_and_flags() {
    let (mut cpu, mut mmu) = harness(&[0x80]); // ADD A, B
    cpu.regs.a = 0x3C;
    cpu.regs.b = 0x3C;
    cpu.step(&mut mmu).unwrap();
    assert_eq!(cpu.regs.a, 0x78);
    assert!(!cpu.regs.flag(Flags::ZERO));
    assert!(!cpu.regs.flag(Flags::NEGATIVE));
    assert!(cpu.regs.flag(Flags::HALF_CARRY));
    assert!(!cpu.regs.flag(Flags::CARRY));
}

#[test]
fn undefined_opcode_reports_exact_address() {
    let (mut cpu, mut mmu) = harness(&[0xD3]);
    let err = cpu.step(&mut mmu).unwrap_err();
    match err {
        StepError::UnimplementedOpcode {
            address, opcode, ..
        } => {
            assert_eq!(address, 0x0100);
            assert_eq!(opcode, 0xD3);
        }
    }
    // PC has moved past the fetched opcode byte and nothing else.
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.clock.t_cycles(), 0);
}

#[test_case(0xD3; "out x")]
#[test_case(0xDB; "in x")]
#[test_case(0xE3; "ex sp hl")]
#[test_case(0xF4; "call p")]
#[test_case(0xFD; "iy prefix")]
fn undefined_slots_fail_the_step(opcode: u8) {
    let (mut cpu, mut mmu) = harness(&[opcode]);
    assert!(cpu.step(&mut mmu).is_err());
}

#[test]
fn immediate_word_loads_little_endian() {
    let (mut cpu, mut mmu) = harness(&[0x21, 0x34, 0x12]); // LD HL, 0x1234
    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 12);
    assert_eq!(cpu.regs.hl(), 0x1234);
    assert_eq!(cpu.regs.pc, 0x0103);
}

#[test]
fn conditional_jump_costs_more_when_taken() {
    // JR NZ, +2 with Z clear: taken.
    let (mut cpu, mut mmu) = harness(&[0x20, 0x02]);
    cpu.regs.set_flag(Flags::ZERO, false);
    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 12);
    assert_eq!(cpu.regs.pc, 0x0104);

    // Same instruction with Z set: fall through at the base cost.
    let (mut cpu, mut mmu) = harness(&[0x20, 0x02]);
    cpu.regs.set_flag(Flags::ZERO, true);
    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 8);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn backward_relative_jump_wraps_through_the_displacement() {
    let (mut cpu, mut mmu) = harness(&[0x18, 0xFE]); // JR -2: self-loop
    cpu.step(&mut mmu).unwrap();
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn call_and_ret_round_trip_through_the_stack() {
    // CALL 0x0110 ... RET at 0x0110.
    let mut program = [0u8; 0x20];
    program[0] = 0xCD;
    program[1] = 0x10;
    program[2] = 0x01;
    program[0x10] = 0xC9;
    let (mut cpu, mut mmu) = harness(&program);

    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 24);
    assert_eq!(cpu.regs.pc, 0x0110);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    // The return address on the stack is the byte after the CALL.
    assert_eq!(mmu.read_word(cpu.regs.sp), 0x0103);

    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 16);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn conditional_return_not_taken_costs_base_only() {
    let (mut cpu, mut mmu) = harness(&[0xC0]); // RET NZ
    cpu.regs.set_flag(Flags::ZERO, true);
    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 8);
    assert_eq!(cpu.regs.pc, 0x0101);
}

#[test]
fn push_pop_round_trips_a_word() {
    let (mut cpu, mut mmu) = harness(&[]);
    cpu.push(&mut mmu, 0xBEEF);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(cpu.pop(&mut mmu), 0xBEEF);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn pop_af_keeps_the_low_flag_nibble_zero() {
    let (mut cpu, mut mmu) = harness(&[0xF1]); // POP AF
    cpu.push(&mut mmu, 0x12FF);
    cpu.step(&mut mmu).unwrap();
    assert_eq!(cpu.regs.af(), 0x12F0);
}

#[test]
fn halt_burns_idle_cycles_without_fetching() {
    let (mut cpu, mut mmu) = harness(&[0x76, 0x04]); // HALT; INC B
    cpu.step(&mut mmu).unwrap();
    assert!(cpu.halted);
    let pc = cpu.regs.pc;
    let b = cpu.regs.b;
    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.pc, pc);
    assert_eq!(cpu.regs.b, b);
}

#[test]
fn di_and_ei_toggle_the_master_flag() {
    let (mut cpu, mut mmu) = harness(&[0xFB, 0xF3]); // EI; DI
    cpu.step(&mut mmu).unwrap();
    assert!(cpu.ime);
    cpu.step(&mut mmu).unwrap();
    assert!(!cpu.ime);
}

#[test]
fn rst_calls_a_fixed_vector() {
    let (mut cpu, mut mmu) = harness(&[0xEF]); // RST 0x28
    cpu.step(&mut mmu).unwrap();
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(mmu.read_word(cpu.regs.sp), 0x0101);
}

#[test]
fn cb_rotate_computes_zero_but_rla_preserves_it() {
    // RLA with A=0 and Z set: A stays 0 and Z stays set.
    let (mut cpu, mut mmu) = harness(&[0x17]);
    cpu.regs.a = 0;
    cpu.regs.set_flag(Flags::ZERO, true);
    cpu.regs.set_flag(Flags::CARRY, false);
    cpu.step(&mut mmu).unwrap();
    assert_eq!(cpu.regs.a, 0);
    assert!(cpu.regs.flag(Flags::ZERO));

    // CB RL B with B=0: the extended form computes Z from the result.
    let (mut cpu, mut mmu) = harness(&[0xCB, 0x10]);
    cpu.regs.b = 0;
    cpu.regs.set_flag(Flags::ZERO, false);
    cpu.regs.set_flag(Flags::CARRY, false);
    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 8);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert!(cpu.regs.flag(Flags::ZERO));
}

#[test]
fn cb_bit_and_set_work_through_hl() {
    // SET 7, (HL) then BIT 7, (HL) against work RAM.
    let (mut cpu, mut mmu) = harness(&[0xCB, 0xFE, 0xCB, 0x7E]);
    cpu.regs.set_hl(0xC000);
    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 16);
    assert_eq!(mmu.read_byte(0xC000), 0x80);
    let cycles = cpu.step(&mut mmu).unwrap();
    assert_eq!(cycles, 12);
    assert!(!cpu.regs.flag(Flags::ZERO));
}

#[test]
fn ldh_reaches_the_io_page() {
    let (mut cpu, mut mmu) = harness(&[0xE0, 0x80, 0xF0, 0x80]); // LDH (0x80), A; LDH A, (0x80)
    cpu.regs.a = 0x5A;
    cpu.step(&mut mmu).unwrap();
    assert_eq!(mmu.read_byte(0xFF80), 0x5A);
    cpu.regs.a = 0;
    cpu.step(&mut mmu).unwrap();
    assert_eq!(cpu.regs.a, 0x5A);
}

#[test_case(0x09, 0x0FFF, 0x0001, 0x1000, false, true; "half carry at bit 11")]
#[test_case(0x09, 0xFFFF, 0x0001, 0x0000, true, true; "full carry wraps")]
fn add_hl_bc_flag_boundaries(
    opcode: u8,
    hl: u16,
    bc: u16,
    expected: u16,
    carry: bool,
    half: bool,
) {
    let (mut cpu, mut mmu) = harness(&[opcode]);
    cpu.regs.set_hl(hl);
    cpu.regs.set_bc(bc);
    cpu.regs.set_flag(Flags::ZERO, true);
    cpu.step(&mut mmu).unwrap();
    assert_eq!(cpu.regs.hl(), expected);
    assert_eq!(cpu.regs.flag(Flags::CARRY), carry);
    assert_eq!(cpu.regs.flag(Flags::HALF_CARRY), half);
    // 16-bit adds never touch Z.
    assert!(cpu.regs.flag(Flags::ZERO));
}

#[test]
fn daa_fixes_up_a_bcd_add() {
    // 0x15 + 0x27 = 0x3C, which DAA corrects to BCD 42.
    let (mut cpu, mut mmu) = harness(&[0x80, 0x27]); // ADD A, B; DAA
    cpu.regs.a = 0x15;
    cpu.regs.b = 0x27;
    cpu.step(&mut mmu).unwrap();
    cpu.step(&mut mmu).unwrap();
    assert_eq!(cpu.regs.a, 0x42);
}

mod alu_properties {
    use super::*;
    use crate::cpu::Registers;
    use pretty_assertions::assert_eq;

    #[test]
    fn increment_wraps_to_zero() {
        let mut regs = Registers::default();
        let result = alu::inc(&mut regs, 0xFF);
        assert_eq!(result, 0x00);
        assert!(regs.flag(Flags::ZERO));
        assert!(!regs.flag(Flags::NEGATIVE));
    }

    #[test]
    fn decrement_wraps_to_ff() {
        let mut regs = Registers::default();
        let result = alu::dec(&mut regs, 0x00);
        assert_eq!(result, 0xFF);
        assert!(!regs.flag(Flags::ZERO));
        assert!(regs.flag(Flags::NEGATIVE));
    }

    proptest! {
        #[test]
        fn add_matches_wrapping_semantics(a: u8, b: u8) {
            let mut regs = Registers::default();
            regs.a = a;
            alu::add(&mut regs, b);
            prop_assert_eq!(regs.a, a.wrapping_add(b));
            prop_assert_eq!(regs.flag(Flags::ZERO), a.wrapping_add(b) == 0);
            prop_assert!(!regs.flag(Flags::NEGATIVE));
            prop_assert_eq!(regs.flag(Flags::CARRY), u16::from(a) + u16::from(b) > 0xFF);
        }

        #[test]
        fn sub_then_add_restores_a(a: u8, b: u8) {
            let mut regs = Registers::default();
            regs.a = a;
            alu::sub(&mut regs, b);
            prop_assert!(regs.flag(Flags::NEGATIVE));
            alu::add(&mut regs, b);
            prop_assert_eq!(regs.a, a);
        }

        #[test]
        fn compare_never_writes_a(a: u8, b: u8) {
            let mut regs = Registers::default();
            regs.a = a;
            alu::compare(&mut regs, b);
            prop_assert_eq!(regs.a, a);
            prop_assert_eq!(regs.flag(Flags::ZERO), a == b);
            prop_assert_eq!(regs.flag(Flags::CARRY), b > a);
        }

        #[test]
        fn inc_dec_are_inverses_and_preserve_carry(value: u8, carry: bool) {
            let mut regs = Registers::default();
            regs.set_flag(Flags::CARRY, carry);
            let up = alu::inc(&mut regs, value);
            prop_assert_eq!(up, value.wrapping_add(1));
            let down = alu::dec(&mut regs, up);
            prop_assert_eq!(down, value);
            prop_assert_eq!(regs.flag(Flags::CARRY), carry);
        }

        #[test]
        fn swap_is_an_involution(value: u8) {
            let mut regs = Registers::default();
            let once = alu::swap(&mut regs, value);
            let twice = alu::swap(&mut regs, once);
            prop_assert_eq!(twice, value);
            prop_assert!(!regs.flag(Flags::CARRY));
        }
    }
}
