//! Arithmetic, logic and rotate helpers.
//!
//! Every instruction that touches flags funnels through one of these
//! functions, so the flag rules live in exactly one place. Each helper
//! documents which of the four flags it writes; anything not mentioned is
//! left untouched.

use super::registers::{Flags, Registers};

/// ADD A, value. Z from result, N cleared, H from bit 3, C from bit 7.
pub fn add(regs: &mut Registers, rhs: u8) {
    let lhs = regs.a;
    let (result, carry) = lhs.overflowing_add(rhs);
    let mut f = Flags::empty();
    f.set(Flags::ZERO, result == 0);
    f.set(Flags::HALF_CARRY, (lhs & 0x0F) + (rhs & 0x0F) > 0x0F);
    f.set(Flags::CARRY, carry);
    regs.set_f(f);
    regs.a = result;
}

/// ADC A, value. As [`add`] with the incoming carry folded in.
pub fn adc(regs: &mut Registers, rhs: u8) {
    let lhs = regs.a;
    let carry_in = u8::from(regs.flag(Flags::CARRY));
    let result = lhs.wrapping_add(rhs).wrapping_add(carry_in);
    let mut f = Flags::empty();
    f.set(Flags::ZERO, result == 0);
    f.set(
        Flags::HALF_CARRY,
        (lhs & 0x0F) + (rhs & 0x0F) + carry_in > 0x0F,
    );
    f.set(
        Flags::CARRY,
        u16::from(lhs) + u16::from(rhs) + u16::from(carry_in) > 0xFF,
    );
    regs.set_f(f);
    regs.a = result;
}

/// SUB value. Z from result, N set, H on low-nibble borrow, C on borrow.
pub fn sub(regs: &mut Registers, rhs: u8) {
    let result = compare(regs, rhs);
    regs.a = result;
}

/// SBC A, value. As [`sub`] with the incoming carry folded into the borrow.
pub fn sbc(regs: &mut Registers, rhs: u8) {
    let lhs = regs.a;
    let carry_in = u8::from(regs.flag(Flags::CARRY));
    let result = lhs.wrapping_sub(rhs).wrapping_sub(carry_in);
    let mut f = Flags::NEGATIVE;
    f.set(Flags::ZERO, result == 0);
    f.set(Flags::HALF_CARRY, (lhs & 0x0F) < (rhs & 0x0F) + carry_in);
    f.set(
        Flags::CARRY,
        u16::from(lhs) < u16::from(rhs) + u16::from(carry_in),
    );
    regs.set_f(f);
    regs.a = result;
}

/// CP value. Subtract flags, numeric result discarded (returned for SUB).
pub fn compare(regs: &mut Registers, rhs: u8) -> u8 {
    let lhs = regs.a;
    let result = lhs.wrapping_sub(rhs);
    let mut f = Flags::NEGATIVE;
    f.set(Flags::ZERO, result == 0);
    f.set(Flags::HALF_CARRY, (lhs & 0x0F) < (rhs & 0x0F));
    f.set(Flags::CARRY, rhs > lhs);
    regs.set_f(f);
    result
}

/// AND value. N and C cleared, H always set.
pub fn and(regs: &mut Registers, rhs: u8) {
    regs.a &= rhs;
    let mut f = Flags::HALF_CARRY;
    f.set(Flags::ZERO, regs.a == 0);
    regs.set_f(f);
}

/// OR value. N, H and C cleared.
pub fn or(regs: &mut Registers, rhs: u8) {
    regs.a |= rhs;
    let mut f = Flags::empty();
    f.set(Flags::ZERO, regs.a == 0);
    regs.set_f(f);
}

/// XOR value. N, H and C cleared.
pub fn xor(regs: &mut Registers, rhs: u8) {
    regs.a ^= rhs;
    let mut f = Flags::empty();
    f.set(Flags::ZERO, regs.a == 0);
    regs.set_f(f);
}

/// INC value. Carry is preserved; half-carry comes from the pre-increment
/// low nibble.
pub fn inc(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    regs.set_flag(Flags::ZERO, result == 0);
    regs.set_flag(Flags::NEGATIVE, false);
    regs.set_flag(Flags::HALF_CARRY, (value & 0x0F) + 1 > 0x0F);
    result
}

/// DEC value. Carry is preserved; half-carry comes from the pre-decrement
/// low nibble.
pub fn dec(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    regs.set_flag(Flags::ZERO, result == 0);
    regs.set_flag(Flags::NEGATIVE, true);
    regs.set_flag(Flags::HALF_CARRY, (value & 0x0F) == 0);
    result
}

/// ADD HL, rr. Z is preserved, N cleared, H at the bit-11 boundary, C at
/// bit 15.
pub fn add16_hl(regs: &mut Registers, rhs: u16) {
    let lhs = regs.hl();
    let (result, carry) = lhs.overflowing_add(rhs);
    regs.set_flag(Flags::NEGATIVE, false);
    regs.set_flag(Flags::HALF_CARRY, (lhs & 0x0FFF) + (rhs & 0x0FFF) > 0x0FFF);
    regs.set_flag(Flags::CARRY, carry);
    regs.set_hl(result);
}

/// Signed-offset SP addition shared by ADD SP,e8 and LD HL,SP+e8.
/// Z and N cleared; H and C come from the unsigned low-byte add.
pub fn add_sp_e8(regs: &mut Registers, offset: u8) -> u16 {
    let sp = regs.sp;
    let signed = i16::from(offset as i8) as u16;
    let mut f = Flags::empty();
    f.set(Flags::HALF_CARRY, (sp & 0x000F) + u16::from(offset & 0x0F) > 0x000F);
    f.set(Flags::CARRY, (sp & 0x00FF) + u16::from(offset) > 0x00FF);
    regs.set_f(f);
    sp.wrapping_add(signed)
}

// --- rotate/shift family ---
//
// All eight clear N and H, set C from the shifted-out bit, and set Z from
// the result. The unprefixed accumulator forms (RLCA etc.) wrap these and
// put the previous Z back, the one asymmetry between the base and CB
// opcode families.

/// Rotate left, bit 7 into both C and bit 0.
pub fn rlc(regs: &mut Registers, value: u8) -> u8 {
    let result = value.rotate_left(1);
    set_rotate_flags(regs, result, value & 0x80 != 0);
    result
}

/// Rotate right, bit 0 into both C and bit 7.
pub fn rrc(regs: &mut Registers, value: u8) -> u8 {
    let result = value.rotate_right(1);
    set_rotate_flags(regs, result, value & 0x01 != 0);
    result
}

/// Rotate left through carry: old C into bit 0, bit 7 into C.
pub fn rl(regs: &mut Registers, value: u8) -> u8 {
    let carry_in = u8::from(regs.flag(Flags::CARRY));
    let result = (value << 1) | carry_in;
    set_rotate_flags(regs, result, value & 0x80 != 0);
    result
}

/// Rotate right through carry: old C into bit 7, bit 0 into C.
pub fn rr(regs: &mut Registers, value: u8) -> u8 {
    let carry_in = u8::from(regs.flag(Flags::CARRY));
    let result = (value >> 1) | (carry_in << 7);
    set_rotate_flags(regs, result, value & 0x01 != 0);
    result
}

/// Shift left arithmetic: bit 7 into C, bit 0 forced to 0.
pub fn sla(regs: &mut Registers, value: u8) -> u8 {
    let result = value << 1;
    set_rotate_flags(regs, result, value & 0x80 != 0);
    result
}

/// Shift right arithmetic: bit 0 into C, bit 7 preserved.
pub fn sra(regs: &mut Registers, value: u8) -> u8 {
    let result = (value >> 1) | (value & 0x80);
    set_rotate_flags(regs, result, value & 0x01 != 0);
    result
}

/// Swap nibbles. C always cleared.
pub fn swap(regs: &mut Registers, value: u8) -> u8 {
    let result = value.rotate_left(4);
    set_rotate_flags(regs, result, false);
    result
}

/// Shift right logical: bit 0 into C, bit 7 forced to 0.
pub fn srl(regs: &mut Registers, value: u8) -> u8 {
    let result = value >> 1;
    set_rotate_flags(regs, result, value & 0x01 != 0);
    result
}

fn set_rotate_flags(regs: &mut Registers, result: u8, carry: bool) {
    let mut f = Flags::empty();
    f.set(Flags::ZERO, result == 0);
    f.set(Flags::CARRY, carry);
    regs.set_f(f);
}

/// RLCA. Same rotation as [`rlc`] on A, but Z is left unchanged.
pub fn rlca(regs: &mut Registers) {
    let z = regs.flag(Flags::ZERO);
    let a = regs.a;
    regs.a = rlc(regs, a);
    regs.set_flag(Flags::ZERO, z);
}

/// RRCA. Same rotation as [`rrc`] on A, but Z is left unchanged.
pub fn rrca(regs: &mut Registers) {
    let z = regs.flag(Flags::ZERO);
    let a = regs.a;
    regs.a = rrc(regs, a);
    regs.set_flag(Flags::ZERO, z);
}

/// RLA. Same rotation as [`rl`] on A, but Z is left unchanged.
pub fn rla(regs: &mut Registers) {
    let z = regs.flag(Flags::ZERO);
    let a = regs.a;
    regs.a = rl(regs, a);
    regs.set_flag(Flags::ZERO, z);
}

/// RRA. Same rotation as [`rr`] on A, but Z is left unchanged.
pub fn rra(regs: &mut Registers) {
    let z = regs.flag(Flags::ZERO);
    let a = regs.a;
    regs.a = rr(regs, a);
    regs.set_flag(Flags::ZERO, z);
}

/// BIT n, value. Z set iff the tested bit is clear; H set, N cleared,
/// C untouched.
pub fn bit(regs: &mut Registers, n: u8, value: u8) {
    regs.set_flag(Flags::ZERO, value & (1 << n) == 0);
    regs.set_flag(Flags::NEGATIVE, false);
    regs.set_flag(Flags::HALF_CARRY, true);
}

/// SET n, value. No flag effects.
pub const fn set(n: u8, value: u8) -> u8 {
    value | (1 << n)
}

/// RES n, value. No flag effects.
pub const fn res(n: u8, value: u8) -> u8 {
    value & !(1 << n)
}

/// DAA: decimal-adjust A after a BCD add or subtract, driven by N, H and
/// C. Z from the adjusted result, H cleared, C set if the adjust carried.
pub fn daa(regs: &mut Registers) {
    let mut a = regs.a;
    let mut carry = regs.flag(Flags::CARRY);
    if regs.flag(Flags::NEGATIVE) {
        if carry {
            a = a.wrapping_sub(0x60);
        }
        if regs.flag(Flags::HALF_CARRY) {
            a = a.wrapping_sub(0x06);
        }
    } else {
        if carry || a > 0x99 {
            a = a.wrapping_add(0x60);
            carry = true;
        }
        if regs.flag(Flags::HALF_CARRY) || (a & 0x0F) > 0x09 {
            a = a.wrapping_add(0x06);
        }
    }
    regs.a = a;
    regs.set_flag(Flags::ZERO, a == 0);
    regs.set_flag(Flags::HALF_CARRY, false);
    regs.set_flag(Flags::CARRY, carry);
}
