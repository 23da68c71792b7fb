//! Opcode dispatch tables.
//!
//! Two flat 256-entry tables: the base set here and the CB-prefixed
//! extended set in [`cb`]. Both are assembled once at first use from the
//! macro families in the submodules, so a slot's metadata and its handler
//! always live in the same record. The eleven base opcodes the hardware
//! never defined keep the [`Opcode::UNDEFINED`] sentinel.

use once_cell::sync::Lazy;

pub mod alu;
pub mod cb;
pub mod jump;
pub mod load_store;
pub mod types;

pub use cb::CB_OPCODES;
pub use types::{Handler, Opcode};

use crate::cpu::registers::Flags;
use crate::mmu::MemoryBus;

use alu::*;
use jump::*;
use load_store::*;

/// The base dispatch table (0x00..=0xFF).
pub static OPCODES: Lazy<[Opcode; 256]> = Lazy::new(|| {
    let mut table = [Opcode::UNDEFINED; 256];

    // 0x00..=0x3F: loads, 16-bit arithmetic, rotates, control
    nop!(table, 0x00);
    ld_rr_d16!(table, 0x01, "BC", set_bc);
    ld_at_rr_a!(table, 0x02, bc);
    inc_rr!(table, 0x03, bc, set_bc);
    inc_dec_r!(table, 0x04, inc, "INC", b);
    inc_dec_r!(table, 0x05, dec, "DEC", b);
    ld_r_d8!(table, 0x06, b);
    rot_a!(table, 0x07, rlca, "RLCA");
    ld_a16_sp!(table, 0x08);
    add_hl_rr!(table, 0x09, bc);
    ld_a_at_rr!(table, 0x0A, bc);
    dec_rr!(table, 0x0B, bc, set_bc);
    inc_dec_r!(table, 0x0C, inc, "INC", c);
    inc_dec_r!(table, 0x0D, dec, "DEC", c);
    ld_r_d8!(table, 0x0E, c);
    rot_a!(table, 0x0F, rrca, "RRCA");

    stop!(table, 0x10);
    ld_rr_d16!(table, 0x11, "DE", set_de);
    ld_at_rr_a!(table, 0x12, de);
    inc_rr!(table, 0x13, de, set_de);
    inc_dec_r!(table, 0x14, inc, "INC", d);
    inc_dec_r!(table, 0x15, dec, "DEC", d);
    ld_r_d8!(table, 0x16, d);
    rot_a!(table, 0x17, rla, "RLA");
    jr_e8!(table, 0x18);
    add_hl_rr!(table, 0x19, de);
    ld_a_at_rr!(table, 0x1A, de);
    dec_rr!(table, 0x1B, de, set_de);
    inc_dec_r!(table, 0x1C, inc, "INC", e);
    inc_dec_r!(table, 0x1D, dec, "DEC", e);
    ld_r_d8!(table, 0x1E, e);
    rot_a!(table, 0x1F, rra, "RRA");

    jr_cc_e8!(table, 0x20, "NZ", Flags::ZERO, false);
    ld_rr_d16!(table, 0x21, "HL", set_hl);
    ld_hl_step_a!(table, 0x22, "LD (HL+), A", wrapping_add);
    inc_rr!(table, 0x23, hl, set_hl);
    inc_dec_r!(table, 0x24, inc, "INC", h);
    inc_dec_r!(table, 0x25, dec, "DEC", h);
    ld_r_d8!(table, 0x26, h);
    daa!(table, 0x27);
    jr_cc_e8!(table, 0x28, "Z", Flags::ZERO, true);
    add_hl_rr!(table, 0x29, hl);
    ld_a_hl_step!(table, 0x2A, "LD A, (HL+)", wrapping_add);
    dec_rr!(table, 0x2B, hl, set_hl);
    inc_dec_r!(table, 0x2C, inc, "INC", l);
    inc_dec_r!(table, 0x2D, dec, "DEC", l);
    ld_r_d8!(table, 0x2E, l);
    cpl!(table, 0x2F);

    jr_cc_e8!(table, 0x30, "NC", Flags::CARRY, false);
    ld_rr_d16!(table, 0x31, "SP", set_sp);
    ld_hl_step_a!(table, 0x32, "LD (HL-), A", wrapping_sub);
    inc_rr!(table, 0x33, sp, set_sp);
    inc_dec_hl!(table, 0x34, inc, "INC");
    inc_dec_hl!(table, 0x35, dec, "DEC");
    ld_hl_d8!(table, 0x36);
    scf!(table, 0x37);
    jr_cc_e8!(table, 0x38, "C", Flags::CARRY, true);
    add_hl_rr!(table, 0x39, sp);
    ld_a_hl_step!(table, 0x3A, "LD A, (HL-)", wrapping_sub);
    dec_rr!(table, 0x3B, sp, set_sp);
    inc_dec_r!(table, 0x3C, inc, "INC", a);
    inc_dec_r!(table, 0x3D, dec, "DEC", a);
    ld_r_d8!(table, 0x3E, a);
    ccf!(table, 0x3F);

    // 0x40..=0x7F: the register-to-register load grid, HALT at 0x76
    ld_r_r!(table, 0x40, b, b);
    ld_r_r!(table, 0x41, b, c);
    ld_r_r!(table, 0x42, b, d);
    ld_r_r!(table, 0x43, b, e);
    ld_r_r!(table, 0x44, b, h);
    ld_r_r!(table, 0x45, b, l);
    ld_r_hl!(table, 0x46, b);
    ld_r_r!(table, 0x47, b, a);
    ld_r_r!(table, 0x48, c, b);
    ld_r_r!(table, 0x49, c, c);
    ld_r_r!(table, 0x4A, c, d);
    ld_r_r!(table, 0x4B, c, e);
    ld_r_r!(table, 0x4C, c, h);
    ld_r_r!(table, 0x4D, c, l);
    ld_r_hl!(table, 0x4E, c);
    ld_r_r!(table, 0x4F, c, a);

    ld_r_r!(table, 0x50, d, b);
    ld_r_r!(table, 0x51, d, c);
    ld_r_r!(table, 0x52, d, d);
    ld_r_r!(table, 0x53, d, e);
    ld_r_r!(table, 0x54, d, h);
    ld_r_r!(table, 0x55, d, l);
    ld_r_hl!(table, 0x56, d);
    ld_r_r!(table, 0x57, d, a);
    ld_r_r!(table, 0x58, e, b);
    ld_r_r!(table, 0x59, e, c);
    ld_r_r!(table, 0x5A, e, d);
    ld_r_r!(table, 0x5B, e, e);
    ld_r_r!(table, 0x5C, e, h);
    ld_r_r!(table, 0x5D, e, l);
    ld_r_hl!(table, 0x5E, e);
    ld_r_r!(table, 0x5F, e, a);

    ld_r_r!(table, 0x60, h, b);
    ld_r_r!(table, 0x61, h, c);
    ld_r_r!(table, 0x62, h, d);
    ld_r_r!(table, 0x63, h, e);
    ld_r_r!(table, 0x64, h, h);
    ld_r_r!(table, 0x65, h, l);
    ld_r_hl!(table, 0x66, h);
    ld_r_r!(table, 0x67, h, a);
    ld_r_r!(table, 0x68, l, b);
    ld_r_r!(table, 0x69, l, c);
    ld_r_r!(table, 0x6A, l, d);
    ld_r_r!(table, 0x6B, l, e);
    ld_r_r!(table, 0x6C, l, h);
    ld_r_r!(table, 0x6D, l, l);
    ld_r_hl!(table, 0x6E, l);
    ld_r_r!(table, 0x6F, l, a);

    ld_hl_r!(table, 0x70, b);
    ld_hl_r!(table, 0x71, c);
    ld_hl_r!(table, 0x72, d);
    ld_hl_r!(table, 0x73, e);
    ld_hl_r!(table, 0x74, h);
    ld_hl_r!(table, 0x75, l);
    halt!(table, 0x76);
    ld_hl_r!(table, 0x77, a);
    ld_r_r!(table, 0x78, a, b);
    ld_r_r!(table, 0x79, a, c);
    ld_r_r!(table, 0x7A, a, d);
    ld_r_r!(table, 0x7B, a, e);
    ld_r_r!(table, 0x7C, a, h);
    ld_r_r!(table, 0x7D, a, l);
    ld_r_hl!(table, 0x7E, a);
    ld_r_r!(table, 0x7F, a, a);

    // 0x80..=0xBF: the 8-bit arithmetic grid
    alu_r!(table, 0x80, add, "ADD A,", b);
    alu_r!(table, 0x81, add, "ADD A,", c);
    alu_r!(table, 0x82, add, "ADD A,", d);
    alu_r!(table, 0x83, add, "ADD A,", e);
    alu_r!(table, 0x84, add, "ADD A,", h);
    alu_r!(table, 0x85, add, "ADD A,", l);
    alu_hl!(table, 0x86, add, "ADD A,");
    alu_r!(table, 0x87, add, "ADD A,", a);
    alu_r!(table, 0x88, adc, "ADC A,", b);
    alu_r!(table, 0x89, adc, "ADC A,", c);
    alu_r!(table, 0x8A, adc, "ADC A,", d);
    alu_r!(table, 0x8B, adc, "ADC A,", e);
    alu_r!(table, 0x8C, adc, "ADC A,", h);
    alu_r!(table, 0x8D, adc, "ADC A,", l);
    alu_hl!(table, 0x8E, adc, "ADC A,");
    alu_r!(table, 0x8F, adc, "ADC A,", a);

    alu_r!(table, 0x90, sub, "SUB", b);
    alu_r!(table, 0x91, sub, "SUB", c);
    alu_r!(table, 0x92, sub, "SUB", d);
    alu_r!(table, 0x93, sub, "SUB", e);
    alu_r!(table, 0x94, sub, "SUB", h);
    alu_r!(table, 0x95, sub, "SUB", l);
    alu_hl!(table, 0x96, sub, "SUB");
    alu_r!(table, 0x97, sub, "SUB", a);
    alu_r!(table, 0x98, sbc, "SBC A,", b);
    alu_r!(table, 0x99, sbc, "SBC A,", c);
    alu_r!(table, 0x9A, sbc, "SBC A,", d);
    alu_r!(table, 0x9B, sbc, "SBC A,", e);
    alu_r!(table, 0x9C, sbc, "SBC A,", h);
    alu_r!(table, 0x9D, sbc, "SBC A,", l);
    alu_hl!(table, 0x9E, sbc, "SBC A,");
    alu_r!(table, 0x9F, sbc, "SBC A,", a);

    alu_r!(table, 0xA0, and, "AND", b);
    alu_r!(table, 0xA1, and, "AND", c);
    alu_r!(table, 0xA2, and, "AND", d);
    alu_r!(table, 0xA3, and, "AND", e);
    alu_r!(table, 0xA4, and, "AND", h);
    alu_r!(table, 0xA5, and, "AND", l);
    alu_hl!(table, 0xA6, and, "AND");
    alu_r!(table, 0xA7, and, "AND", a);
    alu_r!(table, 0xA8, xor, "XOR", b);
    alu_r!(table, 0xA9, xor, "XOR", c);
    alu_r!(table, 0xAA, xor, "XOR", d);
    alu_r!(table, 0xAB, xor, "XOR", e);
    alu_r!(table, 0xAC, xor, "XOR", h);
    alu_r!(table, 0xAD, xor, "XOR", l);
    alu_hl!(table, 0xAE, xor, "XOR");
    alu_r!(table, 0xAF, xor, "XOR", a);

    alu_r!(table, 0xB0, or, "OR", b);
    alu_r!(table, 0xB1, or, "OR", c);
    alu_r!(table, 0xB2, or, "OR", d);
    alu_r!(table, 0xB3, or, "OR", e);
    alu_r!(table, 0xB4, or, "OR", h);
    alu_r!(table, 0xB5, or, "OR", l);
    alu_hl!(table, 0xB6, or, "OR");
    alu_r!(table, 0xB7, or, "OR", a);
    alu_r!(table, 0xB8, compare, "CP", b);
    alu_r!(table, 0xB9, compare, "CP", c);
    alu_r!(table, 0xBA, compare, "CP", d);
    alu_r!(table, 0xBB, compare, "CP", e);
    alu_r!(table, 0xBC, compare, "CP", h);
    alu_r!(table, 0xBD, compare, "CP", l);
    alu_hl!(table, 0xBE, compare, "CP");
    alu_r!(table, 0xBF, compare, "CP", a);

    // 0xC0..=0xFF: stack, calls, returns, immediate arithmetic.
    // 0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB..=0xED, 0xF4, 0xFC and 0xFD
    // stay UNDEFINED.
    ret_cc!(table, 0xC0, "NZ", Flags::ZERO, false);
    pop_rr!(table, 0xC1, "BC", set_bc);
    jp_cc_a16!(table, 0xC2, "NZ", Flags::ZERO, false);
    jp_a16!(table, 0xC3);
    call_cc_a16!(table, 0xC4, "NZ", Flags::ZERO, false);
    push_rr!(table, 0xC5, bc);
    alu_d8!(table, 0xC6, add, "ADD A,");
    rst!(table, 0xC7, 0x00);
    ret_cc!(table, 0xC8, "Z", Flags::ZERO, true);
    ret!(table, 0xC9);
    jp_cc_a16!(table, 0xCA, "Z", Flags::ZERO, true);
    cb_prefix!(table, 0xCB);
    call_cc_a16!(table, 0xCC, "Z", Flags::ZERO, true);
    call_a16!(table, 0xCD);
    alu_d8!(table, 0xCE, adc, "ADC A,");
    rst!(table, 0xCF, 0x08);

    ret_cc!(table, 0xD0, "NC", Flags::CARRY, false);
    pop_rr!(table, 0xD1, "DE", set_de);
    jp_cc_a16!(table, 0xD2, "NC", Flags::CARRY, false);
    call_cc_a16!(table, 0xD4, "NC", Flags::CARRY, false);
    push_rr!(table, 0xD5, de);
    alu_d8!(table, 0xD6, sub, "SUB");
    rst!(table, 0xD7, 0x10);
    ret_cc!(table, 0xD8, "C", Flags::CARRY, true);
    reti!(table, 0xD9);
    jp_cc_a16!(table, 0xDA, "C", Flags::CARRY, true);
    call_cc_a16!(table, 0xDC, "C", Flags::CARRY, true);
    alu_d8!(table, 0xDE, sbc, "SBC A,");
    rst!(table, 0xDF, 0x18);

    ldh_a8_a!(table, 0xE0);
    pop_rr!(table, 0xE1, "HL", set_hl);
    ld_io_c_a!(table, 0xE2);
    push_rr!(table, 0xE5, hl);
    alu_d8!(table, 0xE6, and, "AND");
    rst!(table, 0xE7, 0x20);
    add_sp_e8!(table, 0xE8);
    jp_hl!(table, 0xE9);
    ld_a16_a!(table, 0xEA);
    alu_d8!(table, 0xEE, xor, "XOR");
    rst!(table, 0xEF, 0x28);

    ldh_a_a8!(table, 0xF0);
    pop_rr!(table, 0xF1, "AF", set_af);
    ld_a_io_c!(table, 0xF2);
    di!(table, 0xF3);
    push_rr!(table, 0xF5, af);
    alu_d8!(table, 0xF6, or, "OR");
    rst!(table, 0xF7, 0x30);
    ld_hl_sp_e8!(table, 0xF8);
    ld_sp_hl!(table, 0xF9);
    ld_a_a16!(table, 0xFA);
    ei!(table, 0xFB);
    alu_d8!(table, 0xFE, compare, "CP");
    rst!(table, 0xFF, 0x38);

    table
});
