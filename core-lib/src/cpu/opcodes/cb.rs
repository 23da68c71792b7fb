//! The CB-prefixed extended opcode table.
//!
//! All 256 slots are defined hardware opcodes, laid out in strict rows of
//! eight targets (b c d e h l (HL) a): rotates/shifts in 0x00..=0x3F,
//! BIT in 0x40..=0x7F, RES in 0x80..=0xBF, SET in 0xC0..=0xFF. Unlike the
//! accumulator rotates in the base table, every rotate here computes Z
//! from its result.

use super::types::Opcode;
use crate::cpu::alu;
use crate::mmu::MemoryBus;
use once_cell::sync::Lazy;

/// Rotate/shift on a named register.
macro_rules! cb_rot_r {
    ($table:ident, $code:expr, $op:ident, $mn:expr, $reg:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!($mn, " ", stringify!($reg)),
            description: concat!($mn, " of register ", stringify!($reg)),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                let value = cpu.regs.$reg;
                cpu.regs.$reg = alu::$op(&mut cpu.regs, value);
                false
            }),
        };
    };
}

/// Rotate/shift on the byte addressed by HL.
macro_rules! cb_rot_hl {
    ($table:ident, $code:expr, $op:ident, $mn:expr) => {
        $table[$code] = Opcode {
            mnemonic: concat!($mn, " (HL)"),
            description: concat!($mn, " of the byte at HL"),
            length: 0,
            base_cycles: 16,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                let addr = cpu.regs.hl();
                let value = bus.read_byte(addr);
                let result = alu::$op(&mut cpu.regs, value);
                bus.write_byte(addr, result);
                false
            }),
        };
    };
}

/// One rotate/shift row: eight consecutive slots for one operation.
macro_rules! cb_rot_row {
    ($table:ident, $base:expr, $op:ident, $mn:expr) => {
        cb_rot_r!($table, $base, $op, $mn, b);
        cb_rot_r!($table, $base + 1, $op, $mn, c);
        cb_rot_r!($table, $base + 2, $op, $mn, d);
        cb_rot_r!($table, $base + 3, $op, $mn, e);
        cb_rot_r!($table, $base + 4, $op, $mn, h);
        cb_rot_r!($table, $base + 5, $op, $mn, l);
        cb_rot_hl!($table, $base + 6, $op, $mn);
        cb_rot_r!($table, $base + 7, $op, $mn, a);
    };
}

/// BIT n on a named register.
macro_rules! cb_bit_r {
    ($table:ident, $code:expr, $bit:literal, $reg:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("BIT ", stringify!($bit), ", ", stringify!($reg)),
            description: concat!(
                "test bit ",
                stringify!($bit),
                " of register ",
                stringify!($reg)
            ),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                let value = cpu.regs.$reg;
                alu::bit(&mut cpu.regs, $bit, value);
                false
            }),
        };
    };
}

/// BIT n on the byte addressed by HL.
macro_rules! cb_bit_hl {
    ($table:ident, $code:expr, $bit:literal) => {
        $table[$code] = Opcode {
            mnemonic: concat!("BIT ", stringify!($bit), ", (HL)"),
            description: concat!("test bit ", stringify!($bit), " of the byte at HL"),
            length: 0,
            base_cycles: 12,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                let value = bus.read_byte(cpu.regs.hl());
                alu::bit(&mut cpu.regs, $bit, value);
                false
            }),
        };
    };
}

/// SET/RES n on a named register. No flag effects.
macro_rules! cb_setres_r {
    ($table:ident, $code:expr, $op:ident, $mn:expr, $bit:literal, $reg:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!($mn, " ", stringify!($bit), ", ", stringify!($reg)),
            description: concat!(
                $mn,
                " of bit ",
                stringify!($bit),
                " in register ",
                stringify!($reg)
            ),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                cpu.regs.$reg = alu::$op($bit, cpu.regs.$reg);
                false
            }),
        };
    };
}

/// SET/RES n on the byte addressed by HL.
macro_rules! cb_setres_hl {
    ($table:ident, $code:expr, $op:ident, $mn:expr, $bit:literal) => {
        $table[$code] = Opcode {
            mnemonic: concat!($mn, " ", stringify!($bit), ", (HL)"),
            description: concat!($mn, " of bit ", stringify!($bit), " in the byte at HL"),
            length: 0,
            base_cycles: 16,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                let addr = cpu.regs.hl();
                let value = bus.read_byte(addr);
                bus.write_byte(addr, alu::$op($bit, value));
                false
            }),
        };
    };
}

/// One BIT row: eight consecutive slots testing one bit.
macro_rules! cb_bit_row {
    ($table:ident, $base:expr, $bit:literal) => {
        cb_bit_r!($table, $base, $bit, b);
        cb_bit_r!($table, $base + 1, $bit, c);
        cb_bit_r!($table, $base + 2, $bit, d);
        cb_bit_r!($table, $base + 3, $bit, e);
        cb_bit_r!($table, $base + 4, $bit, h);
        cb_bit_r!($table, $base + 5, $bit, l);
        cb_bit_hl!($table, $base + 6, $bit);
        cb_bit_r!($table, $base + 7, $bit, a);
    };
}

/// One SET or RES row.
macro_rules! cb_setres_row {
    ($table:ident, $base:expr, $op:ident, $mn:expr, $bit:literal) => {
        cb_setres_r!($table, $base, $op, $mn, $bit, b);
        cb_setres_r!($table, $base + 1, $op, $mn, $bit, c);
        cb_setres_r!($table, $base + 2, $op, $mn, $bit, d);
        cb_setres_r!($table, $base + 3, $op, $mn, $bit, e);
        cb_setres_r!($table, $base + 4, $op, $mn, $bit, h);
        cb_setres_r!($table, $base + 5, $op, $mn, $bit, l);
        cb_setres_hl!($table, $base + 6, $op, $mn, $bit);
        cb_setres_r!($table, $base + 7, $op, $mn, $bit, a);
    };
}

/// The extended dispatch table, entered only through the base table's
/// 0xCB slot.
pub static CB_OPCODES: Lazy<[Opcode; 256]> = Lazy::new(|| {
    let mut table = [Opcode::UNDEFINED; 256];

    cb_rot_row!(table, 0x00, rlc, "RLC");
    cb_rot_row!(table, 0x08, rrc, "RRC");
    cb_rot_row!(table, 0x10, rl, "RL");
    cb_rot_row!(table, 0x18, rr, "RR");
    cb_rot_row!(table, 0x20, sla, "SLA");
    cb_rot_row!(table, 0x28, sra, "SRA");
    cb_rot_row!(table, 0x30, swap, "SWAP");
    cb_rot_row!(table, 0x38, srl, "SRL");

    cb_bit_row!(table, 0x40, 0);
    cb_bit_row!(table, 0x48, 1);
    cb_bit_row!(table, 0x50, 2);
    cb_bit_row!(table, 0x58, 3);
    cb_bit_row!(table, 0x60, 4);
    cb_bit_row!(table, 0x68, 5);
    cb_bit_row!(table, 0x70, 6);
    cb_bit_row!(table, 0x78, 7);

    cb_setres_row!(table, 0x80, res, "RES", 0);
    cb_setres_row!(table, 0x88, res, "RES", 1);
    cb_setres_row!(table, 0x90, res, "RES", 2);
    cb_setres_row!(table, 0x98, res, "RES", 3);
    cb_setres_row!(table, 0xA0, res, "RES", 4);
    cb_setres_row!(table, 0xA8, res, "RES", 5);
    cb_setres_row!(table, 0xB0, res, "RES", 6);
    cb_setres_row!(table, 0xB8, res, "RES", 7);

    cb_setres_row!(table, 0xC0, set, "SET", 0);
    cb_setres_row!(table, 0xC8, set, "SET", 1);
    cb_setres_row!(table, 0xD0, set, "SET", 2);
    cb_setres_row!(table, 0xD8, set, "SET", 3);
    cb_setres_row!(table, 0xE0, set, "SET", 4);
    cb_setres_row!(table, 0xE8, set, "SET", 5);
    cb_setres_row!(table, 0xF0, set, "SET", 6);
    cb_setres_row!(table, 0xF8, set, "SET", 7);

    table
});
