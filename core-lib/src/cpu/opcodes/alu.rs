//! Arithmetic and logic opcode macros.
//!
//! Each macro writes one table slot; the flag work itself lives in
//! [`crate::cpu::alu`], these only move bytes in and out of it.

/// 8-bit ALU op on a named register: ADD/ADC/SUB/SBC/AND/XOR/OR/CP.
macro_rules! alu_r {
    ($table:ident, $code:expr, $op:ident, $mn:expr, $reg:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!($mn, " ", stringify!($reg)),
            description: concat!($mn, " of register ", stringify!($reg), " against A"),
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                let value = cpu.regs.$reg;
                crate::cpu::alu::$op(&mut cpu.regs, value);
                false
            }),
        };
    };
}

/// 8-bit ALU op on the byte addressed by HL.
macro_rules! alu_hl {
    ($table:ident, $code:expr, $op:ident, $mn:expr) => {
        $table[$code] = Opcode {
            mnemonic: concat!($mn, " (HL)"),
            description: concat!($mn, " of the byte at HL against A"),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                let value = bus.read_byte(cpu.regs.hl());
                crate::cpu::alu::$op(&mut cpu.regs, value);
                false
            }),
        };
    };
}

/// 8-bit ALU op on an immediate operand.
macro_rules! alu_d8 {
    ($table:ident, $code:expr, $op:ident, $mn:expr) => {
        $table[$code] = Opcode {
            mnemonic: concat!($mn, " d8"),
            description: concat!($mn, " of an immediate byte against A"),
            length: 1,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, operand| {
                crate::cpu::alu::$op(&mut cpu.regs, operand as u8);
                false
            }),
        };
    };
}

/// INC/DEC of a named 8-bit register.
macro_rules! inc_dec_r {
    ($table:ident, $code:expr, $op:ident, $mn:expr, $reg:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!($mn, " ", stringify!($reg)),
            description: concat!($mn, " of register ", stringify!($reg)),
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                let value = cpu.regs.$reg;
                cpu.regs.$reg = crate::cpu::alu::$op(&mut cpu.regs, value);
                false
            }),
        };
    };
}

/// INC/DEC of the byte addressed by HL.
macro_rules! inc_dec_hl {
    ($table:ident, $code:expr, $op:ident, $mn:expr) => {
        $table[$code] = Opcode {
            mnemonic: concat!($mn, " (HL)"),
            description: concat!($mn, " of the byte at HL"),
            length: 0,
            base_cycles: 12,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                let addr = cpu.regs.hl();
                let value = bus.read_byte(addr);
                let result = crate::cpu::alu::$op(&mut cpu.regs, value);
                bus.write_byte(addr, result);
                false
            }),
        };
    };
}

/// INC of a 16-bit register pair; no flag effects.
macro_rules! inc_rr {
    ($table:ident, $code:expr, $get:ident, $set:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("INC ", stringify!($get)),
            description: concat!("16-bit increment of ", stringify!($get)),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                let value = cpu.regs.$get().wrapping_add(1);
                cpu.regs.$set(value);
                false
            }),
        };
    };
}

/// DEC of a 16-bit register pair; no flag effects.
macro_rules! dec_rr {
    ($table:ident, $code:expr, $get:ident, $set:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("DEC ", stringify!($get)),
            description: concat!("16-bit decrement of ", stringify!($get)),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                let value = cpu.regs.$get().wrapping_sub(1);
                cpu.regs.$set(value);
                false
            }),
        };
    };
}

/// ADD HL, rr. 16-bit add into HL; Z preserved.
macro_rules! add_hl_rr {
    ($table:ident, $code:expr, $get:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("ADD HL, ", stringify!($get)),
            description: concat!("16-bit add of ", stringify!($get), " into HL"),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                let value = cpu.regs.$get();
                crate::cpu::alu::add16_hl(&mut cpu.regs, value);
                false
            }),
        };
    };
}

/// ADD SP, e8: signed immediate added to the stack pointer.
macro_rules! add_sp_e8 {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "ADD SP, e8",
            description: "signed immediate add to the stack pointer",
            length: 1,
            base_cycles: 16,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, operand| {
                cpu.regs.sp = crate::cpu::alu::add_sp_e8(&mut cpu.regs, operand as u8);
                false
            }),
        };
    };
}

/// The four unprefixed accumulator rotates; Z is left unchanged.
macro_rules! rot_a {
    ($table:ident, $code:expr, $op:ident, $mn:expr) => {
        $table[$code] = Opcode {
            mnemonic: $mn,
            description: concat!("accumulator rotate ", $mn, " (Z unaffected)"),
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                crate::cpu::alu::$op(&mut cpu.regs);
                false
            }),
        };
    };
}

/// DAA: decimal-adjust A.
macro_rules! daa {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "DAA",
            description: "decimal-adjust A after BCD arithmetic",
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                crate::cpu::alu::daa(&mut cpu.regs);
                false
            }),
        };
    };
}

/// CPL: complement A; sets N and H, leaves Z and C.
macro_rules! cpl {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "CPL",
            description: "bitwise complement of A",
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                cpu.regs.a = !cpu.regs.a;
                cpu.regs.set_flag(Flags::NEGATIVE, true);
                cpu.regs.set_flag(Flags::HALF_CARRY, true);
                false
            }),
        };
    };
}

/// SCF: set carry; clears N and H.
macro_rules! scf {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "SCF",
            description: "set the carry flag",
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                cpu.regs.set_flag(Flags::NEGATIVE, false);
                cpu.regs.set_flag(Flags::HALF_CARRY, false);
                cpu.regs.set_flag(Flags::CARRY, true);
                false
            }),
        };
    };
}

/// CCF: complement carry; clears N and H.
macro_rules! ccf {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "CCF",
            description: "complement the carry flag",
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                let carry = cpu.regs.flag(Flags::CARRY);
                cpu.regs.set_flag(Flags::NEGATIVE, false);
                cpu.regs.set_flag(Flags::HALF_CARRY, false);
                cpu.regs.set_flag(Flags::CARRY, !carry);
                false
            }),
        };
    };
}

pub(crate) use add_hl_rr;
pub(crate) use add_sp_e8;
pub(crate) use alu_d8;
pub(crate) use alu_hl;
pub(crate) use alu_r;
pub(crate) use ccf;
pub(crate) use cpl;
pub(crate) use daa;
pub(crate) use dec_rr;
pub(crate) use inc_dec_hl;
pub(crate) use inc_dec_r;
pub(crate) use inc_rr;
pub(crate) use rot_a;
pub(crate) use scf;
