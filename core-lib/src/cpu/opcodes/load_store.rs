//! Load/store and stack opcode macros.

/// LD r, r'.
macro_rules! ld_r_r {
    ($table:ident, $code:expr, $dst:ident, $src:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("LD ", stringify!($dst), ", ", stringify!($src)),
            description: concat!(
                "copy register ",
                stringify!($src),
                " into ",
                stringify!($dst)
            ),
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                cpu.regs.$dst = cpu.regs.$src;
                false
            }),
        };
    };
}

/// LD r, (HL).
macro_rules! ld_r_hl {
    ($table:ident, $code:expr, $dst:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("LD ", stringify!($dst), ", (HL)"),
            description: concat!("load the byte at HL into ", stringify!($dst)),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                cpu.regs.$dst = bus.read_byte(cpu.regs.hl());
                false
            }),
        };
    };
}

/// LD (HL), r.
macro_rules! ld_hl_r {
    ($table:ident, $code:expr, $src:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("LD (HL), ", stringify!($src)),
            description: concat!("store register ", stringify!($src), " at HL"),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                bus.write_byte(cpu.regs.hl(), cpu.regs.$src);
                false
            }),
        };
    };
}

/// LD r, d8.
macro_rules! ld_r_d8 {
    ($table:ident, $code:expr, $dst:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("LD ", stringify!($dst), ", d8"),
            description: concat!("load an immediate byte into ", stringify!($dst)),
            length: 1,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, operand| {
                cpu.regs.$dst = operand as u8;
                false
            }),
        };
    };
}

/// LD (HL), d8.
macro_rules! ld_hl_d8 {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "LD (HL), d8",
            description: "store an immediate byte at HL",
            length: 1,
            base_cycles: 12,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, operand| {
                bus.write_byte(cpu.regs.hl(), operand as u8);
                false
            }),
        };
    };
}

/// LD rr, d16.
macro_rules! ld_rr_d16 {
    ($table:ident, $code:expr, $name:expr, $set:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("LD ", $name, ", d16"),
            description: concat!("load an immediate word into ", $name),
            length: 2,
            base_cycles: 12,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, operand| {
                cpu.regs.$set(operand);
                false
            }),
        };
    };
}

/// LD (a16), SP.
macro_rules! ld_a16_sp {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "LD (a16), SP",
            description: "store the stack pointer at an immediate address",
            length: 2,
            base_cycles: 20,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, operand| {
                bus.write_word(operand, cpu.regs.sp);
                false
            }),
        };
    };
}

/// LD (BC)/(DE), A.
macro_rules! ld_at_rr_a {
    ($table:ident, $code:expr, $get:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("LD (", stringify!($get), "), A"),
            description: concat!("store A at the address in ", stringify!($get)),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                bus.write_byte(cpu.regs.$get(), cpu.regs.a);
                false
            }),
        };
    };
}

/// LD A, (BC)/(DE).
macro_rules! ld_a_at_rr {
    ($table:ident, $code:expr, $get:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("LD A, (", stringify!($get), ")"),
            description: concat!("load A from the address in ", stringify!($get)),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                cpu.regs.a = bus.read_byte(cpu.regs.$get());
                false
            }),
        };
    };
}

/// LD (HL+), A and LD (HL-), A.
macro_rules! ld_hl_step_a {
    ($table:ident, $code:expr, $mn:expr, $step:ident) => {
        $table[$code] = Opcode {
            mnemonic: $mn,
            description: "store A at HL, then step HL",
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                let hl = cpu.regs.hl();
                bus.write_byte(hl, cpu.regs.a);
                cpu.regs.set_hl(hl.$step(1));
                false
            }),
        };
    };
}

/// LD A, (HL+) and LD A, (HL-).
macro_rules! ld_a_hl_step {
    ($table:ident, $code:expr, $mn:expr, $step:ident) => {
        $table[$code] = Opcode {
            mnemonic: $mn,
            description: "load A from HL, then step HL",
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                let hl = cpu.regs.hl();
                cpu.regs.a = bus.read_byte(hl);
                cpu.regs.set_hl(hl.$step(1));
                false
            }),
        };
    };
}

/// LDH (a8), A: store A in the I/O page.
macro_rules! ldh_a8_a {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "LDH (a8), A",
            description: "store A at 0xFF00 plus an immediate offset",
            length: 1,
            base_cycles: 12,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, operand| {
                bus.write_byte(0xFF00 + (operand & 0xFF), cpu.regs.a);
                false
            }),
        };
    };
}

/// LDH A, (a8): load A from the I/O page.
macro_rules! ldh_a_a8 {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "LDH A, (a8)",
            description: "load A from 0xFF00 plus an immediate offset",
            length: 1,
            base_cycles: 12,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, operand| {
                cpu.regs.a = bus.read_byte(0xFF00 + (operand & 0xFF));
                false
            }),
        };
    };
}

/// LD (C), A: store A at 0xFF00 + C.
macro_rules! ld_io_c_a {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "LD (C), A",
            description: "store A at 0xFF00 plus register c",
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                bus.write_byte(0xFF00 + u16::from(cpu.regs.c), cpu.regs.a);
                false
            }),
        };
    };
}

/// LD A, (C): load A from 0xFF00 + C.
macro_rules! ld_a_io_c {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "LD A, (C)",
            description: "load A from 0xFF00 plus register c",
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                cpu.regs.a = bus.read_byte(0xFF00 + u16::from(cpu.regs.c));
                false
            }),
        };
    };
}

/// LD (a16), A.
macro_rules! ld_a16_a {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "LD (a16), A",
            description: "store A at an immediate address",
            length: 2,
            base_cycles: 16,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, operand| {
                bus.write_byte(operand, cpu.regs.a);
                false
            }),
        };
    };
}

/// LD A, (a16).
macro_rules! ld_a_a16 {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "LD A, (a16)",
            description: "load A from an immediate address",
            length: 2,
            base_cycles: 16,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, operand| {
                cpu.regs.a = bus.read_byte(operand);
                false
            }),
        };
    };
}

/// PUSH rr.
macro_rules! push_rr {
    ($table:ident, $code:expr, $get:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("PUSH ", stringify!($get)),
            description: concat!("push ", stringify!($get), " onto the stack"),
            length: 0,
            base_cycles: 16,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                let value = cpu.regs.$get();
                cpu.push(bus, value);
                false
            }),
        };
    };
}

/// POP rr. Popping into AF keeps the low flag nibble zero.
macro_rules! pop_rr {
    ($table:ident, $code:expr, $name:expr, $set:ident) => {
        $table[$code] = Opcode {
            mnemonic: concat!("POP ", $name),
            description: concat!("pop the stack into ", $name),
            length: 0,
            base_cycles: 12,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                let value = cpu.pop(bus);
                cpu.regs.$set(value);
                false
            }),
        };
    };
}

/// LD SP, HL.
macro_rules! ld_sp_hl {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "LD SP, HL",
            description: "copy HL into the stack pointer",
            length: 0,
            base_cycles: 8,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                cpu.regs.sp = cpu.regs.hl();
                false
            }),
        };
    };
}

/// LD HL, SP+e8. Shares its flag rule with ADD SP, e8.
macro_rules! ld_hl_sp_e8 {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "LD HL, SP+e8",
            description: "load SP plus a signed immediate into HL",
            length: 1,
            base_cycles: 12,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, operand| {
                let value = crate::cpu::alu::add_sp_e8(&mut cpu.regs, operand as u8);
                cpu.regs.set_hl(value);
                false
            }),
        };
    };
}

pub(crate) use ld_a16_a;
pub(crate) use ld_a16_sp;
pub(crate) use ld_a_a16;
pub(crate) use ld_a_at_rr;
pub(crate) use ld_a_hl_step;
pub(crate) use ld_a_io_c;
pub(crate) use ld_at_rr_a;
pub(crate) use ld_hl_d8;
pub(crate) use ld_hl_r;
pub(crate) use ld_hl_sp_e8;
pub(crate) use ld_hl_step_a;
pub(crate) use ld_io_c_a;
pub(crate) use ld_r_d8;
pub(crate) use ld_r_hl;
pub(crate) use ld_r_r;
pub(crate) use ld_rr_d16;
pub(crate) use ld_sp_hl;
pub(crate) use ldh_a8_a;
pub(crate) use ldh_a_a8;
pub(crate) use pop_rr;
pub(crate) use push_rr;
