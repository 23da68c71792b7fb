//! Control-flow opcode macros: jumps, calls, returns, and the handful of
//! machine-control instructions (NOP/STOP/HALT/DI/EI).
//!
//! Conditional handlers return `true` when the branch was taken so the
//! engine adds the per-opcode `conditional_cycles` surcharge; not-taken
//! branches report only the base cost.

/// Adds a signed 8-bit displacement to the program counter.
macro_rules! relative_target {
    ($pc:expr, $operand:expr) => {
        $pc.wrapping_add(i16::from($operand as u8 as i8) as u16)
    };
}

/// JR e8: unconditional relative jump.
macro_rules! jr_e8 {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "JR e8",
            description: "relative jump by a signed immediate",
            length: 1,
            base_cycles: 12,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, operand| {
                cpu.regs.pc = relative_target!(cpu.regs.pc, operand);
                false
            }),
        };
    };
}

/// JR cc, e8: conditional relative jump.
macro_rules! jr_cc_e8 {
    ($table:ident, $code:expr, $cc:expr, $flag:expr, $expected:expr) => {
        $table[$code] = Opcode {
            mnemonic: concat!("JR ", $cc, ", e8"),
            description: concat!("relative jump by a signed immediate if ", $cc),
            length: 1,
            base_cycles: 8,
            conditional_cycles: 4,
            exec: Some(|cpu, _bus, operand| {
                if cpu.regs.flag($flag) == $expected {
                    cpu.regs.pc = relative_target!(cpu.regs.pc, operand);
                    true
                } else {
                    false
                }
            }),
        };
    };
}

/// JP a16: unconditional absolute jump.
macro_rules! jp_a16 {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "JP a16",
            description: "absolute jump to an immediate address",
            length: 2,
            base_cycles: 16,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, operand| {
                cpu.regs.pc = operand;
                false
            }),
        };
    };
}

/// JP cc, a16: conditional absolute jump.
macro_rules! jp_cc_a16 {
    ($table:ident, $code:expr, $cc:expr, $flag:expr, $expected:expr) => {
        $table[$code] = Opcode {
            mnemonic: concat!("JP ", $cc, ", a16"),
            description: concat!("absolute jump to an immediate address if ", $cc),
            length: 2,
            base_cycles: 12,
            conditional_cycles: 4,
            exec: Some(|cpu, _bus, operand| {
                if cpu.regs.flag($flag) == $expected {
                    cpu.regs.pc = operand;
                    true
                } else {
                    false
                }
            }),
        };
    };
}

/// JP HL: jump to the address in HL.
macro_rules! jp_hl {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "JP HL",
            description: "jump to the address in HL",
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                cpu.regs.pc = cpu.regs.hl();
                false
            }),
        };
    };
}

/// CALL a16: push the return address, jump.
macro_rules! call_a16 {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "CALL a16",
            description: "call an immediate address",
            length: 2,
            base_cycles: 24,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, operand| {
                let ret = cpu.regs.pc;
                cpu.push(bus, ret);
                cpu.regs.pc = operand;
                false
            }),
        };
    };
}

/// CALL cc, a16.
macro_rules! call_cc_a16 {
    ($table:ident, $code:expr, $cc:expr, $flag:expr, $expected:expr) => {
        $table[$code] = Opcode {
            mnemonic: concat!("CALL ", $cc, ", a16"),
            description: concat!("call an immediate address if ", $cc),
            length: 2,
            base_cycles: 12,
            conditional_cycles: 12,
            exec: Some(|cpu, bus, operand| {
                if cpu.regs.flag($flag) == $expected {
                    let ret = cpu.regs.pc;
                    cpu.push(bus, ret);
                    cpu.regs.pc = operand;
                    true
                } else {
                    false
                }
            }),
        };
    };
}

/// RET: pop the return address into PC.
macro_rules! ret {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "RET",
            description: "return from a call",
            length: 0,
            base_cycles: 16,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                cpu.regs.pc = cpu.pop(bus);
                false
            }),
        };
    };
}

/// RET cc.
macro_rules! ret_cc {
    ($table:ident, $code:expr, $cc:expr, $flag:expr, $expected:expr) => {
        $table[$code] = Opcode {
            mnemonic: concat!("RET ", $cc),
            description: concat!("return from a call if ", $cc),
            length: 0,
            base_cycles: 8,
            conditional_cycles: 12,
            exec: Some(|cpu, bus, _operand| {
                if cpu.regs.flag($flag) == $expected {
                    cpu.regs.pc = cpu.pop(bus);
                    true
                } else {
                    false
                }
            }),
        };
    };
}

/// RETI: return and re-enable the interrupt master flag.
macro_rules! reti {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "RETI",
            description: "return from a call and enable interrupts",
            length: 0,
            base_cycles: 16,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                cpu.regs.pc = cpu.pop(bus);
                cpu.ime = true;
                false
            }),
        };
    };
}

/// RST: call one of the eight fixed restart vectors.
macro_rules! rst {
    ($table:ident, $code:expr, $target:expr) => {
        $table[$code] = Opcode {
            mnemonic: concat!("RST ", stringify!($target)),
            description: concat!("call the fixed restart vector ", stringify!($target)),
            length: 0,
            base_cycles: 16,
            conditional_cycles: 0,
            exec: Some(|cpu, bus, _operand| {
                let ret = cpu.regs.pc;
                cpu.push(bus, ret);
                cpu.regs.pc = $target;
                false
            }),
        };
    };
}

/// NOP.
macro_rules! nop {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "NOP",
            description: "no operation",
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|_cpu, _bus, _operand| false),
        };
    };
}

/// STOP. The following byte is part of the encoding and is skipped.
macro_rules! stop {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "STOP",
            description: "enter very-low-power stop mode",
            length: 1,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                cpu.halted = true;
                false
            }),
        };
    };
}

/// HALT: idle until an interrupt would wake the CPU.
macro_rules! halt {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "HALT",
            description: "halt until the next interrupt",
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                cpu.halted = true;
                false
            }),
        };
    };
}

/// DI: clear the interrupt master-enable flag.
macro_rules! di {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "DI",
            description: "disable the interrupt master flag",
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                cpu.ime = false;
                false
            }),
        };
    };
}

/// EI: set the interrupt master-enable flag.
macro_rules! ei {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "EI",
            description: "enable the interrupt master flag",
            length: 0,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|cpu, _bus, _operand| {
                cpu.ime = true;
                false
            }),
        };
    };
}

/// The 0xCB prefix itself. The engine re-dispatches through the extended
/// table before this handler could ever run; the entry documents the slot
/// and accounts for the extended opcode byte as its one operand.
macro_rules! cb_prefix {
    ($table:ident, $code:expr) => {
        $table[$code] = Opcode {
            mnemonic: "PREFIX CB",
            description: "enter the CB-prefixed extended opcode set",
            length: 1,
            base_cycles: 4,
            conditional_cycles: 0,
            exec: Some(|_cpu, _bus, _operand| false),
        };
    };
}

pub(crate) use call_a16;
pub(crate) use call_cc_a16;
pub(crate) use cb_prefix;
pub(crate) use di;
pub(crate) use ei;
pub(crate) use halt;
pub(crate) use jp_a16;
pub(crate) use jp_cc_a16;
pub(crate) use jp_hl;
pub(crate) use jr_cc_e8;
pub(crate) use jr_e8;
pub(crate) use nop;
pub(crate) use relative_target;
pub(crate) use ret;
pub(crate) use ret_cc;
pub(crate) use reti;
pub(crate) use rst;
pub(crate) use stop;
