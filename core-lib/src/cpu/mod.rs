//! The Sharp LR35902 CPU core.
//!
//! [`Cpu::step`] drives a fetch/decode/execute loop over the dispatch
//! tables in [`opcodes`]: fetch the opcode byte, consume any immediate
//! operand (advancing PC past it before the handler runs, so control-flow
//! handlers are free to overwrite PC), execute, then charge the clock.
//! One machine cycle is four clock cycles; all table costs are in clock
//! cycles.

mod alu;
pub mod opcodes;
mod registers;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::clock::Clock;
use crate::mmu::MemoryBus;

pub use registers::{Flags, Registers};

/// Post-boot register state: the values the boot ROM leaves behind on a
/// DMG, with execution continuing at the cartridge entry point.
const RESET_AF: u16 = 0x01B0;
const RESET_BC: u16 = 0x0013;
const RESET_DE: u16 = 0x00D8;
const RESET_HL: u16 = 0x014D;
const RESET_SP: u16 = 0xFFFE;
const RESET_PC: u16 = 0x0100;

/// A fault that stops the instruction stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The fetched opcode has no handler: either one of the eleven slots
    /// the hardware never defined, or a gap in the table. PC has advanced
    /// past the fetched bytes only, so the faulting address is exact.
    #[error("unimplemented opcode {opcode:#04x} ({mnemonic}: {description}) at {address:#06x}")]
    UnimplementedOpcode {
        address: u16,
        opcode: u8,
        mnemonic: &'static str,
        description: &'static str,
    },
}

/// CPU state: the register file, the cycle clock, and the two bits of
/// execution mode (interrupt master enable, halted).
#[derive(Debug, Default)]
pub struct Cpu {
    pub regs: Registers,
    pub clock: Clock,
    pub ime: bool,
    pub halted: bool,
}

impl Cpu {
    /// A CPU in the post-boot state.
    #[must_use]
    pub fn new() -> Self {
        let mut cpu = Self::default();
        cpu.reset();
        cpu
    }

    /// Restores the post-boot register state and zeroes the clock.
    pub fn reset(&mut self) {
        self.regs.set_af(RESET_AF);
        self.regs.set_bc(RESET_BC);
        self.regs.set_de(RESET_DE);
        self.regs.set_hl(RESET_HL);
        self.regs.sp = RESET_SP;
        self.regs.pc = RESET_PC;
        self.ime = false;
        self.halted = false;
        self.clock.reset();
    }

    /// Executes one instruction and returns the clock cycles it cost.
    ///
    /// A halted CPU burns idle cycles instead of fetching. The 0xCB
    /// prefix re-dispatches through the extended table; its entries carry
    /// the full cost of the prefixed instruction, prefix byte included.
    ///
    /// # Errors
    ///
    /// [`StepError::UnimplementedOpcode`] when the fetched slot has no
    /// handler. The clock is not charged for the failed fetch.
    pub fn step(&mut self, bus: &mut dyn MemoryBus) -> Result<u32, StepError> {
        if self.halted {
            self.clock.tick(4);
            return Ok(4);
        }

        let address = self.regs.pc;
        let mut code = bus.read_byte(address);
        self.regs.pc = self.regs.pc.wrapping_add(1);

        let entry = if code == 0xCB {
            code = bus.read_byte(self.regs.pc);
            self.regs.pc = self.regs.pc.wrapping_add(1);
            opcodes::CB_OPCODES[usize::from(code)]
        } else {
            opcodes::OPCODES[usize::from(code)]
        };

        let Some(exec) = entry.exec else {
            return Err(StepError::UnimplementedOpcode {
                address,
                opcode: code,
                mnemonic: entry.mnemonic,
                description: entry.description,
            });
        };

        let operand = match entry.length {
            1 => {
                let value = u16::from(bus.read_byte(self.regs.pc));
                self.regs.pc = self.regs.pc.wrapping_add(1);
                value
            }
            2 => {
                let value = bus.read_word(self.regs.pc);
                self.regs.pc = self.regs.pc.wrapping_add(2);
                value
            }
            _ => 0,
        };

        let taken = exec(self, bus, operand);

        let mut cycles = entry.base_cycles;
        if taken {
            cycles += entry.conditional_cycles;
        }
        self.clock.tick(cycles);
        Ok(cycles)
    }

    /// Pushes a word onto the stack, high byte at the higher address.
    pub(crate) fn push(&mut self, bus: &mut dyn MemoryBus, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write_word(self.regs.sp, value);
    }

    /// Pops a word off the stack.
    pub(crate) fn pop(&mut self, bus: &mut dyn MemoryBus) -> u16 {
        let value = bus.read_word(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }
}
