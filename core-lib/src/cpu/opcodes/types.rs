//! The opcode table record type.

use crate::cpu::Cpu;
use crate::mmu::MemoryBus;

/// An opcode handler. Receives the already-fetched operand (zero-extended
/// to 16 bits) and returns whether a branch condition was met, so the
/// engine can add the taken-branch cycle surcharge.
pub type Handler = fn(&mut Cpu, &mut dyn MemoryBus, u16) -> bool;

/// One immutable dispatch-table slot. Keeping the metadata and the
/// handler in a single record means the table and the behaviour cannot
/// drift apart.
#[derive(Clone, Copy)]
pub struct Opcode {
    /// Display mnemonic.
    pub mnemonic: &'static str,
    /// Human-readable description, surfaced in fatal-opcode errors.
    pub description: &'static str,
    /// Operand length in bytes: 0, 1 or 2.
    pub length: u8,
    /// Cycle cost including the fetch.
    pub base_cycles: u32,
    /// Extra cycles when a conditional branch is taken. A per-opcode
    /// constant, zero for unconditional instructions.
    pub conditional_cycles: u32,
    /// `None` marks an undefined table slot.
    pub exec: Option<Handler>,
}

impl Opcode {
    /// The sentinel filling the eleven undefined base-table slots.
    pub const UNDEFINED: Self = Self {
        mnemonic: "UNDEF",
        description: "undefined opcode",
        length: 0,
        base_cycles: 0,
        conditional_cycles: 0,
        exec: None,
    };

    pub const fn implemented(&self) -> bool {
        self.exec.is_some()
    }
}
