pub mod cartridge;
pub mod clock;
pub mod cpu;
pub mod emulator;
pub mod mmu;
pub mod ppu;
pub mod timer;

// Re-export common types
pub use cartridge::{CartridgeError, CartridgeKind, Header};
pub use clock::Clock;
pub use cpu::{Cpu, Flags, Registers, StepError};
pub use emulator::{Emulator, CLOCK_SPEED, CYCLES_PER_FRAME};
pub use mmu::{MemoryBus, Mmu};
pub use ppu::{Ppu, PpuMode};
pub use timer::Timer;
