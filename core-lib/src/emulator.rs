//! The machine as a whole: CPU, bus, raster timing and timers stepped
//! in lockstep, one frame at a time.

use log::debug;

use crate::cartridge::{CartridgeError, Header};
use crate::cpu::{Cpu, StepError};
use crate::mmu::Mmu;
use crate::ppu::Ppu;
use crate::timer::Timer;

/// Master clock rate in Hz.
pub const CLOCK_SPEED: u32 = 4_194_304;
/// Clock cycles per 59.7 Hz frame.
pub const CYCLES_PER_FRAME: u32 = 69_905;

/// All of the machine's moving parts.
pub struct Emulator {
    pub cpu: Cpu,
    pub mmu: Mmu,
    pub ppu: Ppu,
    pub timer: Timer,
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {
    /// A machine in the post-boot state with an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            mmu: Mmu::new(),
            ppu: Ppu::new(),
            timer: Timer::new(),
        }
    }

    /// Loads a cartridge image into the bus and returns its parsed header.
    ///
    /// # Errors
    ///
    /// Propagates [`CartridgeError`] for malformed headers and for the
    /// banked cartridge kinds the bus does not map.
    pub fn load_rom(&mut self, image: &[u8]) -> Result<Header, CartridgeError> {
        self.mmu.load_image(image)
    }

    /// Returns every component to its power-on state. The loaded
    /// cartridge does not survive; reload before running again.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.mmu.reset();
        self.ppu.reset();
        self.timer.reset();
    }

    /// Runs one frame's worth of instructions, feeding each
    /// instruction's cycle cost to the timer and the raster in turn.
    ///
    /// # Errors
    ///
    /// Stops at the first [`StepError`]; the machine state is exactly as
    /// the faulting fetch left it, so the caller can report the address.
    pub fn update(&mut self) -> Result<(), StepError> {
        let mut spent: u32 = 0;
        while spent < CYCLES_PER_FRAME {
            let cycles = self.cpu.step(&mut self.mmu)?;
            self.timer.step(&mut self.mmu, cycles);
            self.ppu.step(&mut self.mmu, cycles);
            spent += cycles;
        }
        debug!(
            "frame complete: {spent} cycles, LY={}, {} total m-cycles",
            self.ppu.line(),
            self.cpu.clock.m_cycles()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cartridge::CartridgeKind;
    use crate::cpu::StepError;
    use crate::mmu::MemoryBus;

    fn rom_with(program: &[u8]) -> Vec<u8> {
        let mut image = vec![0u8; 0x8000];
        image[0x100..0x100 + program.len()].copy_from_slice(program);
        image
    }

    #[test]
    fn update_runs_a_full_frame_of_nops() {
        let mut emu = Emulator::new();
        emu.load_rom(&rom_with(&[])).unwrap();

        emu.update().unwrap();
        assert!(emu.cpu.clock.t_cycles() >= u64::from(CYCLES_PER_FRAME));
        // One frame is just over 153 scanlines, so the raster ends the
        // frame deep in VBlank, with LY mirrored to the bus.
        assert!(emu.ppu.line() >= 144);
        assert_eq!(emu.mmu.read_byte(0xFF44), emu.ppu.line());
    }

    #[test]
    fn update_surfaces_a_fatal_opcode() {
        let mut emu = Emulator::new();
        // NOP; 0xED is one of the undefined slots.
        emu.load_rom(&rom_with(&[0x00, 0xED])).unwrap();

        let err = emu.update().unwrap_err();
        assert_eq!(
            err,
            StepError::UnimplementedOpcode {
                address: 0x0101,
                opcode: 0xED,
                mnemonic: "UNDEF",
                description: "undefined opcode",
            }
        );
    }

    #[test]
    fn load_rom_reports_the_parsed_header() {
        let mut emu = Emulator::new();
        let mut image = rom_with(&[]);
        image[0x134..0x13A].copy_from_slice(b"TETRIS");

        let header = emu.load_rom(&image).unwrap();
        assert_eq!(header.kind, CartridgeKind::RomOnly);
        assert_eq!(header.title, "TETRIS");
    }

    #[test]
    fn reset_returns_the_machine_to_power_on() {
        let mut emu = Emulator::new();
        emu.load_rom(&rom_with(&[])).unwrap();
        emu.update().unwrap();

        emu.reset();
        assert_eq!(emu.cpu.regs.pc, 0x0100);
        assert_eq!(emu.cpu.clock.t_cycles(), 0);
        assert_eq!(emu.ppu.line(), 0);
        // The cartridge is gone: the bus reads as zeroed ROM again, which
        // still runs (a sea of NOPs).
        assert_eq!(emu.mmu.read_byte(0x0147), 0x00);
        assert!(emu.update().is_ok());
    }
}
