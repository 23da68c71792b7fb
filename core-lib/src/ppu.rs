//! Scanline timing state machine.
//!
//! Tracks where the raster is without rendering anything: each visible
//! line walks OAM scan (80 cycles), pixel transfer (172) and HBlank (204)
//! for a 456-cycle line, lines 144..=153 are VBlank, and LY at `0xFF44`
//! follows along. Rendering itself is out of scope; the state machine
//! exists so timing-sensitive code sees LY and the mode advance at the
//! hardware rate.

use bitflags::bitflags;

use crate::mmu::MemoryBus;

/// LCD control register at `0xFF40`.
pub const LCDC: u16 = 0xFF40;
/// Current scanline register at `0xFF44`.
pub const LY: u16 = 0xFF44;

const OAM_SCAN_CYCLES: u32 = 80;
const PIXEL_TRANSFER_CYCLES: u32 = 172;
const HBLANK_CYCLES: u32 = 204;
const LINE_CYCLES: u32 = 456;

const FIRST_VBLANK_LINE: u8 = 144;
const LAST_LINE: u8 = 153;

bitflags! {
    /// The LCDC bits the timing machine cares about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LcdControl: u8 {
        /// Bit 7: LCD and PPU enable. When clear the machine stands still.
        const LCD_ENABLE = 0b1000_0000;
    }
}

/// The four hardware modes, in their STAT register encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpuMode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    PixelTransfer = 3,
}

/// Raster position state. Owns nothing in memory; LY is pushed to the
/// bus after every step so programs polling `0xFF44` see it move.
#[derive(Debug)]
pub struct Ppu {
    mode: PpuMode,
    line: u8,
    /// Cycles accumulated inside the current mode.
    mode_cycles: u32,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: PpuMode::OamScan,
            line: 0,
            mode_cycles: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub const fn mode(&self) -> PpuMode {
        self.mode
    }

    #[must_use]
    pub const fn line(&self) -> u8 {
        self.line
    }

    /// Advances the raster by the cycles the CPU just spent and mirrors
    /// LY to the bus. Does nothing while the LCD is switched off.
    pub fn step(&mut self, bus: &mut dyn MemoryBus, cycles: u32) {
        let lcdc = LcdControl::from_bits_truncate(bus.read_byte(LCDC));
        if !lcdc.contains(LcdControl::LCD_ENABLE) {
            return;
        }

        self.mode_cycles += cycles;
        loop {
            let advanced = match self.mode {
                PpuMode::OamScan => self.advance(OAM_SCAN_CYCLES, PpuMode::PixelTransfer),
                PpuMode::PixelTransfer => self.advance(PIXEL_TRANSFER_CYCLES, PpuMode::HBlank),
                PpuMode::HBlank => {
                    if self.mode_cycles < HBLANK_CYCLES {
                        false
                    } else {
                        self.mode_cycles -= HBLANK_CYCLES;
                        self.line += 1;
                        self.mode = if self.line == FIRST_VBLANK_LINE {
                            PpuMode::VBlank
                        } else {
                            PpuMode::OamScan
                        };
                        true
                    }
                }
                PpuMode::VBlank => {
                    if self.mode_cycles < LINE_CYCLES {
                        false
                    } else {
                        self.mode_cycles -= LINE_CYCLES;
                        if self.line == LAST_LINE {
                            self.line = 0;
                            self.mode = PpuMode::OamScan;
                        } else {
                            self.line += 1;
                        }
                        true
                    }
                }
            };
            if !advanced {
                break;
            }
        }

        bus.write_byte(LY, self.line);
    }

    /// Rolls over to `next` once the current mode has run its course.
    fn advance(&mut self, budget: u32, next: PpuMode) -> bool {
        if self.mode_cycles < budget {
            return false;
        }
        self.mode_cycles -= budget;
        self.mode = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mmu::Mmu;

    fn bus() -> Mmu {
        // Power-on I/O state has the LCD enabled (LCDC = 0x91).
        Mmu::new()
    }

    #[test]
    fn visible_line_walks_the_three_modes() {
        let mut ppu = Ppu::new();
        let mut mmu = bus();

        ppu.step(&mut mmu, 79);
        assert_eq!(ppu.mode(), PpuMode::OamScan);
        ppu.step(&mut mmu, 1);
        assert_eq!(ppu.mode(), PpuMode::PixelTransfer);
        ppu.step(&mut mmu, 172);
        assert_eq!(ppu.mode(), PpuMode::HBlank);
        ppu.step(&mut mmu, 204);
        assert_eq!(ppu.mode(), PpuMode::OamScan);
        assert_eq!(ppu.line(), 1);
        assert_eq!(mmu.read_byte(LY), 1);
    }

    #[test]
    fn vblank_begins_after_the_last_visible_line() {
        let mut ppu = Ppu::new();
        let mut mmu = bus();

        for _ in 0..144 {
            ppu.step(&mut mmu, LINE_CYCLES);
        }
        assert_eq!(ppu.mode(), PpuMode::VBlank);
        assert_eq!(ppu.line(), 144);
        assert_eq!(mmu.read_byte(LY), 144);
    }

    #[test]
    fn frame_wraps_back_to_line_zero() {
        let mut ppu = Ppu::new();
        let mut mmu = bus();

        for _ in 0..154 {
            ppu.step(&mut mmu, LINE_CYCLES);
        }
        assert_eq!(ppu.mode(), PpuMode::OamScan);
        assert_eq!(ppu.line(), 0);
        assert_eq!(mmu.read_byte(LY), 0);
    }

    #[test]
    fn disabled_lcd_freezes_the_raster() {
        let mut ppu = Ppu::new();
        let mut mmu = bus();
        mmu.write_byte(LCDC, 0x00);

        ppu.step(&mut mmu, LINE_CYCLES * 10);
        assert_eq!(ppu.mode(), PpuMode::OamScan);
        assert_eq!(ppu.line(), 0);
    }

    #[test]
    fn oversized_step_catches_up_across_modes() {
        let mut ppu = Ppu::new();
        let mut mmu = bus();

        // Two full lines and half of the next OAM scan in one burst.
        ppu.step(&mut mmu, LINE_CYCLES * 2 + 40);
        assert_eq!(ppu.line(), 2);
        assert_eq!(ppu.mode(), PpuMode::OamScan);
    }
}
