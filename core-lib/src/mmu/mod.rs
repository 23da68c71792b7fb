//! Memory-mapped addressing unit.
//!
//! One flat 64K address space split into fixed regions:
//!
//! ```text
//!  Interrupt Enable Register
//!  --------------------------- FFFF
//!  High RAM
//!  --------------------------- FF80
//!  Empty but unusable for I/O
//!  --------------------------- FF4C
//!  I/O registers
//!  --------------------------- FF00
//!  Empty but unusable for I/O
//!  --------------------------- FEA0
//!  Sprite attribute memory (OAM)
//!  --------------------------- FE00
//!  Echo of 8KB internal RAM
//!  --------------------------- E000
//!  8KB internal work RAM
//!  --------------------------- C000
//!  8KB external (cartridge) RAM
//!  --------------------------- A000
//!  8KB video RAM
//!  --------------------------- 8000
//!  32KB cartridge ROM
//!  --------------------------- 0000
//! ```
//!
//! The MMU owns every byte. Reads from unusable regions return 0 and
//! writes to ROM or unusable regions are dropped, matching the hardware.

use crate::cartridge::{CartridgeError, CartridgeKind, Header};
use log::{debug, info};

/// Byte/word access seam between the CPU and its backing memory.
///
/// Word accesses are little-endian: low byte at `addr`, high byte at
/// `addr + 1`; `write_word` stores the low byte first.
pub trait MemoryBus {
    fn read_byte(&self, addr: u16) -> u8;
    fn write_byte(&mut self, addr: u16, value: u8);

    fn read_word(&self, addr: u16) -> u16 {
        let lo = u16::from(self.read_byte(addr));
        let hi = u16::from(self.read_byte(addr.wrapping_add(1)));
        (hi << 8) | lo
    }

    fn write_word(&mut self, addr: u16, value: u16) {
        self.write_byte(addr, (value & 0xFF) as u8);
        self.write_byte(addr.wrapping_add(1), (value >> 8) as u8);
    }
}

/// Power-on values for the I/O registers, written by [`Mmu::reset`].
/// Sound channel setup, LCD control and the monochrome palettes.
const POWER_ON_IO: [(u16, u8); 30] = [
    (0xFF05, 0x00), // TIMA
    (0xFF06, 0x00), // TMA
    (0xFF07, 0x00), // TAC
    (0xFF10, 0x80), // NR10
    (0xFF11, 0xBF), // NR11
    (0xFF12, 0xF3), // NR12
    (0xFF14, 0xBF), // NR14
    (0xFF16, 0x3F), // NR21
    (0xFF17, 0x00), // NR22
    (0xFF19, 0xBF), // NR24
    (0xFF1A, 0x7F), // NR30
    (0xFF1B, 0xFF), // NR31
    (0xFF1C, 0x9F), // NR32
    (0xFF1E, 0xBF), // NR34
    (0xFF20, 0xFF), // NR41
    (0xFF21, 0x00), // NR42
    (0xFF22, 0x00), // NR43
    (0xFF23, 0xBF), // NR44
    (0xFF24, 0x77), // NR50
    (0xFF25, 0xF3), // NR51
    (0xFF26, 0xF1), // NR52
    (0xFF40, 0x91), // LCDC
    (0xFF42, 0x00), // SCY
    (0xFF43, 0x00), // SCX
    (0xFF45, 0x00), // LYC
    (0xFF47, 0xFC), // BGP
    (0xFF48, 0xFF), // OBP0
    (0xFF49, 0xFF), // OBP1
    (0xFF4A, 0x00), // WY
    (0xFF4B, 0x00), // WX
];

/// The memory unit backing the CPU.
pub struct Mmu {
    rom: [u8; 0x8000],  // 32KB cartridge ROM (two fixed 16KB banks)
    vram: [u8; 0x2000], // 8KB video RAM
    xram: [u8; 0x2000], // 8KB external cartridge RAM
    wram: [u8; 0x2000], // 8KB internal work RAM
    oam: [u8; 0xA0],    // sprite attribute memory
    io: [u8; 0x4C],     // memory-mapped I/O registers
    hram: [u8; 0x7F],   // high RAM
    ie: u8,             // interrupt enable register (0xFFFF)
}

impl Default for Mmu {
    fn default() -> Self {
        Self::new()
    }
}

impl Mmu {
    pub fn new() -> Self {
        let mut mmu = Self {
            rom: [0; 0x8000],
            vram: [0; 0x2000],
            xram: [0; 0x2000],
            wram: [0; 0x2000],
            oam: [0; 0xA0],
            io: [0; 0x4C],
            hram: [0; 0x7F],
            ie: 0,
        };
        mmu.reset();
        mmu
    }

    /// Zeroes every backing region, then seeds the documented power-on
    /// I/O values. Idempotent. A loaded cartridge image does not survive.
    pub fn reset(&mut self) {
        self.rom = [0; 0x8000];
        self.vram = [0; 0x2000];
        self.xram = [0; 0x2000];
        self.wram = [0; 0x2000];
        self.oam = [0; 0xA0];
        self.io = [0; 0x4C];
        self.hram = [0; 0x7F];
        self.ie = 0;
        for (addr, value) in POWER_ON_IO {
            self.write_byte(addr, value);
        }
    }

    /// Loads a cartridge image into the ROM region.
    ///
    /// The header is parsed first; any cartridge kind other than the
    /// bank-controller-free one is refused outright so a banked image is
    /// never silently truncated into the 32KB window.
    pub fn load_image(&mut self, image: &[u8]) -> Result<Header, CartridgeError> {
        let header = Header::parse(image)?;
        if header.kind != CartridgeKind::RomOnly {
            return Err(CartridgeError::UnsupportedKind(header.kind));
        }
        if image.len() > self.rom.len() {
            return Err(CartridgeError::OversizedImage(image.len()));
        }
        info!(
            "loading cartridge '{}' ({:?}, {} bytes ROM, {} bytes RAM)",
            header.title, header.kind, header.rom_size, header.ram_size
        );
        self.rom = [0; 0x8000];
        self.rom[..image.len()].copy_from_slice(image);
        Ok(header)
    }
}

impl MemoryBus for Mmu {
    fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.rom[addr as usize],
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize],
            0xA000..=0xBFFF => self.xram[(addr - 0xA000) as usize],
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],
            // Echo RAM mirrors the work RAM, offset-adjusted
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize],
            0xFEA0..=0xFEFF => 0,
            0xFF00..=0xFF4B => self.io[(addr - 0xFF00) as usize],
            0xFF4C..=0xFF7F => 0,
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.ie,
        }
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        match addr {
            // ROM is read-only; writes fall on the floor
            0x0000..=0x7FFF => {
                debug!("ignored write {value:#04X} to ROM address {addr:#06X}");
            }
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize] = value,
            0xA000..=0xBFFF => self.xram[(addr - 0xA000) as usize] = value,
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = value,
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize] = value,
            0xFEA0..=0xFEFF => {}
            0xFF00..=0xFF4B => self.io[(addr - 0xFF00) as usize] = value,
            0xFF4C..=0xFF7F => {}
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.ie = value,
        }
    }
}
