//! Cartridge image header parsing.
//!
//! The header sits at fixed offsets: ASCII title at 0x134..0x144, the
//! cartridge type byte at 0x147, ROM size code at 0x148 and RAM size code
//! at 0x149. Every known type byte is enumerated so an unsupported image
//! is refused by name; only the no-MBC kind is actually loadable.

use thiserror::Error;

/// Offset of the cartridge type byte.
pub const KIND_OFFSET: usize = 0x147;
/// Offset of the ROM size code.
pub const ROM_SIZE_OFFSET: usize = 0x148;
/// Offset of the RAM size code.
pub const RAM_SIZE_OFFSET: usize = 0x149;
/// Title field, 16 ASCII bytes, zero padded.
pub const TITLE_RANGE: std::ops::Range<usize> = 0x134..0x144;
/// Smallest image that still contains a full header.
pub const MIN_IMAGE_SIZE: usize = 0x150;

#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("image too short for a cartridge header: {0} bytes")]
    TooShort(usize),
    #[error("unknown cartridge type byte: {0:#04X}")]
    UnknownKind(u8),
    #[error("unsupported cartridge type: {0:?} (bank switching is not implemented)")]
    UnsupportedKind(CartridgeKind),
    #[error("ROM-only image larger than 32KB: {0} bytes")]
    OversizedImage(usize),
}

/// Cartridge hardware kinds, one per documented type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartridgeKind {
    RomOnly,
    Mbc1,
    Mbc1Ram,
    Mbc1RamBattery,
    Mbc2,
    Mbc2Battery,
    RomRam,
    RomRamBattery,
    Mmm01,
    Mmm01Ram,
    Mmm01RamBattery,
    Mbc3TimerBattery,
    Mbc3TimerRamBattery,
    Mbc3,
    Mbc3Ram,
    Mbc3RamBattery,
    Mbc5,
    Mbc5Ram,
    Mbc5RamBattery,
    Mbc5Rumble,
    Mbc5RumbleRam,
    Mbc5RumbleRamBattery,
    PocketCamera,
    BandaiTama5,
    HudsonHuc3,
    HudsonHuc1,
}

impl TryFrom<u8> for CartridgeKind {
    type Error = CartridgeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::RomOnly),
            0x01 => Ok(Self::Mbc1),
            0x02 => Ok(Self::Mbc1Ram),
            0x03 => Ok(Self::Mbc1RamBattery),
            0x05 => Ok(Self::Mbc2),
            0x06 => Ok(Self::Mbc2Battery),
            0x08 => Ok(Self::RomRam),
            0x09 => Ok(Self::RomRamBattery),
            0x0B => Ok(Self::Mmm01),
            0x0C => Ok(Self::Mmm01Ram),
            0x0D => Ok(Self::Mmm01RamBattery),
            0x0F => Ok(Self::Mbc3TimerBattery),
            0x10 => Ok(Self::Mbc3TimerRamBattery),
            0x11 => Ok(Self::Mbc3),
            0x12 => Ok(Self::Mbc3Ram),
            0x13 => Ok(Self::Mbc3RamBattery),
            0x19 => Ok(Self::Mbc5),
            0x1A => Ok(Self::Mbc5Ram),
            0x1B => Ok(Self::Mbc5RamBattery),
            0x1C => Ok(Self::Mbc5Rumble),
            0x1D => Ok(Self::Mbc5RumbleRam),
            0x1E => Ok(Self::Mbc5RumbleRamBattery),
            0xFC => Ok(Self::PocketCamera),
            0xFD => Ok(Self::BandaiTama5),
            0xFE => Ok(Self::HudsonHuc3),
            0xFF => Ok(Self::HudsonHuc1),
            _ => Err(CartridgeError::UnknownKind(value)),
        }
    }
}

/// Parsed cartridge header fields.
#[derive(Debug, Clone)]
pub struct Header {
    pub kind: CartridgeKind,
    pub rom_size: usize,
    pub ram_size: usize,
    pub title: String,
}

impl Header {
    pub fn parse(image: &[u8]) -> Result<Self, CartridgeError> {
        if image.len() < MIN_IMAGE_SIZE {
            return Err(CartridgeError::TooShort(image.len()));
        }

        let kind = CartridgeKind::try_from(image[KIND_OFFSET])?;
        let title_bytes = &image[TITLE_RANGE];
        let end = title_bytes.iter().position(|&b| b == 0).unwrap_or(16);
        let title = String::from_utf8_lossy(&title_bytes[..end]).into_owned();

        Ok(Self {
            kind,
            rom_size: rom_size_bytes(image[ROM_SIZE_OFFSET]),
            ram_size: ram_size_bytes(image[RAM_SIZE_OFFSET]),
            title,
        })
    }
}

const fn rom_size_bytes(code: u8) -> usize {
    match code {
        0x01 => 64 * 1024,
        0x02 => 128 * 1024,
        0x03 => 256 * 1024,
        0x04 => 512 * 1024,
        0x05 => 1024 * 1024,
        0x06 => 2048 * 1024,
        0x07 => 4096 * 1024,
        0x08 => 8192 * 1024,
        // 0x00 and anything unrecognised: the two fixed 16KB banks
        _ => 32 * 1024,
    }
}

const fn ram_size_bytes(code: u8) -> usize {
    match code {
        0x01 => 2 * 1024,
        0x02 => 8 * 1024,
        0x03 => 32 * 1024,
        0x04 => 128 * 1024,
        0x05 => 64 * 1024,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image_with(kind: u8, title: &[u8]) -> Vec<u8> {
        let mut image = vec![0u8; 0x8000];
        image[KIND_OFFSET] = kind;
        image[TITLE_RANGE][..title.len()].copy_from_slice(title);
        image
    }

    #[test]
    fn parses_rom_only_header() {
        let image = image_with(0x00, b"POCKETTEST");
        let header = Header::parse(&image).unwrap();
        assert_eq!(header.kind, CartridgeKind::RomOnly);
        assert_eq!(header.title, "POCKETTEST");
        assert_eq!(header.rom_size, 32 * 1024);
        assert_eq!(header.ram_size, 0);
    }

    #[test]
    fn refuses_truncated_image() {
        let image = vec![0u8; 0x100];
        assert!(matches!(
            Header::parse(&image),
            Err(CartridgeError::TooShort(0x100))
        ));
    }

    #[test]
    fn names_banked_kinds() {
        let image = image_with(0x13, b"MBC3GAME");
        let header = Header::parse(&image).unwrap();
        assert_eq!(header.kind, CartridgeKind::Mbc3RamBattery);
    }

    #[test]
    fn rejects_unknown_type_byte() {
        let image = image_with(0x42, b"BROKEN");
        assert!(matches!(
            Header::parse(&image),
            Err(CartridgeError::UnknownKind(0x42))
        ));
    }

    #[test]
    fn decodes_size_codes() {
        let mut image = image_with(0x00, b"SIZES");
        image[ROM_SIZE_OFFSET] = 0x05;
        image[RAM_SIZE_OFFSET] = 0x03;
        let header = Header::parse(&image).unwrap();
        assert_eq!(header.rom_size, 1024 * 1024);
        assert_eq!(header.ram_size, 32 * 1024);
    }
}
