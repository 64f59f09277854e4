//! ROM Loading
//!
//! File-loading collaborator. Produces the flat byte buffers the core
//! borrows: a 256-byte boot image and a cartridge image sized to a
//! multiple of 16 KiB. The buffers are validated here once; the core
//! itself never re-checks them. No header fields are interpreted.

use crate::memory::{BOOT_ROM_SIZE, ROM_BANK_SIZE};
use log::info;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RomError {
    #[error("failed to read ROM file: {0}")]
    Io(#[from] std::io::Error),
    #[error("boot ROM must be exactly 256 bytes, got {0}")]
    BootRomSize(usize),
    #[error("cartridge ROM must be a non-empty multiple of 16384 bytes, got {0}")]
    CartridgeSize(usize),
}

/// Load a boot ROM image
pub fn load_boot_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, RomError> {
    let buffer = fs::read(path)?;
    if buffer.len() != BOOT_ROM_SIZE {
        return Err(RomError::BootRomSize(buffer.len()));
    }
    Ok(buffer)
}

/// Load a cartridge ROM image
pub fn load_cartridge_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, RomError> {
    let buffer = fs::read(path)?;
    if buffer.is_empty() || buffer.len() % ROM_BANK_SIZE != 0 {
        return Err(RomError::CartridgeSize(buffer.len()));
    }
    info!(
        "cartridge image loaded: {} bytes, {} banks",
        buffer.len(),
        buffer.len() / ROM_BANK_SIZE
    );
    Ok(buffer)
}

/// Number of 16 KiB banks in a loaded cartridge image
pub fn bank_count(rom: &[u8]) -> usize {
    rom.len() / ROM_BANK_SIZE
}

/// One 16 KiB bank of a loaded cartridge image
pub fn bank(rom: &[u8], index: usize) -> &[u8] {
    &rom[index * ROM_BANK_SIZE..(index + 1) * ROM_BANK_SIZE]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_slicing() {
        let mut rom = vec![0u8; ROM_BANK_SIZE * 2];
        rom[0] = 0xAA;
        rom[ROM_BANK_SIZE] = 0xBB;

        assert_eq!(bank_count(&rom), 2);
        assert_eq!(bank(&rom, 0)[0], 0xAA);
        assert_eq!(bank(&rom, 1)[0], 0xBB);
        assert_eq!(bank(&rom, 1).len(), ROM_BANK_SIZE);
    }

    #[test]
    fn test_boot_rom_size_check() {
        let dir = std::env::temp_dir();
        let path = dir.join("gbcore_boot_short.bin");
        fs::write(&path, [0u8; 100]).unwrap();

        match load_boot_rom(&path) {
            Err(RomError::BootRomSize(100)) => {}
            other => panic!("unexpected result: {:?}", other.map(|b| b.len())),
        }
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_cartridge_size_check() {
        let dir = std::env::temp_dir();
        let path = dir.join("gbcore_cart_odd.bin");
        fs::write(&path, [0u8; 1000]).unwrap();

        assert!(matches!(
            load_cartridge_rom(&path),
            Err(RomError::CartridgeSize(1000))
        ));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_valid_cartridge_loads() {
        let dir = std::env::temp_dir();
        let path = dir.join("gbcore_cart_ok.bin");
        fs::write(&path, vec![0u8; ROM_BANK_SIZE * 2]).unwrap();

        let rom = load_cartridge_rom(&path).unwrap();
        assert_eq!(bank_count(&rom), 2);
        fs::remove_file(&path).ok();
    }
}
