//! Memory Subsystem
//!
//! Translates 16-bit addresses to concrete storage across the boot-ROM
//! overlay, cartridge ROM banks, video RAM, static RAM (with its echo
//! region), object-attribute memory, I/O ports, and high RAM. ROM images
//! are borrowed, non-owning views over buffers loaded by the frontend;
//! the loader owns them and must keep them alive for the session.
//!
//! Every address resolves to exactly one outcome: a byte slot, an echo
//! alias of static RAM, or unmapped. Unmapped reads yield the open-bus
//! pattern and unmapped writes are discarded.

use crate::common::{high_byte, low_byte, word, Byte, SByte, Word};
use log::info;

/// Capacity of the cartridge ROM bank array (128 * 16 KiB = 2 MiB)
pub const ROM_BANK_COUNT: usize = 128;

/// Size of one cartridge ROM bank
pub const ROM_BANK_SIZE: usize = 0x4000;

/// Size of the boot ROM image
pub const BOOT_ROM_SIZE: usize = 0x100;

/// Value returned when reading an address with no mapped storage
pub const OPEN_BUS: Byte = 0xFF;

const VRAM_SIZE: usize = 0x2000;
const SRAM_SIZE: usize = 0x2000;
const OAM_SIZE: usize = 0xA0;
const HRAM_SIZE: usize = 0x80;
const IO_SIZE: usize = 0x80;

/// Byte-granular access to the 16-bit address space.
///
/// 16-bit accesses are little-endian and always performed as two
/// independent byte accesses; there is no atomicity across the pair.
pub trait AddressSpace {
    /// Read a byte from the given address
    fn read_u8(&self, address: Word) -> Byte;

    /// Write a byte to the given address
    fn write_u8(&mut self, address: Word, value: Byte);

    /// Read a signed byte; an unmapped address reads as -1
    fn read_s8(&self, address: Word) -> SByte {
        self.read_u8(address) as SByte
    }

    /// Read a 16-bit word (low byte at `address`, high byte at `address + 1`)
    fn read_u16(&self, address: Word) -> Word {
        let lo = self.read_u8(address);
        let hi = self.read_u8(address.wrapping_add(1));
        word(hi, lo)
    }

    /// Write a 16-bit word (low byte at `address`, high byte at `address + 1`)
    fn write_u16(&mut self, address: Word, value: Word) {
        self.write_u8(address, low_byte(value));
        self.write_u8(address.wrapping_add(1), high_byte(value));
    }
}

/// Named I/O registers, for collaborators that would otherwise hard-code
/// port offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoRegister {
    Joypad,
    Serial,
    Timer,
    Sound,
    Video,
    InterruptFlag,
    InterruptEnable,
    BootControl,
}

/// Address a named register responds at.
///
/// The interrupt-enable register sits at 0xFFFF, which translation
/// resolves into the last high-RAM slot rather than the I/O port block.
pub fn register_address(reg: IoRegister) -> Word {
    match reg {
        IoRegister::Joypad => 0xFF00,
        IoRegister::Serial => 0xFF01,
        IoRegister::Timer => 0xFF04,
        IoRegister::Sound => 0xFF10,
        IoRegister::Video => 0xFF40,
        IoRegister::InterruptFlag => 0xFF0F,
        IoRegister::InterruptEnable => 0xFFFF,
        IoRegister::BootControl => 0xFF50,
    }
}

/// Outcome of translating a 16-bit address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Boot ROM overlay (active while boot-control bit 0 is clear)
    BootRom(usize),
    /// Cartridge ROM bank; bank 0 is fixed, the 0x4000 window follows `rom_index`
    RomBank { bank: usize, offset: usize },
    /// Video RAM
    VideoRam(usize),
    /// External cartridge RAM window; banking is not yet supported, so the
    /// whole range behaves as unmapped
    ExternalRam { bank: usize, offset: usize },
    /// On-board static RAM; the echo range folds into the same storage
    StaticRam(usize),
    /// Object-attribute memory
    ObjectRam(usize),
    /// I/O port marked accessible in the port map
    IoPort(usize),
    /// High RAM (includes the interrupt-enable register at the top slot)
    HighRam(usize),
    /// No storage responds at this address
    Unmapped,
}

// Accessibility of each I/O port offset; unmarked offsets behave as
// unmapped storage.
#[rustfmt::skip]
const IO_PORTS_MAP: [bool; IO_SIZE] = [
    //  00     01     02     03     04     05     06     07     08     09     0A     0B     0C     0D     0E     0F
     true,  true,  true, false,  true,  true,  true,  true, false, false, false, false, false, false, false,  true, // 0xFF00
     true,  true,  true,  true,  true, false,  true,  true,  true,  true,  true,  true,  true,  true,  true, false, // 0xFF10
     true,  true,  true,  true,  true,  true,  true, false, false, false, false, false, false, false, false, false, // 0xFF20
     true,  true,  true,  true,  true,  true,  true,  true,  true,  true,  true,  true,  true,  true,  true,  true, // 0xFF30
     true,  true,  true,  true,  true,  true,  true,  true,  true,  true,  true,  true, false, false, false, false, // 0xFF40
     true, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, // 0xFF50
    false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, // 0xFF60
    false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, // 0xFF70
];

/// Memory subsystem
///
/// Owns all on-board storage and the bank-selection indices; borrows the
/// ROM images. `rom_index`/`ram_index` are written by the (external)
/// bank controller and only read here during translation.
pub struct Memory<'a> {
    boot_rom: Option<&'a [u8]>,
    rom_banks: [Option<&'a [u8]>; ROM_BANK_COUNT],
    /// Bank windowed at 0x4000-0x7FFF
    pub rom_index: Byte,
    /// Bank windowed at 0xA000-0xBFFF (window currently unmapped)
    pub ram_index: Byte,
    vram: [Byte; VRAM_SIZE],
    sram: [Byte; SRAM_SIZE],
    oam: [Byte; OAM_SIZE],
    hram: [Byte; HRAM_SIZE],
    io_ports: [Byte; IO_SIZE],
}

impl Default for Memory<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Memory<'a> {
    /// Create a new memory subsystem with all on-board storage zeroed and
    /// no ROM images installed
    pub fn new() -> Self {
        let mut mem = Self {
            boot_rom: None,
            rom_banks: [None; ROM_BANK_COUNT],
            rom_index: 0,
            ram_index: 0,
            vram: [0; VRAM_SIZE],
            sram: [0; SRAM_SIZE],
            oam: [0; OAM_SIZE],
            hram: [0; HRAM_SIZE],
            io_ports: [0; IO_SIZE],
        };
        mem.init();
        mem
    }

    /// Set default bank indices and arm the boot-ROM overlay
    pub fn init(&mut self) {
        self.rom_index = 1;
        self.ram_index = 0;
        // Boot overlay stays active until the boot program sets bit 0.
        self.io_ports[0x50] = 0;
    }

    fn boot_enabled(&self) -> bool {
        self.io_ports[0x50] & 0x01 == 0
    }

    /// Resolve an address to its storage location; first matching range wins
    pub fn translate(&self, address: Word) -> Target {
        match address {
            0x0000..=0x00FF if self.boot_enabled() => Target::BootRom(address as usize),
            0x0000..=0x3FFF => Target::RomBank {
                bank: 0,
                offset: address as usize,
            },
            0x4000..=0x7FFF => Target::RomBank {
                bank: self.rom_index as usize % ROM_BANK_COUNT,
                offset: (address - 0x4000) as usize,
            },
            0x8000..=0x9FFF => Target::VideoRam((address - 0x8000) as usize),
            0xA000..=0xBFFF => Target::ExternalRam {
                bank: self.ram_index as usize,
                offset: (address - 0xA000) as usize,
            },
            0xC000..=0xDFFF => Target::StaticRam((address - 0xC000) as usize),
            // Echo of static RAM: same storage, different window
            0xE000..=0xFDFF => Target::StaticRam((address - 0xE000) as usize),
            0xFE00..=0xFE9F => Target::ObjectRam((address - 0xFE00) as usize),
            0xFEA0..=0xFEFF => Target::Unmapped,
            0xFF00..=0xFF7F => {
                let offset = (address - 0xFF00) as usize;
                if IO_PORTS_MAP[offset] {
                    Target::IoPort(offset)
                } else {
                    Target::Unmapped
                }
            }
            0xFF80..=0xFFFF => Target::HighRam((address - 0xFF80) as usize),
        }
    }

    /// Install the boot ROM image; the caller keeps ownership
    pub fn set_boot_rom(&mut self, buffer: &'a [u8]) {
        info!("boot ROM installed ({} bytes)", buffer.len());
        self.boot_rom = Some(buffer);
    }

    /// Install a cartridge ROM bank; the caller keeps ownership.
    /// The index is reduced modulo the bank-array capacity.
    pub fn set_cartridge_rom(&mut self, buffer: &'a [u8], bank: usize) {
        let bank = bank % ROM_BANK_COUNT;
        info!("cartridge ROM bank {} installed ({} bytes)", bank, buffer.len());
        self.rom_banks[bank] = Some(buffer);
    }

    /// Raw video RAM handle for the rendering collaborator
    pub fn video_ram(&self) -> &[Byte] {
        &self.vram
    }

    /// Raw object-attribute memory handle for the rendering collaborator
    pub fn object_memory(&self) -> &[Byte] {
        &self.oam
    }

    /// Read a named I/O register
    pub fn read_register(&self, reg: IoRegister) -> Byte {
        self.read_u8(register_address(reg))
    }

    /// Write a named I/O register
    pub fn write_register(&mut self, reg: IoRegister, value: Byte) {
        self.write_u8(register_address(reg), value);
    }
}

impl AddressSpace for Memory<'_> {
    fn read_u8(&self, address: Word) -> Byte {
        match self.translate(address) {
            Target::BootRom(offset) => self
                .boot_rom
                .and_then(|rom| rom.get(offset).copied())
                .unwrap_or(OPEN_BUS),
            Target::RomBank { bank, offset } => self.rom_banks[bank]
                .and_then(|rom| rom.get(offset).copied())
                .unwrap_or(OPEN_BUS),
            Target::VideoRam(offset) => self.vram[offset],
            Target::ExternalRam { .. } => OPEN_BUS,
            Target::StaticRam(offset) => self.sram[offset],
            Target::ObjectRam(offset) => self.oam[offset],
            Target::IoPort(offset) => self.io_ports[offset],
            Target::HighRam(offset) => self.hram[offset],
            Target::Unmapped => OPEN_BUS,
        }
    }

    fn write_u8(&mut self, address: Word, value: Byte) {
        match self.translate(address) {
            // ROM storage is read-only; bank-switch triggering on ROM
            // writes belongs to the external bank controller.
            Target::BootRom(_) | Target::RomBank { .. } => {}
            Target::VideoRam(offset) => self.vram[offset] = value,
            Target::ExternalRam { .. } | Target::Unmapped => {}
            Target::StaticRam(offset) => self.sram[offset] = value,
            Target::ObjectRam(offset) => self.oam[offset] = value,
            Target::IoPort(offset) => self.io_ports[offset] = value,
            Target::HighRam(offset) => self.hram[offset] = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fixed_rom_bank_translation() {
        let mut mem = Memory::new();
        mem.write_register(IoRegister::BootControl, 1);
        assert_eq!(
            mem.translate(0x0150),
            Target::RomBank {
                bank: 0,
                offset: 0x0150
            }
        );
    }

    #[test]
    fn test_switchable_rom_bank_translation() {
        let mut mem = Memory::new();
        mem.rom_index = 2;
        assert_eq!(
            mem.translate(0x4500),
            Target::RomBank {
                bank: 2,
                offset: 0x0500
            }
        );
    }

    #[test]
    fn test_switchable_bank_read() {
        let mut mem = Memory::new();
        let mut bank2 = [0u8; ROM_BANK_SIZE];
        bank2[0x0500] = 0x77;
        mem.set_cartridge_rom(&bank2, 2);
        mem.rom_index = 2;
        assert_eq!(mem.read_u8(0x4500), 0x77);
    }

    #[test]
    fn test_missing_bank_is_open_bus() {
        let mut mem = Memory::new();
        mem.rom_index = 5;
        assert_eq!(mem.read_u8(0x4000), OPEN_BUS);
        // Writes into the ROM window never touch other storage
        mem.write_u8(0x4000, 0x12);
        assert_eq!(mem.read_u8(0x4000), OPEN_BUS);
    }

    #[test]
    fn test_boot_overlay() {
        let mut mem = Memory::new();
        let mut boot = [0u8; BOOT_ROM_SIZE];
        boot[0x50] = 0xAB;
        let mut bank0 = [0u8; ROM_BANK_SIZE];
        bank0[0x50] = 0xCD;
        mem.set_boot_rom(&boot);
        mem.set_cartridge_rom(&bank0, 0);

        // Overlay armed: low reads hit the boot ROM
        assert_eq!(mem.read_u8(0x0050), 0xAB);

        // Disabling the overlay reveals the cartridge
        mem.write_register(IoRegister::BootControl, 1);
        assert_eq!(mem.read_u8(0x0050), 0xCD);
    }

    #[test]
    fn test_echo_aliases_static_ram() {
        let mut mem = Memory::new();

        mem.write_u8(0xC010, 0x42);
        assert_eq!(mem.read_u8(0xE010), 0x42);

        mem.write_u8(0xE777, 0x99);
        assert_eq!(mem.read_u8(0xC777), 0x99);
    }

    #[test]
    fn test_external_ram_window_unmapped() {
        let mut mem = Memory::new();
        assert_eq!(mem.read_u8(0xA000), OPEN_BUS);
        mem.write_u8(0xA123, 0x55);
        assert_eq!(mem.read_u8(0xA123), OPEN_BUS);
    }

    #[test]
    fn test_external_ram_translation_tracks_ram_index() {
        let mut mem = Memory::new();
        mem.ram_index = 3;
        match mem.translate(0xA123) {
            Target::ExternalRam { bank, offset } => {
                assert_eq!(bank, 3);
                assert_eq!(offset, 0x123);
            }
            other => panic!("unexpected target: {:?}", other),
        }
    }

    #[test]
    fn test_unusable_gap() {
        let mut mem = Memory::new();
        assert_eq!(mem.read_u8(0xFEA0), OPEN_BUS);
        assert_eq!(mem.read_u8(0xFEFF), OPEN_BUS);

        // A write into the gap lands nowhere
        mem.write_u8(0xFEA0, 0x11);
        assert_eq!(mem.read_u8(0xFEA0), OPEN_BUS);
        assert_eq!(mem.read_u8(0xFE00), 0);
        assert_eq!(mem.read_u8(0xFF00), 0);
    }

    #[test]
    fn test_io_port_accessibility() {
        let mut mem = Memory::new();

        // 0xFF04 (timer divider) is marked accessible
        mem.write_u8(0xFF04, 0x5A);
        assert_eq!(mem.read_u8(0xFF04), 0x5A);

        // 0xFF03 is not; it behaves as open bus
        mem.write_u8(0xFF03, 0x5A);
        assert_eq!(mem.read_u8(0xFF03), OPEN_BUS);
    }

    #[test]
    fn test_high_ram_and_interrupt_enable() {
        let mut mem = Memory::new();

        mem.write_u8(0xFF80, 0x12);
        assert_eq!(mem.read_u8(0xFF80), 0x12);

        // IE lives at the top of high RAM
        mem.write_u8(0xFFFF, 0x1F);
        assert_eq!(mem.read_register(IoRegister::InterruptEnable), 0x1F);
    }

    #[test]
    fn test_word_access_little_endian() {
        let mut mem = Memory::new();

        mem.write_u16(0xC000, 0x1234);
        assert_eq!(mem.read_u8(0xC000), 0x34);
        assert_eq!(mem.read_u8(0xC001), 0x12);
        assert_eq!(mem.read_u16(0xC000), 0x1234);
    }

    #[test]
    fn test_unmapped_read_values() {
        let mem = Memory::new();
        assert_eq!(mem.read_u8(0xFEA5), 0xFF);
        assert_eq!(mem.read_s8(0xFEA5), -1);
        assert_eq!(mem.read_u16(0xFEA5), 0xFFFF);
    }

    #[test]
    fn test_register_addresses() {
        assert_eq!(register_address(IoRegister::Joypad), 0xFF00);
        assert_eq!(register_address(IoRegister::Serial), 0xFF01);
        assert_eq!(register_address(IoRegister::Timer), 0xFF04);
        assert_eq!(register_address(IoRegister::Sound), 0xFF10);
        assert_eq!(register_address(IoRegister::Video), 0xFF40);
        assert_eq!(register_address(IoRegister::InterruptFlag), 0xFF0F);
        assert_eq!(register_address(IoRegister::InterruptEnable), 0xFFFF);
        assert_eq!(register_address(IoRegister::BootControl), 0xFF50);
    }

    proptest! {
        #[test]
        fn every_address_translates_to_one_target(address: u16) {
            let mem = Memory::new();
            // translate is total; a second lookup is stable
            let target = mem.translate(address);
            prop_assert_eq!(mem.translate(address), target);
        }

        #[test]
        fn echo_mirrors_both_directions(offset in 0u16..0x1E00, value: u8) {
            let mut mem = Memory::new();
            mem.write_u8(0xC000 + offset, value);
            prop_assert_eq!(mem.read_u8(0xE000 + offset), value);
        }

        #[test]
        fn gap_reads_open_bus(address in 0xFEA0u16..=0xFEFF) {
            let mem = Memory::new();
            prop_assert_eq!(mem.read_u8(address), OPEN_BUS);
        }
    }
}
