//! Game Boy Core Emulator - Entry Point
//!
//! Loads the boot and cartridge ROM images, installs them into the core,
//! and hands control to the SDL2 window loop.

use gbcore::emu::Emulator;
use gbcore::rom;
use gbcore::ui::Ui;
use log::info;
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <boot_rom> <cartridge_rom>", args[0]);
        process::exit(1);
    }

    let boot = match rom::load_boot_rom(&args[1]) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("Failed to load boot ROM: {}", e);
            process::exit(1);
        }
    };

    let cart = match rom::load_cartridge_rom(&args[2]) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("Failed to load cartridge ROM: {}", e);
            process::exit(1);
        }
    };

    let mut emu = Emulator::new();
    emu.set_boot_rom(&boot);
    for index in 0..rom::bank_count(&cart) {
        emu.set_cartridge_rom(rom::bank(&cart, index), index);
    }

    info!("starting emulation");
    let result = match Ui::new() {
        Ok(mut ui) => ui.run(&mut emu),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Emulator error: {}", e);
        process::exit(1);
    }
}
