// Common test utilities for machine-level integration tests
//
// Builds iNES images in memory and boots machines from them, so the tests
// need no ROM files on disk.

#![allow(dead_code)]

use famicore::{Cartridge, Nes, NesConfig};

/// Dots per NTSC frame, for frame-sized run loops
pub const DOTS_PER_FRAME: u32 = 341 * 262;

/// Build a minimal mapper-0 iNES image
///
/// `program` is placed at the start of a 16 KiB PRG bank (mapped at $8000
/// and mirrored at $C000); the reset vector points at $8000. `chr` seeds
/// the start of the 8 KiB CHR bank.
pub fn build_ines(program: &[u8], chr: &[u8]) -> Vec<u8> {
    assert!(program.len() <= 16 * 1024, "program exceeds one PRG bank");
    assert!(chr.len() <= 8 * 1024, "chr exceeds one bank");

    let mut prg = vec![0x00; 16 * 1024];
    prg[..program.len()].copy_from_slice(program);
    // Reset vector: $8000 (offset $3FFC within the bank)
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;

    let mut chr_bank = vec![0x00; 8 * 1024];
    chr_bank[..chr.len()].copy_from_slice(chr);

    let mut image = vec![0x4E, 0x45, 0x53, 0x1A, 0x01, 0x01, 0x00, 0x00];
    image.extend_from_slice(&[0u8; 8]);
    image.extend_from_slice(&prg);
    image.extend_from_slice(&chr_bank);
    image
}

/// Build an image like `build_ines`, with the NMI vector set as well
pub fn build_ines_with_nmi(program: &[u8], chr: &[u8], nmi: u16) -> Vec<u8> {
    let mut image = build_ines(program, chr);
    // NMI vector at PRG offset $3FFA, past the 16-byte header
    image[16 + 0x3FFA] = (nmi & 0xFF) as u8;
    image[16 + 0x3FFB] = (nmi >> 8) as u8;
    image
}

/// Boot a machine from a prebuilt iNES image
pub fn boot_image(image: &[u8]) -> Nes {
    let cartridge = Cartridge::from_ines_bytes(image).expect("test image is valid");

    let mut config = NesConfig::default();
    config.clock.yield_delay_ms = 0;
    let mut nes = Nes::with_config(config);
    nes.insert_cartridge(&cartridge);
    nes
}

/// Boot a machine from an in-memory program
pub fn boot(program: &[u8], chr: &[u8]) -> Nes {
    let image = build_ines(program, chr);
    let cartridge = Cartridge::from_ines_bytes(&image).expect("test image is valid");

    let mut config = NesConfig::default();
    config.clock.yield_delay_ms = 0;
    let mut nes = Nes::with_config(config);
    nes.insert_cartridge(&cartridge);
    nes
}

/// Run master clock steps until the PPU reaches (scanline, cycle)
pub fn run_to_dot(nes: &mut Nes, scanline: u16, cycle: u16) {
    for _ in 0..(DOTS_PER_FRAME * 2 + 8) {
        {
            let ppu = nes.ppu();
            if ppu.scanline() == scanline && ppu.cycle() == cycle {
                return;
            }
        }
        nes.step();
    }
    panic!("machine never reached scanline {} cycle {}", scanline, cycle);
}
