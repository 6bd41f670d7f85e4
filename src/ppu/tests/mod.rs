//! PPU unit tests, organized by concern

mod registers;

use super::Ppu;
use crate::bus::{Addressable, Bus, Window};
use crate::interrupt::InterruptLine;
use crate::ram::Ram;
use std::cell::RefCell;
use std::rc::Rc;

// ========================================
// Test Constants (register addresses)
// ========================================

const PPUCTRL: u16 = 0x2000;
const PPUMASK: u16 = 0x2001;
const PPUSTATUS: u16 = 0x2002;
const OAMADDR: u16 = 0x2003;
const OAMDATA: u16 = 0x2004;
const PPUSCROLL: u16 = 0x2005;
const PPUADDR: u16 = 0x2006;
const PPUDATA: u16 = 0x2007;

// ========================================
// Test Helpers
// ========================================

/// Build a PPU whose pattern table space is RAM, so tests can seed tiles
/// through the data port
fn test_ppu() -> (Ppu, InterruptLine) {
    let mut vram = Bus::new();
    vram.attach(Rc::new(RefCell::new(Ram::new(Window::span(
        0x0000, 0x1FFF,
    )))));
    vram.attach(Rc::new(RefCell::new(Ram::new(Window::mirrored(
        0x2000, 0x2FFF, 0x3EFF,
    )))));
    vram.attach(Rc::new(RefCell::new(Ram::new(Window::mirrored(
        0x3F00, 0x3F1F, 0x3FFF,
    )))));

    let line = InterruptLine::new();
    (Ppu::new(vram, line.clone()), line)
}

/// Point the VRAM address at `addr` through the PPUADDR write pair
fn set_vram_address(ppu: &mut Ppu, addr: u16) {
    ppu.write(PPUADDR, (addr >> 8) as u8);
    ppu.write(PPUADDR, (addr & 0xFF) as u8);
}

/// Store one byte into VRAM through the register file
fn poke_vram(ppu: &mut Ppu, addr: u16, data: u8) {
    set_vram_address(ppu, addr);
    ppu.write(PPUDATA, data);
}

/// Tick until the PPU sits at the given (scanline, cycle)
fn run_to(ppu: &mut Ppu, scanline: u16, cycle: u16) {
    // Two frames is more than any test needs; a miss is a bug
    for _ in 0..(341 * 262 * 2) {
        if ppu.scanline() == scanline && ppu.cycle() == cycle {
            return;
        }
        ppu.tick();
    }
    panic!("PPU never reached scanline {} cycle {}", scanline, cycle);
}
