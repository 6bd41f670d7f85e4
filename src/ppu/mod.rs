// PPU module - 2C02 Picture Processing Unit (NTSC)
//
// The PPU is driven by the master clock at divider 1 and walks an NTSC
// frame dot by dot: 341 cycles per scanline, 262 scanlines per frame.
// Scanlines 0-239 are visible, 240 is post-render, 241-260 are vertical
// blank, 261 is pre-render. Background pixels derive from the nametable,
// pattern table, and attribute table on the PPU's own bus; sprite state
// (OAM) exists only behind its registers and does not render.
//
// ## Register Map (CPU bus, $2000-$2007 mirrored through $3FFF)
//
// | Address | Name       | Access  | Description                    |
// |---------|------------|---------|--------------------------------|
// | $2000   | PPUCTRL    | Write   | NMI enable, increment, tables  |
// | $2001   | PPUMASK    | Write   | Render enables, emphasis       |
// | $2002   | PPUSTATUS  | Read    | VBlank/sprite flags            |
// | $2003   | OAMADDR    | Write   | OAM address                    |
// | $2004   | OAMDATA    | R/W     | OAM data                       |
// | $2005   | PPUSCROLL  | Write×2 | Scroll position                |
// | $2006   | PPUADDR    | Write×2 | VRAM address                   |
// | $2007   | PPUDATA    | R/W     | VRAM data, buffered reads      |

mod constants;
mod registers;
mod rendering;

#[cfg(test)]
mod tests;

use crate::bus::{Addressable, Bus, Window};
use crate::interrupt::InterruptLine;
use crate::video::{FrameBuffer, VideoSink};
use constants::*;

/// PPU structure: register file, dot counters, and the VRAM bus
pub struct Ppu {
    // ========================================
    // Register File
    // ========================================
    /// $2000: PPUCTRL
    ctrl: u8,

    /// $2001: PPUMASK
    mask: u8,

    /// $2002: PPUSTATUS (top three bits; the rest reads from the data latch)
    status: u8,

    /// $2003: OAM address
    oam_addr: u8,

    /// Object attribute memory, reachable through $2003/$2004 only
    oam: [u8; 256],

    /// Scroll position latched by the PPUSCROLL write pair
    scroll_x: u8,
    scroll_y: u8,

    // ========================================
    // VRAM Access State
    // ========================================
    /// Current VRAM address used by PPUDATA
    vram_address: u16,

    /// High byte captured by the first PPUADDR write
    addr_latch: u8,

    /// Write toggle shared by PPUSCROLL and PPUADDR: true once the first
    /// write of a pair has landed. A boolean, so a first write of $00 is
    /// still a first write.
    write_latch: bool,

    /// PPUDATA read buffer: reads below the palettes lag one access behind
    read_buffer: u8,

    // ========================================
    // Timing
    // ========================================
    /// Current scanline (0-261)
    scanline: u16,

    /// Current dot within the scanline (0-340)
    cycle: u16,

    /// Frames completed since reset
    frame: u64,

    // ========================================
    // Output
    // ========================================
    /// The PPU-side bus: pattern tables, nametables, palette RAM
    vram: Bus,

    /// NMI line shared with the CPU
    nmi_line: InterruptLine,

    /// Rendered frame, presented at VBlank start
    frame_buffer: FrameBuffer,

    /// Host pixel sink, if installed
    sink: Option<Box<dyn VideoSink>>,

    /// CPU-side register window
    window: Window,
}

impl Ppu {
    /// Create a PPU over the given VRAM bus and NMI line
    pub fn new(vram: Bus, nmi_line: InterruptLine) -> Self {
        Ppu {
            ctrl: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,
            oam: [0; 256],
            scroll_x: 0,
            scroll_y: 0,
            vram_address: 0,
            addr_latch: 0,
            write_latch: false,
            read_buffer: 0,
            scanline: 0,
            cycle: 0,
            frame: 0,
            vram,
            nmi_line,
            frame_buffer: FrameBuffer::new(),
            sink: None,
            window: Window::mirrored(0x2000, 0x2007, 0x3FFF),
        }
    }

    /// Reset the PPU to its power-on state
    ///
    /// Clears the register file, the dot counters, and the frame buffer.
    /// VRAM contents are left alone; the cartridge owns the pattern tables.
    pub fn reset(&mut self) {
        self.ctrl = 0;
        self.mask = 0;
        self.status = 0;
        self.oam_addr = 0;
        self.scroll_x = 0;
        self.scroll_y = 0;
        self.vram_address = 0;
        self.addr_latch = 0;
        self.write_latch = false;
        self.read_buffer = 0;
        self.scanline = 0;
        self.cycle = 0;
        self.frame = 0;
        self.frame_buffer.clear(0x0F);
    }

    /// Advance the PPU by one dot
    ///
    /// Runs the per-dot state machine: shade a visible pixel, manage the
    /// status flags at the VBlank and pre-render boundaries, then advance
    /// the dot counters, wrapping at (340, 261).
    pub fn tick(&mut self) {
        if self.scanline <= LAST_VISIBLE_SCANLINE && (1..=256).contains(&self.cycle) {
            if self.mask & mask::SHOW_BACKGROUND != 0 {
                let x = (self.cycle - 1) as usize;
                let y = self.scanline as usize;
                self.render_pixel(x, y);
            }
        }

        if self.scanline == PRERENDER_SCANLINE && self.cycle == 0 {
            self.status &= !(status::SPRITE_ZERO_HIT | status::SPRITE_OVERFLOW);
        }

        if self.scanline == VBLANK_SCANLINE && self.cycle == 1 {
            self.status |= status::VBLANK;
            if self.ctrl & ctrl::NMI_ENABLE != 0 {
                self.nmi_line.raise();
            }
            if let Some(sink) = self.sink.as_mut() {
                sink.present(&self.frame_buffer);
            }
        }

        if self.scanline == PRERENDER_SCANLINE && self.cycle == 1 {
            self.status &= !status::VBLANK;
        }

        self.cycle += 1;
        if self.cycle >= CYCLES_PER_SCANLINE {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline >= SCANLINES_PER_FRAME {
                self.scanline = 0;
                self.frame += 1;
            }
        }
    }

    /// Install the host pixel sink
    pub fn set_video_sink(&mut self, sink: Box<dyn VideoSink>) {
        self.sink = Some(sink);
    }

    /// Current scanline (0-261)
    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    /// Current dot within the scanline (0-340)
    pub fn cycle(&self) -> u16 {
        self.cycle
    }

    /// Frames completed since reset
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// The rendered frame
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Whether the VBlank flag is currently set
    pub fn in_vblank(&self) -> bool {
        self.status & status::VBLANK != 0
    }

    /// Scroll position latched by the PPUSCROLL write pair
    pub fn scroll(&self) -> (u8, u8) {
        (self.scroll_x, self.scroll_y)
    }

    /// Direct access to the PPU-side bus
    ///
    /// Used by the system owner when wiring the cartridge's CHR region and
    /// by tests seeding VRAM.
    pub fn vram_mut(&mut self) -> &mut Bus {
        &mut self.vram
    }
}

impl Addressable for Ppu {
    fn window(&self) -> Window {
        self.window
    }

    fn read(&mut self, addr: u16) -> u8 {
        let register = self.window.offset(addr) as u16;
        self.read_register(register)
    }

    fn write(&mut self, addr: u16, data: u8) {
        let register = self.window.offset(addr) as u16;
        self.write_register(register, data);
    }
}
