// PPU constants

/// PPUCTRL ($2000) bit assignments
pub(super) mod ctrl {
    /// Bit 7: generate NMI at the start of VBlank
    pub const NMI_ENABLE: u8 = 0x80;
    /// Bit 6: PPU master/slave select (unused here)
    #[allow(dead_code)]
    pub const MASTER_SLAVE: u8 = 0x40;
    /// Bit 5: sprite height (8x16 when set)
    #[allow(dead_code)]
    pub const SPRITE_HEIGHT: u8 = 0x20;
    /// Bit 4: background pattern table ($1000 when set)
    pub const BACKGROUND_TABLE: u8 = 0x10;
    /// Bit 3: sprite pattern table ($1000 when set)
    #[allow(dead_code)]
    pub const SPRITE_TABLE: u8 = 0x08;
    /// Bit 2: VRAM address increment (+32 when set, +1 otherwise)
    pub const INCREMENT_32: u8 = 0x04;
    /// Bits 1-0: base nametable select
    pub const NAMETABLE_SELECT: u8 = 0x03;
}

/// PPUMASK ($2001) bit assignments
pub(super) mod mask {
    /// Bit 4: show sprites
    #[allow(dead_code)]
    pub const SHOW_SPRITES: u8 = 0x10;
    /// Bit 3: show background
    pub const SHOW_BACKGROUND: u8 = 0x08;
}

/// PPUSTATUS ($2002) bit assignments
pub(super) mod status {
    /// Bit 7: vertical blank active
    pub const VBLANK: u8 = 0x80;
    /// Bit 6: sprite zero hit
    pub const SPRITE_ZERO_HIT: u8 = 0x40;
    /// Bit 5: sprite overflow
    pub const SPRITE_OVERFLOW: u8 = 0x20;
}

/// Base address of the first nametable
pub(super) const NAMETABLE_BASE: u16 = 0x2000;

/// Byte stride between nametable bases
pub(super) const NAMETABLE_STRIDE: u16 = 0x0400;

/// Offset of the attribute table within a nametable
pub(super) const ATTRIBUTE_OFFSET: u16 = 0x03C0;

/// Base address of palette RAM
pub(super) const PALETTE_BASE: u16 = 0x3F00;

/// Highest PPU bus address; everything above folds back in
pub(super) const VRAM_ADDR_MASK: u16 = 0x3FFF;

/// Nametable width in tiles
pub(super) const NAMETABLE_WIDTH: usize = 32;

// ========================================
// PPU Timing Constants (NTSC)
// ========================================

/// Number of dot-cycles per scanline (0-340)
pub(super) const CYCLES_PER_SCANLINE: u16 = 341;

/// Number of scanlines per frame (0-261)
pub(super) const SCANLINES_PER_FRAME: u16 = 262;

/// Last visible scanline
pub(super) const LAST_VISIBLE_SCANLINE: u16 = 239;

/// First VBlank scanline; the VBlank flag sets at dot 1
pub(super) const VBLANK_SCANLINE: u16 = 241;

/// Pre-render scanline; status flags clear here
pub(super) const PRERENDER_SCANLINE: u16 = 261;
