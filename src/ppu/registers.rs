// PPU register handling

use super::constants::*;
use super::Ppu;

impl Ppu {
    /// Read from a PPU register
    ///
    /// # Register Behaviors
    ///
    /// - PPUSTATUS ($2002): returns the status bits over the stale data
    ///   latch, clears the VBlank flag, and resets the write toggle
    /// - OAMDATA ($2004): returns OAM at the current OAM address
    /// - PPUDATA ($2007): buffered read; palette addresses bypass the
    ///   buffer and return fresh data
    /// - Write-only registers return 0
    pub(super) fn read_register(&mut self, register: u16) -> u8 {
        match register {
            2 => {
                // Top three bits are live status; the low five ride along
                // from whatever last crossed the data latch
                let value = (self.status & 0xE0) | (self.read_buffer & 0x1F);
                self.status &= !status::VBLANK;
                self.write_latch = false;
                value
            }
            4 => self.oam[self.oam_addr as usize],
            7 => {
                let addr = self.vram_address & VRAM_ADDR_MASK;
                let fetched = self.vram.read(addr);

                // Palette reads skip the one-byte delay; everything else
                // returns the previous fetch
                let value = if addr >= PALETTE_BASE {
                    fetched
                } else {
                    self.read_buffer
                };
                self.read_buffer = fetched;

                self.advance_vram_address();
                value
            }
            _ => 0,
        }
    }

    /// Write to a PPU register
    ///
    /// # Register Behaviors
    ///
    /// - PPUCTRL ($2000): latches control bits; enabling NMI during an
    ///   active VBlank raises the line at once; changing the nametable
    ///   select rewrites the VRAM address to the new base
    /// - PPUSCROLL ($2005) / PPUADDR ($2006): two-write pairs sharing the
    ///   write toggle
    /// - PPUDATA ($2007): stores through the VRAM bus and advances the
    ///   address
    pub(super) fn write_register(&mut self, register: u16, data: u8) {
        match register {
            0 => {
                let nmi_was_enabled = self.ctrl & ctrl::NMI_ENABLE != 0;
                let old_nametable = self.ctrl & ctrl::NAMETABLE_SELECT;
                self.ctrl = data;

                if !nmi_was_enabled
                    && data & ctrl::NMI_ENABLE != 0
                    && self.status & status::VBLANK != 0
                {
                    self.nmi_line.raise();
                }

                let new_nametable = data & ctrl::NAMETABLE_SELECT;
                if new_nametable != old_nametable {
                    // Hardware routes the select through the internal t
                    // register at scroll timing; pointing the address at
                    // the new base is enough for static screens
                    self.vram_address =
                        NAMETABLE_BASE + new_nametable as u16 * NAMETABLE_STRIDE;
                }
            }
            1 => self.mask = data,
            3 => self.oam_addr = data,
            4 => {
                self.oam[self.oam_addr as usize] = data;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            5 => {
                if !self.write_latch {
                    self.scroll_x = data;
                    self.write_latch = true;
                } else {
                    self.scroll_y = data;
                    self.write_latch = false;
                }
            }
            6 => {
                if !self.write_latch {
                    self.addr_latch = data;
                    self.write_latch = true;
                } else {
                    self.vram_address =
                        (((self.addr_latch as u16) << 8) | data as u16) & VRAM_ADDR_MASK;
                    self.write_latch = false;
                }
            }
            7 => {
                let addr = self.vram_address & VRAM_ADDR_MASK;
                self.vram.write(addr, data);
                self.advance_vram_address();
            }
            _ => {}
        }
    }

    /// Step the VRAM address by the PPUCTRL-selected increment
    fn advance_vram_address(&mut self) {
        let step = if self.ctrl & ctrl::INCREMENT_32 != 0 {
            32
        } else {
            1
        };
        self.vram_address = self.vram_address.wrapping_add(step) & VRAM_ADDR_MASK;
    }
}
