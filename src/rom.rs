// ROM module - read-only bus region backed by a loaded image
//
// A `Rom` starts empty and receives its image once, when a cartridge is
// inserted. Writes are observable but side-effect free: they are logged and
// dropped, never persisted. The CPU bus maps PRG-ROM at $8000 and the PPU
// bus maps CHR at $0000.

use crate::bus::{Addressable, Window};

/// Read-only memory region
///
/// Loading an image shrinks the window's storage end to the image length
/// while leaving the mirror boundary in place, so a 16 KiB PRG image placed
/// at $8000 repeats through $FFFF by the ordinary window math.
pub struct Rom {
    window: Window,
    bytes: Vec<u8>,
}

impl Rom {
    /// Create an empty ROM for the given window
    ///
    /// Until an image is loaded, every byte reads as zero.
    pub fn new(window: Window) -> Self {
        Rom {
            window,
            bytes: vec![0x00; window.actual_size()],
        }
    }

    /// Load an image into the ROM
    ///
    /// Replaces the backing bytes and re-derives the storage end from the
    /// image length (capped at the mirror boundary). The bus must be reset
    /// afterwards so region ordering reflects the new window.
    pub fn load(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        let max_len = self.window.mirror_size();
        let len = data.len().min(max_len);
        self.bytes = data[..len].to_vec();
        self.window.end = self.window.start.wrapping_add((len - 1) as u16);
    }

    /// Size of the loaded image in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl Addressable for Rom {
    fn window(&self) -> Window {
        self.window
    }

    fn read(&mut self, addr: u16) -> u8 {
        self.bytes[self.window.offset(addr)]
    }

    fn write(&mut self, addr: u16, data: u8) {
        // Writes to ROM are dropped; mapper 0 has no bank registers
        log::warn!(
            "write of ${:02X} to ROM at ${:04X} dropped",
            data,
            addr
        );
    }
}
