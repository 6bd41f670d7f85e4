// RAM module - byte-backed read/write bus region
//
// A `Ram` owns a mutable byte buffer sized to its window's actual span and
// folds every address in the mirrored span back into that buffer. The NES
// uses it for the CPU's 2KB work RAM ($0000-$07FF mirrored through $1FFF)
// and, on the PPU bus, for nametable and palette memory.
//
// # Zero Page and Stack
//
// - Zero Page: $0000-$00FF - fast-access area with dedicated addressing modes
// - Stack: $0100-$01FF - hardware stack used by the 6502 processor

use crate::bus::{Addressable, Window};

/// Byte-backed RAM region
///
/// # Mirroring Behavior
///
/// The window's mirror span folds back into the backing buffer, so with the
/// CPU work-RAM window, writing to $0000 is the same as writing to $0800,
/// $1000, or $1800.
///
/// # Examples
///
/// ```
/// use famicore::bus::{Addressable, Window};
/// use famicore::ram::Ram;
///
/// let mut ram = Ram::new(Window::mirrored(0x0000, 0x07FF, 0x1FFF));
/// ram.write(0x0000, 0x42);
/// assert_eq!(ram.read(0x0800), 0x42);
/// assert_eq!(ram.read(0x1800), 0x42);
/// ```
#[derive(Clone)]
pub struct Ram {
    window: Window,
    memory: Vec<u8>,
}

impl Ram {
    /// Create RAM for the given window, zero-initialized
    pub fn new(window: Window) -> Self {
        Ram {
            window,
            memory: vec![0x00; window.actual_size()],
        }
    }

    /// Create RAM filled with a specific byte pattern
    ///
    /// Real hardware powers on with semi-random contents; a fill pattern
    /// keeps emulation deterministic while letting tests exercise non-zero
    /// initial memory.
    pub fn with_pattern(window: Window, fill_byte: u8) -> Self {
        Ram {
            window,
            memory: vec![fill_byte; window.actual_size()],
        }
    }

    /// Reset RAM contents to zero
    pub fn reset(&mut self) {
        self.memory.fill(0x00);
    }

    /// Size of the backing storage in bytes
    pub fn size(&self) -> usize {
        self.memory.len()
    }
}

impl Addressable for Ram {
    fn window(&self) -> Window {
        self.window
    }

    fn read(&mut self, addr: u16) -> u8 {
        self.memory[self.window.offset(addr)]
    }

    fn write(&mut self, addr: u16, data: u8) {
        let offset = self.window.offset(addr);
        self.memory[offset] = data;
    }
}
