// APU stub and disabled I/O regions
//
// Audio synthesis is out of scope; the APU exists only so that games poking
// $4000-$4015 see a well-behaved bus device instead of open bus. Writes are
// latched for inspection, reads return zero. $4014 (OAM DMA) falls inside
// this window: the write is latched but no transfer occurs.
//
// $4018-$401F is the CPU's disabled test-mode region; retail hardware ties
// it off, so reads return zero and writes are dropped.

use crate::bus::{Addressable, Window};

/// Number of bytes in the APU register window ($4000-$4015)
const APU_REGISTER_COUNT: usize = 0x16;

/// Latching stub for the APU register window
pub struct ApuStub {
    window: Window,
    registers: [u8; APU_REGISTER_COUNT],
}

impl ApuStub {
    /// Create the stub at its standard window
    pub fn new() -> Self {
        ApuStub {
            window: Window::span(0x4000, 0x4015),
            registers: [0x00; APU_REGISTER_COUNT],
        }
    }

    /// Last value written to a register, by offset from $4000
    pub fn register(&self, offset: usize) -> u8 {
        self.registers[offset % APU_REGISTER_COUNT]
    }
}

impl Default for ApuStub {
    fn default() -> Self {
        Self::new()
    }
}

impl Addressable for ApuStub {
    fn window(&self) -> Window {
        self.window
    }

    fn read(&mut self, _addr: u16) -> u8 {
        // APU registers are write-only on hardware ($4015 aside); the stub
        // reads back as zero across the board.
        0x00
    }

    fn write(&mut self, addr: u16, data: u8) {
        let offset = self.window.offset(addr);
        self.registers[offset] = data;
        log::trace!("APU stub write ${:02X} -> ${:04X}", data, addr);
    }
}

/// The disabled $4018-$401F test region
pub struct DisabledIo {
    window: Window,
}

impl DisabledIo {
    /// Create the region at its standard window
    pub fn new() -> Self {
        DisabledIo {
            window: Window::span(0x4018, 0x401F),
        }
    }
}

impl Default for DisabledIo {
    fn default() -> Self {
        Self::new()
    }
}

impl Addressable for DisabledIo {
    fn window(&self) -> Window {
        self.window
    }

    fn read(&mut self, _addr: u16) -> u8 {
        0x00
    }

    fn write(&mut self, addr: u16, data: u8) {
        log::trace!("disabled I/O write ${:02X} -> ${:04X} dropped", data, addr);
    }
}
