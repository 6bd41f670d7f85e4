// famicore - Cycle-driven NES/Famicom emulation core
//
// The crate models the execution engine only: the 6502 CPU interpreter, the
// 2C02 PPU dot generator, the address-decoded buses that bind the memory
// mapped devices together, and the master clock that interleaves CPU and PPU
// at their native 1:3 ratio. The host supplies the pixel sink and controller
// state; there is no window, no audio output, and no shell in here.

// Public modules
pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod clock;
pub mod cpu;
pub mod input;
pub mod interrupt;
pub mod nes;
pub mod palette;
pub mod ppu;
pub mod ram;
pub mod rom;
pub mod video;

// Re-export main types for convenience
pub use apu::{ApuStub, DisabledIo};
pub use bus::{Addressable, Bus, Window};
pub use cartridge::{Cartridge, INesError, INesHeader, Mirroring, TvSystem};
pub use clock::{Clock, Fired, SlotId, PPU_CLOCK_OFFSET};
pub use cpu::Cpu;
pub use input::{Controller, ControllerPorts};
pub use interrupt::InterruptLine;
pub use nes::{save_screenshot, Nes, NesConfig, ScreenshotError, StopHandle};
pub use palette::{TilePalette, SYSTEM_PALETTE};
pub use ppu::Ppu;
pub use ram::Ram;
pub use rom::Rom;
pub use video::{FrameBuffer, VideoSink, SCREEN_HEIGHT, SCREEN_WIDTH};
