// NES machine - system owner and control surface
//
// `Nes` builds every device, shares them with the buses, and drives the
// master clock: the CPU at divider 3 and the PPU at divider 1, CPU slot
// first so its register writes land before the same step's dots. The host
// drives the machine through `step`, `run_batch`, or the cooperative
// `start`/`stop` loop, and injects a `VideoSink` and controller state.
//
// # CPU Bus Layout
//
// ```text
// $0000-$1FFF: work RAM (2KB, mirrored)
// $2000-$3FFF: PPU registers (8 bytes, mirrored)
// $4000-$4015: APU stub
// $4016-$4017: controller ports
// $4018-$401F: disabled I/O
// $8000-$FFFF: cartridge PRG-ROM
// ```

mod config;
mod screenshot;

pub use config::{ClockConfig, ConfigError, NesConfig, ScreenshotConfig};
pub use screenshot::{save_screenshot, write_png, ScreenshotError};

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use crate::apu::{ApuStub, DisabledIo};
use crate::bus::{Bus, Window};
use crate::cartridge::{Cartridge, INesError};
use crate::clock::{Clock, SlotId, PPU_CLOCK_OFFSET};
use crate::cpu::Cpu;
use crate::input::{Controller, ControllerPorts};
use crate::interrupt::InterruptLine;
use crate::ppu::Ppu;
use crate::ram::Ram;
use crate::rom::Rom;
use crate::video::VideoSink;

/// Clonable handle that stops a running machine at the next batch boundary
#[derive(Clone)]
pub struct StopHandle {
    running: Rc<Cell<bool>>,
}

impl StopHandle {
    /// Request the run loop to exit
    ///
    /// Takes effect when the current batch of clock steps completes.
    pub fn stop(&self) {
        self.running.set(false);
    }

    /// Whether the run loop is still marked as running
    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// The NES machine
pub struct Nes {
    clock: Clock,
    cpu_slot: SlotId,
    ppu_slot: SlotId,

    cpu: Cpu,
    cpu_bus: Bus,
    ppu: Rc<RefCell<Ppu>>,

    prg_rom: Rc<RefCell<Rom>>,
    chr_rom: Rc<RefCell<Rom>>,
    controllers: Rc<RefCell<ControllerPorts>>,

    running: Rc<Cell<bool>>,
    config: NesConfig,
}

impl Nes {
    /// Build a machine with configuration from disk (or defaults)
    pub fn new() -> Self {
        Self::with_config(NesConfig::load_or_default())
    }

    /// Build a machine with the given configuration
    pub fn with_config(config: NesConfig) -> Self {
        let nmi_line = InterruptLine::new();

        // PPU-side bus: pattern tables, nametables, palette RAM
        let chr_rom = Rc::new(RefCell::new(Rom::new(Window::span(0x0000, 0x1FFF))));
        let mut vram = Bus::new();
        vram.attach(chr_rom.clone());
        vram.attach(Rc::new(RefCell::new(Ram::new(Window::mirrored(
            0x2000, 0x2FFF, 0x3EFF,
        )))));
        vram.attach(Rc::new(RefCell::new(Ram::new(Window::mirrored(
            0x3F00, 0x3F1F, 0x3FFF,
        )))));

        let ppu = Rc::new(RefCell::new(Ppu::new(vram, nmi_line.clone())));

        // CPU-side bus
        let prg_rom = Rc::new(RefCell::new(Rom::new(Window::span(0x8000, 0xFFFF))));
        let controllers = Rc::new(RefCell::new(ControllerPorts::new()));
        let mut cpu_bus = Bus::new();
        cpu_bus.attach(Rc::new(RefCell::new(Ram::new(Window::mirrored(
            0x0000, 0x07FF, 0x1FFF,
        )))));
        cpu_bus.attach(ppu.clone());
        cpu_bus.attach(Rc::new(RefCell::new(ApuStub::new())));
        cpu_bus.attach(controllers.clone());
        cpu_bus.attach(Rc::new(RefCell::new(DisabledIo::new())));
        cpu_bus.attach(prg_rom.clone());

        let cpu = Cpu::new(nmi_line);

        // CPU slot registers first: within one step its write bursts land
        // before the dots that follow
        let mut clock = Clock::new();
        let cpu_slot = clock.attach(3, 0);
        let ppu_slot = clock.attach(1, PPU_CLOCK_OFFSET);

        Nes {
            clock,
            cpu_slot,
            ppu_slot,
            cpu,
            cpu_bus,
            ppu,
            prg_rom,
            chr_rom,
            controllers,
            running: Rc::new(Cell::new(false)),
            config,
        }
    }

    /// Insert a parsed cartridge
    ///
    /// Copies PRG into the $8000 region and CHR into the pattern table
    /// region, resets both buses so routing reflects the resized windows,
    /// then resets the machine.
    pub fn insert_cartridge(&mut self, cartridge: &Cartridge) {
        cartridge.load_into(
            &mut self.prg_rom.borrow_mut(),
            &mut self.chr_rom.borrow_mut(),
        );
        self.cpu_bus.reset();
        self.ppu.borrow_mut().vram_mut().reset();
        self.reset();
    }

    /// Load and insert an iNES image from a file
    ///
    /// # Errors
    /// Propagates parse and I/O failures; the machine state is untouched
    /// when loading fails.
    pub fn load_rom_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), INesError> {
        let cartridge = Cartridge::from_ines_file(path)?;
        self.insert_cartridge(&cartridge);
        Ok(())
    }

    /// Reset the machine
    ///
    /// Resets CPU (loading PC from the RESET vector) and PPU; RAM and ROM
    /// contents are preserved.
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.cpu_bus);
        self.ppu.borrow_mut().reset();
    }

    /// Execute one master clock step
    pub fn step(&mut self) {
        let fired = self.clock.step();
        if fired.contains(self.cpu_slot) {
            self.cpu.tick(&mut self.cpu_bus);
        }
        if fired.contains(self.ppu_slot) {
            self.ppu.borrow_mut().tick();
        }
    }

    /// Execute exactly one CPU instruction, ignoring the clock
    ///
    /// The PPU does not advance. Returns the cycles the instruction
    /// charged; used by instruction-level tests and tools.
    pub fn step_cpu_instruction(&mut self) -> u8 {
        self.cpu.step_instruction(&mut self.cpu_bus)
    }

    /// Execute one batch of clock steps
    pub fn run_batch(&mut self) {
        for _ in 0..self.config.clock.yield_interval {
            self.step();
        }
    }

    /// Run cooperatively until stopped
    ///
    /// Executes `yield_interval` steps per batch, then sleeps for the
    /// configured delay so the host can service I/O. `StopHandle::stop`
    /// (typically called from a `VideoSink` or controller callback) exits
    /// at the next batch boundary.
    pub fn start(&mut self, reset: bool) {
        if reset {
            self.reset();
        }
        self.running.set(true);
        let delay = Duration::from_millis(self.config.clock.yield_delay_ms);
        while self.running.get() {
            self.run_batch();
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
    }

    /// Request the run loop to exit at the next batch boundary
    pub fn stop(&self) {
        self.running.set(false);
    }

    /// Handle for stopping the run loop from host callbacks
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: self.running.clone(),
        }
    }

    /// Install the host pixel sink
    pub fn set_video_sink(&mut self, sink: Box<dyn VideoSink>) {
        self.ppu.borrow_mut().set_video_sink(sink);
    }

    /// Push a Controller 1 button snapshot
    pub fn set_controller1(&mut self, state: Controller) {
        self.controllers.borrow_mut().set_controller1(state);
    }

    /// Push a Controller 2 button snapshot
    pub fn set_controller2(&mut self, state: Controller) {
        self.controllers.borrow_mut().set_controller2(state);
    }

    /// The CPU
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// The CPU, mutably
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// The PPU
    pub fn ppu(&self) -> Ref<'_, Ppu> {
        self.ppu.borrow()
    }

    /// The PPU, mutably
    pub fn ppu_mut(&mut self) -> RefMut<'_, Ppu> {
        self.ppu.borrow_mut()
    }

    /// The CPU bus, mutably
    ///
    /// Tests use this to seed programs and inspect memory.
    pub fn cpu_bus_mut(&mut self) -> &mut Bus {
        &mut self.cpu_bus
    }

    /// The active configuration
    pub fn config(&self) -> &NesConfig {
        &self.config
    }

    /// Total master clock steps executed
    pub fn clock_steps(&self) -> u64 {
        self.clock.steps()
    }
}

impl Default for Nes {
    fn default() -> Self {
        Self::with_config(NesConfig::default())
    }
}
