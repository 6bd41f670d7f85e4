// Input module - controller state and the $4016/$4017 serial ports
//
// The NES reads its controllers through a serial shift protocol on two
// memory-mapped ports.
//
// ## Register Map
//
// | Address | Name          | Access | Description                     |
// |---------|---------------|--------|---------------------------------|
// | $4016   | Controller 1  | R/W    | Controller 1 data / Strobe      |
// | $4017   | Controller 2  | R      | Controller 2 data               |
//
// ## Reading Sequence
//
// 1. Write $01 to $4016 (strobe: reload the shift registers)
// 2. Write $00 to $4016
// 3. Read $4016 eight times for Controller 1 button states
// 4. Read $4017 eight times for Controller 2 button states
//
// Each read returns bit 0 = button state (1 = pressed), in the order
// A, B, Select, Start, Up, Down, Left, Right, and advances the shift
// index modulo 8.

use crate::bus::{Addressable, Window};

/// Controller button state
///
/// A snapshot of all 8 buttons on a standard NES controller. The host maps
/// physical input onto this and pushes it into the machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Controller {
    /// A button state
    pub button_a: bool,
    /// B button state
    pub button_b: bool,
    /// Select button state
    pub select: bool,
    /// Start button state
    pub start: bool,
    /// Up D-pad state
    pub up: bool,
    /// Down D-pad state
    pub down: bool,
    /// Left D-pad state
    pub left: bool,
    /// Right D-pad state
    pub right: bool,
}

impl Controller {
    /// Create a controller with all buttons released
    pub fn new() -> Self {
        Controller::default()
    }

    /// Get button state by shift index
    ///
    /// Index order: 0=A, 1=B, 2=Select, 3=Start, 4=Up, 5=Down, 6=Left,
    /// 7=Right.
    fn button(&self, index: u8) -> bool {
        match index {
            0 => self.button_a,
            1 => self.button_b,
            2 => self.select,
            3 => self.start,
            4 => self.up,
            5 => self.down,
            6 => self.left,
            7 => self.right,
            _ => false,
        }
    }
}

/// The $4016/$4017 controller ports
///
/// Each port shifts out one button bit per read, advancing its index modulo
/// 8; a strobe write (bit 0 set at $4016) rewinds both indices to the A
/// button.
pub struct ControllerPorts {
    window: Window,

    /// Controller 1 state
    controller1: Controller,

    /// Controller 2 state
    controller2: Controller,

    /// Shift index for Controller 1 (0-7)
    index1: u8,

    /// Shift index for Controller 2 (0-7)
    index2: u8,
}

impl ControllerPorts {
    /// Create the port pair at its standard window
    pub fn new() -> Self {
        ControllerPorts {
            window: Window::span(0x4016, 0x4017),
            controller1: Controller::new(),
            controller2: Controller::new(),
            index1: 0,
            index2: 0,
        }
    }

    /// Replace the Controller 1 button snapshot
    pub fn set_controller1(&mut self, state: Controller) {
        self.controller1 = state;
    }

    /// Replace the Controller 2 button snapshot
    pub fn set_controller2(&mut self, state: Controller) {
        self.controller2 = state;
    }

    /// Rewind both shift indices to the A button
    pub fn strobe(&mut self) {
        self.index1 = 0;
        self.index2 = 0;
    }
}

impl Default for ControllerPorts {
    fn default() -> Self {
        Self::new()
    }
}

impl Addressable for ControllerPorts {
    fn window(&self) -> Window {
        self.window
    }

    fn read(&mut self, addr: u16) -> u8 {
        match self.window.offset(addr) {
            0 => {
                let bit = self.controller1.button(self.index1) as u8;
                self.index1 = (self.index1 + 1) & 0x07;
                bit
            }
            _ => {
                let bit = self.controller2.button(self.index2) as u8;
                self.index2 = (self.index2 + 1) & 0x07;
                bit
            }
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        // $4017 writes belong to the APU frame counter, not the ports
        if self.window.offset(addr) == 0 && data & 0x01 != 0 {
            self.strobe();
        }
    }
}
