// Interrupt line - the NMI signal between PPU and CPU
//
// The machine has exactly one cross-component event: the PPU raising NMI at
// the start of vertical blank. Rather than a general event channel, the line
// is a shared boolean the PPU raises during its tick and the CPU samples and
// clears at the top of its own tick, latching `pending_nmi`. Listeners run
// nowhere; ordering falls out of the clock's registration order.

use std::cell::Cell;
use std::rc::Rc;

/// Shared single-signal interrupt line
///
/// Cloning produces another handle to the same line.
#[derive(Clone, Default)]
pub struct InterruptLine {
    raised: Rc<Cell<bool>>,
}

impl InterruptLine {
    /// Create a new, lowered line
    pub fn new() -> Self {
        InterruptLine {
            raised: Rc::new(Cell::new(false)),
        }
    }

    /// Raise the line
    ///
    /// Raising an already-raised line is a no-op; the signal is level-less
    /// and coalesces until sampled.
    pub fn raise(&self) {
        self.raised.set(true);
    }

    /// Sample and clear the line
    pub fn take(&self) -> bool {
        self.raised.replace(false)
    }

    /// Whether the line is currently raised (non-destructive)
    pub fn is_raised(&self) -> bool {
        self.raised.get()
    }
}
