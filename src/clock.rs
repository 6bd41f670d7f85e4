// Clock module - divider-based fan-out scheduler
//
// The master clock drives every component from one step counter. Each
// attached slot carries a divider and a countdown; a slot fires on the steps
// where its countdown has reached zero, then reloads to `divider - 1`. A
// one-time offset at attach skews a slot's phase, which is how the PPU's dot
// stream is aligned against the CPU's fetch bursts.
//
// The clock does not call into components itself: `step` returns the set of
// slots that fired, evaluated in registration order, and the system owner
// dispatches them in that same order. This keeps the scheduler free of
// mutable-capture cycles while preserving the within-step ordering contract
// (a CPU write lands before the PPU dots of the same step observe it).
//
// The NES wires the CPU at divider 3 and the PPU at divider 1 with offset
// `PPU_CLOCK_OFFSET`, so over any window the CPU:PPU tick ratio is exactly
// 1:3.

/// PPU phase offset against the master step counter
///
/// One dot of skew keeps the PPU's first dot strictly after the CPU's first
/// fetch burst while staying within one tick of the nominal rate.
pub const PPU_CLOCK_OFFSET: u32 = 1;

/// Identifier of an attached clock slot
///
/// Slot identifiers double as the firing order: lower ids fire first within
/// a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotId(usize);

/// One attached consumer of the master clock
struct Slot {
    /// Fire every `divider` steps
    divider: u32,

    /// Steps until the next firing; fires when it reaches zero
    countdown: u32,
}

/// Set of slots that fired on a given step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired(u32);

impl Fired {
    /// Whether the given slot fired this step
    #[inline]
    pub fn contains(&self, slot: SlotId) -> bool {
        self.0 & (1 << slot.0) != 0
    }

    /// Whether any slot fired this step
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Divider-based cooperative scheduler
pub struct Clock {
    slots: Vec<Slot>,

    /// Total master steps executed
    steps: u64,
}

impl Clock {
    /// Create a clock with no slots attached
    pub fn new() -> Self {
        Clock {
            slots: Vec::new(),
            steps: 0,
        }
    }

    /// Attach a consumer
    ///
    /// `divider` must be at least 1. `offset` delays the slot's first firing
    /// by that many steps; it is applied once and does not change the steady
    /// rate.
    pub fn attach(&mut self, divider: u32, offset: u32) -> SlotId {
        debug_assert!(divider >= 1, "divider must be at least 1");
        debug_assert!(
            self.slots.len() < 32,
            "fired-set bitmask supports at most 32 slots"
        );
        self.slots.push(Slot {
            divider: divider.max(1),
            countdown: offset,
        });
        SlotId(self.slots.len() - 1)
    }

    /// Execute one master step
    ///
    /// Evaluates every slot in registration order: a slot whose countdown
    /// reached zero fires and reloads to `divider - 1`; otherwise its
    /// countdown decrements.
    pub fn step(&mut self) -> Fired {
        let mut fired = 0u32;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.countdown == 0 {
                fired |= 1 << index;
                slot.countdown = slot.divider - 1;
            } else {
                slot.countdown -= 1;
            }
        }
        self.steps += 1;
        Fired(fired)
    }

    /// Total master steps executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
