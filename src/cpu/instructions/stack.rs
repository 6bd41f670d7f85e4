// Stack instructions

use crate::bus::Bus;
use crate::cpu::{flags, Cpu};

impl Cpu {
    /// PHA - Push Accumulator
    pub fn pha(&mut self, bus: &mut Bus) {
        self.stack_push(bus, self.a);
    }

    /// PLA - Pull Accumulator
    ///
    /// Flags affected: Z, N
    pub fn pla(&mut self, bus: &mut Bus) {
        self.a = self.stack_pop(bus);
        self.update_zero_and_negative_flags(self.a);
    }

    /// PHP - Push Processor Status
    ///
    /// The pushed byte always carries B and U set; that is how software
    /// distinguishes a PHP/BRK status image from one pushed by hardware.
    pub fn php(&mut self, bus: &mut Bus) {
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED);
    }

    /// PLP - Pull Processor Status
    ///
    /// B is a purely pushed artifact and is not restored; U stays set.
    pub fn plp(&mut self, bus: &mut Bus) {
        let pulled = self.stack_pop(bus);
        self.status = (pulled & !flags::BREAK) | flags::UNUSED;
    }
}
