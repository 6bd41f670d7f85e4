// Jump and subroutine instructions

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::Cpu;

impl Cpu {
    /// JMP - Jump
    ///
    /// Absolute and indirect forms; the indirect form inherits the 6502
    /// page-wrap bug from the addressing resolver.
    pub fn jmp(&mut self, operand: &Operand) {
        self.pc = operand.address;
    }

    /// JSR - Jump to Subroutine
    ///
    /// Pushes the address of the instruction's last byte (PC - 1 after the
    /// operand fetch); RTS undoes this with its +1.
    pub fn jsr(&mut self, bus: &mut Bus, operand: &Operand) {
        self.stack_push_u16(bus, self.pc.wrapping_sub(1));
        self.pc = operand.address;
    }

    /// RTS - Return from Subroutine
    pub fn rts(&mut self, bus: &mut Bus) {
        self.pc = self.stack_pop_u16(bus).wrapping_add(1);
    }
}
