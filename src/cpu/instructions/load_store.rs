// Load and store instructions

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::Cpu;

impl Cpu {
    /// LDA - Load Accumulator
    ///
    /// Flags affected: Z, N
    pub fn lda(&mut self, bus: &mut Bus, operand: &Operand) {
        self.a = self.operand_value(bus, operand);
        self.update_zero_and_negative_flags(self.a);
    }

    /// LDX - Load X Register
    ///
    /// Flags affected: Z, N
    pub fn ldx(&mut self, bus: &mut Bus, operand: &Operand) {
        self.x = self.operand_value(bus, operand);
        self.update_zero_and_negative_flags(self.x);
    }

    /// LDY - Load Y Register
    ///
    /// Flags affected: Z, N
    pub fn ldy(&mut self, bus: &mut Bus, operand: &Operand) {
        self.y = self.operand_value(bus, operand);
        self.update_zero_and_negative_flags(self.y);
    }

    /// STA - Store Accumulator
    pub fn sta(&mut self, bus: &mut Bus, operand: &Operand) {
        bus.write(operand.address, self.a);
    }

    /// STX - Store X Register
    pub fn stx(&mut self, bus: &mut Bus, operand: &Operand) {
        bus.write(operand.address, self.x);
    }

    /// STY - Store Y Register
    pub fn sty(&mut self, bus: &mut Bus, operand: &Operand) {
        bus.write(operand.address, self.y);
    }
}
