// Logical instructions

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::{flags, Cpu};

impl Cpu {
    /// AND - Bitwise AND with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn and(&mut self, bus: &mut Bus, operand: &Operand) {
        self.a &= self.operand_value(bus, operand);
        self.update_zero_and_negative_flags(self.a);
    }

    /// ORA - Bitwise OR with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn ora(&mut self, bus: &mut Bus, operand: &Operand) {
        self.a |= self.operand_value(bus, operand);
        self.update_zero_and_negative_flags(self.a);
    }

    /// EOR - Bitwise Exclusive OR with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn eor(&mut self, bus: &mut Bus, operand: &Operand) {
        self.a ^= self.operand_value(bus, operand);
        self.update_zero_and_negative_flags(self.a);
    }

    /// BIT - Test Bits in Memory
    ///
    /// Z reflects A & M; N and V copy bits 7 and 6 of the memory byte
    /// directly, untouched by the accumulator.
    pub fn bit(&mut self, bus: &mut Bus, operand: &Operand) {
        let value = self.operand_value(bus, operand);
        self.set_zero(self.a & value == 0);
        self.update_flag(flags::NEGATIVE, value & 0x80 != 0);
        self.update_flag(flags::OVERFLOW, value & 0x40 != 0);
    }
}
