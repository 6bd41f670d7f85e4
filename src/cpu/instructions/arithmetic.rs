// Arithmetic instructions
//
// The 2A03 has no decimal mode: the D flag is storable but ignored, so ADC
// and SBC are always binary.

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::Cpu;

impl Cpu {
    /// ADC - Add with Carry
    ///
    /// A = A + M + C. Overflow is set when both operands share a sign and
    /// the result's sign differs: `(~(A^M) & (A^result)) & $80`.
    ///
    /// Flags affected: C, Z, V, N
    pub fn adc(&mut self, bus: &mut Bus, operand: &Operand) {
        let value = self.operand_value(bus, operand);
        self.add_to_accumulator(value);
    }

    /// SBC - Subtract with Carry
    ///
    /// A = A - M - (1 - C), computed as A + ~M + C. Carry set means no
    /// borrow occurred.
    ///
    /// Flags affected: C, Z, V, N
    pub fn sbc(&mut self, bus: &mut Bus, operand: &Operand) {
        let value = self.operand_value(bus, operand);
        self.add_to_accumulator(!value);
    }

    /// Shared ADC/SBC core over the (possibly complemented) operand
    fn add_to_accumulator(&mut self, value: u8) {
        let carry = self.get_carry() as u16;
        let sum = self.a as u16 + value as u16 + carry;
        let result = sum as u8;

        self.set_carry(sum > 0xFF);
        self.set_overflow((!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0);

        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// INC - Increment Memory
    ///
    /// Flags affected: Z, N
    pub fn inc(&mut self, bus: &mut Bus, operand: &Operand) {
        let result = bus.read(operand.address).wrapping_add(1);
        bus.write(operand.address, result);
        self.update_zero_and_negative_flags(result);
    }

    /// DEC - Decrement Memory
    ///
    /// Flags affected: Z, N
    pub fn dec(&mut self, bus: &mut Bus, operand: &Operand) {
        let result = bus.read(operand.address).wrapping_sub(1);
        bus.write(operand.address, result);
        self.update_zero_and_negative_flags(result);
    }

    /// INX - Increment X Register
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// INY - Increment Y Register
    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    /// DEX - Decrement X Register
    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// DEY - Decrement Y Register
    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }
}
