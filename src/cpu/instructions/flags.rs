// Flag manipulation instructions

use crate::cpu::{flags, Cpu};

impl Cpu {
    /// CLC - Clear Carry Flag
    pub fn clc(&mut self) {
        self.clear_flag(flags::CARRY);
    }

    /// SEC - Set Carry Flag
    pub fn sec(&mut self) {
        self.set_flag(flags::CARRY);
    }

    /// CLI - Clear Interrupt Disable
    pub fn cli(&mut self) {
        self.clear_flag(flags::INTERRUPT_DISABLE);
    }

    /// SEI - Set Interrupt Disable
    pub fn sei(&mut self) {
        self.set_flag(flags::INTERRUPT_DISABLE);
    }

    /// CLD - Clear Decimal Mode
    ///
    /// The 2A03 ignores D, but the flag itself is still storable.
    pub fn cld(&mut self) {
        self.clear_flag(flags::DECIMAL);
    }

    /// SED - Set Decimal Mode
    pub fn sed(&mut self) {
        self.set_flag(flags::DECIMAL);
    }

    /// CLV - Clear Overflow Flag
    ///
    /// There is no SEV; only arithmetic sets V.
    pub fn clv(&mut self) {
        self.clear_flag(flags::OVERFLOW);
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::{flags, Cpu};
    use crate::interrupt::InterruptLine;

    #[test]
    fn test_carry_pair() {
        let mut cpu = Cpu::new(InterruptLine::new());
        cpu.sec();
        assert!(cpu.get_carry());
        cpu.clc();
        assert!(!cpu.get_carry());
    }

    #[test]
    fn test_interrupt_disable_pair() {
        let mut cpu = Cpu::new(InterruptLine::new());
        cpu.cli();
        assert!(!cpu.get_interrupt_disable());
        cpu.sei();
        assert!(cpu.get_interrupt_disable());
    }

    #[test]
    fn test_decimal_pair() {
        let mut cpu = Cpu::new(InterruptLine::new());
        cpu.sed();
        assert!(cpu.get_flag(flags::DECIMAL));
        cpu.cld();
        assert!(!cpu.get_flag(flags::DECIMAL));
    }

    #[test]
    fn test_clv() {
        let mut cpu = Cpu::new(InterruptLine::new());
        cpu.set_overflow(true);
        cpu.clv();
        assert!(!cpu.get_overflow());
    }
}
