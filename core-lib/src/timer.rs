//! The divider and timer counters behind `0xFF04..=0xFF07`.
//!
//! DIV ticks once every 256 clock cycles regardless of anything. TIMA
//! counts at the rate selected by TAC's low two bits, but only while
//! TAC bit 2 is set; on overflow it reloads from TMA and raises the
//! timer bit in IF.

use crate::mmu::MemoryBus;

/// Divider register, incremented at 16384 Hz.
pub const DIV: u16 = 0xFF04;
/// Timer counter.
pub const TIMA: u16 = 0xFF05;
/// Timer modulo, reloaded into TIMA on overflow.
pub const TMA: u16 = 0xFF06;
/// Timer control: bit 2 enables, bits 0..=1 select the rate.
pub const TAC: u16 = 0xFF07;
/// Interrupt request flags; the timer owns bit 2.
pub const IF: u16 = 0xFF0F;

const TIMER_INTERRUPT_BIT: u8 = 1 << 2;
const DIV_PERIOD: u32 = 256;

/// Countdown state for both counters. The registers themselves live on
/// the bus; this only tracks how far each is into its current period.
#[derive(Debug)]
pub struct Timer {
    divider_counter: u32,
    timer_counter: i64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            divider_counter: 0,
            // TAC's power-on rate select is 00: one tick per 1024 cycles.
            timer_counter: 1024,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Clock cycles per TIMA tick for the given TAC rate select.
    const fn period(tac: u8) -> i64 {
        match tac & 0x03 {
            0x01 => 16,
            0x02 => 64,
            0x03 => 256,
            _ => 1024,
        }
    }

    /// Advances both counters by the cycles the CPU just spent.
    pub fn step(&mut self, bus: &mut dyn MemoryBus, cycles: u32) {
        self.step_divider(bus, cycles);

        let tac = bus.read_byte(TAC);
        if tac & 0x04 == 0 {
            return;
        }

        self.timer_counter -= i64::from(cycles);
        while self.timer_counter <= 0 {
            self.timer_counter += Self::period(tac);

            let tima = bus.read_byte(TIMA);
            if tima == 0xFF {
                let tma = bus.read_byte(TMA);
                bus.write_byte(TIMA, tma);
                let flags = bus.read_byte(IF);
                bus.write_byte(IF, flags | TIMER_INTERRUPT_BIT);
            } else {
                bus.write_byte(TIMA, tima + 1);
            }
        }
    }

    fn step_divider(&mut self, bus: &mut dyn MemoryBus, cycles: u32) {
        self.divider_counter += cycles;
        while self.divider_counter >= DIV_PERIOD {
            self.divider_counter -= DIV_PERIOD;
            let div = bus.read_byte(DIV);
            bus.write_byte(DIV, div.wrapping_add(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::mmu::Mmu;

    #[test]
    fn divider_ticks_every_256_cycles() {
        let mut timer = Timer::new();
        let mut mmu = Mmu::new();

        timer.step(&mut mmu, 255);
        assert_eq!(mmu.read_byte(DIV), 0);
        timer.step(&mut mmu, 1);
        assert_eq!(mmu.read_byte(DIV), 1);
        timer.step(&mut mmu, 512);
        assert_eq!(mmu.read_byte(DIV), 3);
    }

    #[test]
    fn tima_is_frozen_while_disabled() {
        let mut timer = Timer::new();
        let mut mmu = Mmu::new();
        mmu.write_byte(TAC, 0x00);

        timer.step(&mut mmu, 4096);
        assert_eq!(mmu.read_byte(TIMA), 0);
    }

    #[test_case(0x04, 1024; "rate select 00")]
    #[test_case(0x05, 16; "rate select 01")]
    #[test_case(0x06, 64; "rate select 10")]
    #[test_case(0x07, 256; "rate select 11")]
    fn tima_ticks_at_the_selected_rate(tac: u8, period: u32) {
        let mut timer = Timer::new();
        let mut mmu = Mmu::new();
        mmu.write_byte(TAC, tac);
        // A fresh counter starts one power-on period in; drain it so the
        // selected rate takes over cleanly.
        timer.timer_counter = i64::from(period);

        timer.step(&mut mmu, period - 1);
        assert_eq!(mmu.read_byte(TIMA), 0);
        timer.step(&mut mmu, 1);
        assert_eq!(mmu.read_byte(TIMA), 1);
    }

    #[test]
    fn overflow_reloads_from_tma_and_requests_the_interrupt() {
        let mut timer = Timer::new();
        let mut mmu = Mmu::new();
        mmu.write_byte(TAC, 0x05); // enabled, 16-cycle period
        mmu.write_byte(TIMA, 0xFF);
        mmu.write_byte(TMA, 0xAB);
        mmu.write_byte(IF, 0x00);
        timer.timer_counter = 16;

        timer.step(&mut mmu, 16);
        assert_eq!(mmu.read_byte(TIMA), 0xAB);
        assert_eq!(mmu.read_byte(IF) & 0x04, 0x04);
    }

    #[test]
    fn large_steps_drain_multiple_periods() {
        let mut timer = Timer::new();
        let mut mmu = Mmu::new();
        mmu.write_byte(TAC, 0x05);
        timer.timer_counter = 16;

        timer.step(&mut mmu, 16 * 5);
        assert_eq!(mmu.read_byte(TIMA), 5);
    }
}
