//! Clock cycle accumulator.
//!
//! A passive counter fed by the CPU after every instruction. One machine
//! cycle is four clock cycles; instruction costs are always multiples of
//! four, so `t_cycles == 4 * m_cycles` holds at every observation point.

#[derive(Debug, Default, Clone)]
pub struct Clock {
    t_cycles: u64,
    m_cycles: u64,
}

impl Clock {
    pub const fn new() -> Self {
        Self {
            t_cycles: 0,
            m_cycles: 0,
        }
    }

    /// Records `cycles` clock cycles of executed work.
    pub fn tick(&mut self, cycles: u32) {
        self.t_cycles += u64::from(cycles);
        self.m_cycles += u64::from(cycles / 4);
    }

    pub fn reset(&mut self) {
        self.t_cycles = 0;
        self.m_cycles = 0;
    }

    /// Total clock cycles since the last reset.
    pub const fn t_cycles(&self) -> u64 {
        self.t_cycles
    }

    /// Total machine cycles since the last reset.
    pub const fn m_cycles(&self) -> u64 {
        self.m_cycles
    }
}

#[cfg(test)]
mod tests {
    use super::Clock;
    use pretty_assertions::assert_eq;

    #[test]
    fn four_clock_cycles_per_machine_cycle() {
        let mut clock = Clock::new();
        clock.tick(4);
        clock.tick(12);
        clock.tick(20);
        assert_eq!(clock.t_cycles(), 36);
        assert_eq!(clock.m_cycles(), 9);
        assert_eq!(clock.t_cycles(), 4 * clock.m_cycles());
    }

    #[test]
    fn reset_zeroes_both_counters() {
        let mut clock = Clock::new();
        clock.tick(69_905);
        clock.reset();
        assert_eq!(clock.t_cycles(), 0);
        assert_eq!(clock.m_cycles(), 0);
    }
}
