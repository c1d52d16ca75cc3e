use crate::constants::CYCLES_PER_TIMER_TICK;

/// Knobs a driver can turn without touching instruction semantics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Completed cycles per delay/sound timer decrement. 0 is treated as 1.
    pub cycles_per_timer_tick: u32,
    /// Seed for the random byte source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_cycles_per_timer_tick(mut self, cycles: u32) -> Self {
        self.cycles_per_timer_tick = cycles;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn timer_period(&self) -> u32 {
        self.cycles_per_timer_tick.max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cycles_per_timer_tick: CYCLES_PER_TIMER_TICK,
            seed: None,
        }
    }
}
