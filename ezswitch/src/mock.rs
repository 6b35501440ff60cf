//! Recording pin adapter for unit tests.

use crate::hal::{Pin, PinAdapter, PinMode, LOW};

pub struct MockPins {
    levels: [bool; 256],
    now: u32,
    pub configured: Vec<(Pin, PinMode)>,
    pub writes: Vec<(Pin, bool)>,
}

impl MockPins {
    pub fn new() -> Self {
        Self {
            levels: [LOW; 256],
            now: 0,
            configured: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Set the level the next read of `pin` returns.
    pub fn set(&mut self, pin: Pin, level: bool) {
        self.levels[pin as usize] = level;
    }

    pub fn advance_to(&mut self, ms: u32) {
        self.now = ms;
    }

    /// Every level written to `pin`, oldest first.
    pub fn writes_to(&self, pin: Pin) -> Vec<bool> {
        self.writes
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
            .collect()
    }
}

impl PinAdapter for MockPins {
    fn configure_pin(&mut self, pin: Pin, mode: PinMode) {
        self.configured.push((pin, mode));
    }

    fn read_pin(&mut self, pin: Pin) -> bool {
        self.levels[pin as usize]
    }

    fn write_pin(&mut self, pin: Pin, level: bool) {
        self.writes.push((pin, level));
    }

    fn now_ms(&self) -> u32 {
        self.now
    }
}
