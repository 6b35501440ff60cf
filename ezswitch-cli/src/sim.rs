use std::collections::HashMap;

use ezswitch::{Pin, PinAdapter, PinMode, HIGH, LOW};

/// A simulated board: input levels are set by hand, the clock only moves
/// when told to, and every output write is recorded.
#[derive(Debug, Default)]
pub struct SimPins {
    levels: HashMap<Pin, bool>,
    modes: HashMap<Pin, PinMode>,
    now: u32,
    writes: Vec<(u32, Pin, bool)>,
}

impl SimPins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&mut self, pin: Pin, level: bool) {
        self.levels.insert(pin, level);
    }

    pub fn set_time(&mut self, ms: u32) {
        self.now = ms;
    }

    pub fn mode(&self, pin: Pin) -> Option<PinMode> {
        self.modes.get(&pin).copied()
    }

    /// Output writes as `(time, pin, level)`, oldest first.
    pub fn writes(&self) -> &[(u32, Pin, bool)] {
        &self.writes
    }
}

impl PinAdapter for SimPins {
    fn configure_pin(&mut self, pin: Pin, mode: PinMode) {
        self.modes.insert(pin, mode);
    }

    /// A pin that was never driven floats to its pull resistor's level.
    fn read_pin(&mut self, pin: Pin) -> bool {
        match self.levels.get(&pin) {
            Some(level) => *level,
            None if self.mode(pin) == Some(PinMode::InputPullUp) => HIGH,
            None => LOW,
        }
    }

    fn write_pin(&mut self, pin: Pin, level: bool) {
        self.writes.push((self.now, pin, level));
    }

    fn now_ms(&self) -> u32 {
        self.now
    }
}
