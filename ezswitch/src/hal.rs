//! The hardware boundary.
//!
//! The switch table never touches registers itself. Everything it needs
//! from the board goes through [`PinAdapter`]: configure a pin, read it,
//! drive it, and tell the time in milliseconds.

/// Digital pin number, as labelled on the board.
pub type Pin = u8;

/// Raw level for a pin reading 3.3/5 V.
pub const HIGH: bool = true;
/// Raw level for a pin reading 0 V.
pub const LOW: bool = false;

/// Electrical mode a pin is placed in before use.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Floating input. The circuit must supply its own pull-down resistor.
    Input,
    /// Input with the microcontroller's internal pull-up enabled.
    InputPullUp,
    /// Input with the microcontroller's internal pull-down enabled.
    InputPullDown,
    /// Push-pull output.
    Output,
}

/// Pin access and a monotonic clock, supplied by the board support code.
pub trait PinAdapter {
    /// Put `pin` into `mode`.
    fn configure_pin(&mut self, pin: Pin, mode: PinMode);

    /// Read the raw level of `pin`.
    fn read_pin(&mut self, pin: Pin) -> bool;

    /// Drive `pin` to `level`.
    fn write_pin(&mut self, pin: Pin, level: bool);

    /// Milliseconds since an arbitrary epoch. Expected to wrap at `u32::MAX`.
    fn now_ms(&self) -> u32;
}

impl<A: PinAdapter + ?Sized> PinAdapter for &mut A {
    fn configure_pin(&mut self, pin: Pin, mode: PinMode) {
        (**self).configure_pin(pin, mode)
    }

    fn read_pin(&mut self, pin: Pin) -> bool {
        (**self).read_pin(pin)
    }

    fn write_pin(&mut self, pin: Pin, level: bool) {
        (**self).write_pin(pin, level)
    }

    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Display name for a raw level.
pub fn level_label(level: bool) -> &'static str {
    if level {
        "HIGH"
    } else {
        "LOW"
    }
}
