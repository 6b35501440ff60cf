//! Switch identity, kind and wiring.

use core::fmt;
use core::str::FromStr;

use crate::error::RegisterError;
use crate::hal::{Pin, PinMode, HIGH, LOW};

/// Slot index of a registered switch. Assigned in registration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchId(u8);

impl SwitchId {
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<SwitchId> for u8 {
    fn from(id: SwitchId) -> Self {
        id.0
    }
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a switch behaves mechanically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SwitchKind {
    /// Momentary: a switch event is one complete press-then-release cycle.
    Button = 1,
    /// Maintained: flips between on and off and stays there.
    Toggle = 2,
}

impl SwitchKind {
    /// Display name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            SwitchKind::Button => "BUTTON SWITCH",
            SwitchKind::Toggle => "TOGGLE SWITCH",
        }
    }
}

impl TryFrom<u8> for SwitchKind {
    type Error = RegisterError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(SwitchKind::Button),
            2 => Ok(SwitchKind::Toggle),
            _ => Err(RegisterError::InvalidParameters),
        }
    }
}

impl FromStr for SwitchKind {
    type Err = RegisterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("button") {
            Ok(SwitchKind::Button)
        } else if s.eq_ignore_ascii_case("toggle") {
            Ok(SwitchKind::Toggle)
        } else {
            Err(RegisterError::InvalidParameters)
        }
    }
}

/// Wiring scheme between the switch and its input pin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Circuit {
    /// Switch to 3.3/5 V with an external 10k pull-down. Active-high.
    C1 = 1,
    /// Switch to ground with the internal pull-up. Active-low.
    C2 = 2,
    /// Switch to 3.3/5 V with the internal pull-down. Active-high.
    C3 = 3,
}

impl Circuit {
    /// Input mode the pin must be configured with for this wiring.
    pub fn pin_mode(self) -> PinMode {
        match self {
            Circuit::C1 => PinMode::Input,
            Circuit::C2 => PinMode::InputPullUp,
            Circuit::C3 => PinMode::InputPullDown,
        }
    }

    /// Raw level that means the switch is engaged.
    pub fn active_level(self) -> bool {
        match self {
            Circuit::C2 => LOW,
            Circuit::C1 | Circuit::C3 => HIGH,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Circuit::C1 => "INPUT/circuit_C1",
            Circuit::C2 => "INPUT_PULLUP/circuit_C2",
            Circuit::C3 => "INPUT_PULLDOWN/circuit_C3",
        }
    }
}

impl TryFrom<u8> for Circuit {
    type Error = RegisterError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Circuit::C1),
            2 => Ok(Circuit::C2),
            3 => Ok(Circuit::C3),
            _ => Err(RegisterError::InvalidParameters),
        }
    }
}

impl FromStr for Circuit {
    type Err = RegisterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("c1") {
            Ok(Circuit::C1)
        } else if s.eq_ignore_ascii_case("c2") {
            Ok(Circuit::C2)
        } else if s.eq_ignore_ascii_case("c3") {
            Ok(Circuit::C3)
        } else {
            Err(RegisterError::InvalidParameters)
        }
    }
}

/// Per-switch bookkeeping held in the switch table.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SwitchDescriptor {
    pub id: SwitchId,
    pub kind: SwitchKind,
    pub circuit: Circuit,
    pub input_pin: Pin,
    pub active_level: bool,
    /// Settled on/off state. Toggle switches only.
    pub logical_state: bool,
    /// A raw change is inside its debounce window.
    pub pending: bool,
    pub debounce_start: u32,
    pub linked_output: Option<Pin>,
    pub output_level: bool,
}

impl SwitchDescriptor {
    /// Filler for slots that have not been registered yet.
    pub const UNCONFIGURED: Self = Self {
        id: SwitchId(0),
        kind: SwitchKind::Button,
        circuit: Circuit::C1,
        input_pin: 0,
        active_level: HIGH,
        logical_state: false,
        pending: false,
        debounce_start: 0,
        linked_output: None,
        output_level: LOW,
    };

    pub fn new(id: SwitchId, kind: SwitchKind, input_pin: Pin, circuit: Circuit) -> Self {
        Self {
            id,
            kind,
            circuit,
            input_pin,
            active_level: circuit.active_level(),
            ..Self::UNCONFIGURED
        }
    }
}
