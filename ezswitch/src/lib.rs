//! Debounced button and toggle switches for poll-driven firmware.
//!
//! A [`Switches`] table owns a [`PinAdapter`] and a fixed number of switch
//! slots. Each registered switch is polled from the application's own main
//! loop; contact bounce is filtered out and a [`PollResult::Transition`] is
//! reported once per genuine switch event. A switch can optionally drive
//! a linked output pin that flips on every transition.
//!
//! This crate is `no_std` so it can be used both by board firmware and by
//! the host-side simulator.
//!
//! ```
//! use ezswitch::{Circuit, Pin, PinAdapter, PinMode, PollResult, SwitchKind, Switches, LOW};
//!
//! struct Board { now: u32 }
//!
//! impl PinAdapter for Board {
//!     fn configure_pin(&mut self, _pin: Pin, _mode: PinMode) {}
//!     fn read_pin(&mut self, _pin: Pin) -> bool { LOW }
//!     fn write_pin(&mut self, _pin: Pin, _level: bool) {}
//!     fn now_ms(&self) -> u32 { self.now }
//! }
//!
//! let mut switches: Switches<Board, 4> = Switches::new(Board { now: 0 });
//! let toggle = switches.register(SwitchKind::Toggle, 2, Circuit::C2).unwrap();
//! assert_eq!(switches.poll(toggle), PollResult::NoEvent);
//! switches.adapter_mut().now = 10;
//! assert_eq!(switches.poll(toggle), PollResult::Transition);
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod debounce;
pub mod error;
pub mod hal;
pub mod inspect;
pub mod link;
pub mod registry;
pub mod switch;

#[cfg(test)]
mod mock;

pub use debounce::PollResult;
pub use error::{CapacityError, LinkError, RegisterError};
pub use hal::{Pin, PinAdapter, PinMode, HIGH, LOW};
pub use inspect::SwitchSnapshot;
pub use registry::{ReversalPolicy, Switches, DEFAULT_DEBOUNCE_MS, MAX_SWITCHES};
pub use switch::{Circuit, SwitchId, SwitchKind};
