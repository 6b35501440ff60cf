//! Debounce algorithms for toggle and button switches.
//!
//! Both algorithms are driven entirely by the caller's poll loop and share
//! the table's single debounce period. Elapsed time is measured with
//! wrapping arithmetic, so the millisecond clock may roll over.
//!
//! # Toggle switches
//! A toggle has a settled logical state (initially off). When the pin,
//! normalised so that `true` means on, disagrees with that state, a
//! debounce window opens. Once the window has run for the debounce period
//! the state flips and one [`PollResult::Transition`] is reported. What
//! happens when the pin reverts mid-window is chosen by
//! [`ReversalPolicy`](crate::ReversalPolicy).
//!
//! # Button switches
//! A button event is a whole press-and-release cycle. Every poll that sees
//! the button held restarts the window, so the period is measured from the
//! last held reading: the event fires once the button has stayed released
//! for the debounce period.

use crate::hal::PinAdapter;
use crate::registry::{ReversalPolicy, Switches};
use crate::switch::{Circuit, SwitchId, SwitchKind};

/// Outcome of polling one switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollResult {
    /// Nothing confirmed yet, or the switch is idle.
    NoEvent,
    /// The id does not name a registered switch of the expected kind.
    UnconfiguredId,
    /// A debounced transition completed on this poll.
    Transition,
}

impl PollResult {
    pub fn is_transition(self) -> bool {
        self == PollResult::Transition
    }
}

impl<A: PinAdapter, const N: usize> Switches<A, N> {
    /// Poll a switch of either kind. On a confirmed transition any linked
    /// output pin is flipped.
    pub fn poll(&mut self, id: SwitchId) -> PollResult {
        let Some(kind) = self.descriptor(id).map(|sw| sw.kind) else {
            return PollResult::UnconfiguredId;
        };

        let result = match kind {
            SwitchKind::Button => self.debounce_button(id.index()),
            SwitchKind::Toggle => self.debounce_toggle(id.index()),
        };
        if result.is_transition() {
            self.on_confirmed_transition(id);
        }
        result
    }

    /// Poll every registered switch, in id order, with output mirroring.
    /// Returns the first switch that reported a transition.
    pub fn poll_all(&mut self) -> Option<SwitchId> {
        let mut first = None;
        for index in 0..self.len() {
            let id = SwitchId::new(index as u8);
            if self.poll(id).is_transition() && first.is_none() {
                first = Some(id);
            }
        }
        first
    }

    /// Run the toggle algorithm without touching any linked output.
    pub fn poll_toggle(&mut self, id: SwitchId) -> PollResult {
        if self.is_kind(id, SwitchKind::Toggle) {
            self.debounce_toggle(id.index())
        } else {
            PollResult::UnconfiguredId
        }
    }

    /// Run the button algorithm without touching any linked output.
    pub fn poll_button(&mut self, id: SwitchId) -> PollResult {
        if self.is_kind(id, SwitchKind::Button) {
            self.debounce_button(id.index())
        } else {
            PollResult::UnconfiguredId
        }
    }

    pub(crate) fn is_kind(&self, id: SwitchId, kind: SwitchKind) -> bool {
        self.descriptor(id).is_some_and(|sw| sw.kind == kind)
    }

    fn debounce_toggle(&mut self, index: usize) -> PollResult {
        let pin = self.slots[index].input_pin;
        let mut reading = self.adapter.read_pin(pin);
        let now = self.adapter.now_ms();

        let sw = &mut self.slots[index];
        if sw.circuit == Circuit::C2 {
            // Pulled up: the pin reads low while the switch is on.
            reading = !reading;
        }

        if reading != sw.logical_state && !sw.pending {
            sw.pending = true;
            sw.debounce_start = now;
            trace!("switch {} change detected at {}ms", sw.id, now);
        }
        if !sw.pending {
            return PollResult::NoEvent;
        }

        if self.reversal == ReversalPolicy::Cancel && reading == sw.logical_state {
            sw.pending = false;
            trace!("switch {} bounced back, window cancelled", sw.id);
            return PollResult::NoEvent;
        }

        if now.wrapping_sub(sw.debounce_start) >= self.debounce_ms {
            sw.logical_state = !sw.logical_state;
            sw.pending = false;
            self.last_switched = Some(sw.id);
            debug!("toggle {} now {}", sw.id, sw.logical_state);
            return PollResult::Transition;
        }
        PollResult::NoEvent
    }

    fn debounce_button(&mut self, index: usize) -> PollResult {
        let pin = self.slots[index].input_pin;
        let reading = self.adapter.read_pin(pin);
        let now = self.adapter.now_ms();

        let sw = &mut self.slots[index];
        if reading == sw.active_level {
            // Still held: restart the window.
            sw.pending = true;
            sw.debounce_start = now;
            return PollResult::NoEvent;
        }

        if sw.pending && now.wrapping_sub(sw.debounce_start) >= self.debounce_ms {
            sw.pending = false;
            self.last_switched = Some(sw.id);
            debug!("button {} press cycle complete", sw.id);
            return PollResult::Transition;
        }
        PollResult::NoEvent
    }
}
