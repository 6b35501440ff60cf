//! The switch table.
//!
//! Switches are appended in registration order and never removed. Slot
//! storage is a fixed `[_; N]` array; the usable capacity is chosen at
//! construction and can be smaller than `N`.

use crate::error::{CapacityError, RegisterError};
use crate::hal::{Pin, PinAdapter};
use crate::switch::{Circuit, SwitchDescriptor, SwitchId, SwitchKind};

/// Debounce period used until [`Switches::set_debounce`] is called.
pub const DEFAULT_DEBOUNCE_MS: u32 = 10;

/// Largest table a `u8` switch id can address.
pub const MAX_SWITCHES: usize = u8::MAX as usize;

/// What a toggle switch does when its raw reading returns to the settled
/// state before the debounce window has elapsed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReversalPolicy {
    /// Abandon the window. A bounce that reverts never reports a transition.
    #[default]
    Cancel,
    /// Keep the window running and flip once it expires, whatever the pin
    /// reads by then.
    Confirm,
}

/// A fixed-capacity table of debounced switches sharing one pin adapter.
pub struct Switches<A, const N: usize> {
    pub(crate) adapter: A,
    pub(crate) slots: [SwitchDescriptor; N],
    capacity: usize,
    count: usize,
    pub(crate) debounce_ms: u32,
    pub(crate) reversal: ReversalPolicy,
    pub(crate) last_switched: Option<SwitchId>,
}

impl<A: PinAdapter, const N: usize> Switches<A, N> {
    const FITS_U8_IDS: () = assert!(N <= MAX_SWITCHES, "switch ids are u8");

    /// Create a table using all `N` slots.
    pub fn new(adapter: A) -> Self {
        let () = Self::FITS_U8_IDS;
        Self {
            adapter,
            slots: [SwitchDescriptor::UNCONFIGURED; N],
            capacity: N,
            count: 0,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            reversal: ReversalPolicy::default(),
            last_switched: None,
        }
    }

    /// Create a table limited to `capacity` switches.
    pub fn with_capacity(adapter: A, capacity: usize) -> Result<Self, CapacityError> {
        let max = N.min(MAX_SWITCHES);
        if capacity > max {
            warn!("requested {} switch slots, {} available", capacity, max);
            return Err(CapacityError::TooLarge {
                requested: capacity,
                max,
            });
        }
        let mut switches = Self::new(adapter);
        switches.capacity = capacity;
        Ok(switches)
    }

    /// Add a switch and configure its input pin for the given circuit.
    pub fn register(
        &mut self,
        kind: SwitchKind,
        input_pin: Pin,
        circuit: Circuit,
    ) -> Result<SwitchId, RegisterError> {
        if self.count >= self.capacity {
            warn!("switch table full ({} slots)", self.capacity);
            return Err(RegisterError::CapacityExceeded);
        }

        // count < capacity <= MAX_SWITCHES, so the index fits in a u8.
        let id = SwitchId::new(self.count as u8);
        self.slots[self.count] = SwitchDescriptor::new(id, kind, input_pin, circuit);
        self.adapter.configure_pin(input_pin, circuit.pin_mode());
        self.count += 1;

        debug!("switch {} registered: {} on pin {}", id, kind, input_pin);
        Ok(id)
    }

    /// Like [`register`](Self::register), taking the numeric kind and
    /// circuit codes (button = 1, toggle = 2; C1 = 1, C2 = 2, C3 = 3).
    pub fn register_raw(
        &mut self,
        kind: u8,
        input_pin: Pin,
        circuit: u8,
    ) -> Result<SwitchId, RegisterError> {
        let kind = SwitchKind::try_from(kind)?;
        let circuit = Circuit::try_from(circuit)?;
        self.register(kind, input_pin, circuit)
    }

    pub fn free_slots(&self) -> usize {
        self.capacity - self.count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of registered switches.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Set the debounce period shared by every switch. Negative periods are
    /// ignored and the previous value is kept.
    pub fn set_debounce(&mut self, period_ms: i32) {
        if let Ok(period_ms) = u32::try_from(period_ms) {
            self.debounce_ms = period_ms;
        }
    }

    pub fn debounce(&self) -> u32 {
        self.debounce_ms
    }

    pub fn set_reversal_policy(&mut self, policy: ReversalPolicy) {
        self.reversal = policy;
    }

    pub fn reversal_policy(&self) -> ReversalPolicy {
        self.reversal
    }

    /// The switch that most recently completed a debounced transition.
    pub fn last_switched(&self) -> Option<SwitchId> {
        self.last_switched
    }

    /// Abandon any debounce window in progress on `id`. Returns `false` if
    /// `id` is not a registered switch.
    pub fn reset_switch(&mut self, id: SwitchId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.slots[index].pending = false;
                true
            }
            None => false,
        }
    }

    /// Abandon every debounce window in progress.
    pub fn reset_switches(&mut self) {
        for sw in &mut self.slots[..self.count] {
            sw.pending = false;
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Tear down the table and hand back the adapter.
    pub fn release(self) -> A {
        self.adapter
    }

    /// Slot index for `id`, if it names a registered switch.
    pub(crate) fn index_of(&self, id: SwitchId) -> Option<usize> {
        let index = id.index();
        (index < self.count).then_some(index)
    }

    pub(crate) fn descriptor(&self, id: SwitchId) -> Option<&SwitchDescriptor> {
        self.index_of(id).map(|index| &self.slots[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::PinMode;
    use crate::mock::MockPins;

    #[test]
    fn test_ids_are_sequential() {
        let mut switches: Switches<_, 4> = Switches::new(MockPins::new());
        let a = switches.register(SwitchKind::Toggle, 2, Circuit::C2).unwrap();
        let b = switches.register(SwitchKind::Button, 3, Circuit::C1).unwrap();
        let c = switches.register(SwitchKind::Button, 4, Circuit::C3).unwrap();
        assert_eq!(a, SwitchId::new(0));
        assert_eq!(b, SwitchId::new(1));
        assert_eq!(c, SwitchId::new(2));
        assert_eq!(switches.len(), 3);
    }

    #[test]
    fn test_register_configures_input_pin() {
        let mut switches: Switches<_, 4> = Switches::new(MockPins::new());
        switches.register(SwitchKind::Toggle, 2, Circuit::C2).unwrap();
        switches.register(SwitchKind::Button, 3, Circuit::C1).unwrap();
        switches.register(SwitchKind::Button, 4, Circuit::C3).unwrap();
        assert_eq!(
            switches.adapter().configured,
            vec![
                (2, PinMode::InputPullUp),
                (3, PinMode::Input),
                (4, PinMode::InputPullDown),
            ]
        );
    }

    #[test]
    fn test_free_slots_count_down() {
        let mut switches: Switches<_, 5> = Switches::new(MockPins::new());
        assert_eq!(switches.free_slots(), 5);
        for pin in 0..5 {
            let before = switches.free_slots();
            switches.register(SwitchKind::Button, pin, Circuit::C1).unwrap();
            assert_eq!(switches.free_slots(), before - 1);
        }
        assert_eq!(switches.free_slots(), 0);
    }

    #[test]
    fn test_sixth_switch_exceeds_capacity() {
        let mut switches: Switches<_, 5> = Switches::new(MockPins::new());
        for pin in 0..5 {
            switches.register(SwitchKind::Toggle, pin, Circuit::C3).unwrap();
        }
        assert_eq!(
            switches.register(SwitchKind::Button, 9, Circuit::C1),
            Err(RegisterError::CapacityExceeded)
        );
        assert_eq!(switches.free_slots(), 0);
        assert_eq!(switches.len(), 5);
        // The rejected pin is left alone.
        assert!(switches.adapter().configured.iter().all(|(pin, _)| *pin != 9));
    }

    #[test]
    fn test_with_capacity_limits_slots() {
        let mut switches: Switches<_, 8> = Switches::with_capacity(MockPins::new(), 2).unwrap();
        assert_eq!(switches.capacity(), 2);
        switches.register(SwitchKind::Button, 1, Circuit::C1).unwrap();
        switches.register(SwitchKind::Button, 2, Circuit::C1).unwrap();
        assert_eq!(
            switches.register(SwitchKind::Button, 3, Circuit::C1),
            Err(RegisterError::CapacityExceeded)
        );
    }

    #[test]
    fn test_with_capacity_beyond_storage() {
        let result: Result<Switches<_, 4>, _> = Switches::with_capacity(MockPins::new(), 5);
        assert_eq!(
            result.err(),
            Some(CapacityError::TooLarge {
                requested: 5,
                max: 4
            })
        );
    }

    #[test]
    fn test_zero_capacity() {
        let mut switches: Switches<_, 4> = Switches::with_capacity(MockPins::new(), 0).unwrap();
        assert!(switches.is_empty());
        assert_eq!(
            switches.register(SwitchKind::Toggle, 1, Circuit::C2),
            Err(RegisterError::CapacityExceeded)
        );
    }

    #[test]
    fn test_register_raw_rejects_bad_codes() {
        let mut switches: Switches<_, 4> = Switches::new(MockPins::new());
        assert_eq!(switches.register_raw(3, 2, 1), Err(RegisterError::InvalidParameters));
        assert_eq!(switches.register_raw(1, 2, 0), Err(RegisterError::InvalidParameters));
        assert_eq!(switches.len(), 0);
        assert!(switches.adapter().configured.is_empty());

        let id = switches.register_raw(2, 2, 2).unwrap();
        let sw = switches.descriptor(id).unwrap();
        assert_eq!(sw.kind, SwitchKind::Toggle);
        assert_eq!(sw.circuit, Circuit::C2);
    }

    #[test]
    fn test_bad_codes_checked_before_capacity() {
        let mut switches: Switches<_, 1> = Switches::new(MockPins::new());
        switches.register(SwitchKind::Button, 1, Circuit::C1).unwrap();
        assert_eq!(switches.register_raw(7, 2, 1), Err(RegisterError::InvalidParameters));
    }

    #[test]
    fn test_set_debounce_ignores_negative() {
        let mut switches: Switches<_, 1> = Switches::new(MockPins::new());
        assert_eq!(switches.debounce(), DEFAULT_DEBOUNCE_MS);
        switches.set_debounce(25);
        assert_eq!(switches.debounce(), 25);
        switches.set_debounce(-1);
        assert_eq!(switches.debounce(), 25);
        switches.set_debounce(0);
        assert_eq!(switches.debounce(), 0);
    }

    #[test]
    fn test_reset_switch() {
        let mut switches: Switches<_, 4> = Switches::new(MockPins::new());
        let a = switches.register(SwitchKind::Button, 1, Circuit::C1).unwrap();
        let b = switches.register(SwitchKind::Button, 2, Circuit::C1).unwrap();
        switches.slots[0].pending = true;
        switches.slots[1].pending = true;

        assert!(switches.reset_switch(b));
        assert!(switches.descriptor(a).unwrap().pending);
        assert!(!switches.descriptor(b).unwrap().pending);

        assert!(!switches.reset_switch(SwitchId::new(2)));
        assert!(!switches.reset_switch(SwitchId::new(200)));
    }

    #[test]
    fn test_reset_switches() {
        let mut switches: Switches<_, 4> = Switches::new(MockPins::new());
        for pin in 0..3 {
            switches.register(SwitchKind::Toggle, pin, Circuit::C3).unwrap();
        }
        for sw in &mut switches.slots[..3] {
            sw.pending = true;
        }
        switches.reset_switches();
        assert!(switches.slots[..3].iter().all(|sw| !sw.pending));
    }

    #[test]
    fn test_unregistered_slot_is_not_addressable() {
        let mut switches: Switches<_, 4> = Switches::new(MockPins::new());
        switches.register(SwitchKind::Button, 1, Circuit::C1).unwrap();
        assert!(switches.descriptor(SwitchId::new(0)).is_some());
        assert!(switches.descriptor(SwitchId::new(1)).is_none());
        assert!(switches.descriptor(SwitchId::new(3)).is_none());
    }

    #[test]
    fn test_release_returns_adapter() {
        let mut switches: Switches<_, 2> = Switches::new(MockPins::new());
        switches.register(SwitchKind::Button, 6, Circuit::C1).unwrap();
        let pins = switches.release();
        assert_eq!(pins.configured, vec![(6, PinMode::Input)]);
    }
}
