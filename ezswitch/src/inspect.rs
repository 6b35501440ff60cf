//! Read-only views of the switch table for diagnostics.

use core::fmt;

use crate::hal::{level_label, Pin, PinAdapter};
use crate::registry::Switches;
use crate::switch::{Circuit, SwitchDescriptor, SwitchId, SwitchKind};

/// A copy of one switch's state at a point in time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchSnapshot {
    pub id: SwitchId,
    pub kind: SwitchKind,
    pub circuit: Circuit,
    pub input_pin: Pin,
    pub active_level: bool,
    /// Settled state of a toggle. Meaningless for buttons.
    pub logical_state: bool,
    pub pending: bool,
    pub debounce_start: u32,
    pub linked_output: Option<Pin>,
    pub output_level: bool,
}

impl SwitchSnapshot {
    fn of(sw: &SwitchDescriptor) -> Self {
        Self {
            id: sw.id,
            kind: sw.kind,
            circuit: sw.circuit,
            input_pin: sw.input_pin,
            active_level: sw.active_level,
            logical_state: sw.logical_state,
            pending: sw.pending,
            debounce_start: sw.debounce_start,
            linked_output: sw.linked_output,
            output_level: sw.output_level,
        }
    }

    pub fn circuit_label(&self) -> &'static str {
        self.circuit.label()
    }

    /// Raw level that means "on" for this switch.
    pub fn on_level_label(&self) -> &'static str {
        level_label(self.active_level)
    }

    /// `ON`/`OFF` for toggles, `n/a` for buttons.
    pub fn status_label(&self) -> &'static str {
        match (self.kind, self.logical_state) {
            (SwitchKind::Button, _) => "n/a",
            (SwitchKind::Toggle, true) => "ON",
            (SwitchKind::Toggle, false) => "OFF",
        }
    }
}

impl fmt::Display for SwitchSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "sw_id: {}  {}  pin = {}  circuit = {}",
            self.id,
            self.kind.name(),
            self.input_pin,
            self.circuit_label()
        )?;
        writeln!(
            f,
            "on_value = {}  status = {}  pending = {}  db_start = {} ms",
            self.on_level_label(),
            self.status_label(),
            if self.pending { "YES" } else { "NO" },
            self.debounce_start
        )?;
        match self.linked_output {
            Some(pin) => write!(
                f,
                "linked output pin = {}  linked pin status = {}",
                pin,
                level_label(self.output_level)
            ),
            None => write!(f, "*** No linked output pin"),
        }
    }
}

impl<A: PinAdapter, const N: usize> Switches<A, N> {
    /// Whether button `id` is currently held or still settling after a
    /// release. The button is polled first; with `mirror_output` that poll
    /// may flip its linked output, as [`poll`](Self::poll) would.
    ///
    /// Always `false` for toggles and unknown ids.
    pub fn is_button_down(&mut self, id: SwitchId, mirror_output: bool) -> bool {
        if !self.is_kind(id, SwitchKind::Button) {
            return false;
        }
        if mirror_output {
            self.poll(id);
        } else {
            self.poll_button(id);
        }
        self.descriptor(id).is_some_and(|sw| sw.pending)
    }

    /// [`is_button_down`](Self::is_button_down) without output mirroring.
    pub fn is_button_pressed(&mut self, id: SwitchId) -> bool {
        self.is_button_down(id, false)
    }

    pub fn snapshot(&self, id: SwitchId) -> Option<SwitchSnapshot> {
        self.descriptor(id).map(SwitchSnapshot::of)
    }

    /// Snapshots of every registered switch, in id order.
    pub fn snapshots(&self) -> impl Iterator<Item = SwitchSnapshot> + '_ {
        self.slots[..self.len()].iter().map(SwitchSnapshot::of)
    }
}
