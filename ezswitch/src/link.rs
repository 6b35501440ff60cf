//! Mirroring a switch onto a digital output.
//!
//! A linked output pin is flipped every time its switch completes a
//! debounced transition through [`Switches::poll`]. The raw
//! [`poll_toggle`](Switches::poll_toggle) and
//! [`poll_button`](Switches::poll_button) paths never touch it.

use crate::error::LinkError;
use crate::hal::{Pin, PinAdapter, PinMode};
use crate::registry::Switches;
use crate::switch::SwitchId;

impl<A: PinAdapter, const N: usize> Switches<A, N> {
    /// Link `output` to switch `id`, driving it to `level` until the first
    /// transition. Re-linking replaces the previous output.
    ///
    /// Passing `None` removes the current link instead, leaving the old pin
    /// at `level`.
    pub fn link(&mut self, id: SwitchId, output: Option<Pin>, level: bool) -> Result<(), LinkError> {
        let index = self.index_of(id).ok_or(LinkError::NoSuchSwitch)?;

        match output {
            Some(pin) => {
                self.adapter.configure_pin(pin, PinMode::Output);
                self.adapter.write_pin(pin, level);
                self.slots[index].linked_output = Some(pin);
                debug!("switch {} linked to output {}", id, pin);
            }
            None => {
                let pin = self.slots[index]
                    .linked_output
                    .ok_or(LinkError::NotLinked)?;
                self.adapter.write_pin(pin, level);
                self.slots[index].linked_output = None;
                debug!("switch {} unlinked from output {}", id, pin);
            }
        }
        self.slots[index].output_level = level;
        Ok(())
    }

    /// Remove the output link of switch `id`, leaving the pin at `level`.
    pub fn unlink(&mut self, id: SwitchId, level: bool) -> Result<(), LinkError> {
        self.link(id, None, level)
    }

    pub(crate) fn on_confirmed_transition(&mut self, id: SwitchId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        let sw = &mut self.slots[index];
        if let Some(pin) = sw.linked_output {
            sw.output_level = !sw.output_level;
            self.adapter.write_pin(pin, sw.output_level);
        }
    }
}
