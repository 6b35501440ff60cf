use std::io::Write;

use anyhow::{Context, Result};
use ezswitch::{hal::level_label, PinAdapter, PollResult, ReversalPolicy, SwitchId, Switches};

use crate::script::{Command, Script, Target};
use crate::sim::SimPins;

/// Slot storage for the simulated table. Scripts may ask for fewer.
pub const MAX_SLOTS: usize = 64;

/// What happened over a whole script run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub transitions: usize,
    pub last_switched: Option<SwitchId>,
}

/// Replay `script` against a simulated board, writing a trace to `out`.
pub fn run_script(script: &Script, out: &mut impl Write) -> Result<Summary> {
    let mut switches = Switches::<SimPins, MAX_SLOTS>::with_capacity(SimPins::new(), script.capacity)
        .context("creating switch table")?;
    let mut summary = Summary::default();
    let mut writes_seen = 0;

    for &(line_num, command) in &script.commands {
        let now = switches.adapter().now_ms();
        match command {
            Command::Debounce(ms) => {
                switches.set_debounce(ms);
                if i64::from(ms) != i64::from(switches.debounce()) {
                    writeln!(out, "line {}: debounce {} ignored", line_num, ms)?;
                }
            }
            Command::Strict(strict) => switches.set_reversal_policy(if strict {
                ReversalPolicy::Cancel
            } else {
                ReversalPolicy::Confirm
            }),
            Command::Switch { kind, pin, circuit } => {
                match switches.register(kind, pin, circuit) {
                    Ok(id) => writeln!(
                        out,
                        "switch {}: {} on pin {} ({})",
                        id,
                        kind.name(),
                        pin,
                        circuit.label()
                    )?,
                    Err(e) => writeln!(out, "line {}: switch rejected: {}", line_num, e)?,
                }
            }
            Command::Link { id, output, level } => {
                if let Err(e) = switches.link(id, output, level) {
                    writeln!(out, "line {}: link {} failed: {}", line_num, id, e)?;
                }
            }
            Command::At(ms) => switches.adapter_mut().set_time(ms),
            Command::Set { pin, level } => switches.adapter_mut().set_level(pin, level),
            Command::Poll(Target::One(id)) => {
                let result = switches.poll(id);
                if result.is_transition() {
                    summary.transitions += 1;
                }
                writeln!(out, "{:>6} ms  poll {} -> {}", now, id, describe(result))?;
            }
            Command::Poll(Target::All) => {
                for index in 0..switches.len() {
                    let id = SwitchId::new(index as u8);
                    let result = switches.poll(id);
                    if result.is_transition() {
                        summary.transitions += 1;
                        writeln!(out, "{:>6} ms  poll {} -> {}", now, id, describe(result))?;
                    }
                }
            }
            Command::Pressed { id, mirror } => {
                let down = switches.is_button_down(id, mirror);
                writeln!(
                    out,
                    "{:>6} ms  pressed {} -> {}",
                    now,
                    id,
                    if down { "yes" } else { "no" }
                )?;
            }
            Command::Reset(Target::One(id)) => {
                if !switches.reset_switch(id) {
                    writeln!(out, "line {}: reset {}: no such switch", line_num, id)?;
                }
            }
            Command::Reset(Target::All) => switches.reset_switches(),
            Command::Print(Some(id)) => match switches.snapshot(id) {
                Some(snapshot) => writeln!(out, "{}\n", snapshot)?,
                None => writeln!(out, "line {}: print {}: no such switch", line_num, id)?,
            },
            Command::Print(None) => {
                writeln!(out, "Declared & configured switches:")?;
                for snapshot in switches.snapshots() {
                    writeln!(out, "{}\n", snapshot)?;
                }
            }
        }

        let writes = switches.adapter().writes();
        for &(at, pin, level) in &writes[writes_seen..] {
            writeln!(out, "{:>6} ms  output pin {} -> {}", at, pin, level_label(level))?;
        }
        writes_seen = writes.len();
    }

    summary.last_switched = switches.last_switched();
    Ok(summary)
}

fn describe(result: PollResult) -> &'static str {
    match result {
        PollResult::NoEvent => "no event",
        PollResult::UnconfiguredId => "not configured",
        PollResult::Transition => "TRANSITION",
    }
}
