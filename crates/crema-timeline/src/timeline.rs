//! Phase timeline simulator.
//!
//! Walks a profile's phases at a fixed tick and reports, per tick, the value a
//! single channel (pressure or flow) is expected to have. All state lives in
//! an [`Accumulator`] that is threaded through [`step`], so two channels can
//! be simulated independently and any tick can be replayed from its state.
//!
//! Time is derived from integer tick counters, never from summing `TICK`, so
//! a phase of `k * 0.1` seconds always yields exactly `k` samples. A phase
//! whose duration is not a multiple of the tick ends on its last tick before
//! the nominal boundary; the remainder is dropped, not carried into the next
//! phase.

use serde::Serialize;

use crema_model::{Channel, Phase, TransitionKind, CARRY_OVER};

use crate::easing::apply_easing;

/// Sample spacing in seconds.
pub const TICK: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub time: f64,
    pub value: f64,
    /// True when the phase's pump is driving this channel, false when the
    /// value is only the configured limit.
    pub is_driven_channel: bool,
}

/// Simulation state between two ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    phase_index: usize,
    ticks: u64,
    phase_ticks: u64,
    /// Channel value when the current phase was entered.
    phase_start: f64,
    /// Value the current phase ramps toward.
    effective: f64,
}

impl Accumulator {
    /// State before the first tick: channel at rest, ramping toward the first
    /// phase's configured value.
    pub fn start(phases: &[Phase], channel: Channel) -> Self {
        let effective = phases
            .first()
            .map(|p| resolve_target(p.pump.channel_value(channel), 0.0))
            .unwrap_or(0.0);
        Accumulator {
            phase_index: 0,
            ticks: 0,
            phase_ticks: 0,
            phase_start: 0.0,
            effective,
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// Global clock in seconds.
    pub fn time(&self) -> f64 {
        self.ticks as f64 * TICK
    }

    /// Clock since the current phase started, in seconds.
    pub fn phase_time(&self) -> f64 {
        self.phase_ticks as f64 * TICK
    }

    pub fn is_finished(&self, phases: &[Phase]) -> bool {
        self.phase_index >= phases.len()
    }
}

/// Configured value for an entered phase. The carry-over sentinel holds the
/// value the previous phase ended on.
fn resolve_target(configured: f64, previous: f64) -> f64 {
    if configured == CARRY_OVER {
        previous
    } else if configured.is_nan() {
        0.0
    } else {
        configured
    }
}

/// Emit one sample and return the state for the next tick.
///
/// Returns `None` once every phase has been walked.
pub fn step(phases: &[Phase], channel: Channel, acc: Accumulator) -> Option<(Sample, Accumulator)> {
    let phase = phases.get(acc.phase_index)?;

    let transition = phase.transition.as_ref();
    let span = transition
        .and_then(|t| t.duration)
        .filter(|d| *d > 0.0)
        .unwrap_or(phase.duration);
    let kind = transition
        .map(|t| t.kind)
        .unwrap_or(TransitionKind::Linear);
    let alpha = apply_easing(acc.phase_time() / span, kind);

    let driven = phase.pump.driven_channel() == Some(channel);
    let value = if driven {
        acc.phase_start + (acc.effective - acc.phase_start) * alpha
    } else {
        phase.pump.channel_value(channel)
    };

    let sample = Sample {
        time: acc.time(),
        value,
        is_driven_channel: driven,
    };

    let mut next = Accumulator {
        ticks: acc.ticks + 1,
        phase_ticks: acc.phase_ticks + 1,
        ..acc
    };
    // negated so a NaN duration ends the phase instead of spinning forever
    if !(next.phase_time() < phase.duration) {
        next.phase_ticks = 0;
        next.phase_index += 1;
        if let Some(upcoming) = phases.get(next.phase_index) {
            next.phase_start = value;
            next.effective = resolve_target(upcoming.pump.channel_value(channel), value);
        }
    }

    Some((sample, next))
}

/// Iterator over a channel's samples.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    phases: &'a [Phase],
    channel: Channel,
    acc: Accumulator,
}

impl<'a> Timeline<'a> {
    pub fn new(phases: &'a [Phase], channel: Channel) -> Self {
        Timeline {
            phases,
            channel,
            acc: Accumulator::start(phases, channel),
        }
    }

    /// State that will produce the next sample.
    pub fn accumulator(&self) -> Accumulator {
        self.acc
    }
}

impl Iterator for Timeline<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let (sample, next) = step(self.phases, self.channel, self.acc)?;
        self.acc = next;
        Some(sample)
    }
}

/// Sample `channel` over the whole profile.
pub fn simulate(phases: &[Phase], channel: Channel) -> Vec<Sample> {
    Timeline::new(phases, channel).collect()
}

/// Both channels of a profile, side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub pressure: Vec<Sample>,
    pub flow: Vec<Sample>,
}

pub fn simulate_both(phases: &[Phase]) -> Trajectory {
    Trajectory {
        pressure: simulate(phases, Channel::Pressure),
        flow: simulate(phases, Channel::Flow),
    }
}
