use log::debug;

use crate::{
    error::{Error, Result},
    schedule::{breakpoint::Breakpoint, status::Status},
};

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/*
Parameter Curves
================

A session is a list of breakpoints on a timeline. Between two breakpoints
the continuous parameters move in a straight line; outside the list they
hold the nearest end value.

  frequency
      ^
  300 ┤●
      │  ╲
      │    ╲
  150 ┤      ●━━━━━━━━━━━━━━━━━  (held after the last breakpoint)
      └──┬───┬─────────────────→ t
         0  10

Continuous (linear):   frequency, beat frequency, tone volume

    v(t) = v_i + (v_{i+1} - v_i) * (t - time_i) / (time_{i+1} - time_i)

Stepped:               noise on/off and noise volume

    The setting of breakpoint i holds for t in [time_i, time_{i+1}) and
    switches abruptly at the next breakpoint.

  noise
      ^
  0.4 ┤━━━━━━━━┓
      │        ┃
  0.0 ┤        ┗━━━━━━━━━━━━━━━
      └──┬─────┬───────────────→ t
         0     10


Duplicate Times
---------------

Two breakpoints may share a time. The interval between them has zero width
and is never interpolated across. Approaching from the left, values move
towards the earlier entry; from the shared time onward the later entry
wins. The only exception is the very first time: queries at or before it
always return the first breakpoint.


Lookup
------

The active interval is found with a binary search over the sorted times,
so each query costs O(log n) regardless of where t falls.
*/

/// Reject an empty list or any time that is negative or not finite.
pub(crate) fn validate(breakpoints: &[Breakpoint]) -> Result<()> {
    if breakpoints.is_empty() {
        return Err(Error::EmptySchedule);
    }

    match breakpoints
        .iter()
        .enumerate()
        .find(|(_, bp)| !bp.time.is_finite() || bp.time < 0.0)
    {
        Some((index, bp)) => Err(Error::InvalidBreakpoint {
            index,
            time: bp.time,
        }),
        None => Ok(()),
    }
}

/// Stable sort: equal times keep their given order.
pub(crate) fn sort_by_time(breakpoints: &mut [Breakpoint]) {
    breakpoints.sort_by(|a, b| a.time.total_cmp(&b.time));
}

/// Pink noise state in effect at a moment of the session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoiseSetting {
    pub on: bool,
    pub volume: f64,
}

impl NoiseSetting {
    /// Effective level: the volume while on, silence while off.
    pub fn gain(&self) -> f64 {
        if self.on {
            self.volume
        } else {
            0.0
        }
    }
}

/// Sorted breakpoints with pure query methods.
///
/// Every query accepts any `t`, including negative or past-the-end times,
/// and saturates at the boundary values. A `Schedule` is never mutated
/// after construction, so it can be shared between the audio sources and
/// any status reader.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    breakpoints: Vec<Breakpoint>,
}

impl Schedule {
    /// Validate and sort `breakpoints` by time.
    ///
    /// Sorting is stable: entries with equal times keep their given order,
    /// which decides the duplicate-time tie-break.
    pub fn new(mut breakpoints: Vec<Breakpoint>) -> Result<Self> {
        validate(&breakpoints)?;
        sort_by_time(&mut breakpoints);

        debug!(
            "schedule built: {} breakpoints, {:.2}s",
            breakpoints.len(),
            breakpoints[breakpoints.len() - 1].time
        );

        Ok(Self { breakpoints })
    }

    /// Scale every breakpoint time by `stretch`, then build.
    pub fn stretched(breakpoints: Vec<Breakpoint>, stretch: f64) -> Result<Self> {
        if !stretch.is_finite() || stretch <= 0.0 {
            return Err(Error::InvalidStretch(stretch));
        }

        Self::new(
            breakpoints
                .into_iter()
                .map(|bp| bp.stretched(stretch))
                .collect(),
        )
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Session length in seconds: the time of the last breakpoint.
    pub fn total_duration(&self) -> f64 {
        self.last().time
    }

    /// Number of whole frames in the session at `sample_rate`.
    ///
    /// The duration is truncated to nanoseconds first and a trailing
    /// partial frame is dropped, so 0.7 s at 44.1 kHz is exactly 30870
    /// frames and 0.3333 s is 14698. Huge durations saturate.
    pub fn total_frames(&self, sample_rate: u32) -> u64 {
        let nanos = (self.total_duration() * NANOS_PER_SECOND as f64) as u128;
        let frames = nanos.saturating_mul(sample_rate as u128) / NANOS_PER_SECOND;
        u64::try_from(frames).unwrap_or(u64::MAX)
    }

    /// Carrier frequency (left channel) at `t` seconds.
    pub fn frequency(&self, t: f64) -> f64 {
        self.linear(t, |bp| bp.frequency)
    }

    pub fn beat_frequency(&self, t: f64) -> f64 {
        self.linear(t, |bp| bp.beat_frequency)
    }

    pub fn tone_volume(&self, t: f64) -> f64 {
        self.linear(t, |bp| bp.tone_volume)
    }

    /// Noise on/off and volume at `t`. Stepped, never interpolated.
    pub fn noise(&self, t: f64) -> NoiseSetting {
        let bp = self.step(t);
        NoiseSetting {
            on: bp.noise_on,
            volume: bp.noise_volume,
        }
    }

    /// All parameters at `t`, for display.
    pub fn status(&self, t: f64) -> Status {
        Status {
            time: t,
            total: self.total_duration(),
            frequency: self.frequency(t),
            beat_frequency: self.beat_frequency(t),
            tone_volume: self.tone_volume(t),
            noise: self.noise(t),
        }
    }

    fn first(&self) -> &Breakpoint {
        &self.breakpoints[0]
    }

    fn last(&self) -> &Breakpoint {
        &self.breakpoints[self.breakpoints.len() - 1]
    }

    /// Index of the first breakpoint strictly after `t`.
    fn upper_index(&self, t: f64) -> usize {
        self.breakpoints.partition_point(|bp| bp.time <= t)
    }

    fn linear(&self, t: f64, value: impl Fn(&Breakpoint) -> f64) -> f64 {
        let first = self.first();
        if t <= first.time {
            return value(first);
        }

        let upper = self.upper_index(t);
        if upper == 0 {
            // only reachable for NaN
            return value(first);
        }
        if upper == self.breakpoints.len() {
            return value(self.last());
        }

        let a = &self.breakpoints[upper - 1];
        let b = &self.breakpoints[upper];
        // a.time <= t < b.time, so the span is never zero
        let span = b.time - a.time;
        let (va, vb) = (value(a), value(b));
        va + (vb - va) * (t - a.time) / span
    }

    fn step(&self, t: f64) -> &Breakpoint {
        let first = self.first();
        if t <= first.time {
            return first;
        }

        match self.upper_index(t) {
            0 => first,
            upper => &self.breakpoints[upper - 1],
        }
    }
}
