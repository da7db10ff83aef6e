use std::f64::consts::TAU;

/*
Phase Accumulation
==================

A sine oscillator whose frequency changes over time cannot be written as
sin(2π·f(t)·t). When f moves, the product f(t)·t jumps, and the waveform
jumps with it: an audible click on every change.

Instead, the oscillator keeps a running phase and adds a small step each
sample:

    Δφ_n   = 2π · f(t_n) / sample_rate
    φ_{n+1} = φ_n + Δφ_n
    out_n  = sin(φ_n)

The phase itself is continuous no matter how f moves; only its slope
(the instantaneous frequency) changes. Consecutive samples are always
exactly one Δφ apart.

  phase
    ^                       ╱
    │                    ╱╱      slope = current frequency
    │               ╱╱╱
    │        ╱╱╱╱╱╱          (never a vertical step)
    │╱╱╱╱╱╱╱
    └───────────────────────→ samples

The phase is never wrapped back into [0, 2π). It grows by roughly
2π·f per second, which stays well inside f64 precision for sessions of
several hours; the small drift against a closed-form phase is accepted.
At constant f and φ_0 = 0 the output is exactly sin(2π·f·n / sample_rate),
so the first sample of every oscillator is 0.
*/

/// Running phase of one sine oscillator.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    sample_rate: f64,
    phase: f64,
}

impl PhaseAccumulator {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f64,
            phase: 0.0,
        }
    }

    /// Phase in radians, unwrapped.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Phase step for one sample at `frequency` Hz.
    #[inline]
    pub fn increment(&self, frequency: f64) -> f64 {
        TAU * frequency / self.sample_rate
    }

    /// Output sin of the current phase, then advance one sample at `frequency`.
    #[inline]
    pub fn tick(&mut self, frequency: f64) -> f64 {
        let out = self.phase.sin();
        self.phase += self.increment(frequency);
        out
    }
}
