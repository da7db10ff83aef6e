use rand::{rngs::StdRng, Rng, SeedableRng};

/*
Pink Noise (Voss-McCartney)
===========================

White noise has equal power at every frequency. Pink noise has equal power
per OCTAVE, so its power density falls as 1/f (-3 dB per octave). It sounds
softer and deeper than white noise.

The Voss-McCartney method sums several white noise "rows", each held for a
different number of samples. A 5-bit counter decides which rows are
redrawn: row k is redrawn whenever bit k of the counter flips.

  counter  00000 → 00001 → 00010 → 00011 → 00100 ...
  row 0    new     new     new     new     new      every sample
  row 1    ·       ·       new     ·       new      every 2 samples
  row 2    ·       ·       ·       ·       new      every 4 samples
  row 3                                             every 8 samples
  row 4                                             every 16 samples

The flipped bits are simply previous_key XOR key. When the counter wraps
from 31 back to 0 every bit flips and all rows are redrawn.

A row held for 2^k samples contributes mostly below sample_rate / 2^(k+1),
so each row adds energy one octave lower than the previous one. Summed,
the spectrum falls at roughly -3 dB per octave from about sample_rate/32
up to Nyquist.

Output: five uniform values in [-1, 1) summed and scaled by 0.1, which
keeps the result within [-0.5, 0.5].
*/

const ROWS: usize = 5;
const KEY_MASK: u8 = 0x1F; // five bits
const OUTPUT_SCALE: f64 = 0.1;

/// Voss-McCartney pink noise source.
///
/// The random source is owned by the generator for its whole lifetime and
/// is never reseeded. Pass a seeded [`StdRng`] (or any other [`Rng`]) for
/// reproducible output.
#[derive(Debug, Clone)]
pub struct PinkNoise<R = StdRng> {
    rng: R,
    key: u8,
    white: [f64; ROWS],
}

impl PinkNoise<StdRng> {
    /// Deterministic generator: the same seed gives the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system's entropy source.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> PinkNoise<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            key: 0,
            white: [0.0; ROWS],
        }
    }

    /// Current counter value (0 - 31).
    pub fn key(&self) -> u8 {
        self.key
    }

    pub fn next_sample(&mut self) -> f64 {
        let last_key = self.key;
        self.key = (self.key + 1) & KEY_MASK;

        let flipped = last_key ^ self.key;
        for (row, white) in self.white.iter_mut().enumerate() {
            if flipped & (1 << row) != 0 {
                *white = self.rng.random_range(-1.0..1.0);
            }
        }

        self.white.iter().sum::<f64>() * OUTPUT_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PinkNoise::seeded(42);
        let mut b = PinkNoise::seeded(42);
        for _ in 0..10_000 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = PinkNoise::seeded(1);
        let mut b = PinkNoise::seeded(2);
        let differs = (0..64).any(|_| a.next_sample() != b.next_sample());
        assert!(differs, "different seeds should produce different noise");
    }

    #[test]
    fn test_output_range() {
        let mut noise = PinkNoise::seeded(7);
        for _ in 0..100_000 {
            let s = noise.next_sample();
            assert!((-0.5..=0.5).contains(&s), "sample out of range: {s}");
        }
    }

    #[test]
    fn test_key_wraps_after_31() {
        let mut noise = PinkNoise::seeded(3);
        for expected in 1..=31u8 {
            noise.next_sample();
            assert_eq!(noise.key(), expected);
        }
        noise.next_sample();
        assert_eq!(noise.key(), 0);
    }

    #[test]
    fn test_rows_redraw_on_flipped_bits_only() {
        let mut noise = PinkNoise::seeded(11);

        for _ in 0..96 {
            let before = noise.white;
            let last_key = noise.key;
            noise.next_sample();
            let flipped = last_key ^ noise.key;

            for row in 0..ROWS {
                let changed = before[row] != noise.white[row];
                let expected = flipped & (1 << row) != 0;
                assert_eq!(
                    changed, expected,
                    "row {row} at key {} -> {}",
                    last_key, noise.key
                );
            }
        }
    }

    #[test]
    fn test_row_update_rates() {
        let mut noise = PinkNoise::seeded(5);
        let mut updates = [0usize; ROWS];

        // Start at key 0, run exactly one full counter cycle
        for _ in 0..32 {
            let before = noise.white;
            noise.next_sample();
            for row in 0..ROWS {
                if before[row] != noise.white[row] {
                    updates[row] += 1;
                }
            }
        }

        assert_eq!(updates, [32, 16, 8, 4, 2]);
    }

    #[test]
    fn test_output_is_scaled_sum_of_rows() {
        let mut noise = PinkNoise::seeded(9);
        for _ in 0..100 {
            let s = noise.next_sample();
            let expected: f64 = noise.white.iter().sum::<f64>() * 0.1;
            assert_eq!(s, expected);
        }
    }
}
