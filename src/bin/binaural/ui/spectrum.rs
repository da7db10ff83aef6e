//! Spectrum analyzer widget
//!
//! FFT-based frequency spectrum with log-spaced bins, so the low carrier
//! range gets as much room as the noise floor above it.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame as TermFrame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Number of frequency bins to display
const SPECTRUM_BINS: usize = 48;

/// Lowest displayed frequency (Hz)
const MIN_FREQ: f32 = 20.0;

/// Floor for empty or silent bins (dB)
const FLOOR_DB: f64 = -120.0;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// Display frequency for each bin (Hz)
    freq_bins: Vec<f64>,
    /// FFT bin index for each display bin
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 frequency, magnitude dB)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// `buffer_len` is the FFT size and must match the buffers passed to
    /// [`SpectrumAnalyzer::update`].
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        // Hann window - reduces spectral leakage
        let window: Vec<f32> = (0..buffer_len)
            .map(|i| {
                if buffer_len > 1 {
                    let denom = (buffer_len - 1) as f32;
                    0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        // Log-spaced frequency bins (20 Hz to Nyquist)
        let max_freq = (sample_rate / 2.0).min(20_000.0).max(1.0);
        let min_freq = MIN_FREQ.min(max_freq);
        let ratio = (max_freq / min_freq) as f64;
        let half = (buffer_len / 2).max(1);

        let mut freq_bins = Vec::with_capacity(SPECTRUM_BINS);
        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = min_freq as f64 * ratio.powf(t);
            let index = ((freq * buffer_len as f64 / sample_rate as f64).round() as usize)
                .min(half - 1);
            freq_bins.push(freq);
            bin_indices.push(index);
        }

        let scratch = vec![Complex::new(0.0, 0.0); buffer_len];
        let spectrum = freq_bins.iter().map(|&f| (f.log10(), FLOOR_DB)).collect();

        Self {
            window,
            freq_bins,
            bin_indices,
            fft,
            scratch,
            spectrum,
        }
    }

    /// Recompute the spectrum; buffers of the wrong length are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, sample), w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        for ((point, &index), &freq) in self
            .spectrum
            .iter_mut()
            .zip(&self.bin_indices)
            .zip(&self.freq_bins)
        {
            let power = self.scratch[index].norm_sqr().max(1e-12);
            *point = (freq.log10(), (10.0 * (power as f64).log10()).max(FLOOR_DB));
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }

    /// Display frequency (Hz) of the loudest bin.
    pub fn peak_frequency(&self) -> f64 {
        self.spectrum
            .iter()
            .zip(&self.freq_bins)
            .max_by(|((_, a), _), ((_, b), _)| a.total_cmp(b))
            .map(|(_, &freq)| freq)
            .unwrap_or(0.0)
    }
}

pub fn render_spectrum(frame: &mut TermFrame, area: Rect, analyzer: &SpectrumAnalyzer) {
    let spectrum = analyzer.data();
    let block = Block::default()
        .title(format!(" Spectrum (peak {:.0} Hz) ", analyzer.peak_frequency()))
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let (min_x, max_x) = spectrum
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), (x, _)| (lo.min(*x), hi.max(*x)));
    let max_db = spectrum.iter().map(|(_, db)| *db).fold(-100.0, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([min_x.min(max_x), max_x.max(min_x + 1.0)])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
