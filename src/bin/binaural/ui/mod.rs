//! TUI module for binaural
//!
//! Shows session progress, the stereo output and its spectrum while the
//! session plays.

mod spectrum;
mod transport;
mod waveform;

use std::{sync::Arc, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame as TermFrame,
};
use rtrb::Consumer;

use binaural_dsp::{
    graph::{Frame, SILENCE},
    schedule::Schedule,
};

use super::state::PlaybackState;

use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// UI application state
pub struct UiApp {
    /// Ring buffer receiver for rendered frames
    audio_rx: Consumer<Frame>,
    schedule: Arc<Schedule>,
    playback: Arc<PlaybackState>,
    sample_rate: u32,
    /// Most recent frames, oldest first
    audio_buffer: Vec<Frame>,
    /// Mono mix of `audio_buffer` fed to the analyzer
    mono_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<Frame>,
        schedule: Arc<Schedule>,
        playback: Arc<PlaybackState>,
        sample_rate: u32,
    ) -> Self {
        Self {
            audio_rx,
            schedule,
            playback,
            sample_rate,
            audio_buffer: vec![SILENCE; VIS_BUFFER_SIZE],
            mono_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate as f32),
            should_quit: false,
        }
    }

    /// Run the UI event loop until the session ends or the user quits
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit && !self.playback.is_finished() {
            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            // Non-blocking, ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Drain the ring, keeping the last VIS_BUFFER_SIZE frames
    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(frame) = self.audio_rx.pop() {
            self.audio_buffer.push(frame);
            received = true;
        }

        if !received {
            return;
        }

        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }

        for (mono, [left, right]) in self.mono_buffer.iter_mut().zip(&self.audio_buffer) {
            *mono = 0.5 * (left + right);
        }
        self.spectrum.update(&self.mono_buffer);
    }

    fn handle_key(&mut self, key: KeyCode) {
        if let KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc = key {
            self.should_quit = true;
        }
    }

    fn render(&self, frame: &mut TermFrame) {
        let area = frame.area();

        // Main layout: transport, scope + spectrum, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Transport
                Constraint::Min(8),    // Visuals
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let status = self
            .schedule
            .status(self.playback.elapsed(self.sample_rate));
        let stats = AudioStats::from_frames(&self.audio_buffer);
        render_transport(frame, chunks[0], &status, &stats, self.sample_rate);

        let visuals = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        render_waveform(frame, visuals[0], &self.audio_buffer);
        render_spectrum(frame, visuals[1], &self.spectrum);

        let help = Paragraph::new(" [Q/Esc] Quit").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
