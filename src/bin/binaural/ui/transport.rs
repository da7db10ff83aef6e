//! Transport widget - session position, current parameters and audio stats

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame as TermFrame,
};

use binaural_dsp::{graph::Frame, schedule::Status};

/// Audio statistics for display, per channel
pub struct AudioStats {
    pub peak: [f32; 2],
    pub rms: [f32; 2],
}

impl AudioStats {
    pub fn from_frames(frames: &[Frame]) -> Self {
        if frames.is_empty() {
            return Self {
                peak: [0.0; 2],
                rms: [0.0; 2],
            };
        }

        let mut peak = [0.0f32; 2];
        let mut sum_sq = [0.0f32; 2];
        for frame in frames {
            for ch in 0..2 {
                peak[ch] = peak[ch].max(frame[ch].abs());
                sum_sq[ch] += frame[ch] * frame[ch];
            }
        }
        let n = frames.len() as f32;
        let rms = [(sum_sq[0] / n).sqrt(), (sum_sq[1] / n).sqrt()];

        Self { peak, rms }
    }
}

fn clock(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{:02}:{:02}:{:02}", whole / 3600, (whole / 60) % 60, whole % 60)
}

pub fn render_transport(
    frame: &mut TermFrame,
    area: Rect,
    status: &Status,
    stats: &AudioStats,
    sample_rate: u32,
) {
    let block = Block::default().title(" binaural ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(status.progress())
        .label(format!("{} / {}", clock(status.time), clock(status.total)));
    frame.render_widget(gauge, rows[0]);

    let noise = if status.noise.on {
        format!("Pink: {:.2}", status.noise.volume)
    } else {
        "Pink: off".to_string()
    };

    let params = Line::from(vec![
        Span::styled(
            format!(" L {:.2} Hz  R {:.2} Hz  ", status.frequency, status.right_frequency()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Beat: {:.2} Hz  ", status.beat_frequency),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("Tone: {:.2}  ", status.tone_volume),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            noise,
            Style::default().fg(if status.noise.on {
                Color::Magenta
            } else {
                Color::DarkGray
            }),
        ),
    ]);
    frame.render_widget(Paragraph::new(params), rows[1]);

    let levels = Line::from(vec![
        Span::styled(
            format!(" {:.1}kHz  ", sample_rate as f32 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "Peak: {:.2}/{:.2}  RMS: {:.2}/{:.2}",
                stats.peak[0], stats.peak[1], stats.rms[0], stats.rms[1]
            ),
            Style::default().fg(Color::Magenta),
        ),
    ]);
    frame.render_widget(Paragraph::new(levels), rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_per_channel() {
        let stats = AudioStats::from_frames(&[[0.5, 0.0], [-0.5, 0.0]]);
        assert_eq!(stats.peak, [0.5, 0.0]);
        assert_eq!(stats.rms, [0.5, 0.0]);
    }

    #[test]
    fn test_clock_format() {
        assert_eq!(clock(0.0), "00:00:00");
        assert_eq!(clock(3725.9), "01:02:05");
    }
}
