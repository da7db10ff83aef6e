//! Stereo oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame as TermFrame,
};

use binaural_dsp::graph::Frame;

fn channel_points(frames: &[Frame], channel: usize) -> Vec<(f64, f64)> {
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| (i as f64 / frames.len() as f64, frame[channel] as f64))
        .collect()
}

/// Render left (cyan) and right (yellow) channels over each other
pub fn render_waveform(frame: &mut TermFrame, area: Rect, audio_buffer: &[Frame]) {
    let block = Block::default()
        .title(" Waveform L/R ")
        .borders(Borders::ALL);

    let left = channel_points(audio_buffer, 0);
    let right = channel_points(audio_buffer, 1);

    let datasets = vec![
        Dataset::default()
            .name("L")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&left),
        Dataset::default()
            .name("R")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&right),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
