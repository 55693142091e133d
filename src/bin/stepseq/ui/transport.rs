//! Transport bar widget - shows BPM, play state, audible beat and engine stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use stepseq::{engine::EngineHandle, AudioClock, Transport};

/// Render the transport bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    transport: &Transport<EngineHandle>,
    sample_rate: f32,
) {
    let block = Block::default().title(" stepseq ").borders(Borders::ALL);

    let is_playing = transport.is_playing();
    let play_symbol = if is_playing { "▶" } else { "■" };
    let play_state_str = if is_playing { "Playing" } else { "Stopped" };

    let beat = transport
        .highlighted_beat()
        .map_or_else(|| "-".to_string(), |b| (b + 1).to_string());

    let engine = transport.graph();
    let sample_rate_khz = sample_rate / 1000.0;

    let mut spans = vec![
        Span::styled(
            format!(" BPM: {:.0}  ", transport.tempo()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state_str),
            Style::default().fg(if is_playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("Beat {}/{}  ", beat, transport.pads().beats()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.2}s  ", engine.current_time()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate_khz),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("late: {}", engine.late_triggers()),
            Style::default().fg(Color::Magenta),
        ),
    ];

    if let Some(notice) = transport.notice() {
        spans.push(Span::styled(
            format!("  ! {notice}"),
            Style::default().fg(Color::Red),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
