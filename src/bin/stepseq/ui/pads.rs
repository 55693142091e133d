//! Pad grid widget - one row per track, the audible beat highlighted

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use stepseq::{engine::EngineHandle, Transport};

const LABEL_WIDTH: usize = 8;

/// Render the pad grid with the playing column and the cursor
pub fn render_pads(
    frame: &mut Frame,
    area: Rect,
    transport: &Transport<EngineHandle>,
    cursor: (usize, usize),
) {
    if area.height < 2 || area.width < 20 {
        return;
    }

    let pads = transport.pads();
    let playing = transport.highlighted_beat();
    let mut lines = Vec::new();

    // Beat numbers, the audible one lit
    let mut header = vec![Span::raw(" ".repeat(LABEL_WIDTH))];
    for beat in 0..pads.beats() {
        let style = if playing == Some(beat) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        header.push(Span::styled(format!(" {:<3}", beat + 1), style));
    }
    lines.push(Line::from(header));

    for track in 0..pads.tracks() {
        let voice = transport.graph().voice(track);
        let name = voice.map_or("-", |v| v.name());

        let mut spans = vec![Span::styled(
            format!("{name:<width$}", width = LABEL_WIDTH),
            Style::default().fg(Color::White),
        )];

        for (beat, &on) in pads.row(track).iter().enumerate() {
            let mut style = match (on, playing == Some(beat)) {
                (true, true) => Style::default().fg(Color::Yellow),
                (true, false) => Style::default().fg(Color::Cyan),
                (false, true) => Style::default().fg(Color::Gray),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            if cursor == (track, beat) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let cell = if on { "[■]" } else { "[ ]" };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(cell, style));
        }

        if let Some(voice) = voice {
            spans.push(Span::styled(
                format!("   {}", voice.describe()),
                Style::default().fg(if cursor.0 == track {
                    Color::White
                } else {
                    Color::DarkGray
                }),
            ));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
