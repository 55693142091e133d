//! TUI module for stepseq
//!
//! The UI loop is also the host loop: every pass feeds elapsed time to the
//! transport (scheduler wake-ups) and runs one display frame (highlight).

mod pads;
mod transport;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use stepseq::{engine::EngineHandle, voices::ParamSlot, Transport};

use pads::render_pads;
use transport::render_transport;

/// Longest the loop sleeps between frames (~60fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Tempo change per key press
const TEMPO_STEP: f64 = 5.0;

/// UI application state
pub struct UiApp {
    transport: Transport<EngineHandle>,
    sample_rate: f32,
    /// Selected pad as (track, beat)
    cursor: (usize, usize),
    started: Instant,
    should_quit: bool,
}

impl UiApp {
    pub fn new(transport: Transport<EngineHandle>, sample_rate: f32) -> Self {
        Self {
            transport,
            sample_rate,
            cursor: (0, 0),
            started: Instant::now(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.transport.advance(self.started.elapsed());
            self.transport.frame();

            terminal.draw(|frame| self.render(frame))?;

            // Sleep until the next wake-up or frame, whichever comes first
            let timeout = self
                .transport
                .next_deadline()
                .map(|deadline| deadline.saturating_sub(self.started.elapsed()))
                .map_or(FRAME_INTERVAL, |d| d.min(FRAME_INTERVAL));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.transport.stop();
        self.transport.graph_mut().close();
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        let tracks = self.transport.pads().tracks();
        let beats = self.transport.pads().beats();
        let (track, beat) = self.cursor;

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.transport.toggle();
            }
            KeyCode::Up => self.cursor.0 = (track + tracks - 1) % tracks,
            KeyCode::Down => self.cursor.0 = (track + 1) % tracks,
            KeyCode::Left => self.cursor.1 = (beat + beats - 1) % beats,
            KeyCode::Right => self.cursor.1 = (beat + 1) % beats,
            KeyCode::Enter | KeyCode::Char('x') => {
                self.transport.toggle_pad(track, beat);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.transport.nudge_tempo(TEMPO_STEP);
            }
            KeyCode::Char('-') => {
                self.transport.nudge_tempo(-TEMPO_STEP);
            }
            KeyCode::Char('[') => self.nudge_voice(ParamSlot::First, -1),
            KeyCode::Char(']') => self.nudge_voice(ParamSlot::First, 1),
            KeyCode::Char('{') => self.nudge_voice(ParamSlot::Second, -1),
            KeyCode::Char('}') => self.nudge_voice(ParamSlot::Second, 1),
            KeyCode::Char('c') => self.transport.clear_notice(),
            _ => {}
        }
    }

    fn nudge_voice(&mut self, slot: ParamSlot, steps: i32) {
        let track = self.cursor.0;
        if let Some(params) = self.transport.graph_mut().kit_mut().voice_mut(track) {
            params.nudge(slot, steps);
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, pads, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(6),    // Pad grid
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_transport(frame, chunks[0], &self.transport, self.sample_rate);

        let pads_block = Block::default().title(" Pads ").borders(Borders::ALL);
        let pads_inner = pads_block.inner(chunks[1]);
        frame.render_widget(pads_block, chunks[1]);
        render_pads(frame, pads_inner, &self.transport, self.cursor);

        let help = Paragraph::new(
            " [Space] Play/Stop  [Arrows] Move  [X] Pad  [+/-] Tempo  [[/]] [{/}] Voice  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
