//! Display sync: follow what is audible, not what has been scheduled.
//!
//! The scheduler runs ahead of the audio clock by up to one lookahead window,
//! so the queue always holds beats that have not sounded yet. Each frame
//! drains only the events whose time has passed and highlights the newest
//! of them. Because the queue is popped strictly from the head, the highlight
//! can never move backwards or show a beat before it is heard.

use crate::clock::AudioClock;

use super::queue::EventQueue;

#[derive(Debug, Default)]
pub struct DrawSync {
    highlighted: Option<usize>,
}

impl DrawSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Beat currently audible, or `None` before the first one sounds.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Run one frame. Returns the new beat when the highlight moved.
    pub fn draw_tick<C: AudioClock + ?Sized>(
        &mut self,
        queue: &mut EventQueue,
        clock: &C,
    ) -> Option<usize> {
        let now = clock.current_time();

        let mut latest = None;
        while let Some(event) = queue.pop_due(now) {
            latest = Some(event.beat);
        }

        match latest {
            Some(beat) if self.highlighted != Some(beat) => {
                self.highlighted = Some(beat);
                Some(beat)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.highlighted = None;
    }
}
