//! Contract between the scheduler and the audio graph that renders sound.
//!
//! The scheduler never owns a graph. It is handed one for the duration of a
//! `start` or `tick` call and only ever asks three things of it: what time it
//! is, whether it is usable, and to play a track's sound at an exact time.

use crate::{clock::AudioClock, error::SchedulerError};

/// Index of a track (row) in the pad grid and in the voice kit.
pub type TrackId = usize;

/// Lifecycle of an audio graph, mirroring an audio context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Created but not yet allowed to produce sound; the clock does not move.
    Suspended,
    Running,
    /// Torn down. Nothing can be scheduled any more.
    Closed,
}

pub trait AudioGraph: AudioClock {
    fn state(&self) -> ContextState;

    /// Leave the suspended state so the clock starts moving.
    ///
    /// A no-op when already running. Fails when the graph is closed.
    fn resume_if_suspended(&mut self) -> Result<(), SchedulerError>;

    /// Render `track`'s sound starting exactly at `start_time` (audio-clock
    /// seconds). Fire-and-forget: nothing is returned and the sound cannot be
    /// recalled once handed over.
    fn schedule_sound(&mut self, track: TrackId, start_time: f64);
}
