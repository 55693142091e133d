use std::fmt;

use crate::graph::TrackId;

/// Everything the sequencer core can reject.
///
/// Every variant is reported at the point of call; the scheduler state is
/// left untouched when one is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerError {
    /// The audio graph is closed or was never opened.
    AudioUnavailable,
    /// `start()` called while the lookahead loop is already armed.
    AlreadyRunning,
    /// Tempo must be a finite, strictly positive number of beats per minute.
    InvalidTempo(f64),
    /// Pad coordinates outside the grid.
    PadOutOfRange { track: TrackId, beat: usize },
    /// A configuration value failed validation.
    InvalidConfig(&'static str),
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::AudioUnavailable => write!(f, "audio graph is not available"),
            SchedulerError::AlreadyRunning => write!(f, "scheduler is already running"),
            SchedulerError::InvalidTempo(bpm) => {
                write!(f, "invalid tempo {bpm} BPM (must be greater than zero)")
            }
            SchedulerError::PadOutOfRange { track, beat } => {
                write!(f, "no pad at track {track}, beat {beat}")
            }
            SchedulerError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for SchedulerError {}
