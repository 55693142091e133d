//! Pad grid: which tracks sound on which beat.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::SchedulerError, graph::TrackId};

/// Tracks x beats on/off cells, stored row-major.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadGrid {
    tracks: usize,
    beats: usize,
    cells: Vec<bool>,
}

impl PadGrid {
    /// Create an empty grid (every pad off).
    pub fn new(tracks: usize, beats: usize) -> Self {
        Self {
            tracks,
            beats,
            cells: vec![false; tracks * beats],
        }
    }

    pub fn tracks(&self) -> usize {
        self.tracks
    }

    pub fn beats(&self) -> usize {
        self.beats
    }

    fn index(&self, track: TrackId, beat: usize) -> Result<usize, SchedulerError> {
        if track < self.tracks && beat < self.beats {
            Ok(track * self.beats + beat)
        } else {
            Err(SchedulerError::PadOutOfRange { track, beat })
        }
    }

    /// Whether the pad is on. Coordinates outside the grid read as off.
    pub fn is_active(&self, track: TrackId, beat: usize) -> bool {
        self.index(track, beat)
            .map(|i| self.cells[i])
            .unwrap_or(false)
    }

    pub fn set(&mut self, track: TrackId, beat: usize, on: bool) -> Result<(), SchedulerError> {
        let i = self.index(track, beat)?;
        self.cells[i] = on;
        Ok(())
    }

    /// Flip a pad, returning its new state.
    pub fn toggle(&mut self, track: TrackId, beat: usize) -> Result<bool, SchedulerError> {
        let i = self.index(track, beat)?;
        self.cells[i] = !self.cells[i];
        Ok(self.cells[i])
    }

    /// Tracks whose pad is on for `beat`, in track order.
    pub fn active_tracks(&self, beat: usize) -> impl Iterator<Item = TrackId> + '_ {
        (0..self.tracks).filter(move |&track| self.is_active(track, beat))
    }

    /// The on/off cells of one track.
    pub fn row(&self, track: TrackId) -> &[bool] {
        if track >= self.tracks {
            return &[];
        }
        &self.cells[track * self.beats..(track + 1) * self.beats]
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}
