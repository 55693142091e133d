//! Scheduler configuration.
//!
//! Defaults match the classic drum-machine setup: one bar of four beats at
//! 60 BPM, a 100ms lookahead window, and a wake-up every 25ms. The wake-up
//! interval must stay comfortably shorter than the window, otherwise a single
//! late timer leaves a gap the audio clock can run into.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Initial tempo in beats per minute
    pub tempo_bpm: f64,
    /// Beats in one bar; the beat index wraps at this value
    pub beats_per_bar: usize,
    /// How far ahead of the audio clock beats are committed (seconds)
    pub schedule_ahead: f64,
    /// How often the scheduler wakes up to look ahead
    pub lookahead_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 60.0,
            beats_per_bar: 4,
            schedule_ahead: 0.1,
            lookahead_interval: Duration::from_millis(25),
        }
    }
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial tempo in beats per minute
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.tempo_bpm = bpm;
        self
    }

    pub fn beats_per_bar(mut self, beats: usize) -> Self {
        self.beats_per_bar = beats;
        self
    }

    /// Set the lookahead window in seconds
    pub fn schedule_ahead(mut self, seconds: f64) -> Self {
        self.schedule_ahead = seconds;
        self
    }

    pub fn lookahead_interval(mut self, interval: Duration) -> Self {
        self.lookahead_interval = interval;
        self
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if !(self.tempo_bpm.is_finite() && self.tempo_bpm > 0.0) {
            return Err(SchedulerError::InvalidTempo(self.tempo_bpm));
        }
        if self.beats_per_bar == 0 {
            return Err(SchedulerError::InvalidConfig("beats_per_bar must be at least 1"));
        }
        if !(self.schedule_ahead.is_finite() && self.schedule_ahead > 0.0) {
            return Err(SchedulerError::InvalidConfig(
                "schedule_ahead must be a positive number of seconds",
            ));
        }
        if self.lookahead_interval.is_zero() {
            return Err(SchedulerError::InvalidConfig("lookahead_interval must be non-zero"));
        }
        Ok(())
    }
}
