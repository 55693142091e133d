use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::{debug, trace, warn};
use rtrb::Producer;

use crate::{
    clock::AudioClock,
    error::SchedulerError,
    graph::{AudioGraph, ContextState, TrackId},
    voices::{Kit, VoiceParams},
};

use super::{Shared, Trigger};

/// Control-side end of the engine.
///
/// Owns the kit, so voice parameters are read when a sound is scheduled,
/// not when it starts playing.
pub struct EngineHandle {
    tx: Producer<Trigger>,
    shared: Arc<Shared>,
    sample_rate: f32,
    kit: Kit,
    dropped: u64,
}

impl EngineHandle {
    pub(super) fn new(tx: Producer<Trigger>, shared: Arc<Shared>, sample_rate: f32, kit: Kit) -> Self {
        Self {
            tx,
            shared,
            sample_rate,
            kit,
            dropped: 0,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn kit(&self) -> &Kit {
        &self.kit
    }

    pub fn kit_mut(&mut self) -> &mut Kit {
        &mut self.kit
    }

    pub fn voice(&self, track: TrackId) -> Option<&VoiceParams> {
        self.kit.voice(track)
    }

    /// Replace a track's voice. Heard from the next dispatched beat.
    pub fn set_voice(&mut self, track: TrackId, params: VoiceParams) -> bool {
        self.kit.set_voice(track, params)
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.shared.frames()
    }

    /// Triggers the renderer received after their start frame had passed.
    pub fn late_triggers(&self) -> u64 {
        self.shared.late_triggers.load(Ordering::Relaxed)
    }

    /// Triggers lost because the ring buffer was full.
    pub fn dropped_triggers(&self) -> u64 {
        self.dropped
    }

    /// Tear the engine down. Everything after this is rejected or ignored.
    pub fn close(&mut self) {
        debug!("closing audio engine at frame {}", self.frames());
        self.shared.set_state(ContextState::Closed);
    }

    fn frame_at(&self, time: f64) -> u64 {
        (time * self.sample_rate as f64).round().max(0.0) as u64
    }
}

impl AudioClock for EngineHandle {
    fn current_time(&self) -> f64 {
        self.shared.frames() as f64 / self.sample_rate as f64
    }
}

impl AudioGraph for EngineHandle {
    fn state(&self) -> ContextState {
        self.shared.state()
    }

    fn resume_if_suspended(&mut self) -> Result<(), SchedulerError> {
        match self.shared.state() {
            ContextState::Closed => Err(SchedulerError::AudioUnavailable),
            ContextState::Running => Ok(()),
            ContextState::Suspended => {
                debug!("resuming audio engine");
                self.shared.set_state(ContextState::Running);
                Ok(())
            }
        }
    }

    fn schedule_sound(&mut self, track: TrackId, start_time: f64) {
        if self.shared.state() == ContextState::Closed {
            trace!("engine closed, ignoring track {track}");
            return;
        }

        let Some(voice) = self.kit.build(track) else {
            warn!("no voice for track {track}");
            return;
        };

        let frame = self.frame_at(start_time);
        if self.tx.push(Trigger { frame, voice }).is_err() {
            self.dropped += 1;
            warn!("trigger ring full, dropped track {track} at frame {frame}");
        }
    }
}
