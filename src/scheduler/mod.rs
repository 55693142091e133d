//! Lookahead scheduler - drift-free beat dispatch from a jittery timer
//!
//! Host timers are coarse and can fire arbitrarily late (a backgrounded
//! process may be throttled to one wake-up per second). Starting sounds "now"
//! from a timer callback would add that error to every beat. Instead the
//! scheduler wakes up often, looks a short window ahead on the audio clock,
//! and hands every beat that falls inside the window to the audio graph with
//! its exact start time. Each beat time is derived from the previous beat's
//! scheduled time, never from when the callback happened to run, so timer
//! error never accumulates.
//!
//! ```text
//!   audio clock ──────────────────────────────────────────────────▶
//!                 now        now + schedule_ahead
//!                  │◀──window──▶│
//!   beats:   ●─────●─────●─────●─────●
//!                  ▲     ▲     (dispatched on this wake-up)
//! ```

mod draw;
mod queue;

pub use draw::DrawSync;
pub use queue::{EventQueue, ScheduledEvent};

use log::{debug, trace, warn};

use crate::{
    config::SchedulerConfig,
    error::SchedulerError,
    graph::{AudioGraph, ContextState},
    host::{Task, TimerHandle, Timers},
    pads::PadGrid,
};

#[derive(Debug)]
pub struct LookaheadScheduler {
    config: SchedulerConfig,
    /// Tempo in beats per minute, always finite and positive
    tempo_bpm: f64,
    /// Beat due at `next_beat_time`, in `[0, beats_per_bar)`
    current_beat: usize,
    /// Audio-clock time `current_beat` sounds at
    next_beat_time: f64,
    /// Audio-clock time of the last dispatched beat this session
    last_beat_time: Option<f64>,
    /// Audio-clock reading taken by the last wake-up
    last_now: f64,
    running: bool,
    /// The one outstanding wake-up, if armed
    pending: Option<TimerHandle>,
    queue: EventQueue,
}

impl LookaheadScheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate()?;

        Ok(Self {
            tempo_bpm: config.tempo_bpm,
            config,
            current_beat: 0,
            next_beat_time: 0.0,
            last_beat_time: None,
            last_now: 0.0,
            running: false,
            pending: None,
            queue: EventQueue::new(),
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tempo(&self) -> f64 {
        self.tempo_bpm
    }

    pub fn current_beat(&self) -> usize {
        self.current_beat
    }

    pub fn next_beat_time(&self) -> f64 {
        self.next_beat_time
    }

    pub fn pending_wakeup(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    fn seconds_per_beat(&self) -> f64 {
        60.0 / self.tempo_bpm
    }

    /// Begin a session at the graph's current time.
    ///
    /// Beat 0 is due immediately, so the synchronous first `tick` dispatches
    /// it and arms the recurring wake-up.
    pub fn start<G, T>(
        &mut self,
        graph: &mut G,
        pads: &PadGrid,
        timers: &mut T,
    ) -> Result<(), SchedulerError>
    where
        G: AudioGraph + ?Sized,
        T: Timers + ?Sized,
    {
        if graph.state() == ContextState::Closed {
            warn!("refusing to start: audio graph is closed");
            return Err(SchedulerError::AudioUnavailable);
        }
        if self.running {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.running = true;
        self.current_beat = 0;
        self.next_beat_time = graph.current_time();
        self.last_now = self.next_beat_time;
        self.last_beat_time = None;
        self.queue.clear();

        debug!(
            "scheduler started at {:.3}s, {} BPM, window {:.3}s",
            self.next_beat_time, self.tempo_bpm, self.config.schedule_ahead
        );

        self.tick(graph, pads, timers);
        Ok(())
    }

    /// Cancel the pending wake-up. Safe to call at any time, any number of
    /// times. Sounds already handed to the graph still play.
    pub fn stop<T: Timers + ?Sized>(&mut self, timers: &mut T) {
        if let Some(handle) = self.pending.take() {
            timers.clear_timeout(handle);
        }
        if self.running {
            debug!("scheduler stopped before beat {}", self.current_beat);
        }
        self.running = false;
    }

    /// Change the tempo.
    ///
    /// The new beat length applies from the beat after the last dispatched
    /// one; beats already handed to the graph keep their times. If that beat
    /// would land before the last wake-up's clock reading, the pending beat
    /// keeps its time and the new length applies from the one after it.
    pub fn set_tempo(&mut self, bpm: f64) -> Result<(), SchedulerError> {
        if !(bpm.is_finite() && bpm > 0.0) {
            warn!("rejected tempo {bpm}, keeping {}", self.tempo_bpm);
            return Err(SchedulerError::InvalidTempo(bpm));
        }

        self.tempo_bpm = bpm;
        if let (true, Some(last)) = (self.running, self.last_beat_time) {
            let next = last + self.seconds_per_beat();
            if next >= self.last_now {
                self.next_beat_time = next;
            } else {
                debug!(
                    "tempo {bpm} would put beat {} at {next:.3}s, behind the clock; keeping {:.3}s",
                    self.current_beat, self.next_beat_time
                );
            }
        }
        Ok(())
    }

    /// One wake-up: re-arm, then dispatch every beat inside the window.
    ///
    /// Returns how many beats were dispatched. After a long stall this
    /// catches up on all overdue beats in order before returning. A wake-up
    /// that arrives after `stop` does nothing.
    pub fn tick<G, T>(&mut self, graph: &mut G, pads: &PadGrid, timers: &mut T) -> usize
    where
        G: AudioGraph + ?Sized,
        T: Timers + ?Sized,
    {
        if !self.running {
            return 0;
        }

        // Re-arm before any dispatch work so the loop survives whatever follows
        self.rearm(timers);

        let now = graph.current_time();
        self.last_now = now;
        let horizon = now + self.config.schedule_ahead;
        let mut dispatched = 0;
        while self.next_beat_time < horizon {
            self.dispatch(graph, pads);
            self.advance();
            dispatched += 1;
        }

        if dispatched > 1 {
            debug!("caught up {dispatched} beats in one wake-up");
        }
        dispatched
    }

    fn rearm<T: Timers + ?Sized>(&mut self, timers: &mut T) {
        if let Some(previous) = self.pending.take() {
            timers.clear_timeout(previous);
        }
        self.pending = Some(timers.set_timeout(Task::Lookahead, self.config.lookahead_interval));
    }

    fn dispatch<G: AudioGraph + ?Sized>(&mut self, graph: &mut G, pads: &PadGrid) {
        let beat = self.current_beat;
        let time = self.next_beat_time;

        // Pads are read now, not earlier, so last-moment edits are heard
        for track in pads.active_tracks(beat) {
            graph.schedule_sound(track, time);
        }
        trace!("beat {beat} at {time:.4}s");

        self.queue.push(ScheduledEvent { beat, time });
        self.last_beat_time = Some(time);
    }

    fn advance(&mut self) {
        self.next_beat_time += self.seconds_per_beat();
        self.current_beat = (self.current_beat + 1) % self.config.beats_per_bar;
    }
}
