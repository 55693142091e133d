//! Play/stop transport tying the scheduler, the display sync and the host
//! loop to one audio graph.
//!
//! Everything here runs on a single thread. The caller drives it with two
//! calls: [`Transport::advance`] whenever host time moves (fires due
//! scheduler wake-ups) and [`Transport::frame`] once per display frame.
//! User actions never fail hard: a rejected action leaves a notice for the
//! UI and the transport keeps going.

use std::time::Duration;

use log::{debug, warn};

use crate::{
    config::SchedulerConfig,
    error::SchedulerError,
    graph::{AudioGraph, TrackId},
    host::{EventLoop, FrameHandle, Task},
    pads::PadGrid,
    scheduler::{DrawSync, LookaheadScheduler},
};

pub struct Transport<G> {
    graph: G,
    pads: PadGrid,
    scheduler: LookaheadScheduler,
    draw: DrawSync,
    host: EventLoop,
    frame: Option<FrameHandle>,
    notice: Option<String>,
}

impl<G: AudioGraph> Transport<G> {
    /// A stopped transport with an empty `tracks` x `beats_per_bar` grid.
    pub fn new(graph: G, tracks: usize, config: SchedulerConfig) -> Result<Self, SchedulerError> {
        let pads = PadGrid::new(tracks, config.beats_per_bar);
        let scheduler = LookaheadScheduler::new(config)?;

        Ok(Self {
            graph,
            pads,
            scheduler,
            draw: DrawSync::new(),
            host: EventLoop::new(),
            frame: None,
            notice: None,
        })
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn pads(&self) -> &PadGrid {
        &self.pads
    }

    /// Direct grid access for bulk edits. Errors are the caller's to handle.
    pub fn pads_mut(&mut self) -> &mut PadGrid {
        &mut self.pads
    }

    pub fn scheduler(&self) -> &LookaheadScheduler {
        &self.scheduler
    }

    pub fn host(&self) -> &EventLoop {
        &self.host
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn tempo(&self) -> f64 {
        self.scheduler.tempo()
    }

    /// Beat the display should show as playing.
    pub fn highlighted_beat(&self) -> Option<usize> {
        self.draw.highlighted()
    }

    /// Last rejected action, for the status line.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// When the next scheduler wake-up is due, in host time.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.host.next_deadline()
    }

    fn reject(&mut self, action: &str, err: SchedulerError) {
        warn!("{action} rejected: {err}");
        self.notice = Some(err.to_string());
    }

    /// Resume the graph and start the scheduler. Returns whether playback
    /// started.
    pub fn play(&mut self) -> bool {
        let started = self
            .graph
            .resume_if_suspended()
            .and_then(|()| self.scheduler.start(&mut self.graph, &self.pads, &mut self.host));

        match started {
            Ok(()) => {
                self.notice = None;
                self.draw.reset();
                if self.frame.is_none() {
                    self.frame = Some(self.host.request_frame(Task::Draw));
                }
                true
            }
            Err(err) => {
                self.reject("play", err);
                false
            }
        }
    }

    /// Stop scheduling. Already dispatched beats still sound, and the draw
    /// loop keeps running until its next frame notices playback has ended.
    pub fn stop(&mut self) {
        self.scheduler.stop(&mut self.host);
    }

    pub fn toggle(&mut self) -> bool {
        if self.is_playing() {
            self.stop();
            false
        } else {
            self.play()
        }
    }

    pub fn set_tempo(&mut self, bpm: f64) -> bool {
        match self.scheduler.set_tempo(bpm) {
            Ok(()) => {
                debug!("tempo set to {bpm} BPM");
                true
            }
            Err(err) => {
                self.reject("tempo change", err);
                false
            }
        }
    }

    pub fn nudge_tempo(&mut self, delta: f64) -> bool {
        self.set_tempo(self.tempo() + delta)
    }

    /// Flip one pad. Returns its new state, or `None` if it doesn't exist.
    pub fn toggle_pad(&mut self, track: TrackId, beat: usize) -> Option<bool> {
        match self.pads.toggle(track, beat) {
            Ok(on) => Some(on),
            Err(err) => {
                self.reject("pad toggle", err);
                None
            }
        }
    }

    pub fn set_pad(&mut self, track: TrackId, beat: usize, on: bool) -> bool {
        match self.pads.set(track, beat, on) {
            Ok(()) => true,
            Err(err) => {
                self.reject("pad edit", err);
                false
            }
        }
    }

    /// Move host time to `now` and run every wake-up that came due.
    /// Returns the number of beats dispatched. Drawing happens in `frame`.
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut dispatched = 0;
        for task in self.host.advance(now) {
            if task == Task::Lookahead {
                dispatched += self.scheduler.tick(&mut self.graph, &self.pads, &mut self.host);
            }
        }
        dispatched
    }

    /// Run one display frame. Returns the newly highlighted beat, if it moved.
    ///
    /// The draw request re-arms itself only while playing, so the frame loop
    /// winds down on its own after `stop`.
    pub fn frame(&mut self) -> Option<usize> {
        self.frame = None;

        let mut moved = None;
        let mut drew = false;
        for task in self.host.take_frames() {
            if task == Task::Draw {
                drew = true;
                if let Some(beat) = self.draw.draw_tick(self.scheduler.queue_mut(), &self.graph) {
                    moved = Some(beat);
                }
            }
        }

        if drew && self.scheduler.is_running() {
            self.frame = Some(self.host.request_frame(Task::Draw));
        }
        moved
    }
}
