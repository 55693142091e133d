//! Cooperative, single-threaded host loop.
//!
//! Stands in for the browser's `setTimeout` / `requestAnimationFrame` pair:
//! callbacks are not closures but [`Task`] tags, and whoever owns the loop
//! (see [`Transport`](crate::transport::Transport)) maps each fired tag to a
//! method call. Time is whatever monotonic host time the caller passes to
//! [`EventLoop::advance`]; it is deliberately unrelated to the audio clock.
//!
//! Timeouts are one-shot. A recurring wake-up is a timeout that re-arms itself
//! from inside its own callback, and the handle of the latest arming is the
//! only one that can cancel it.

use std::time::Duration;

/// What to run when a timeout or frame fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Scheduler wake-up: look ahead and dispatch beats.
    Lookahead,
    /// Display frame: drain audible events and move the highlight.
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Registration of cancellable one-shot wake-ups.
pub trait Timers {
    /// Fire `task` once, `after` from the current host time.
    fn set_timeout(&mut self, task: Task, after: Duration) -> TimerHandle;

    /// Cancel a pending timeout. Returns false if it already fired or was
    /// cancelled before.
    fn clear_timeout(&mut self, handle: TimerHandle) -> bool;
}

#[derive(Debug)]
struct Timeout {
    handle: TimerHandle,
    deadline: Duration,
    task: Task,
}

#[derive(Debug, Default)]
pub struct EventLoop {
    now: Duration,
    next_id: u64,
    timeouts: Vec<Timeout>,
    frames: Vec<(FrameHandle, Task)>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host time of the last [`advance`](Self::advance).
    pub fn now(&self) -> Duration {
        self.now
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Move host time forward and collect every timeout that is now due,
    /// earliest deadline first (registration order breaks ties).
    ///
    /// Timeouts registered while the returned tasks run are measured from the
    /// new `now`, so a self-re-arming task fires at most once per call.
    pub fn advance(&mut self, now: Duration) -> Vec<Task> {
        if now > self.now {
            self.now = now;
        }

        let mut due: Vec<Timeout> = Vec::new();
        let mut i = 0;
        while i < self.timeouts.len() {
            if self.timeouts[i].deadline <= self.now {
                due.push(self.timeouts.remove(i));
            } else {
                i += 1;
            }
        }

        // Stable sort keeps registration order for equal deadlines
        due.sort_by_key(|t| t.deadline);
        due.into_iter().map(|t| t.task).collect()
    }

    /// Earliest pending deadline, if any timeout is armed.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeouts.iter().map(|t| t.deadline).min()
    }

    pub fn pending_timeouts(&self) -> usize {
        self.timeouts.len()
    }

    /// Ask for `task` to run on the next frame.
    pub fn request_frame(&mut self, task: Task) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frames.push((handle, task));
        handle
    }

    pub fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        let before = self.frames.len();
        self.frames.retain(|(h, _)| *h != handle);
        self.frames.len() != before
    }

    /// Start a frame: hand out every pending request and forget them. A task
    /// that wants the following frame must request it again.
    pub fn take_frames(&mut self) -> Vec<Task> {
        self.frames.drain(..).map(|(_, task)| task).collect()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }
}

impl Timers for EventLoop {
    fn set_timeout(&mut self, task: Task, after: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timeouts.push(Timeout {
            handle,
            deadline: self.now + after,
            task,
        });
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) -> bool {
        let before = self.timeouts.len();
        self.timeouts.retain(|t| t.handle != handle);
        self.timeouts.len() != before
    }
}
