//! The audio clock: the single time domain shared by the scheduler and
//! whatever renders the sound.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic time source in seconds.
///
/// Sound start times handed to an [`AudioGraph`](crate::graph::AudioGraph)
/// are expressed in this domain, so the clock must be the one the renderer
/// itself advances, not wall-clock time.
pub trait AudioClock {
    fn current_time(&self) -> f64;
}

/// Clock that only moves when told to.
///
/// Clones share the same time, which lets a test hand one copy to a graph
/// and keep another to drive it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::at(0.0)
    }

    pub fn at(seconds: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(seconds.to_bits())),
        }
    }

    /// Jump to an absolute time. Going backwards is a caller bug.
    pub fn set(&self, seconds: f64) {
        debug_assert!(seconds >= self.current_time(), "audio clock must not go backwards");
        self.bits.store(seconds.to_bits(), Ordering::Release);
    }

    pub fn advance(&self, seconds: f64) {
        self.set(self.current_time() + seconds);
    }
}

impl AudioClock for ManualClock {
    fn current_time(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl<C: AudioClock + ?Sized> AudioClock for &C {
    fn current_time(&self) -> f64 {
        (**self).current_time()
    }
}
