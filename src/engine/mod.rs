//! Block-based audio engine behind the [`AudioGraph`](crate::graph::AudioGraph) contract.
//!
//! Split in two halves that talk through a lock-free SPSC ring buffer:
//!
//! ```text
//!   control thread                           audio callback
//!   ┌──────────────┐   Trigger{frame,voice}  ┌──────────────┐
//!   │ EngineHandle │ ──────── rtrb ────────▶ │   Renderer   │
//!   └──────────────┘                         └──────────────┘
//!          ▲   frames rendered, context state        │
//!          └────────────── atomics ──────────────────┘
//! ```
//!
//! The handle builds each voice on the control side, so the audio callback
//! only starts, mixes and retires them. The frame counter the renderer
//! publishes after every block *is* the audio clock.

mod handle;
mod renderer;

pub use handle::EngineHandle;
pub use renderer::Renderer;

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use rtrb::RingBuffer;

use crate::{graph::ContextState, nodes::GraphNode, voices::Kit};

/// Triggers that may be in flight between two audio callbacks.
pub const TRIGGER_CAPACITY: usize = 256;

/// A voice waiting to start at an absolute frame.
pub struct Trigger {
    pub frame: u64,
    pub voice: Box<dyn GraphNode>,
}

/// State both halves can see.
#[derive(Debug)]
pub(crate) struct Shared {
    frames: AtomicU64,
    state: AtomicU8,
    late_triggers: AtomicU64,
}

impl Shared {
    fn new() -> Self {
        Self {
            frames: AtomicU64::new(0),
            state: AtomicU8::new(encode_state(ContextState::Suspended)),
            late_triggers: AtomicU64::new(0),
        }
    }

    fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    fn add_frames(&self, frames: u64) {
        self.frames.fetch_add(frames, Ordering::AcqRel);
    }

    fn state(&self) -> ContextState {
        decode_state(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: ContextState) {
        self.state.store(encode_state(state), Ordering::Release);
    }
}

fn encode_state(state: ContextState) -> u8 {
    match state {
        ContextState::Suspended => 0,
        ContextState::Running => 1,
        ContextState::Closed => 2,
    }
}

fn decode_state(value: u8) -> ContextState {
    match value {
        0 => ContextState::Suspended,
        1 => ContextState::Running,
        _ => ContextState::Closed,
    }
}

/// Create a connected handle/renderer pair. The engine starts suspended.
pub fn engine(sample_rate: f32, kit: Kit) -> (EngineHandle, Renderer) {
    let (tx, rx) = RingBuffer::<Trigger>::new(TRIGGER_CAPACITY);
    let shared = Arc::new(Shared::new());

    let handle = EngineHandle::new(tx, Arc::clone(&shared), sample_rate, kit);
    let renderer = Renderer::new(rx, shared, sample_rate);
    (handle, renderer)
}
