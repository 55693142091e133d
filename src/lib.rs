pub mod clock; // The audio time domain
pub mod config;
pub mod dsp;
pub mod engine; // Block renderer behind the graph contract
pub mod error;
pub mod graph;
pub mod host; // Timers and display frames
pub mod nodes; // Composable render nodes
pub mod pads;
pub mod scheduler; // Lookahead beat dispatch and display sync
pub mod transport;
pub mod voices;

pub use clock::{AudioClock, ManualClock};
pub use config::SchedulerConfig;
pub use error::SchedulerError;
pub use graph::{AudioGraph, ContextState, TrackId};
pub use pads::PadGrid;
pub use scheduler::{DrawSync, EventQueue, LookaheadScheduler, ScheduledEvent};
pub use transport::Transport;

pub const MAX_BLOCK_SIZE: usize = 2048;
