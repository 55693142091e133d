//! Composable render nodes for building one-shot voices.
//!
//! Nodes wrap the DSP primitives with note triggering and block rendering.
//! [`NodeExt`] adds the fluent `.amplify()` / `.through()` combinators, so a
//! voice reads as its signal path:
//!
//! ```ignore
//! OscNode::noise()
//!     .through(FilterNode::bandpass(1000.0))
//!     .amplify(RampNode::new(Ramp::gate(1.0)))
//! ```

/// Multiply a signal by a gain signal.
pub mod amplify;
/// Fluent combinators.
pub mod extensions;
/// Filter node.
pub mod filter;
/// Unipolar low frequency oscillator for gain modulation.
pub mod lfo;
/// Core trait and render context.
pub mod node;
/// Audio-band oscillators and noise.
pub mod oscillator;
/// Breakpoint gain automation.
pub mod ramp;
/// Buffer playback.
pub mod sample;
/// Serial chaining of two nodes.
pub mod through;

pub use extensions::NodeExt;
pub use filter::FilterNode;
pub use lfo::LfoNode;
pub use node::{GraphNode, RenderCtx};
pub use oscillator::OscNode;
pub use ramp::RampNode;
pub use sample::SampleNode;
