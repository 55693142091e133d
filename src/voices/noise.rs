//! Noise voice.
//!
//! White noise narrowed by a band-pass filter. Low `band` values sound like
//! a rumble, high ones like a hiss; `duration` sets how long the burst lasts.

use crate::{
    dsp::ramp::Ramp,
    nodes::{FilterNode, GraphNode, NodeExt, OscNode, RampNode},
};

pub fn noise(duration: f32, band: f32) -> impl GraphNode {
    OscNode::noise()
        .through(FilterNode::bandpass(band))
        .amplify(RampNode::new(Ramp::gate(duration.max(0.0))))
}
