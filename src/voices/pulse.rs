//! Pulse voice.
//!
//! A sine carrier chopped on and off by a square LFO, giving a buzzing,
//! telephone-ring texture. Lasts one second.
//!
//! # How It Works
//!
//! 1. Sine oscillator at `frequency` provides the tone
//! 2. Square LFO at `lfo_rate` gates it (unipolar, so 0 or 1)
//! 3. A one-second gate ends the hit

use crate::{
    dsp::ramp::Ramp,
    nodes::{GraphNode, LfoNode, NodeExt, OscNode, RampNode},
};

use super::PULSE_LENGTH;

pub fn pulse(frequency: f32, lfo_rate: f32) -> impl GraphNode {
    OscNode::sine()
        .with_frequency(frequency)
        .amplify(LfoNode::square(lfo_rate))
        .amplify(RampNode::new(Ramp::gate(PULSE_LENGTH)))
}
