//! Sweep voice.
//!
//! A long, swelling tone: a custom wavetable oscillator at a fixed 380 Hz,
//! faded in over `attack` seconds and faded out so that it reaches silence
//! `release` seconds before the end of its two-second life.
//!
//! ```text
//!   gain
//!    1 ┤   ╱‾‾‾‾‾‾‾‾╲
//!      │  ╱          ╲
//!    0 ┼─╱────────────╲───┤
//!      0  attack   2-release  2s
//! ```
//!
//! If the fade-out would start before the fade-in finishes, the fall is
//! pushed back to the end of the attack.

use crate::{
    dsp::{ramp::Ramp, wavetable::PeriodicWave},
    nodes::{GraphNode, NodeExt, OscNode, RampNode},
};

use super::SWEEP_LENGTH;

pub fn sweep(attack: f32, release: f32) -> impl GraphNode {
    let attack = attack.clamp(0.0, SWEEP_LENGTH);
    let fall = (SWEEP_LENGTH - release.max(0.0)).max(attack);

    let envelope = Ramp::starting_at(0.0)
        .line_to(attack, 1.0)
        .line_to(fall, 0.0)
        .until(SWEEP_LENGTH);

    OscNode::custom(PeriodicWave::organ())
        .with_frequency(380.0)
        .amplify(RampNode::new(envelope))
}
