//! Sample voice.
//!
//! Plays a pre-rendered buffer. Loading audio files is outside this crate,
//! so the kit ships a synthesized DTMF tone (the "1" key: 697 Hz + 1209 Hz)
//! as its default sample.

use std::f32::consts::TAU;
use std::sync::Arc;

use crate::nodes::{GraphNode, SampleNode};

const DTMF_LOW: f32 = 697.0;
const DTMF_HIGH: f32 = 1209.0;
const DTMF_LENGTH: f32 = 0.5;
const DTMF_FADE: f32 = 0.005;

pub fn sample(buffer: Arc<[f32]>, playback_rate: f32) -> impl GraphNode {
    SampleNode::new(buffer, playback_rate)
}

/// Render the DTMF "1" tone at `sample_rate`, with short fades against clicks.
pub fn dtmf_tone(sample_rate: f32) -> Arc<[f32]> {
    let len = (DTMF_LENGTH * sample_rate) as usize;
    let fade = ((DTMF_FADE * sample_rate) as usize).max(1);

    (0..len)
        .map(|n| {
            let t = n as f32 / sample_rate;
            let tone = 0.5 * (TAU * DTMF_LOW * t).sin() + 0.5 * (TAU * DTMF_HIGH * t).sin();
            let edge = n.min(len - 1 - n);
            let gain = (edge as f32 / fade as f32).min(1.0);
            tone * gain
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dtmf_tone_has_expected_length_and_fades() {
        let tone = dtmf_tone(8_000.0);
        assert_eq!(tone.len(), 4_000);
        assert_eq!(tone[0], 0.0);
        assert_eq!(tone[tone.len() - 1], 0.0);
        assert!(tone.iter().all(|s| s.abs() <= 1.0));
        assert!(tone.iter().any(|s| s.abs() > 0.5));
    }
}
