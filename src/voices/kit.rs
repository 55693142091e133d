use std::sync::Arc;

use crate::{graph::TrackId, nodes::GraphNode};

use super::{dtmf_tone, noise, pulse, sample, sweep, VoiceParams};

/// Per-track voice parameters plus the sample buffer they may play.
#[derive(Debug, Clone)]
pub struct Kit {
    voices: Vec<VoiceParams>,
    sample: Arc<[f32]>,
}

impl Kit {
    pub fn new(voices: Vec<VoiceParams>, sample: Arc<[f32]>) -> Self {
        Self { voices, sample }
    }

    /// Sweep, pulse, noise and the DTMF sample, in that track order.
    pub fn standard(sample_rate: f32) -> Self {
        Self::new(
            vec![
                VoiceParams::sweep(),
                VoiceParams::pulse(),
                VoiceParams::noise(),
                VoiceParams::sample(),
            ],
            dtmf_tone(sample_rate),
        )
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn voice(&self, track: TrackId) -> Option<&VoiceParams> {
        self.voices.get(track)
    }

    pub fn voice_mut(&mut self, track: TrackId) -> Option<&mut VoiceParams> {
        self.voices.get_mut(track)
    }

    pub fn set_voice(&mut self, track: TrackId, params: VoiceParams) -> bool {
        match self.voices.get_mut(track) {
            Some(slot) => {
                *slot = params;
                true
            }
            None => false,
        }
    }

    /// Build a fresh, untriggered voice for `track` from its current params.
    pub fn build(&self, track: TrackId) -> Option<Box<dyn GraphNode>> {
        let voice: Box<dyn GraphNode> = match *self.voices.get(track)? {
            VoiceParams::Sweep { attack, release } => Box::new(sweep(attack, release)),
            VoiceParams::Pulse {
                frequency,
                lfo_rate,
            } => Box::new(pulse(frequency, lfo_rate)),
            VoiceParams::Noise { duration, band } => Box::new(noise(duration, band)),
            VoiceParams::Sample { playback_rate } => {
                Box::new(sample(Arc::clone(&self.sample), playback_rate))
            }
        };
        Some(voice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::RenderCtx;

    const SAMPLE_RATE: f32 = 8_000.0;

    fn hit(kit: &Kit, track: TrackId, seconds: f32) -> (Vec<f32>, bool) {
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);
        let mut voice = kit.build(track).expect("track exists");
        voice.note_on(&ctx);

        let mut out = vec![0.0; (seconds * SAMPLE_RATE) as usize];
        for chunk in out.chunks_mut(256) {
            voice.render_block(chunk, &ctx);
        }
        (out, voice.is_active())
    }

    #[test]
    fn every_voice_sounds_and_ends() {
        let kit = Kit::standard(SAMPLE_RATE);
        for track in 0..kit.len() {
            let (out, still_active) = hit(&kit, track, 2.5);
            assert!(
                out.iter().any(|s| s.abs() > 0.01),
                "track {track} should be audible"
            );
            assert!(out.iter().all(|s| s.is_finite()));
            assert!(!still_active, "track {track} should finish within 2.5s");
        }
    }

    #[test]
    fn noise_duration_controls_length() {
        let mut kit = Kit::standard(SAMPLE_RATE);
        kit.set_voice(2, VoiceParams::Noise { duration: 0.25, band: 800.0 });

        let (out, still_active) = hit(&kit, 2, 0.5);
        let cut = (0.25 * SAMPLE_RATE) as usize;
        assert!(out[..cut].iter().any(|s| s.abs() > 0.0));
        assert!(out[cut + 1..].iter().all(|&s| s == 0.0));
        assert!(!still_active);
    }

    #[test]
    fn unknown_track_builds_nothing() {
        let kit = Kit::standard(SAMPLE_RATE);
        assert!(kit.build(4).is_none());
        assert!(!Kit::standard(SAMPLE_RATE).set_voice(9, VoiceParams::sample()));
    }
}
