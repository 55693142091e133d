//! The drum kit: one voice per track.
//!
//! Each voice is a one-shot node graph built fresh for every hit from the
//! track's current [`VoiceParams`], so a parameter change is heard from the
//! next dispatched beat on and never alters a sound already scheduled.
//!
//! | track | voice  | sound                                      |
//! | ----- | ------ | ------------------------------------------ |
//! | 0     | sweep  | 2 s custom-wavetable tone, attack/release  |
//! | 1     | pulse  | 1 s sine chopped by a square LFO           |
//! | 2     | noise  | band-passed white noise burst              |
//! | 3     | sample | buffer playback with variable rate         |

mod kit;
mod noise;
mod pulse;
mod sample;
mod sweep;

pub use kit::Kit;
pub use noise::noise;
pub use pulse::pulse;
pub use sample::{dtmf_tone, sample};
pub use sweep::sweep;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of a sweep hit in seconds.
pub const SWEEP_LENGTH: f32 = 2.0;
/// Length of a pulse hit in seconds.
pub const PULSE_LENGTH: f32 = 1.0;

/// Which of a voice's two parameters a control addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSlot {
    First,
    Second,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoiceParams {
    /// Seconds to fade in, seconds to fade out before the end
    Sweep { attack: f32, release: f32 },
    /// Carrier and chopper frequencies in Hz
    Pulse { frequency: f32, lfo_rate: f32 },
    /// Burst length in seconds, band-pass centre in Hz
    Noise { duration: f32, band: f32 },
    /// 1.0 plays the buffer as recorded
    Sample { playback_rate: f32 },
}

/// (min, max, step) for one parameter.
type Range = (f32, f32, f32);

impl VoiceParams {
    pub fn sweep() -> Self {
        VoiceParams::Sweep {
            attack: 0.2,
            release: 0.5,
        }
    }

    pub fn pulse() -> Self {
        VoiceParams::Pulse {
            frequency: 880.0,
            lfo_rate: 30.0,
        }
    }

    pub fn noise() -> Self {
        VoiceParams::Noise {
            duration: 1.0,
            band: 1000.0,
        }
    }

    pub fn sample() -> Self {
        VoiceParams::Sample { playback_rate: 1.0 }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VoiceParams::Sweep { .. } => "sweep",
            VoiceParams::Pulse { .. } => "pulse",
            VoiceParams::Noise { .. } => "noise",
            VoiceParams::Sample { .. } => "sample",
        }
    }

    /// Short human-readable parameter summary for the UI.
    pub fn describe(&self) -> String {
        match *self {
            VoiceParams::Sweep { attack, release } => {
                format!("attack {attack:.1}s  release {release:.1}s")
            }
            VoiceParams::Pulse {
                frequency,
                lfo_rate,
            } => format!("{frequency:.0}Hz  lfo {lfo_rate:.0}Hz"),
            VoiceParams::Noise { duration, band } => {
                format!("{duration:.1}s  band {band:.0}Hz")
            }
            VoiceParams::Sample { playback_rate } => format!("rate {playback_rate:.1}x"),
        }
    }

    fn slot_mut(&mut self, slot: ParamSlot) -> Option<(&mut f32, Range)> {
        match (self, slot) {
            (VoiceParams::Sweep { attack, .. }, ParamSlot::First) => Some((attack, (0.0, 1.0, 0.1))),
            (VoiceParams::Sweep { release, .. }, ParamSlot::Second) => {
                Some((release, (0.0, 1.0, 0.1)))
            }
            (VoiceParams::Pulse { frequency, .. }, ParamSlot::First) => {
                Some((frequency, (660.0, 1320.0, 20.0)))
            }
            (VoiceParams::Pulse { lfo_rate, .. }, ParamSlot::Second) => {
                Some((lfo_rate, (20.0, 40.0, 1.0)))
            }
            (VoiceParams::Noise { duration, .. }, ParamSlot::First) => {
                Some((duration, (0.1, 2.0, 0.1)))
            }
            (VoiceParams::Noise { band, .. }, ParamSlot::Second) => {
                Some((band, (400.0, 1200.0, 50.0)))
            }
            (VoiceParams::Sample { playback_rate }, ParamSlot::First) => {
                Some((playback_rate, (0.1, 2.0, 0.1)))
            }
            (VoiceParams::Sample { .. }, ParamSlot::Second) => None,
        }
    }

    /// Move a parameter by `steps` increments, clamped to its range.
    ///
    /// Returns false when the voice has no parameter in that slot.
    pub fn nudge(&mut self, slot: ParamSlot, steps: i32) -> bool {
        match self.slot_mut(slot) {
            Some((value, (min, max, step))) => {
                let moved = *value + step * steps as f32;
                // Snap to the step grid so repeated nudges don't accumulate float error
                *value = ((moved / step).round() * step).clamp(min, max);
                true
            }
            None => false,
        }
    }
}
