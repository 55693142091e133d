use std::time::Duration;

use stepseq::{
    engine::{self, EngineHandle, Renderer},
    voices::{Kit, VoiceParams},
    AudioClock, SchedulerConfig, Transport,
};

const SAMPLE_RATE: f32 = 1_000.0;
const BLOCK: usize = 10;

/// Five samples of full-scale DC: easy to find in the output.
fn click_kit() -> Kit {
    Kit::new(vec![VoiceParams::sample()], vec![1.0f32; 5].into())
}

fn setup(kit: Kit) -> (Transport<EngineHandle>, Renderer) {
    let (handle, renderer) = engine::engine(SAMPLE_RATE, kit);
    let tracks = handle.kit().len();
    let beats = SchedulerConfig::default().beats_per_bar;
    let mut transport = Transport::new(handle, tracks, SchedulerConfig::default()).unwrap();
    for beat in 0..beats {
        transport.set_pad(0, beat, true);
    }
    (transport, renderer.with_gain(1.0))
}

/// Render `seconds` of audio, letting host time follow the audio clock the
/// way a UI thread polling between callbacks would.
fn render(transport: &mut Transport<EngineHandle>, renderer: &mut Renderer, seconds: f32) -> Vec<f32> {
    let mut out = vec![0.0; (seconds * SAMPLE_RATE).round() as usize];
    for block in out.chunks_mut(BLOCK) {
        renderer.process(block);
        let now = transport.graph().current_time();
        transport.advance(Duration::from_secs_f64(now));
        transport.frame();
    }
    out
}

fn onsets(out: &[f32]) -> Vec<usize> {
    (0..out.len())
        .filter(|&i| out[i] != 0.0 && (i == 0 || out[i - 1] == 0.0))
        .collect()
}

#[test]
fn beats_land_on_exact_sample_frames() {
    let (mut transport, mut renderer) = setup(click_kit());
    assert!(transport.play());

    let out = render(&mut transport, &mut renderer, 4.5);

    assert_eq!(onsets(&out), vec![0, 1000, 2000, 3000, 4000]);
    for onset in [0, 1000, 2000, 3000, 4000] {
        assert!(out[onset..onset + 5].iter().all(|&s| s == 1.0));
    }
    assert_eq!(transport.graph().late_triggers(), 0);
    assert_eq!(transport.highlighted_beat(), Some(0));
}

#[test]
fn tempo_change_reaches_the_audio() {
    let (mut transport, mut renderer) = setup(click_kit());
    transport.play();

    let mut out = render(&mut transport, &mut renderer, 2.2);
    transport.set_tempo(120.0);
    out.extend(render(&mut transport, &mut renderer, 1.8));

    assert_eq!(onsets(&out), vec![0, 1000, 2000, 2500, 3000, 3500]);
}

#[test]
fn voice_edits_apply_from_the_next_dispatched_beat() {
    let (mut transport, mut renderer) = setup(click_kit());
    transport.play();

    let mut out = render(&mut transport, &mut renderer, 0.5);
    transport
        .graph_mut()
        .set_voice(0, VoiceParams::Sample { playback_rate: 0.5 });
    out.extend(render(&mut transport, &mut renderer, 1.5));

    let length_at = |onset: usize| out[onset..].iter().take_while(|&&s| s != 0.0).count();
    assert_eq!(length_at(0), 5);
    assert_eq!(length_at(1000), 10);
}

#[test]
fn stop_lets_dispatched_beats_finish() {
    let (mut transport, mut renderer) = setup(click_kit());
    transport.play();

    // Beat 1 is handed over at ~0.9s, then playback stops before it sounds
    let mut out = render(&mut transport, &mut renderer, 0.95);
    transport.stop();
    out.extend(render(&mut transport, &mut renderer, 2.0));

    assert_eq!(onsets(&out), vec![0, 1000]);
    assert_eq!(transport.host().pending_frames(), 0);
}

#[test]
fn standard_kit_renders_bounded_audio() {
    let sample_rate = 8_000.0;
    let (handle, mut renderer) = engine::engine(sample_rate, Kit::standard(sample_rate));
    let mut transport = Transport::new(handle, 4, SchedulerConfig::default().bpm(180.0)).unwrap();
    for track in 0..4 {
        for beat in 0..4 {
            transport.set_pad(track, beat, true);
        }
    }
    transport.play();

    let mut out = vec![0.0f32; 3 * 8_000];
    for block in out.chunks_mut(128) {
        renderer.process(block);
        let now = transport.graph().current_time();
        transport.advance(Duration::from_secs_f64(now));
    }

    assert!(out.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
    assert!(out.iter().any(|s| s.abs() > 0.05));
}
