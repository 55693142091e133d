//! StepSeq - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info};

use stepseq::{
    engine::{self, Renderer},
    voices::{Kit, VoiceParams},
    SchedulerConfig, TrackId, Transport, MAX_BLOCK_SIZE,
};

use super::ui::UiApp;

/// Main application builder
pub struct StepSeq {
    config: SchedulerConfig,
    pads: Vec<(TrackId, usize)>,
    voices: Vec<(TrackId, VoiceParams)>,
}

impl StepSeq {
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
            pads: Vec::new(),
            voices: Vec::new(),
        }
    }

    /// Set the starting tempo in beats per minute
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.config = self.config.bpm(bpm);
        self
    }

    pub fn beats_per_bar(mut self, beats: usize) -> Self {
        self.config = self.config.beats_per_bar(beats);
        self
    }

    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Switch a pad on before the UI starts
    pub fn pad(mut self, track: TrackId, beat: usize) -> Self {
        self.pads.push((track, beat));
        self
    }

    /// Replace one track's default voice
    pub fn voice(mut self, track: TrackId, params: VoiceParams) -> Self {
        self.voices.push((track, params));
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        // Set up audio
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!("output: {sample_rate} Hz, {channels} channels");

        let mut kit = Kit::standard(sample_rate);
        for (track, params) in self.voices {
            if !kit.set_voice(track, params) {
                return Err(eyre!("no track {track} in the kit"));
            }
        }
        let tracks = kit.len();

        let (handle, renderer) = engine::engine(sample_rate, kit);
        let mut transport =
            Transport::new(handle, tracks, self.config).wrap_err("invalid scheduler config")?;
        for (track, beat) in self.pads {
            transport
                .pads_mut()
                .set(track, beat, true)
                .wrap_err("invalid initial pad")?;
        }

        // Set up audio stream; the renderer moves into the callback
        let mut output = Output::new(renderer, channels);
        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| output.fill(data),
                |err| error!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(transport, sample_rate).run(&mut terminal);
        ratatui::restore();

        drop(stream);
        result
    }
}

impl Default for StepSeq {
    fn default() -> Self {
        Self::new()
    }
}

/// Audio callback state: renders mono and copies it to every channel
struct Output {
    renderer: Renderer,
    channels: usize,
    render_buf: Vec<f32>,
}

impl Output {
    fn new(renderer: Renderer, channels: usize) -> Self {
        Self {
            renderer,
            channels,
            render_buf: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    fn fill(&mut self, data: &mut [f32]) {
        let channels = self.channels;
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            let block = &mut self.render_buf[..frames_to_render];
            self.renderer.process(block);

            // Copy to output (mono to all channels)
            let out_off = frames_written * channels;
            for (i, &s) in block.iter().enumerate() {
                for ch in 0..channels {
                    data[out_off + i * channels + ch] = s;
                }
            }

            frames_written += frames_to_render;
        }
    }
}
