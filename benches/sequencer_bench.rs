//! Benchmarks for the scheduler hot paths and the audio side.
//!
//! Run with: cargo bench
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - scheduler/*  Wake-up cost, steady state and after a long stall
//!   - voices/*     One kit voice rendering a block
//!   - renderer/*   Full engine block with every track sounding

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use stepseq::{
    engine,
    host::EventLoop,
    nodes::{GraphNode, RenderCtx},
    voices::{self, Kit},
    AudioClock, AudioGraph, ContextState, LookaheadScheduler, ManualClock, PadGrid,
    SchedulerConfig, SchedulerError, TrackId,
};

/// Common buffer sizes used in audio applications.
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

const SAMPLE_RATE: f32 = 48_000.0;

/// Graph that only counts, so the bench measures the scheduler itself.
struct CountingGraph {
    clock: ManualClock,
    sounds: usize,
}

impl AudioClock for CountingGraph {
    fn current_time(&self) -> f64 {
        self.clock.current_time()
    }
}

impl AudioGraph for CountingGraph {
    fn state(&self) -> ContextState {
        ContextState::Running
    }

    fn resume_if_suspended(&mut self) -> Result<(), SchedulerError> {
        Ok(())
    }

    fn schedule_sound(&mut self, _track: TrackId, _start_time: f64) {
        self.sounds += 1;
    }
}

fn full_grid() -> PadGrid {
    let mut pads = PadGrid::new(4, 4);
    for track in 0..4 {
        for beat in 0..4 {
            let _ = pads.set(track, beat, true);
        }
    }
    pads
}

fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler");
    let pads = full_grid();

    // Typical wake-up: nothing new inside the window
    group.bench_function("idle_tick", |b| {
        let clock = ManualClock::new();
        let mut graph = CountingGraph { clock: clock.clone(), sounds: 0 };
        let mut host = EventLoop::new();
        let mut scheduler = LookaheadScheduler::new(SchedulerConfig::default()).unwrap();
        scheduler.start(&mut graph, &pads, &mut host).unwrap();

        b.iter(|| black_box(scheduler.tick(&mut graph, &pads, &mut host)));
    });

    // Throttled background tab: a minute of overdue beats in one wake-up
    group.bench_function("catch_up_minute", |b| {
        b.iter(|| {
            let clock = ManualClock::new();
            let mut graph = CountingGraph { clock: clock.clone(), sounds: 0 };
            let mut host = EventLoop::new();
            let config = SchedulerConfig::default().bpm(240.0);
            let mut scheduler = LookaheadScheduler::new(config).unwrap();
            scheduler.start(&mut graph, &pads, &mut host).unwrap();

            clock.set(60.0);
            black_box(scheduler.tick(&mut graph, &pads, &mut host))
        })
    });

    group.finish();
}

fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("voices");
    let ctx = RenderCtx::from_freq(SAMPLE_RATE, 440.0, 1.0);
    let sample = voices::dtmf_tone(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut sweep = voices::sweep(0.2, 0.5);
        sweep.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("sweep", size), &size, |b, _| {
            b.iter(|| sweep.render_block(black_box(&mut buffer), black_box(&ctx)))
        });

        let mut pulse = voices::pulse(880.0, 30.0);
        pulse.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("pulse", size), &size, |b, _| {
            b.iter(|| pulse.render_block(black_box(&mut buffer), black_box(&ctx)))
        });

        let mut noise = voices::noise(1.0, 1000.0);
        noise.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("noise", size), &size, |b, _| {
            b.iter(|| noise.render_block(black_box(&mut buffer), black_box(&ctx)))
        });

        let mut playback = voices::sample(sample.clone(), 1.0);
        playback.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("sample", size), &size, |b, _| {
            b.iter(|| playback.render_block(black_box(&mut buffer), black_box(&ctx)))
        });
    }

    group.finish();
}

fn bench_renderer(c: &mut Criterion) {
    let mut group = c.benchmark_group("renderer");

    for &size in BLOCK_SIZES {
        // Four overlapping hits, re-triggered once they finish
        let (mut handle, mut renderer) = engine::engine(SAMPLE_RATE, Kit::standard(SAMPLE_RATE));
        let _ = handle.resume_if_suspended();
        let mut buffer = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("full_kit", size), &size, |b, _| {
            b.iter(|| {
                if renderer.active_voices() == 0 {
                    let now = handle.current_time();
                    for track in 0..4 {
                        handle.schedule_sound(track, now);
                    }
                }
                renderer.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scheduler, bench_voices, bench_renderer);
criterion_main!(benches);
