//! stepseq - four-track terminal step sequencer
//!
//! Run with: cargo run
//!
//! Logging is off unless `RUST_LOG` is set. The terminal belongs to the UI,
//! so log lines go to `stepseq.log` in the working directory
//! (`RUST_LOG=debug cargo run`, then `tail -f stepseq.log` elsewhere).

mod app;
mod ui;

use std::{env, fs::File};

use app::StepSeq;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use env_logger::{Logger, Target, WriteStyle};

/// Where log records go while the UI owns the terminal
const LOG_FILE: &str = "stepseq.log";

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    // Sweep on the downbeat, pulse on the backbeat, noise and sample answering
    StepSeq::new()
        .bpm(60.0)
        .beats_per_bar(4)
        .pad(0, 0)
        .pad(1, 1)
        .pad(1, 3)
        .pad(2, 2)
        .pad(3, 3)
        .run()
}

fn init_logging() -> EyreResult<()> {
    let Ok(filters) = env::var("RUST_LOG") else {
        return Ok(());
    };

    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;
    let logger = file_logger(&filters, file);
    log::set_max_level(logger.filter());
    log::set_boxed_logger(Box::new(logger)).wrap_err("failed to install logger")
}

/// `RUST_LOG`-style filtering, written to `file` without colour codes.
fn file_logger(filters: &str, file: File) -> Logger {
    env_logger::Builder::new()
        .parse_filters(filters)
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .build()
}
