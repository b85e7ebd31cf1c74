use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::config::Settings;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Progressive sphere path tracer
#[derive(Debug, Parser)]
#[command(name = "sphaera", version)]
pub struct Args {
    /// JSON settings file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel to accumulate (one per pass)
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Tile edge length for parallel dispatch
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Seed for the procedural scene
    #[arg(long)]
    pub scene_seed: Option<u64>,

    /// Seed for per-pass sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output image (.png, .ppm)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write an intermediate image every N passes
    #[arg(long)]
    pub snapshot_every: Option<u32>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    pub dump_settings: bool,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(samples) = self.samples {
            settings.max_samples = samples;
        }
        if let Some(bucket_size) = self.bucket_size {
            settings.bucket_size = bucket_size;
        }
        if let Some(seed) = self.scene_seed {
            settings.scene_seed = Some(seed);
        }
        if let Some(seed) = self.seed {
            settings.render_seed = Some(seed);
        }
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(every) = self.snapshot_every {
            settings.snapshot_every = Some(every);
        }
    }
}
