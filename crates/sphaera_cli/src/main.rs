use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use sphaera_core::SceneBuilder;
use sphaera_renderer::{Camera, ProgressiveRenderer};

mod cli;
mod config;
mod output;

use cli::Args;
use config::Settings;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    args.apply(&mut settings);

    if args.dump_settings {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    log::info!("Starting Sphaera");
    log::info!(
        "Image resolution: {}x{}, target {} samples per pixel",
        settings.width,
        settings.height,
        settings.max_samples
    );

    let render_settings = settings.render_settings();
    render_settings
        .validate()
        .context("Invalid render settings")?;

    let start = Instant::now();
    let scene = SceneBuilder::new(settings.scene_params())
        .build_showcase()
        .context("Failed to build scene")?;
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(settings.camera_params()).context("Invalid camera settings")?;
    let mut renderer = ProgressiveRenderer::new(render_settings, camera, scene)?;

    let start = Instant::now();
    let progress_step = (settings.max_samples / 10).max(1);
    renderer.run_to_completion(|report, display| {
        if report.samples_per_pixel % progress_step == 0 {
            log::info!(
                "{:>3.0}% ({} / {} spp)",
                100.0 * report.samples_per_pixel as f32 / settings.max_samples as f32,
                report.samples_per_pixel,
                settings.max_samples
            );
        }

        let Some(every) = settings.snapshot_every.filter(|every| *every > 0) else {
            return;
        };
        if report.samples_per_pixel % every == 0 && !report.complete {
            let path = output::snapshot_path(&settings.output, report.samples_per_pixel);
            if let Err(e) = output::save_display(display, &path) {
                log::warn!("Snapshot failed: {:#}", e);
            }
        }
    })?;

    log::info!(
        "Rendered {} passes in {:?}",
        renderer.state().passes_completed(),
        start.elapsed()
    );

    output::save_display(renderer.display(), &settings.output)?;

    Ok(())
}
