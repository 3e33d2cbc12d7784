//! helio - CPU path tracer driver.
//!
//! Builds the showcase scene, renders it with the settings from an optional
//! JSON file (first CLI argument), and writes the result to disk.

mod output;
mod settings;

use anyhow::{Context, Result};
use helio_renderer::{random_scene, render, Camera, RenderConfig, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use settings::RenderSettings;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => RenderSettings::load(&path)
            .with_context(|| format!("loading settings from {path}"))?,
        None => RenderSettings::default(),
    };
    log::info!(
        "rendering {}x{} at {} spp, depth {}",
        settings.image_width,
        settings.image_height,
        settings.samples_per_pixel,
        settings.max_depth
    );

    // Scene construction gets its own seeded stream so the same seed always
    // produces the same sphere field.
    let start = Instant::now();
    let mut scene_rng = StdRng::seed_from_u64(settings.seed);
    let world = random_scene(&mut scene_rng);
    log::info!("scene built: {} objects in {:?}", world.len(), start.elapsed());

    let camera = Camera::new(
        Vec3::new(13.0, 2.0, 3.0),
        Vec3::ZERO,
        Vec3::Y,
        30.0,
        settings.aspect_ratio(),
        0.1,
        10.0,
    );

    let config = RenderConfig {
        samples_per_pixel: settings.samples_per_pixel,
        max_depth: settings.max_depth,
        seed: settings.seed,
    };

    let start = Instant::now();
    let image = render(
        &camera,
        &world,
        &config,
        settings.image_width,
        settings.image_height,
    );
    log::info!("rendered in {:?}", start.elapsed());

    output::save_image(&image, settings.samples_per_pixel, &settings.output)
        .with_context(|| format!("writing {}", settings.output))?;
    log::info!("saved to {}", settings.output);

    Ok(())
}
