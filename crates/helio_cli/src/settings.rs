//! Render settings for the CLI driver.
//!
//! Settings come from an optional JSON file; every field defaults, so an
//! empty object (or no file at all) renders the built-in showcase scene.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading render settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Settings controlling one render.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub image_width: u32,
    pub image_height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub seed: u64,
    /// Output path; `.ppm` writes P3 text, anything else goes through
    /// the image crate (PNG by default).
    pub output: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 200,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
            output: String::from("output.png"),
        }
    }
}

impl RenderSettings {
    /// Load settings from a JSON file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        let settings: RenderSettings = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings describe a renderable image.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(SettingsError::Invalid(format!(
                "image dimensions must be non-zero, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(SettingsError::Invalid(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }
}
