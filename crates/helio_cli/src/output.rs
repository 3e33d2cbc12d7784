//! Image file output.

use anyhow::{anyhow, Result};
use helio_renderer::{color_to_rgb8, ImageBuffer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Save the buffer to `path`, picking the format from the extension:
/// `.ppm` writes P3 text, everything else goes through the image crate.
pub fn save_image(image: &ImageBuffer, samples_per_pixel: u32, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("ppm") => save_ppm(image, samples_per_pixel, path)?,
        _ => save_png(image, samples_per_pixel, path)?,
    }
    Ok(())
}

/// Save as plain-text PPM (P3), the original program's output format.
pub fn save_ppm(
    image: &ImageBuffer,
    samples_per_pixel: u32,
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb8(image.get(x, y), samples_per_pixel);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()
}

/// Save through the image crate (PNG and friends, by extension).
pub fn save_png(
    image: &ImageBuffer,
    samples_per_pixel: u32,
    path: impl AsRef<Path>,
) -> Result<()> {
    let bytes = image.to_rgb8(samples_per_pixel);
    let buffer = image::RgbImage::from_raw(image.width, image.height, bytes)
        .ok_or_else(|| anyhow!("pixel buffer does not match image dimensions"))?;
    buffer.save(path.as_ref())?;
    Ok(())
}
