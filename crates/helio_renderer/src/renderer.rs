//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Bounded-depth light transport (iterative throughput loop)
//! - Anti-aliasing via multi-sampling
//! - Per-pixel parallel dispatch with deterministic RNG streams

use crate::sampling::gen_f32;
use crate::{Camera, Color, HitRecord, Hittable};
use helio_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
        }
    }
}

/// Offset below which hits are ignored, to stop shadow acne from
/// re-intersecting the surface a ray just left.
const T_MIN: f32 = 0.001;

/// Compute the color seen by a ray.
///
/// This is the core path tracing loop. Each bounce multiplies the running
/// throughput by the surface's attenuation; a ray that escapes the scene
/// picks up the sky, an absorbed ray or an exhausted bounce budget yields
/// black. This is the iterative form of the textbook recursion, so deep
/// bounce limits cost no stack.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, max_depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..max_depth {
        let mut rec = HitRecord::default();

        if !world.hit(&ray, Interval::new(T_MIN, f32::INFINITY), &mut rec) {
            // Escaped into the environment
            return throughput * sky_gradient(&ray);
        }

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            // Absorbed
            None => return Color::ZERO,
        }
    }

    // Bounce limit reached: no more light is gathered
    Color::ZERO
}

/// Compute the sky gradient environment term.
///
/// A vertical lerp from white at the horizon to sky blue straight up,
/// driven by the ray's normalized y component.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - t) * white + t * blue
}

/// Render a single pixel with multi-sampling.
///
/// Returns the **raw accumulated** color over all samples. Averaging, gamma
/// correction and quantization are the output stage's job; see
/// [`color_to_rgb8`].
///
/// Pixel (0, 0) is the top-left corner of the image. `x` and `y` must lie
/// inside the raster; out-of-range coordinates are a caller contract
/// violation.
#[allow(clippy::too_many_arguments)]
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    assert!(
        x < width && y < height,
        "pixel ({x}, {y}) outside {width}x{height} raster"
    );

    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / width as f32;
        // Flip y: the buffer's row 0 is the top of the image, but the
        // camera's t axis grows upward.
        let t = ((height - 1 - y) as f32 + gen_f32(rng)) / height as f32;

        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color
}

/// Convert an accumulated sample sum to 8-bit RGB.
///
/// Exact contract: `byte = floor(256 * clamp(sqrt(c / spp), 0, 0.999))`
/// per channel (average, gamma-2 correction, then quantize).
pub fn color_to_rgb8(color: Color, samples_per_pixel: u32) -> [u8; 3] {
    let scale = 1.0 / samples_per_pixel as f32;
    let convert = |c: f32| {
        let gamma = (c * scale).max(0.0).sqrt();
        (256.0 * gamma.clamp(0.0, 0.999)) as u8
    };
    [convert(color.x), convert(color.y), convert(color.z)]
}

/// Image buffer holding raw per-pixel sample sums in raster order.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGB bytes in raster order.
    pub fn to_rgb8(&self, samples_per_pixel: u32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color, samples_per_pixel));
        }
        bytes
    }
}

/// Render the entire frame in parallel.
///
/// Pixels are embarrassingly parallel: each rayon task writes its own slot
/// of the preallocated buffer, so raster order is preserved no matter how
/// the scheduler interleaves completion. Every pixel seeds its own RNG from
/// `config.seed` plus its index, which keeps results bit-identical across
/// runs and thread counts.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    width: u32,
    height: u32,
) -> ImageBuffer {
    log::debug!(
        "rendering {}x{} at {} spp, max depth {}",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth
    );

    let mut image = ImageBuffer::new(width, height);

    image
        .pixels
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, pixel)| {
            let x = i as u32 % width;
            let y = i as u32 / width;
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
            *pixel = render_pixel(camera, world, x, y, width, height, config, &mut rng);
        });

    image
}
