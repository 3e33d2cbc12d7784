//! helio renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for physically-based rendering: spheres,
//! diffuse/metal/glass materials, a thin-lens camera and a bounded-depth
//! radiance estimator, fanned out across pixels with rayon.

mod camera;
mod hittable;
mod material;
mod renderer;
mod sampling;
mod scene;
mod sphere;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    color_to_rgb8, ray_color, render, render_pixel, sky_gradient, ImageBuffer, RenderConfig,
};
pub use sampling::{
    gen_f32, gen_range_f32, random_color, random_color_range, random_in_unit_disk,
    random_in_unit_sphere, random_unit_vector,
};
pub use scene::random_scene;
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from helio_math
pub use helio_math::{Interval, Ray, Vec3};
