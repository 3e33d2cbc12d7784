//! Showcase scene assembly.
//!
//! Scene construction is a collaborator of the renderer, not part of it:
//! it hands back a finished `HittableList` and holds no further state.

use crate::sampling::{gen_f32, gen_range_f32, random_color, random_color_range};
use crate::{Color, Dielectric, HittableList, Lambertian, Metal, Sphere};
use helio_math::Vec3;
use rand::RngCore;

/// Build the random sphere-field showcase scene.
///
/// A large green ground sphere, a 22x22 grid of small spheres with
/// proportionally random materials (80% diffuse, 15% metal, 5% glass),
/// and three large feature spheres: glass, diffuse and polished metal.
pub fn random_scene(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();

    // Ground
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Color::new(0.1, 0.4, 0.1)),
    )));

    // Small random spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            // Keep clear of the large metal sphere's spot
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_color(rng) * random_color(rng);
                world.add(Box::new(Sphere::new(center, 0.2, Lambertian::new(albedo))));
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_color_range(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                world.add(Box::new(Sphere::new(center, 0.2, Metal::new(albedo, fuzz))));
            } else {
                // Glass
                let ior = gen_range_f32(rng, 1.2, 1.9);
                world.add(Box::new(Sphere::new(center, 0.2, Dielectric::new(ior))));
            }
        }
    }

    // Three feature spheres
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Dielectric::new(1.1),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.3, 1.0, 0.3)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Metal::new(Color::new(0.4, 0.9, 0.4), 0.0),
    )));

    world
}
