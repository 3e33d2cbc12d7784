//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use helio_math::{Ray, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Result of a successful scatter: the surviving ray and how much of each
/// channel it carries.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns Some(ScatterResult) if the ray scatters, or None if the ray
    /// is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Normal plus a unit vector gives a cosine-weighted bounce
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Only scatter if the reflected ray is in the same hemisphere as the normal
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Glass absorbs nothing
        let attenuation = Color::ONE;
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Check for total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface (Snell's law, split into the
/// components perpendicular and parallel to the normal).
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn surface_hit() -> HitRecord<'static> {
        HitRecord {
            p: Vec3::new(0.0, 0.0, -1.0),
            normal: Vec3::Z,
            t: 1.0,
            front_face: true,
            ..HitRecord::default()
        }
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let mat = Lambertian::new(Color::new(0.8, 0.3, 0.3));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = surface_hit();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("must scatter");
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.3));
            // Cosine-weighted bounce stays in the upper hemisphere
            assert!(result.scattered.direction().dot(rec.normal) > 0.0);
        }
    }

    #[test]
    fn test_metal_fuzz_zero_is_mirror() {
        let mat = Metal::new(Color::new(0.9, 0.9, 0.9), 0.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, -1.0));
        let rec = surface_hit();

        let mut rng = StdRng::seed_from_u64(11);
        let result = mat.scatter(&ray, &rec, &mut rng).expect("must scatter");

        let expected = reflect(ray.direction().normalize(), rec.normal);
        assert!((result.scattered.direction() - expected).length() < 1e-6);
    }

    #[test]
    fn test_metal_absorbs_grazing_fuzz() {
        // Full fuzz at a grazing angle drives some samples below the
        // horizon, which the metal reports as absorption.
        let mat = Metal::new(Color::ONE, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, -0.01));
        let rec = surface_hit();

        let mut rng = StdRng::seed_from_u64(13);
        let absorbed = (0..200)
            .filter(|_| mat.scatter(&ray, &rec, &mut rng).is_none())
            .count();
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_index_one_goes_straight() {
        // ior = 1.0 means no interface at all: refraction never bends and
        // sin(theta) can never exceed 1, so TIR is impossible. Schlick still
        // leaves a (1 - cos)^5 chance of a mirror bounce, so stay near
        // normal incidence where that probability is vanishing.
        let mat = Dielectric::new(1.0);
        let rec = surface_hit();
        let mut rng = StdRng::seed_from_u64(17);

        for dir in [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.1, 0.0, -1.0),
            Vec3::new(0.2, 0.1, -1.0),
        ] {
            let ray = Ray::new(Vec3::ZERO, dir);
            let result = mat.scatter(&ray, &rec, &mut rng).expect("must scatter");
            let unit = dir.normalize();
            assert!(
                (result.scattered.direction() - unit).length() < 1e-5,
                "direction changed at ior=1: {:?} -> {:?}",
                unit,
                result.scattered.direction()
            );
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Exiting glass (back face) at a grazing angle: ratio * sin > 1,
        // so the ray must mirror-reflect.
        let mat = Dielectric::new(1.5);
        let rec = HitRecord {
            front_face: false,
            ..surface_hit()
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, -0.2));

        let mut rng = StdRng::seed_from_u64(19);
        let result = mat.scatter(&ray, &rec, &mut rng).expect("must scatter");

        let expected = reflect(ray.direction().normalize(), rec.normal);
        assert!((result.scattered.direction() - expected).length() < 1e-6);
    }

    #[test]
    fn test_dielectric_attenuation_is_white() {
        let mat = Dielectric::new(1.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = surface_hit();

        let mut rng = StdRng::seed_from_u64(23);
        let result = mat.scatter(&ray, &rec, &mut rng).expect("must scatter");
        assert_eq!(result.attenuation, Color::ONE);
    }

    #[test]
    fn test_schlick_normal_incidence() {
        // r0 for glass at head-on incidence is ((1-1.5)/(1+1.5))^2 = 0.04
        let r = Dielectric::reflectance(1.0, 1.5);
        assert!((r - 0.04).abs() < 1e-6);
    }
}
