//! Camera for ray generation.

use crate::sampling::random_in_unit_disk;
use helio_math::{Ray, Vec3};
use rand::RngCore;

/// Thin-lens camera for generating rays into the scene.
///
/// All the viewing geometry is derived once at construction and never
/// mutated: the image-plane corner and span vectors, the orthonormal basis
/// (u, v, w) and the lens radius. `get_ray` maps normalized image
/// coordinates to world-space rays, jittering the ray origin across the
/// lens disk for depth of field.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a new camera.
    ///
    /// - `look_from` / `look_at`: eye position and target point
    /// - `vup`: world-space "up" used to orient the image plane
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect_ratio`: image width / height
    /// - `aperture`: lens diameter (0 disables depth of field)
    /// - `focus_dist`: distance to the plane of perfect focus
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect_ratio: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        // Degenerate view geometry would put zero-length vectors through
        // normalize below; that's a caller contract violation.
        assert!(
            (look_from - look_at).length_squared() > 0.0,
            "camera look_from and look_at must differ"
        );
        assert!(vup.length_squared() > 0.0, "camera up vector must be non-zero");

        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = look_from;
        let horizontal = 2.0 * half_width * focus_dist * u;
        let vertical = 2.0 * half_height * focus_dist * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate a ray through normalized image coordinates (s, t) in [0, 1].
    ///
    /// t = 0 is the bottom of the image plane, t = 1 the top.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = rd.x * self.u + rd.y * self.v;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }

    /// The camera's eye position.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// The camera's backward basis vector (from target toward the eye).
    pub fn w(&self) -> Vec3 {
        self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn simple_camera(aperture: f32) -> Camera {
        Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            90.0,
            2.0,
            aperture,
            1.0,
        )
    }

    #[test]
    fn test_camera_basis() {
        let camera = simple_camera(0.0);
        assert!((camera.w() - Vec3::Z).length() < 1e-6);
        assert!((camera.u - Vec3::X).length() < 1e-6);
        assert!((camera.v - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = simple_camera(0.0);
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);

        let dir = ray.direction().normalize();
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_corner_rays_span_fov() {
        // vfov 90 at focus 1: the image plane spans [-1, 1] vertically
        let camera = simple_camera(0.0);
        let mut rng = StdRng::seed_from_u64(42);

        let top = camera.get_ray(0.5, 1.0, &mut rng);
        let bottom = camera.get_ray(0.5, 0.0, &mut rng);
        assert!((top.direction().y - 1.0).abs() < 1e-5);
        assert!((bottom.direction().y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_aperture_fixes_origin() {
        let camera = simple_camera(0.0);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            let ray = camera.get_ray(0.3, 0.7, &mut rng);
            assert_eq!(ray.origin(), Vec3::ZERO);
        }
    }

    #[test]
    fn test_aperture_jitters_origin_within_lens() {
        let camera = simple_camera(0.5);
        let mut rng = StdRng::seed_from_u64(2);

        let mut moved = false;
        for _ in 0..20 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            let offset = ray.origin().length();
            assert!(offset < 0.25 + 1e-6); // lens radius = aperture / 2
            moved |= offset > 0.0;
        }
        assert!(moved);
    }

    #[test]
    fn test_lens_offset_cancels_in_direction() {
        // Origin offset must be subtracted from the direction so every
        // lens sample still converges on the same focus-plane point.
        let camera = simple_camera(1.0);
        let mut rng = StdRng::seed_from_u64(3);

        let target = camera.lower_left_corner + 0.25 * camera.horizontal + 0.75 * camera.vertical;
        for _ in 0..20 {
            let ray = camera.get_ray(0.25, 0.75, &mut rng);
            assert!((ray.at(1.0) - target).length() < 1e-5);
        }
    }

    #[test]
    #[should_panic(expected = "look_from and look_at must differ")]
    fn test_degenerate_view_panics() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        Camera::new(p, p, Vec3::Y, 90.0, 1.0, 0.0, 1.0);
    }
}
