//! Infinite plane primitive.

use crate::{
    hittable::{Hittable, RayHit},
    Material, Ray,
};
use lumen_math::Vec3;

/// Rays with `normal · direction` at or above this value miss the plane.
const FACING_THRESHOLD: f32 = 1e-6;

/// An infinite plane through `center` facing along `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    center: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a new plane. `normal` must be unit length.
    pub fn new(center: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            center,
            normal,
            material,
        }
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    /// Hits only rays travelling against the normal, and only in front of
    /// the ray origin: a plane behind the origin is never reported.
    fn intersect(&self, ray: &Ray) -> Option<RayHit<'_>> {
        let denom = self.normal.dot(ray.direction());
        if denom >= FACING_THRESHOLD {
            return None;
        }

        let t = (self.center - ray.origin()).dot(self.normal) / denom;
        // Parallel rays divide by zero; hits behind the origin are not hits
        if !t.is_finite() || t < 0.0 {
            return None;
        }

        // The normal is returned as-is, even for rays arriving from behind
        Some(RayHit::new(ray.at(t), self.normal, ray.direction(), &self.material))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
