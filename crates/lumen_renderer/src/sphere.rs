//! Sphere primitive for ray tracing.

use crate::{
    hittable::{Hittable, RayHit},
    Material, Ray,
};
use lumen_math::Vec3;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. `radius` must be positive.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<RayHit<'_>> {
        let radius2 = self.radius * self.radius;

        // Geometric solution: project the center onto the ray
        let l = self.center - ray.origin();
        let tca = l.dot(ray.direction());
        let d2 = l.dot(l) - tca * tca;

        // Algebraic solution decides whether the roots exist
        let a = ray.direction().dot(ray.direction());
        let b = 2.0 * ray.direction().dot(l);
        let c = l.dot(l) - radius2;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let thc = (radius2 - d2).max(0.0).sqrt();
        let mut t0 = tca - thc;
        let mut t1 = tca + thc;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        // If the near root is behind the origin, use the far one
        let t = if t0 < 0.0 { t1 } else { t0 };
        if t < 0.0 {
            return None;
        }

        let position = ray.at(t);
        let normal = (position - self.center).normalize();
        Some(RayHit::new(position, normal, ray.direction(), &self.material))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
