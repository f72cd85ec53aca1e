//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{Hittable, RayHit},
    Material, Ray,
};
use lumen_math::{Interval, Vec3};

/// A single triangle with a flat face normal.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length, counter-clockwise winding)
    normal: Vec3,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices. The vertices must not be
    /// collinear.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        Self {
            v0,
            v1,
            v2,
            normal,
            material,
        }
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<RayHit<'_>> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !Interval::UNIT.contains(u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if t <= 1e-6 {
            return None;
        }

        Some(RayHit::new(ray.at(t), self.normal, ray.direction(), &self.material))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Color;

    fn facing_camera() -> Triangle {
        // Counter-clockwise seen from the origin, so the normal points at -Z
        Triangle::new(
            Vec3::new(-1.0, -1.0, 3.0),
            Vec3::new(0.0, 1.0, 3.0),
            Vec3::new(1.0, -1.0, 3.0),
            Material::diffuse(Color::ONE),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let triangle = facing_camera();
        let hit = triangle.intersect(&Ray::new(Vec3::ZERO, Vec3::Z)).unwrap();

        assert!((hit.position - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let triangle = facing_camera();
        let ray = Ray::normalized(Vec3::ZERO, Vec3::new(2.0, 0.0, 3.0));
        assert!(triangle.intersect(&ray).is_none());
    }

    #[test]
    fn test_triangle_parallel_and_behind() {
        let triangle = facing_camera();
        assert!(triangle.intersect(&Ray::new(Vec3::ZERO, Vec3::X)).is_none());
        assert!(triangle.intersect(&Ray::new(Vec3::ZERO, -Vec3::Z)).is_none());
    }
}
