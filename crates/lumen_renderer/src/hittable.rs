//! Ray-entity intersection: hit records, the `Hittable` trait and the closed
//! set of scene entities.

use crate::{Material, Plane, Ray, Sphere, Triangle};
use lumen_math::Vec3;

/// Record of a ray-entity intersection.
#[derive(Debug, Clone, Copy)]
pub struct RayHit<'a> {
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal as defined by the primitive (not flipped towards the ray)
    pub normal: Vec3,
    /// Direction of the ray that produced the hit
    pub incident: Vec3,
    /// Material of the entity that was hit
    pub material: &'a Material,
}

impl<'a> RayHit<'a> {
    pub fn new(position: Vec3, normal: Vec3, incident: Vec3, material: &'a Material) -> Self {
        Self {
            position,
            normal,
            incident,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Intersect a ray whose direction is unit length.
    ///
    /// Returns `None` when the ray misses.
    fn intersect(&self, ray: &Ray) -> Option<RayHit<'_>>;

    /// Material the object is shaded with.
    fn material(&self) -> &Material;
}

/// Every kind of entity a scene can hold.
#[derive(Debug, Clone)]
pub enum Entity {
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Hittable for Entity {
    fn intersect(&self, ray: &Ray) -> Option<RayHit<'_>> {
        match self {
            Entity::Plane(plane) => plane.intersect(ray),
            Entity::Sphere(sphere) => sphere.intersect(ray),
            Entity::Triangle(triangle) => triangle.intersect(ray),
        }
    }

    fn material(&self) -> &Material {
        match self {
            Entity::Plane(plane) => plane.material(),
            Entity::Sphere(sphere) => sphere.material(),
            Entity::Triangle(triangle) => triangle.material(),
        }
    }
}

impl From<Plane> for Entity {
    fn from(plane: Plane) -> Self {
        Entity::Plane(plane)
    }
}

impl From<Sphere> for Entity {
    fn from(sphere: Sphere) -> Self {
        Entity::Sphere(sphere)
    }
}

impl From<Triangle> for Entity {
    fn from(triangle: Triangle) -> Self {
        Entity::Triangle(triangle)
    }
}
