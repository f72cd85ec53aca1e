//! Lumen Renderer - recursive CPU ray tracing.
//!
//! A Whitted-style ray tracer: primary rays from a fixed pinhole (or thin
//! lens) camera, nearest-hit search over every entity, and per-material
//! shading with mirror reflection, Fresnel-weighted refraction and hard
//! shadows from point lights.

mod camera;
mod hittable;
mod image_buffer;
mod light;
mod material;
mod plane;
mod scene;
mod sphere;
mod triangle;

pub use camera::{sample_aperture, Camera, CAMERA_ORIGIN, FOV_DEGREES};
pub use hittable::{Entity, Hittable, RayHit};
pub use image_buffer::{color_to_rgba, ImageBuffer, ImageSink};
pub use light::PointLight;
pub use material::{fresnel, reflect, refract, transmittance, Material, MaterialType};
pub use plane::Plane;
pub use scene::{
    diffuse_color, Scene, BIAS, DOF_SAMPLES, DOF_START_DEPTH, GLOSSY_FACTOR, MAX_DEPTH,
};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export common math types from lumen_math
pub use lumen_math::{Color, Ray, Vec3};
pub use lumen_core::SceneOptions;
