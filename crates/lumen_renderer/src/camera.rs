//! Fixed pinhole camera and thin-lens aperture sampling.
//!
//! The camera sits at the origin looking down +Z with +Y up. Ray directions
//! are returned un-normalized with z = 1, so `origin + f * direction` lies on
//! the plane z = f.

use lumen_math::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 60.0;

/// Origin of every primary ray, pushed just off the image plane.
pub const CAMERA_ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 1e-4);

/// Camera for generating primary ray directions.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    width: u32,
    height: u32,
    /// tan(fov / 2)
    scale: f32,
    aspect: f32,
}

impl Camera {
    /// Create a camera for a `width` x `height` image. The aspect ratio is
    /// exact, so non-square images are not stretched.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: (FOV_DEGREES / 2.0).to_radians().tan(),
            aspect: width as f32 / height as f32,
        }
    }

    /// Direction through a continuous image position, in pixels from the
    /// top-left corner.
    pub fn direction(&self, px: f32, py: f32) -> Vec3 {
        let x = (2.0 * (px / self.width as f32) - 1.0) * self.scale * self.aspect;
        let y = (1.0 - 2.0 * (py / self.height as f32)) * self.scale;
        Vec3::new(x, y, 1.0)
    }

    /// Direction through the center of pixel (x, y).
    pub fn primary_direction(&self, x: u32, y: u32) -> Vec3 {
        self.direction(x as f32 + 0.5, y as f32 + 0.5)
    }

    /// Directions of an `m` x `m` sub-pixel grid anchored at the pixel's
    /// top-left corner, row by row.
    pub fn subpixel_directions(&self, x: u32, y: u32, m: u32) -> impl Iterator<Item = Vec3> + '_ {
        let step = 1.0 / m as f32;
        (0..m).flat_map(move |j| {
            (0..m).map(move |i| {
                self.direction(x as f32 + i as f32 * step, y as f32 + j as f32 * step)
            })
        })
    }
}

/// Sample a point uniformly distributed in a disk of `radius` in the XY plane.
pub fn sample_aperture(radius: f32, rng: &mut dyn RngCore) -> Vec3 {
    let r = radius * rng.gen::<f32>().sqrt();
    let theta = rng.gen::<f32>() * 2.0 * PI;
    Vec3::new(r * theta.cos(), r * theta.sin(), 0.0)
}
