//! Point light sources.

use lumen_math::{Color, Vec3};

/// An infinitesimal light at a position. No distance falloff is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    position: Vec3,
    color: Color,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Unit direction from `point` towards the light.
    #[inline]
    pub fn direction_from(&self, point: Vec3) -> Vec3 {
        (self.position - point).normalize()
    }

    /// Distance from `point` to the light.
    #[inline]
    pub fn distance_from(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}

impl From<&lumen_core::LightDescription> for PointLight {
    fn from(desc: &lumen_core::LightDescription) -> Self {
        Self::new(Vec3::from_array(desc.position), Color::from_array(desc.color))
    }
}
