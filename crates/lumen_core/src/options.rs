//! Render options.

use serde::Deserialize;

use crate::{SceneError, SceneResult};

/// Largest accepted anti-aliasing multiplier.
pub const MAX_AA_MULTIPLIER: u32 = 256;

/// Options that control per-pixel sampling.
///
/// Depth of field takes priority over anti-aliasing; a pixel never uses both.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    /// Sub-pixel grid size for anti-aliasing (1 = one ray per pixel)
    pub aa_multiplier: u32,
    /// Thin-lens aperture radius (0 disables depth of field)
    pub aperture_radius: f32,
    /// Distance along the primary ray to the plane of perfect focus
    pub focal_length: f32,
    /// Seed for the depth-of-field sampling stream
    pub seed: u64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            aa_multiplier: 1,
            aperture_radius: 0.0,
            focal_length: 1.0,
            seed: 0,
        }
    }
}

impl SceneOptions {
    pub fn with_aa_multiplier(mut self, multiplier: u32) -> Self {
        self.aa_multiplier = multiplier;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, aperture_radius: f32, focal_length: f32) -> Self {
        self.aperture_radius = aperture_radius;
        self.focal_length = focal_length;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Whether depth-of-field sampling is enabled.
    pub fn depth_of_field(&self) -> bool {
        self.aperture_radius > 0.0
    }

    /// Check the options before rendering.
    ///
    /// The renderer trusts its options, so drivers call this first.
    pub fn validate(&self) -> SceneResult<()> {
        if !(1..=MAX_AA_MULTIPLIER).contains(&self.aa_multiplier) {
            return Err(SceneError::InvalidOptions(format!(
                "anti-aliasing multiplier must be between 1 and {}, got {}",
                MAX_AA_MULTIPLIER, self.aa_multiplier
            )));
        }
        if !self.aperture_radius.is_finite() || self.aperture_radius < 0.0 {
            return Err(SceneError::InvalidOptions(format!(
                "aperture radius must be a non-negative number, got {}",
                self.aperture_radius
            )));
        }
        if self.depth_of_field() && !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(SceneError::InvalidOptions(format!(
                "focal length must be positive when depth of field is enabled, got {}",
                self.focal_length
            )));
        }
        Ok(())
    }
}
