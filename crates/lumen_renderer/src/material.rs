//! Surface materials and the optics helpers the shading engine uses.

use lumen_math::{Color, Interval, Vec3};

pub use lumen_core::MaterialType;

/// Shading behavior of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    kind: MaterialType,
    color: Color,
    /// Index of refraction, only read by refractive materials
    refractive_index: f32,
}

impl Material {
    /// Create a new material.
    ///
    /// `refractive_index` must be positive; it is ignored unless `kind` is
    /// [`MaterialType::Refractive`].
    pub fn new(kind: MaterialType, color: Color, refractive_index: f32) -> Self {
        Self {
            kind,
            color,
            refractive_index,
        }
    }

    /// Diffuse material lit directly by the scene's point lights.
    pub fn diffuse(color: Color) -> Self {
        Self::new(MaterialType::Diffuse, color, 1.0)
    }

    /// Perfect mirror.
    pub fn reflective(color: Color) -> Self {
        Self::new(MaterialType::Reflective, color, 1.0)
    }

    /// Mix of mirror reflection and diffuse lighting.
    pub fn glossy(color: Color) -> Self {
        Self::new(MaterialType::Glossy, color, 1.0)
    }

    /// Dielectric (glass-like) material.
    ///
    /// - `color`: absorption coefficient applied to light travelling inside
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn refractive(color: Color, ior: f32) -> Self {
        Self::new(MaterialType::Refractive, color, ior)
    }

    #[inline]
    pub fn kind(&self) -> MaterialType {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn refractive_index(&self) -> f32 {
        self.refractive_index
    }
}

impl From<&lumen_core::MaterialDescription> for Material {
    fn from(desc: &lumen_core::MaterialDescription) -> Self {
        Self::new(
            desc.kind,
            Color::from_array(desc.color),
            desc.refractive_index,
        )
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Refract a unit vector through a surface with Snell's law.
///
/// The surface separates air (index 1) from a medium of index `ior`; which
/// side the ray comes from is decided by the sign of `incident · normal`.
/// Returns `None` on total internal reflection.
pub fn refract(incident: Vec3, normal: Vec3, ior: f32) -> Option<Vec3> {
    let mut cosi = Interval::COSINE.clamp(incident.dot(normal));
    let (mut etai, mut etat) = (1.0, ior);
    let mut n = normal;

    if cosi < 0.0 {
        // Entering the medium
        cosi = -cosi;
    } else {
        std::mem::swap(&mut etai, &mut etat);
        n = -normal;
    }

    let eta = etai / etat;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        return None;
    }

    Some(eta * incident + (eta * cosi - k.sqrt()) * n)
}

/// Fraction of light reflected at a dielectric boundary.
///
/// Average of the s- and p-polarized Fresnel terms. Returns exactly 1.0 on
/// total internal reflection.
pub fn fresnel(incident: Vec3, normal: Vec3, ior: f32) -> f32 {
    let cosi = Interval::COSINE.clamp(incident.dot(normal));
    let (mut etai, mut etat) = (1.0, ior);
    if cosi > 0.0 {
        std::mem::swap(&mut etai, &mut etat);
    }

    // Snell's law
    let sint = etai / etat * (1.0 - cosi * cosi).max(0.0).sqrt();
    if sint >= 1.0 {
        return 1.0;
    }

    let cost = (1.0 - sint * sint).max(0.0).sqrt();
    let cosi = cosi.abs();
    let rs = (etat * cosi - etai * cost) / (etat * cosi + etai * cost);
    let rp = (etai * cosi - etat * cost) / (etai * cosi + etat * cost);
    (rs * rs + rp * rp) / 2.0
}

/// Per-channel transmittance for light that passed through an absorbing
/// medium: `exp(absorbance)` for each channel.
///
/// The exponent is not scaled by the distance travelled.
#[inline]
pub fn transmittance(absorbance: Color) -> Color {
    Color::new(absorbance.x.exp(), absorbance.y.exp(), absorbance.z.exp())
}
