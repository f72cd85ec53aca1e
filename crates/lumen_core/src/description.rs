//! Scene description types and JSON loading.
//!
//! A scene file lists named materials, the entities that use them and the
//! point lights. Loading validates everything the renderer relies on, so a
//! `SceneDescription` returned from here can be turned into a renderable
//! scene without further checks.

use std::collections::HashSet;
use std::path::Path;

use lumen_math::Vec3;
use serde::Deserialize;

use crate::{SceneError, SceneOptions, SceneResult};

/// How a surface responds to light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    /// Lambertian surface lit directly by the point lights
    Diffuse,
    /// Perfect mirror
    Reflective,
    /// Blend of mirror reflection and diffuse lighting
    Glossy,
    /// Dielectric with Fresnel-weighted reflection and refraction
    Refractive,
}

fn default_refractive_index() -> f32 {
    1.0
}

/// A named material.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaterialDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    pub color: [f32; 3],
    /// Only used by refractive materials
    #[serde(default = "default_refractive_index")]
    pub refractive_index: f32,
}

/// A geometric entity and the name of its material.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityDescription {
    Plane {
        center: [f32; 3],
        normal: [f32; 3],
        material: String,
    },
    Sphere {
        center: [f32; 3],
        radius: f32,
        material: String,
    },
    Triangle {
        v0: [f32; 3],
        v1: [f32; 3],
        v2: [f32; 3],
        material: String,
    },
}

impl EntityDescription {
    /// Name of the material this entity is rendered with.
    pub fn material(&self) -> &str {
        match self {
            EntityDescription::Plane { material, .. }
            | EntityDescription::Sphere { material, .. }
            | EntityDescription::Triangle { material, .. } => material,
        }
    }
}

/// A point light.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LightDescription {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Complete contents of a scene file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub materials: Vec<MaterialDescription>,
    #[serde(default)]
    pub entities: Vec<EntityDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
    /// Render options stored with the scene; command line flags override them
    #[serde(default)]
    pub options: Option<SceneOptions>,
}

impl SceneDescription {
    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<&MaterialDescription> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Validate the description and normalize plane normals in place.
    pub fn validate(&mut self) -> SceneResult<()> {
        let mut names = HashSet::new();
        for material in &self.materials {
            if !names.insert(material.name.as_str()) {
                return Err(SceneError::DuplicateMaterial(material.name.clone()));
            }
            if !(material.refractive_index > 0.0) {
                return Err(SceneError::InvalidRefractiveIndex {
                    name: material.name.clone(),
                    value: material.refractive_index,
                });
            }
        }

        for (index, entity) in self.entities.iter_mut().enumerate() {
            if !names.contains(entity.material()) {
                return Err(SceneError::UnknownMaterial {
                    index,
                    name: entity.material().to_string(),
                });
            }

            let invalid = |reason: &str| SceneError::InvalidEntity {
                index,
                reason: reason.to_string(),
            };

            match entity {
                EntityDescription::Plane { normal, .. } => {
                    let n = Vec3::from_array(*normal);
                    if n.length_squared() < 1e-12 {
                        return Err(invalid("plane normal must be non-zero"));
                    }
                    *normal = n.normalize().to_array();
                }
                EntityDescription::Sphere { radius, .. } => {
                    if !(*radius > 0.0) {
                        return Err(invalid("sphere radius must be positive"));
                    }
                }
                EntityDescription::Triangle { v0, v1, v2, .. } => {
                    let a = Vec3::from_array(*v0);
                    let edge1 = Vec3::from_array(*v1) - a;
                    let edge2 = Vec3::from_array(*v2) - a;
                    if edge1.cross(edge2).length_squared() < 1e-12 {
                        return Err(invalid("triangle is degenerate"));
                    }
                }
            }
        }

        if let Some(options) = &self.options {
            options.validate()?;
        }

        Ok(())
    }
}

/// Load and validate a scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Loading scene: {}", path.display());

    let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    load_scene_from_str(&text)
}

/// Parse and validate a scene from JSON text.
pub fn load_scene_from_str(text: &str) -> SceneResult<SceneDescription> {
    let mut description: SceneDescription = serde_json::from_str(text)?;
    description.validate()?;

    log::debug!(
        "Scene has {} materials, {} entities, {} lights",
        description.materials.len(),
        description.entities.len(),
        description.lights.len()
    );

    Ok(description)
}
