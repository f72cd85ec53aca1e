//! Lumen Core - scene description and render configuration.
//!
//! This crate provides:
//!
//! - **Scene description types**: materials, entities and lights as they
//!   appear in a scene file
//! - **JSON loading**: parsing and validation of scene files
//! - **Render options**: `SceneOptions` with validation
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let description = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} entities, {} lights",
//!     description.entities.len(),
//!     description.lights.len());
//! ```

pub mod description;
pub mod error;
pub mod options;

pub use description::{
    load_scene, load_scene_from_str, EntityDescription, LightDescription, MaterialDescription,
    MaterialType, SceneDescription,
};
pub use error::{SceneError, SceneResult};
pub use options::{SceneOptions, MAX_AA_MULTIPLIER};
