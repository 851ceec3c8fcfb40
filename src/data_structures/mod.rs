//! Scene data structures: textures, materials, geometry and meshes.
//!
//! - `texture` wraps GPU textures and their creation
//! - `texture_registry` is the fixed-capacity table of tagged textures
//! - `material` holds named Phong materials
//! - `geometry` generates the unit primitives on the CPU
//! - `mesh` uploads primitives and exposes the draw seam
//! - `transform` composes model matrices

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod texture;
pub mod texture_registry;
pub mod transform;
