//! Shader-facing types and the scene render pipeline.

pub mod light;
pub mod scene;
pub mod uniforms;
