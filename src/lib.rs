//! desk-ngin
//!
//! A small wgpu renderer that composes a fixed desk tableau (desk, mug,
//! monitor, keyboard and an articulated lamp) from six procedurally generated
//! primitives. Scene code drives the renderer in an immediate-mode style:
//! it sets named shader values, draws a shape, sets more values and draws
//! again. Runs natively and in the browser.
//!
//! High-level modules
//! - `camera`: viewer camera, projection and the input controller
//! - `config`: runtime configuration and logger setup
//! - `context`: window, surface and GPU device
//! - `data_structures`: primitives, meshes, textures, materials and transforms
//! - `flow`: the winit event loop
//! - `pipelines`: the lit scene pipeline and its uniform layout
//! - `render`: draw recording ([`Frame`]) and GPU replay ([`SceneRenderer`])
//! - `resources`: asset I/O
//! - `scene`: the scene manager and the desk composition
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use config::SceneConfig;
pub use data_structures::mesh::{DrawShape, ShapeKind};
pub use pipelines::uniforms::ShaderManager;
pub use render::{Frame, SceneRenderer};
pub use scene::SceneManager;
