//! The scene manager: textures, materials, meshes and the shader-state
//! helpers the desk tableau is composed with.
//!
//! [`SceneManager`] is generic over the texture handle so the composition
//! logic can run against any [`ShaderManager`] + [`DrawShape`] target. The
//! GPU specific half (loading, binding and destroying textures) lives on
//! `SceneManager<Texture>`.

use std::path::Path;

use cgmath::{Vector2, Vector3, Vector4};

use crate::{
    data_structures::{
        material::{MaterialLibrary, ObjectMaterial},
        mesh::{DrawShape, ShapeKind, ShapeMeshes},
        texture::{Texture, create_default_sampler, texture_bind_group, texture_bind_group_layout},
        texture_registry::{TextureError, TextureRegistry},
        transform,
    },
    pipelines::uniforms::ShaderManager,
    resources,
};

pub mod desk;

pub const MODEL_NAME: &str = "model";
pub const COLOR_VALUE_NAME: &str = "objectColor";
pub const TEXTURE_VALUE_NAME: &str = "objectTexture";
pub const USE_TEXTURE_NAME: &str = "bUseTexture";
pub const USE_LIGHTING_NAME: &str = "bUseLighting";
pub const UV_SCALE_NAME: &str = "uvScale";
pub const MATERIAL_DIFFUSE_NAME: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR_NAME: &str = "material.specularColor";
pub const MATERIAL_SHININESS_NAME: &str = "material.shininess";

/// Texture files the desk scene loads, with the tags it refers to them by.
/// Slots are assigned in this order.
pub const SCENE_TEXTURES: [(&str, &str); 6] = [
    ("textures/desk_texture.png", "deskTexture"),
    ("textures/mug_texture.png", "mugTexture"),
    ("textures/monitor_texture.png", "monitorTexture"),
    ("textures/screen_texture.png", "screenTexture"),
    ("textures/keyboard_texture.png", "keyboardTexture"),
    ("textures/lamp_texture.png", "lampTexture"),
];

pub const DEFAULT_MATERIAL: &str = "default";

#[derive(Debug)]
pub struct SceneManager<T = Texture> {
    textures: TextureRegistry<T>,
    materials: MaterialLibrary,
    meshes: ShapeMeshes,
    bind_groups: Vec<wgpu::BindGroup>,
}

impl<T> Default for SceneManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SceneManager<T> {
    pub fn new() -> Self {
        Self {
            textures: TextureRegistry::new(),
            materials: MaterialLibrary::new(),
            meshes: ShapeMeshes::new(),
            bind_groups: Vec::new(),
        }
    }

    pub fn textures(&self) -> &TextureRegistry<T> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn meshes(&self) -> &ShapeMeshes {
        &self.meshes
    }

    /// Register an already created texture handle under `tag`.
    pub fn insert_texture(&mut self, tag: &str, handle: T) -> Result<usize, TextureError> {
        let slot = self.textures.insert(tag, handle)?;
        log::debug!("texture `{tag}` registered in slot {slot}");
        Ok(slot)
    }

    /// Handle of the texture tagged `tag`.
    pub fn find_texture_id(&self, tag: &str) -> Option<&T> {
        self.textures.find_handle(tag)
    }

    /// Slot of the texture tagged `tag`.
    pub fn find_texture_slot(&self, tag: &str) -> Option<usize> {
        self.textures.find_slot(tag)
    }

    pub fn find_material(&self, tag: &str) -> Option<&ObjectMaterial> {
        self.materials.find(tag)
    }

    pub fn add_material(&mut self, material: ObjectMaterial) {
        self.materials.push(material);
    }

    /// Generate the six primitives the desk is built from.
    pub fn load_meshes(&mut self) {
        self.meshes.load_plane_mesh();
        self.meshes.load_cylinder_mesh();
        self.meshes.load_box_mesh();
        self.meshes.load_cone_mesh();
        self.meshes.load_sphere_mesh();
        self.meshes.load_torus_mesh();
    }

    pub fn define_materials(&mut self) {
        self.add_material(ObjectMaterial::new(
            DEFAULT_MATERIAL,
            Vector3::new(0.8, 0.8, 0.8),
            Vector3::new(1.0, 1.0, 1.0),
            64.0,
        ));
    }

    /// Everything [`prepare_scene`](SceneManager::prepare_scene) does that
    /// needs no device: meshes and materials.
    pub fn prepare_cpu(&mut self) {
        self.load_meshes();
        self.define_materials();
    }

    /// Push the model matrix `T * Rz * Ry * Rx * S` (angles in degrees).
    pub fn set_transformations<S: ShaderManager + ?Sized>(
        &self,
        shader: &mut S,
        scale: Vector3<f32>,
        x_rotation_degrees: f32,
        y_rotation_degrees: f32,
        z_rotation_degrees: f32,
        position: Vector3<f32>,
    ) {
        let model = transform::model_matrix(
            scale,
            x_rotation_degrees,
            y_rotation_degrees,
            z_rotation_degrees,
            position,
        );
        shader.set_mat4_value(MODEL_NAME, model);
    }

    /// Switch to flat colouring with `rgba`.
    pub fn set_shader_color<S: ShaderManager + ?Sized>(
        &self,
        shader: &mut S,
        r: f32,
        g: f32,
        b: f32,
        a: f32,
    ) {
        shader.set_int_value(USE_TEXTURE_NAME, 0);
        shader.set_vec4_value(COLOR_VALUE_NAME, Vector4::new(r, g, b, a));
    }

    /// Switch to the texture tagged `tag`. Unknown tags leave the shader
    /// state untouched.
    pub fn set_shader_texture<S: ShaderManager + ?Sized>(&self, shader: &mut S, tag: &str) {
        let Some(slot) = self.find_texture_slot(tag) else {
            log::trace!("no texture tagged `{tag}`, keeping current shader state");
            return;
        };
        shader.set_int_value(USE_TEXTURE_NAME, 1);
        shader.set_sampler2d_value(TEXTURE_VALUE_NAME, slot as i32);
    }

    pub fn set_texture_uv_scale<S: ShaderManager + ?Sized>(&self, shader: &mut S, u: f32, v: f32) {
        shader.set_vec2_value(UV_SCALE_NAME, Vector2::new(u, v));
    }

    /// Push the material tagged `tag`. Unknown tags leave the shader state
    /// untouched.
    pub fn set_shader_material<S: ShaderManager + ?Sized>(&self, shader: &mut S, tag: &str) {
        let Some(material) = self.find_material(tag) else {
            log::trace!("no material tagged `{tag}`");
            return;
        };
        shader.set_vec3_value(MATERIAL_DIFFUSE_NAME, material.diffuse_color);
        shader.set_vec3_value(MATERIAL_SPECULAR_NAME, material.specular_color);
        shader.set_float_value(MATERIAL_SHININESS_NAME, material.shininess);
    }

    /// Draw a loaded primitive with the current shader state.
    pub(crate) fn draw<D: DrawShape + ?Sized>(&self, target: &mut D, shape: ShapeKind) {
        self.meshes.draw(shape, target);
    }
}

impl SceneManager<Texture> {
    /// Load the meshes, textures and materials of the desk scene and create
    /// their GPU resources.
    ///
    /// Texture files are read concurrently but registered in
    /// [`SCENE_TEXTURES`] order. A texture that fails to load is logged and
    /// skipped; draws that refer to it keep the previous shader state.
    pub async fn prepare_scene(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        asset_root: &Path,
    ) {
        self.load_meshes();
        self.meshes.upload(device);

        let paths: Vec<&str> = SCENE_TEXTURES.iter().map(|(path, _)| *path).collect();
        let files = resources::texture::load_many(asset_root, &paths).await;
        for ((path, tag), bytes) in SCENE_TEXTURES.iter().zip(files) {
            let result = bytes
                .map_err(|source| TextureError::Decode {
                    path: path.to_string(),
                    source,
                })
                .and_then(|bytes| self.register_texture_bytes(device, queue, &bytes, path, tag));
            if let Err(e) = result {
                log::error!("Failed to load texture: {e}");
            }
        }
        log::info!("{} of {} scene textures loaded", self.textures.len(), SCENE_TEXTURES.len());

        self.bind_textures(device);
        self.define_materials();
    }

    /// Load `path` below `asset_root` and register it under `tag`.
    pub async fn try_create_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        asset_root: &Path,
        path: &str,
        tag: &str,
    ) -> Result<usize, TextureError> {
        self.check_registrable(tag)?;
        let bytes = resources::load_binary(asset_root, path)
            .await
            .map_err(|source| TextureError::Decode {
                path: path.to_string(),
                source,
            })?;
        self.register_texture_bytes(device, queue, &bytes, path, tag)
    }

    /// [`try_create_texture`](Self::try_create_texture), logging the failure
    /// and reporting success as a flag.
    pub async fn create_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        asset_root: &Path,
        path: &str,
        tag: &str,
    ) -> bool {
        match self
            .try_create_texture(device, queue, asset_root, path, tag)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                log::error!("Failed to load texture: {e}");
                false
            }
        }
    }

    fn check_registrable(&self, tag: &str) -> Result<(), TextureError> {
        if let Some(slot) = self.textures.find_slot(tag) {
            return Err(TextureError::DuplicateTag {
                tag: tag.to_string(),
                slot,
            });
        }
        if self.textures.is_full() {
            return Err(TextureError::CapacityExceeded {
                tag: tag.to_string(),
                capacity: self.textures.capacity(),
            });
        }
        Ok(())
    }

    fn register_texture_bytes(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        path: &str,
        tag: &str,
    ) -> Result<usize, TextureError> {
        self.check_registrable(tag)?;
        let texture =
            Texture::from_bytes(device, queue, bytes, path).map_err(|source| TextureError::Decode {
                path: path.to_string(),
                source,
            })?;
        log::debug!(
            "decoded `{path}` ({}x{}, {} mip levels)",
            texture.size.width,
            texture.size.height,
            texture.mip_level_count
        );
        self.insert_texture(tag, texture)
    }

    /// Create one bind group per loaded texture, indexed by slot.
    pub fn bind_textures(&mut self, device: &wgpu::Device) {
        let layout = texture_bind_group_layout(device);
        let sampler = create_default_sampler(device);
        self.bind_groups = self
            .textures
            .iter()
            .map(|entry| {
                texture_bind_group(
                    device,
                    &layout,
                    &entry.handle,
                    &sampler,
                    &format!("{} bind group", entry.tag),
                )
            })
            .collect();
    }

    pub fn texture_bind_groups(&self) -> &[wgpu::BindGroup] {
        &self.bind_groups
    }

    /// Release every texture and empty the table.
    pub fn destroy_textures(&mut self) {
        self.bind_groups.clear();
        for entry in self.textures.iter() {
            entry.handle.texture.destroy();
        }
        self.textures.clear();
    }
}
