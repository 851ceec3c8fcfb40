//! Named shader uniforms.
//!
//! Scene code talks to the shader through [`ShaderManager`], setting values by
//! name the way one would with `glUniform*`. [`UniformState`] resolves those
//! names into fields of [`ShaderUniforms`], the block the WGSL shader reads.
//!
//! Recognised names:
//!
//! | name | setter |
//! | --- | --- |
//! | `model`, `view`, `projection` | mat4 |
//! | `objectColor` | vec4 |
//! | `objectTexture` | sampler2d or int (texture slot) |
//! | `bUseTexture`, `bUseLighting` | int |
//! | `viewPosition` | vec3 |
//! | `uvScale` | vec2 |
//! | `material.diffuseColor`, `material.specularColor` | vec3 |
//! | `material.shininess` | float |
//! | `directionalLight.bActive` | int |
//! | `directionalLight.{direction,ambient,diffuse,specular}` | vec3 |
//! | `pointLights[i].bActive` | int |
//! | `pointLights[i].{position,ambient,diffuse,specular}` | vec3 |
//! | `pointLights[i].{constant,linear,quadratic}` | float |
//!
//! Anything else is ignored, like a uniform location of `-1`.

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

use crate::{
    data_structures::transform,
    pipelines::light::{DirectionalLightRaw, MAX_POINT_LIGHTS, PointLightRaw},
};

/// Setter interface for named shader uniforms.
pub trait ShaderManager {
    fn set_int_value(&mut self, name: &str, value: i32);
    fn set_float_value(&mut self, name: &str, value: f32);
    fn set_vec2_value(&mut self, name: &str, value: Vector2<f32>);
    fn set_vec3_value(&mut self, name: &str, value: Vector3<f32>);
    fn set_vec4_value(&mut self, name: &str, value: Vector4<f32>);
    fn set_mat4_value(&mut self, name: &str, value: Matrix4<f32>);
    fn set_sampler2d_value(&mut self, name: &str, slot: i32);
}

/// A value handed to a [`ShaderManager`] setter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat4(Matrix4<f32>),
    Sampler(i32),
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialRaw {
    pub diffuse: [f32; 3],
    pub shininess: f32,
    pub specular: [f32; 3],
    pub _padding: u32,
}

impl Default for MaterialRaw {
    fn default() -> Self {
        Self {
            diffuse: [1.0; 3],
            shininess: 1.0,
            specular: [0.0; 3],
            _padding: 0,
        }
    }
}

/// The uniform block of the scene shader. Field order and padding match the
/// `Uniforms` struct in `scene.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShaderUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub view_position: [f32; 3],
    pub use_texture: u32,
    pub uv_scale: [f32; 2],
    pub use_lighting: u32,
    pub _padding: u32,
    pub material: MaterialRaw,
    pub directional_light: DirectionalLightRaw,
    pub point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
}

impl ShaderUniforms {
    pub const SIZE: u64 = std::mem::size_of::<ShaderUniforms>() as u64;

    pub fn model(&self) -> Matrix4<f32> {
        self.model.into()
    }

    pub fn object_color(&self) -> Vector4<f32> {
        self.object_color.into()
    }

    pub fn uses_texture(&self) -> bool {
        self.use_texture != 0
    }

    pub fn uses_lighting(&self) -> bool {
        self.use_lighting != 0
    }
}

impl Default for ShaderUniforms {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
        Self {
            model: identity,
            normal_matrix: identity,
            view: identity,
            projection: identity,
            object_color: [1.0; 4],
            view_position: [0.0; 3],
            use_texture: 0,
            uv_scale: [1.0, 1.0],
            use_lighting: 0,
            _padding: 0,
            material: MaterialRaw::default(),
            directional_light: DirectionalLightRaw::default(),
            point_lights: [PointLightRaw::default(); MAX_POINT_LIGHTS],
        }
    }
}

/// Current value of every uniform plus the bound texture slot.
///
/// Values persist until overwritten, across draws and across frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniformState {
    pub raw: ShaderUniforms,
    pub texture_slot: Option<usize>,
}

impl UniformState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `value` to the uniform called `name`. Returns whether the name
    /// and value type were recognised.
    pub fn apply(&mut self, name: &str, value: UniformValue) -> bool {
        let applied = match name.strip_prefix("pointLights[") {
            Some(rest) => self.apply_point_light(rest, value),
            None => self.apply_plain(name, value),
        };
        if !applied {
            log::debug!("ignoring uniform `{name}` = {value:?}");
        }
        applied
    }

    fn apply_plain(&mut self, name: &str, value: UniformValue) -> bool {
        use UniformValue::*;

        let raw = &mut self.raw;
        match (name, value) {
            ("model", Mat4(m)) => {
                raw.model = m.into();
                raw.normal_matrix = transform::normal_matrix(&m).into();
            }
            ("view", Mat4(m)) => raw.view = m.into(),
            ("projection", Mat4(m)) => raw.projection = m.into(),
            ("objectColor", Vec4(v)) => raw.object_color = v.into(),
            ("objectTexture", Sampler(slot) | Int(slot)) => {
                self.texture_slot = usize::try_from(slot).ok();
            }
            ("bUseTexture", Int(flag)) => raw.use_texture = flag_u32(flag),
            ("bUseLighting", Int(flag)) => raw.use_lighting = flag_u32(flag),
            ("viewPosition", Vec3(v)) => raw.view_position = v.into(),
            ("uvScale", Vec2(v)) => raw.uv_scale = v.into(),
            ("material.diffuseColor", Vec3(v)) => raw.material.diffuse = v.into(),
            ("material.specularColor", Vec3(v)) => raw.material.specular = v.into(),
            ("material.shininess", Float(f)) => raw.material.shininess = f,
            ("directionalLight.bActive", Int(flag)) => {
                raw.directional_light.active = flag_u32(flag)
            }
            ("directionalLight.direction", Vec3(v)) => raw.directional_light.direction = v.into(),
            ("directionalLight.ambient", Vec3(v)) => raw.directional_light.ambient = v.into(),
            ("directionalLight.diffuse", Vec3(v)) => raw.directional_light.diffuse = v.into(),
            ("directionalLight.specular", Vec3(v)) => raw.directional_light.specular = v.into(),
            _ => return false,
        }
        true
    }

    /// `rest` is the name after `pointLights[`, e.g. `1].diffuse`.
    fn apply_point_light(&mut self, rest: &str, value: UniformValue) -> bool {
        use UniformValue::*;

        let Some((index, field)) = rest.split_once("].") else {
            return false;
        };
        let Ok(index) = index.parse::<usize>() else {
            return false;
        };
        let Some(light) = self.raw.point_lights.get_mut(index) else {
            return false;
        };

        match (field, value) {
            ("position", Vec3(v)) => {
                light.position = v.into();
                light.active = 1;
            }
            ("bActive", Int(flag)) => light.active = flag_u32(flag),
            ("ambient", Vec3(v)) => light.ambient = v.into(),
            ("diffuse", Vec3(v)) => light.diffuse = v.into(),
            ("specular", Vec3(v)) => light.specular = v.into(),
            ("constant", Float(f)) => light.constant = f,
            ("linear", Float(f)) => light.linear = f,
            ("quadratic", Float(f)) => light.quadratic = f,
            _ => return false,
        }
        true
    }
}

fn flag_u32(flag: i32) -> u32 {
    u32::from(flag != 0)
}

impl ShaderManager for UniformState {
    fn set_int_value(&mut self, name: &str, value: i32) {
        self.apply(name, UniformValue::Int(value));
    }

    fn set_float_value(&mut self, name: &str, value: f32) {
        self.apply(name, UniformValue::Float(value));
    }

    fn set_vec2_value(&mut self, name: &str, value: Vector2<f32>) {
        self.apply(name, UniformValue::Vec2(value));
    }

    fn set_vec3_value(&mut self, name: &str, value: Vector3<f32>) {
        self.apply(name, UniformValue::Vec3(value));
    }

    fn set_vec4_value(&mut self, name: &str, value: Vector4<f32>) {
        self.apply(name, UniformValue::Vec4(value));
    }

    fn set_mat4_value(&mut self, name: &str, value: Matrix4<f32>) {
        self.apply(name, UniformValue::Mat4(value));
    }

    fn set_sampler2d_value(&mut self, name: &str, slot: i32) {
        self.apply(name, UniformValue::Sampler(slot));
    }
}
