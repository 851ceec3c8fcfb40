#![allow(dead_code)]

use desk_ngin::{
    DrawShape, SceneManager, ShaderManager, ShapeKind,
    pipelines::uniforms::UniformValue,
};

/// A shader call as the scene issued it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Set(String, UniformValue),
    Draw(ShapeKind),
}

/// Records every uniform write and draw in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> Vec<ShapeKind> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw(shape) => Some(*shape),
                _ => None,
            })
            .collect()
    }

    /// Index of the first call writing `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.calls
            .iter()
            .position(|call| matches!(call, Call::Set(n, _) if n == name))
    }

    /// Index of the `n`th draw call (zero based) in `calls`.
    pub fn nth_draw_position(&self, n: usize) -> Option<usize> {
        self.calls
            .iter()
            .enumerate()
            .filter(|(_, call)| matches!(call, Call::Draw(_)))
            .nth(n)
            .map(|(i, _)| i)
    }

    pub fn values_of(&self, name: &str) -> Vec<UniformValue> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Set(n, value) if n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    fn set(&mut self, name: &str, value: UniformValue) {
        self.calls.push(Call::Set(name.to_string(), value));
    }
}

impl ShaderManager for Recorder {
    fn set_int_value(&mut self, name: &str, value: i32) {
        self.set(name, UniformValue::Int(value));
    }

    fn set_float_value(&mut self, name: &str, value: f32) {
        self.set(name, UniformValue::Float(value));
    }

    fn set_vec2_value(&mut self, name: &str, value: cgmath::Vector2<f32>) {
        self.set(name, UniformValue::Vec2(value));
    }

    fn set_vec3_value(&mut self, name: &str, value: cgmath::Vector3<f32>) {
        self.set(name, UniformValue::Vec3(value));
    }

    fn set_vec4_value(&mut self, name: &str, value: cgmath::Vector4<f32>) {
        self.set(name, UniformValue::Vec4(value));
    }

    fn set_mat4_value(&mut self, name: &str, value: cgmath::Matrix4<f32>) {
        self.set(name, UniformValue::Mat4(value));
    }

    fn set_sampler2d_value(&mut self, name: &str, slot: i32) {
        self.set(name, UniformValue::Sampler(slot));
    }
}

impl DrawShape for Recorder {
    fn draw_shape(&mut self, shape: ShapeKind) {
        self.calls.push(Call::Draw(shape));
    }
}

pub const DESK_TAGS: [&str; 6] = [
    "deskTexture",
    "mugTexture",
    "monitorTexture",
    "screenTexture",
    "keyboardTexture",
    "lampTexture",
];

/// A scene with meshes and materials ready and `tags` registered in order.
/// Handles are the tag names.
pub fn scene_with_textures(tags: &[&'static str]) -> SceneManager<&'static str> {
    let mut scene = SceneManager::new();
    scene.prepare_cpu();
    for tag in tags {
        scene
            .insert_texture(tag, *tag)
            .expect("test textures fit in the table");
    }
    scene
}

pub fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-4, "{a} != {b}");
}
