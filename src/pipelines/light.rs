//! Light records as they are laid out in the scene uniform block.

use cgmath::Vector3;

/// Number of point lights the shader evaluates.
pub const MAX_POINT_LIGHTS: usize = 4;

/// Distance attenuation used until a scene overrides it. Covers roughly 50
/// world units.
pub const DEFAULT_ATTENUATION: [f32; 3] = [1.0, 0.09, 0.032];

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightRaw {
    pub direction: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    pub _padding: u32,
    pub diffuse: [f32; 3],
    pub _padding2: u32,
    pub specular: [f32; 3],
    pub _padding3: u32,
}

impl DirectionalLightRaw {
    pub fn is_active(&self) -> bool {
        self.active != 0
    }
}

impl Default for DirectionalLightRaw {
    fn default() -> Self {
        Self {
            direction: [0.0, -1.0, 0.0],
            active: 0,
            ambient: [0.0; 3],
            _padding: 0,
            diffuse: [0.0; 3],
            _padding2: 0,
            specular: [0.0; 3],
            _padding3: 0,
        }
    }
}

/// Point light; the attenuation terms ride in the padding slots.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    pub constant: f32,
    pub diffuse: [f32; 3],
    pub linear: f32,
    pub specular: [f32; 3],
    pub quadratic: f32,
}

impl PointLightRaw {
    pub fn is_active(&self) -> bool {
        self.active != 0
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position.into()
    }

    /// Attenuation factor at `distance` from the light.
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

impl Default for PointLightRaw {
    fn default() -> Self {
        let [constant, linear, quadratic] = DEFAULT_ATTENUATION;
        Self {
            position: [0.0; 3],
            active: 0,
            ambient: [0.0; 3],
            constant,
            diffuse: [0.0; 3],
            linear,
            specular: [0.0; 3],
            quadratic,
        }
    }
}
