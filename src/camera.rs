//! Fly-through camera, projection and keyboard/mouse controller.
//!
//! The camera does not own GPU resources. Each frame it pushes `view`,
//! `projection` and `viewPosition` through a [`ShaderManager`], the same way
//! the scene pushes its own uniforms.

use std::f32::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use instant::Duration;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::KeyCode,
};

use crate::{config::CameraConfig, pipelines::uniforms::ShaderManager};

/// cgmath builds GL clip space (`z` in `[-1, 1]`), wgpu expects `[0, 1]`.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;
const MIN_SPEED: f32 = 0.5;
const MAX_SPEED: f32 = 50.0;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
}

impl Camera {
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            config.position,
            cgmath::Deg(config.yaw_degrees),
            cgmath::Deg(config.pitch_degrees),
        )
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vector3<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize()
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y())
    }

    /// Push the view matrix, the projection and the eye position.
    pub fn apply_uniforms<S: ShaderManager + ?Sized>(&self, projection: &Projection, shader: &mut S) {
        shader.set_mat4_value("view", self.calc_matrix());
        shader.set_mat4_value("projection", projection.calc_matrix());
        shader.set_vec3_value(
            "viewPosition",
            Vector3::new(self.position.x, self.position.y, self.position.z),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub mode: ProjectionMode,
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
    /// Height of the view volume in world units when orthographic.
    pub ortho_height: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
            ortho_height: 10.0,
        }
    }

    pub fn from_config(width: u32, height: u32, config: &CameraConfig) -> Self {
        let mut projection = Self::new(
            width,
            height,
            cgmath::Deg(config.fovy_degrees),
            config.znear,
            config.zfar,
        );
        projection.ortho_height = config.ortho_height;
        projection
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        let gl = match self.mode {
            ProjectionMode::Perspective => perspective(self.fovy, self.aspect, self.znear, self.zfar),
            ProjectionMode::Orthographic => {
                let half_h = self.ortho_height * 0.5;
                let half_w = half_h * self.aspect;
                cgmath::ortho(-half_w, half_w, -half_h, half_h, self.znear, self.zfar)
            }
        };
        OPENGL_TO_WGPU_MATRIX * gl
    }
}

#[derive(Debug)]
pub struct CameraController {
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_up: f32,
    amount_down: f32,
    rotate_horizontal: f32,
    rotate_vertical: f32,
    looking: bool,
    requested_mode: Option<ProjectionMode>,
    pub speed: f32,
    pub sensitivity: f32,
}

impl CameraController {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            looking: false,
            requested_mode: None,
            speed,
            sensitivity,
        }
    }

    /// Returns whether the key is bound to a camera action.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let amount = if state == ElementState::Pressed { 1.0 } else { 0.0 };
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => self.amount_forward = amount,
            KeyCode::KeyS | KeyCode::ArrowDown => self.amount_backward = amount,
            KeyCode::KeyA | KeyCode::ArrowLeft => self.amount_left = amount,
            KeyCode::KeyD | KeyCode::ArrowRight => self.amount_right = amount,
            KeyCode::KeyE => self.amount_up = amount,
            KeyCode::KeyQ => self.amount_down = amount,
            KeyCode::KeyP if state == ElementState::Pressed => {
                self.requested_mode = Some(ProjectionMode::Perspective)
            }
            KeyCode::KeyO if state == ElementState::Pressed => {
                self.requested_mode = Some(ProjectionMode::Orthographic)
            }
            KeyCode::KeyP | KeyCode::KeyO => {}
            _ => return false,
        }
        true
    }

    /// Mouse look is active while the right button is held.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Right {
            self.looking = state == ElementState::Pressed;
        }
    }

    pub fn process_mouse(&mut self, mouse_dx: f64, mouse_dy: f64) {
        if self.looking {
            self.rotate_horizontal += mouse_dx as f32;
            self.rotate_vertical += mouse_dy as f32;
        }
    }

    /// The wheel changes movement speed.
    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        let steps = match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / 50.0,
        };
        self.speed = (self.speed + steps).clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn update_camera(&mut self, camera: &mut Camera, projection: &mut Projection, dt: Duration) {
        let dt = dt.as_secs_f32();

        if let Some(mode) = self.requested_mode.take() {
            if projection.mode != mode {
                log::info!("switching to {mode:?} projection");
            }
            projection.mode = mode;
        }

        let forward = camera.forward();
        let right = forward.cross(Vector3::unit_y()).normalize();
        camera.position += forward * (self.amount_forward - self.amount_backward) * self.speed * dt;
        camera.position += right * (self.amount_right - self.amount_left) * self.speed * dt;
        camera.position.y += (self.amount_up - self.amount_down) * self.speed * dt;

        camera.yaw += Rad(self.rotate_horizontal) * self.sensitivity * dt;
        camera.pitch += Rad(-self.rotate_vertical) * self.sensitivity * dt;
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;

        camera.pitch = Rad(camera.pitch.0.clamp(-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2));
    }
}
