//! The desk tableau: a desk top with a mug, a monitor, a keyboard and an
//! articulated lamp, lit by a blue-ish sky light, a hovering fill light and
//! the lamp bulb.

use cgmath::{Deg, Matrix4, Vector3};

use crate::{
    data_structures::{mesh::DrawShape, mesh::ShapeKind, transform},
    pipelines::uniforms::ShaderManager,
    scene::{DEFAULT_MATERIAL, MODEL_NAME, SceneManager, USE_LIGHTING_NAME},
};

/// Height of the desk top.
pub const DESK_Y: f32 = 0.0;

const MUG_HEIGHT: f32 = 1.0;
const MUG_OUTER_RADIUS: f32 = 0.37;
const MUG_INNER_RADIUS: f32 = 0.28;
const MUG_HOLDER_HEIGHT: f32 = 0.010;
const MUG_HANDLE_RADIUS: f32 = 0.15;
const MUG_HANDLE_THICKNESS: f32 = 0.08;

const MONITOR_TILT_DEGREES: f32 = -5.0;
const MONITOR_FOOT_HEIGHT: f32 = 0.90;

/// Number of draw calls one pass over the tableau issues.
pub const DRAWS_PER_FRAME: usize = 20;

/// Centre of the mug body.
pub fn mug_center() -> Vector3<f32> {
    Vector3::new(2.0, DESK_Y + MUG_HOLDER_HEIGHT + MUG_HEIGHT * 0.5, 1.0)
}

/// Position of the hovering fill light at `time` seconds.
pub fn hover_light_position(time: f32) -> Vector3<f32> {
    Vector3::new(time.sin() * 3.0, 4.0, 5.0)
}

/// Model matrices of the lamp, each segment chained onto the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LampArm {
    pub base_position: Vector3<f32>,
    pub lower_arm: Matrix4<f32>,
    pub lower_joint: Matrix4<f32>,
    pub upper_arm: Matrix4<f32>,
    pub upper_joint: Matrix4<f32>,
    pub head_position: Vector3<f32>,
    pub bulb_position: Vector3<f32>,
}

impl LampArm {
    pub fn new() -> Self {
        let mug = mug_center();
        let base_position = Vector3::new(mug.x + 0.5, DESK_Y + 0.025, mug.z - 1.6);

        let lower_arm = Matrix4::from_translation(base_position + Vector3::new(0.0, 0.05, 0.0))
            * Matrix4::from_angle_x(Deg(45.0))
            * Matrix4::from_nonuniform_scale(0.08, 1.6, 0.08);

        let lower_joint = lower_arm
            * Matrix4::from_translation(Vector3::new(0.0, 1.0, 0.0))
            * Matrix4::from_scale(0.12);

        let upper_arm = lower_joint
            * Matrix4::from_translation(Vector3::new(0.0, 0.6, 0.0))
            * Matrix4::from_angle_x(Deg(-30.0))
            * Matrix4::from_nonuniform_scale(0.07, 1.2, 0.07);

        let upper_joint = upper_arm
            * Matrix4::from_translation(Vector3::new(0.0, 0.6, 0.0))
            * Matrix4::from_scale(0.1);

        let head_position = transform::translation(&upper_joint) + Vector3::new(0.0, 0.2, 0.0);
        let bulb_position = head_position + Vector3::new(0.0, -0.1, 0.0);

        Self {
            base_position,
            lower_arm,
            lower_joint,
            upper_arm,
            upper_joint,
            head_position,
            bulb_position,
        }
    }
}

impl Default for LampArm {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SceneManager<T> {
    /// Push the frame's lighting and issue every draw of the tableau.
    ///
    /// `time` is in seconds and only moves the hovering fill light.
    pub fn render_scene<R: ShaderManager + DrawShape + ?Sized>(&self, target: &mut R, time: f32) {
        self.set_scene_lights(target, time);
        self.set_shader_material(target, DEFAULT_MATERIAL);

        self.render_desk(target);
        self.render_mug(target);
        self.render_monitor(target);
        self.render_keyboard(target);
        self.render_lamp(target);
    }

    fn set_scene_lights<S: ShaderManager + ?Sized>(&self, shader: &mut S, time: f32) {
        shader.set_int_value(USE_LIGHTING_NAME, 1);

        shader.set_int_value("directionalLight.bActive", 1);
        shader.set_vec3_value("directionalLight.direction", Vector3::new(-1.0, -1.5, -1.0));
        shader.set_vec3_value("directionalLight.ambient", Vector3::new(0.35, 0.45, 0.8));
        shader.set_vec3_value("directionalLight.diffuse", Vector3::new(0.9, 0.9, 0.9));
        shader.set_vec3_value("directionalLight.specular", Vector3::new(1.2, 1.2, 1.2));

        shader.set_vec3_value("pointLights[0].position", hover_light_position(time));
        shader.set_vec3_value("pointLights[0].ambient", Vector3::new(0.2, 0.25, 0.45));
        shader.set_vec3_value("pointLights[0].diffuse", Vector3::new(0.7, 0.7, 0.7));
        shader.set_vec3_value("pointLights[0].specular", Vector3::new(1.0, 1.0, 1.0));
    }

    fn render_desk<R: ShaderManager + DrawShape + ?Sized>(&self, target: &mut R) {
        self.set_transformations(
            target,
            Vector3::new(10.0, 1.0, 8.0),
            0.0,
            0.0,
            0.0,
            Vector3::new(0.0, DESK_Y, 0.0),
        );
        self.set_shader_texture(target, "deskTexture");
        self.draw(target, ShapeKind::Plane);
    }

    fn render_mug<R: ShaderManager + DrawShape + ?Sized>(&self, target: &mut R) {
        let center = mug_center();

        // holder: a zero-height disc under the mug
        self.set_transformations(
            target,
            Vector3::new(MUG_OUTER_RADIUS, 0.0, MUG_OUTER_RADIUS),
            0.0,
            0.0,
            0.0,
            Vector3::new(center.x, DESK_Y, center.z),
        );
        self.set_shader_texture(target, "mugTexture");
        self.draw(target, ShapeKind::Cylinder);

        // body hangs down from the centre
        self.set_transformations(
            target,
            Vector3::new(MUG_OUTER_RADIUS, MUG_HEIGHT * -0.5, MUG_OUTER_RADIUS),
            0.0,
            0.5,
            0.0,
            center,
        );
        self.set_shader_texture(target, "mugTexture");
        self.draw(target, ShapeKind::Cylinder);

        // hollow
        self.set_transformations(
            target,
            Vector3::new(MUG_INNER_RADIUS, 0.0, MUG_INNER_RADIUS),
            0.0,
            0.0,
            0.0,
            center - Vector3::new(0.0, 0.025, 0.0),
        );
        self.set_shader_texture(target, "mugTexture");
        self.draw(target, ShapeKind::Cylinder);

        self.set_transformations(
            target,
            Vector3::new(MUG_HANDLE_RADIUS, MUG_HANDLE_RADIUS, MUG_HANDLE_THICKNESS),
            0.0,
            0.0,
            0.0,
            center + Vector3::new(MUG_OUTER_RADIUS + MUG_HANDLE_RADIUS, -0.15, 0.0),
        );
        self.set_shader_texture(target, "mugTexture");
        self.draw(target, ShapeKind::Torus);

        // coffee
        self.set_transformations(
            target,
            Vector3::new(MUG_INNER_RADIUS, MUG_HEIGHT * 0.15, MUG_INNER_RADIUS),
            0.0,
            0.0,
            0.0,
            center + Vector3::new(0.0, MUG_HEIGHT * -0.1, 0.0),
        );
        self.set_shader_color(target, 0.55, 0.35, 0.1, 1.0);
        self.draw(target, ShapeKind::Cylinder);
    }

    fn render_monitor<R: ShaderManager + DrawShape + ?Sized>(&self, target: &mut R) {
        self.set_transformations(
            target,
            Vector3::new(5.0, 3.0, 0.2),
            MONITOR_TILT_DEGREES,
            0.0,
            0.0,
            Vector3::new(0.0, DESK_Y + 2.0, -3.5),
        );
        self.set_shader_texture(target, "monitorTexture");
        self.draw(target, ShapeKind::Box);

        self.set_transformations(
            target,
            Vector3::new(5.0, 3.0, 0.05),
            MONITOR_TILT_DEGREES,
            0.0,
            0.0,
            Vector3::new(0.0, DESK_Y + 2.0, -3.4),
        );
        self.set_shader_texture(target, "screenTexture");
        self.set_shader_material(target, DEFAULT_MATERIAL);
        self.draw(target, ShapeKind::Box);

        let stand = Vector3::new(0.0, DESK_Y + 0.175, -3.5);
        self.set_transformations(target, Vector3::new(0.5, 0.45, 0.5), 0.0, 0.0, 0.0, stand);
        self.set_shader_color(target, 0.2, 0.2, 0.2, 1.0);
        self.draw(target, ShapeKind::Cylinder);

        // feet keep the stand colour
        let foot_scale = Vector3::new(0.45, MONITOR_FOOT_HEIGHT, 0.15);
        let foot_y = DESK_Y + MONITOR_FOOT_HEIGHT * 0.5;
        self.set_transformations(
            target,
            foot_scale,
            0.0,
            0.5,
            0.0,
            Vector3::new(stand.x - 0.6, foot_y, stand.z),
        );
        self.draw(target, ShapeKind::Box);

        self.set_transformations(
            target,
            foot_scale,
            0.0,
            0.0,
            0.0,
            Vector3::new(stand.x + 0.6, foot_y, stand.z),
        );
        self.draw(target, ShapeKind::Box);
    }

    fn render_keyboard<R: ShaderManager + DrawShape + ?Sized>(&self, target: &mut R) {
        self.set_transformations(
            target,
            Vector3::new(4.0, 0.3, 2.0),
            0.0,
            0.0,
            0.0,
            Vector3::new(-0.60, DESK_Y + 0.15, -1.2),
        );
        self.set_shader_texture(target, "keyboardTexture");
        self.draw(target, ShapeKind::Box);
    }

    fn render_lamp<R: ShaderManager + DrawShape + ?Sized>(&self, target: &mut R) {
        let lamp = LampArm::new();

        self.set_transformations(
            target,
            Vector3::new(0.5, 0.05, 0.5),
            0.0,
            0.0,
            0.0,
            lamp.base_position,
        );
        self.set_shader_texture(target, "lampTexture");
        self.draw(target, ShapeKind::Cylinder);

        target.set_mat4_value(MODEL_NAME, lamp.lower_arm);
        self.draw(target, ShapeKind::Cylinder);

        target.set_mat4_value(MODEL_NAME, lamp.lower_joint);
        self.draw(target, ShapeKind::Sphere);

        target.set_mat4_value(MODEL_NAME, lamp.upper_arm);
        self.draw(target, ShapeKind::Cylinder);

        target.set_mat4_value(MODEL_NAME, lamp.upper_joint);
        self.draw(target, ShapeKind::Sphere);

        self.set_transformations(
            target,
            Vector3::new(0.3, 0.5, 0.3),
            -80.0,
            0.0,
            0.0,
            lamp.head_position,
        );
        self.set_shader_color(target, 0.05, 0.05, 0.05, 1.0);
        self.draw(target, ShapeKind::Cone);

        self.set_transformations(
            target,
            Vector3::new(0.15, 0.15, 0.15),
            0.0,
            0.0,
            0.0,
            lamp.bulb_position,
        );
        self.set_shader_color(target, 1.0, 1.0, 0.8, 1.0);
        self.draw(target, ShapeKind::Sphere);

        target.set_vec3_value("pointLights[1].position", lamp.bulb_position);
        target.set_vec3_value("pointLights[1].ambient", Vector3::new(0.1, 0.1, 0.05));
        target.set_vec3_value("pointLights[1].diffuse", Vector3::new(1.2, 1.0, 0.8));
        target.set_vec3_value("pointLights[1].specular", Vector3::new(1.5, 1.2, 1.0));

        // translucent glow around the bulb
        self.set_shader_color(target, 1.0, 0.9, 0.7, 0.3);
        self.set_transformations(
            target,
            Vector3::new(0.25, 0.25, 0.25),
            0.0,
            0.0,
            0.0,
            lamp.bulb_position,
        );
        self.draw(target, ShapeKind::Sphere);
    }
}
