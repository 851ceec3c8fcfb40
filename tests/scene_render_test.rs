use cgmath::{Matrix4, SquareMatrix, Vector3, Vector4};
use desk_ngin::{
    Frame, SceneManager, ShapeKind,
    camera::{Camera, Projection},
    config::CameraConfig,
    data_structures::{texture_registry::TextureError, transform},
    pipelines::uniforms::UniformValue,
    scene::{
        DEFAULT_MATERIAL,
        desk::{DRAWS_PER_FRAME, LampArm, hover_light_position, mug_center},
    },
};

mod common;
use common::{DESK_TAGS, Recorder, assert_close, scene_with_textures};

use ShapeKind::*;

const DRAW_ORDER: [ShapeKind; DRAWS_PER_FRAME] = [
    // desk
    Plane,
    // mug: holder, body, hollow, handle, coffee
    Cylinder, Cylinder, Cylinder, Torus, Cylinder,
    // monitor: housing, screen, stand, two feet
    Box, Box, Cylinder, Box, Box,
    // keyboard
    Box,
    // lamp: base, lower arm, joint, upper arm, joint, head, bulb, glow
    Cylinder, Cylinder, Sphere, Cylinder, Sphere, Cone, Sphere, Sphere,
];

fn render_frame(scene: &SceneManager<&'static str>, frame: &mut Frame, time: f32) {
    frame.begin();
    scene.render_scene(frame, time);
}

#[test]
fn one_pass_issues_twenty_draws_in_order() {
    let scene = scene_with_textures(&DESK_TAGS);
    let mut frame = Frame::new();
    render_frame(&scene, &mut frame, 0.0);

    let shapes: Vec<_> = frame.draws().iter().map(|d| d.shape).collect();
    assert_eq!(shapes, DRAW_ORDER);
    assert_eq!(frame.len(), DRAWS_PER_FRAME);

    // the next frame replaces the recorded draws
    render_frame(&scene, &mut frame, 1.0);
    assert_eq!(frame.len(), DRAWS_PER_FRAME);
}

#[test]
fn draws_bind_the_tagged_texture_or_a_flat_colour() {
    let scene = scene_with_textures(&DESK_TAGS);
    let mut frame = Frame::new();
    render_frame(&scene, &mut frame, 0.0);

    let slots: Vec<_> = frame.draws().iter().map(|d| d.texture_slot).collect();
    let (desk, mug, monitor, screen, keyboard, lamp) =
        (Some(0), Some(1), Some(2), Some(3), Some(4), Some(5));
    assert_eq!(
        slots,
        [
            desk,
            mug, mug, mug, mug, None,
            monitor, screen, None, None, None,
            keyboard,
            lamp, lamp, lamp, lamp, lamp, None, None, None,
        ]
    );

    let draws = frame.draws();
    assert_eq!(draws[5].uniforms.object_color(), Vector4::new(0.55, 0.35, 0.1, 1.0));
    assert_eq!(draws[8].uniforms.object_color(), Vector4::new(0.2, 0.2, 0.2, 1.0));
    // feet keep the stand colour
    assert_eq!(draws[10].uniforms.object_color(), Vector4::new(0.2, 0.2, 0.2, 1.0));
    assert_eq!(draws[17].uniforms.object_color(), Vector4::new(0.05, 0.05, 0.05, 1.0));
    assert_eq!(draws[18].uniforms.object_color(), Vector4::new(1.0, 1.0, 0.8, 1.0));
    assert_eq!(draws[19].uniforms.object_color(), Vector4::new(1.0, 0.9, 0.7, 0.3));
}

#[test]
fn every_draw_is_lit_with_the_default_material() {
    let scene = scene_with_textures(&DESK_TAGS);
    let material = scene.find_material(DEFAULT_MATERIAL).cloned().unwrap();
    let mut frame = Frame::new();
    render_frame(&scene, &mut frame, 0.0);

    for draw in frame.draws() {
        let raw = &draw.uniforms;
        assert!(raw.uses_lighting());
        assert!(raw.directional_light.is_active());
        assert_eq!(raw.directional_light.direction, [-1.0, -1.5, -1.0]);
        assert_eq!(raw.directional_light.ambient, [0.35, 0.45, 0.8]);
        assert!(raw.point_lights[0].is_active());
        assert_eq!(raw.material.diffuse, Into::<[f32; 3]>::into(material.diffuse_color));
        assert_eq!(raw.material.specular, Into::<[f32; 3]>::into(material.specular_color));
        assert_eq!(raw.material.shininess, material.shininess);
    }
}

#[test]
fn hover_light_follows_time() {
    let scene = scene_with_textures(&DESK_TAGS);
    let mut frame = Frame::new();

    render_frame(&scene, &mut frame, 0.0);
    assert_eq!(frame.draws()[0].uniforms.point_lights[0].position, [0.0, 4.0, 5.0]);

    let t = std::f32::consts::FRAC_PI_2;
    render_frame(&scene, &mut frame, t);
    let position = frame.draws()[0].uniforms.point_lights[0].position;
    assert_eq!(position, Into::<[f32; 3]>::into(hover_light_position(t)));
    assert_close(position[0], 3.0);
}

#[test]
fn bulb_light_switches_on_after_the_bulb_is_drawn() {
    let scene = scene_with_textures(&DESK_TAGS);
    let mut frame = Frame::new();
    render_frame(&scene, &mut frame, 0.0);

    let draws = frame.draws();
    assert!(draws[..19].iter().all(|d| !d.uniforms.point_lights[1].is_active()));
    let bulb = draws[19].uniforms.point_lights[1];
    assert!(bulb.is_active());
    assert_eq!(bulb.position, Into::<[f32; 3]>::into(LampArm::new().bulb_position));
    assert_eq!(bulb.diffuse, [1.2, 1.0, 0.8]);

    // uniform values carry over into the next frame
    render_frame(&scene, &mut frame, 0.0);
    assert!(frame.draws().iter().all(|d| d.uniforms.point_lights[1].is_active()));

    let mut recorder = Recorder::new();
    scene.render_scene(&mut recorder, 0.0);
    let bulb_draw = recorder.nth_draw_position(18).unwrap();
    let glow_draw = recorder.nth_draw_position(19).unwrap();
    let light_set = recorder.position_of("pointLights[1].position").unwrap();
    assert!(bulb_draw < light_set && light_set < glow_draw);
}

#[test]
fn missing_textures_keep_the_previous_state() {
    // no screen texture: the screen reuses the monitor housing's texture
    let tags = ["deskTexture", "mugTexture", "monitorTexture", "keyboardTexture", "lampTexture"];
    let scene = scene_with_textures(&tags);
    let mut frame = Frame::new();
    render_frame(&scene, &mut frame, 0.0);

    let draws = frame.draws();
    assert_eq!(draws.len(), DRAWS_PER_FRAME);
    assert_eq!(draws[6].texture_slot, Some(2));
    assert_eq!(draws[7].texture_slot, Some(2));
    assert_eq!(draws[11].texture_slot, Some(3));
}

#[test]
fn scene_without_textures_still_draws_everything() {
    let scene = scene_with_textures(&[]);
    let mut frame = Frame::new();
    render_frame(&scene, &mut frame, 0.0);

    let draws = frame.draws();
    assert_eq!(draws.len(), DRAWS_PER_FRAME);
    assert!(draws.iter().all(|d| d.texture_slot.is_none()));
    // nothing set a colour before the desk: it uses the default white
    assert_eq!(draws[0].uniforms.object_color(), Vector4::new(1.0, 1.0, 1.0, 1.0));

    // on the next frame the desk inherits the glow colour
    render_frame(&scene, &mut frame, 0.0);
    assert_eq!(
        frame.draws()[0].uniforms.object_color(),
        Vector4::new(1.0, 0.9, 0.7, 0.3)
    );
}

#[test]
fn draws_before_meshes_are_loaded_are_dropped() {
    let scene: SceneManager<()> = SceneManager::new();
    let mut frame = Frame::new();
    scene.render_scene(&mut frame, 0.0);
    assert!(frame.is_empty());
}

#[test]
fn shader_helpers_emit_named_values() {
    let scene = scene_with_textures(&DESK_TAGS);
    let mut recorder = Recorder::new();

    scene.set_shader_texture(&mut recorder, "keyboardTexture");
    assert_eq!(recorder.values_of("bUseTexture"), [UniformValue::Int(1)]);
    assert_eq!(recorder.values_of("objectTexture"), [UniformValue::Sampler(4)]);

    scene.set_shader_color(&mut recorder, 0.1, 0.2, 0.3, 0.4);
    assert_eq!(
        recorder.values_of("bUseTexture"),
        [UniformValue::Int(1), UniformValue::Int(0)]
    );
    assert_eq!(
        recorder.values_of("objectColor"),
        [UniformValue::Vec4(Vector4::new(0.1, 0.2, 0.3, 0.4))]
    );

    scene.set_texture_uv_scale(&mut recorder, 2.0, 4.0);
    assert_eq!(
        recorder.values_of("uvScale"),
        [UniformValue::Vec2(cgmath::Vector2::new(2.0, 4.0))]
    );

    scene.set_shader_material(&mut recorder, DEFAULT_MATERIAL);
    assert_eq!(recorder.values_of("material.shininess"), [UniformValue::Float(64.0)]);
}

#[test]
fn unknown_tags_issue_no_shader_calls() {
    let scene = scene_with_textures(&DESK_TAGS);
    let mut recorder = Recorder::new();

    scene.set_shader_texture(&mut recorder, "floorTexture");
    scene.set_shader_material(&mut recorder, "chrome");
    assert!(recorder.calls.is_empty());
}

#[test]
fn set_transformations_pushes_the_model_matrix() {
    let scene = scene_with_textures(&[]);
    let mut recorder = Recorder::new();
    let scale = Vector3::new(10.0, 1.0, 8.0);
    let position = Vector3::new(0.0, 0.0, 0.0);

    scene.set_transformations(&mut recorder, scale, 0.0, 0.0, 0.0, position);
    let expected = transform::model_matrix(scale, 0.0, 0.0, 0.0, position);
    assert_eq!(recorder.values_of("model"), [UniformValue::Mat4(expected)]);
}

#[test]
fn texture_table_is_reachable_through_the_scene() {
    let mut scene = scene_with_textures(&DESK_TAGS);
    assert_eq!(scene.find_texture_id("lampTexture"), Some(&"lampTexture"));
    assert_eq!(scene.find_texture_slot("lampTexture"), Some(5));
    assert_eq!(scene.find_texture_id("unknown"), None);

    assert!(matches!(
        scene.insert_texture("deskTexture", "again"),
        Err(TextureError::DuplicateTag { slot: 0, .. })
    ));
    for i in scene.textures().len()..scene.textures().capacity() {
        scene.insert_texture(&format!("extra{i}"), "extra").unwrap();
    }
    assert!(matches!(
        scene.insert_texture("overflow", "overflow"),
        Err(TextureError::CapacityExceeded { .. })
    ));
}

#[test]
fn lamp_segments_chain_onto_each_other() {
    let lamp = LampArm::new();
    let mug = mug_center();
    assert_close(mug.y, 0.51);
    assert_eq!(lamp.base_position, Vector3::new(mug.x + 0.5, 0.025, mug.z - 1.6));

    // each joint sits at the far end of the segment below it
    let lower_tip = lamp.lower_arm * Vector4::new(0.0, 1.0, 0.0, 1.0);
    let joint = transform::translation(&lamp.lower_joint);
    assert_close(joint.x, lower_tip.x);
    assert_close(joint.y, lower_tip.y);
    assert_close(joint.z, lower_tip.z);

    let head = transform::translation(&lamp.upper_joint) + Vector3::new(0.0, 0.2, 0.0);
    assert_eq!(lamp.head_position, head);
    assert_eq!(lamp.bulb_position, head - Vector3::new(0.0, 0.1, 0.0));
    // the arm leans forward, over the desk
    assert!(lamp.head_position.z > lamp.base_position.z);
    assert!(lamp.head_position.y > 1.0);
}

#[test]
fn camera_pushes_view_and_projection() {
    let config = CameraConfig::default();
    let camera = Camera::from_config(&config);
    let projection = Projection::from_config(1280, 720, &config);
    let mut frame = Frame::new();

    camera.apply_uniforms(&projection, &mut frame);
    let raw = &frame.uniforms().raw;
    assert_eq!(Matrix4::from(raw.view), camera.calc_matrix());
    assert_eq!(Matrix4::from(raw.projection), projection.calc_matrix());
    assert_ne!(Matrix4::from(raw.projection), Matrix4::identity());
    assert_eq!(raw.view_position, [0.0, 5.5, 10.0]);
}
