use std::{collections::HashMap, path::PathBuf};

use cgmath::{Deg, InnerSpace, Point3};
use desk_ngin::{
    camera::{Camera, CameraController, Projection, ProjectionMode},
    config::{ASSET_DIR_ENV, LOG_ENV, SceneConfig},
};
use instant::Duration;
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::KeyCode,
};

mod common;
use common::assert_close;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn environment_overrides_the_defaults() {
    let config = SceneConfig::default().with_env(lookup(&[
        (ASSET_DIR_ENV, "/srv/desk"),
        (LOG_ENV, "desk_ngin=trace"),
    ]));
    assert_eq!(config.asset_root, PathBuf::from("/srv/desk"));
    assert_eq!(config.log_filter.as_deref(), Some("desk_ngin=trace"));
}

#[test]
fn empty_variables_are_ignored() {
    let config = SceneConfig::default().with_env(lookup(&[(ASSET_DIR_ENV, ""), (LOG_ENV, "")]));
    assert_eq!(config, SceneConfig::default());
    assert_eq!(config.asset_root, PathBuf::from("assets"));
}

#[test]
fn default_camera_looks_down_at_the_desk() {
    let camera = Camera::from_config(&SceneConfig::default().camera);
    let forward = camera.forward();
    assert_close(forward.magnitude(), 1.0);
    assert!(forward.z < 0.0);
    assert!(forward.y < 0.0);
    assert_close(forward.x, 0.0);
}

#[test]
fn controller_moves_the_camera_forward() {
    let mut camera = Camera::new(Point3::new(0.0, 1.0, 5.0), Deg(-90.0), Deg(0.0));
    let mut projection = Projection::new(800, 600, Deg(45.0), 0.1, 100.0);
    let mut controller = CameraController::new(2.0, 0.4);

    assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
    controller.update_camera(&mut camera, &mut projection, Duration::from_secs(1));
    assert_close(camera.position.z, 3.0);
    assert_close(camera.position.y, 1.0);

    controller.process_keyboard(KeyCode::KeyW, ElementState::Released);
    controller.update_camera(&mut camera, &mut projection, Duration::from_secs(1));
    assert_close(camera.position.z, 3.0);

    assert!(!controller.process_keyboard(KeyCode::KeyZ, ElementState::Pressed));
}

#[test]
fn mouse_look_needs_the_right_button() {
    let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(-90.0), Deg(0.0));
    let mut projection = Projection::new(800, 600, Deg(45.0), 0.1, 100.0);
    let mut controller = CameraController::new(2.0, 1.0);
    let yaw = camera.yaw;

    controller.process_mouse(10.0, 0.0);
    controller.update_camera(&mut camera, &mut projection, Duration::from_millis(100));
    assert_eq!(camera.yaw, yaw);

    controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
    controller.process_mouse(10.0, 0.0);
    controller.update_camera(&mut camera, &mut projection, Duration::from_millis(100));
    assert_close(camera.yaw.0 - yaw.0, 1.0);
}

#[test]
fn projection_keys_switch_modes() {
    let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(-90.0), Deg(0.0));
    let mut projection = Projection::new(800, 600, Deg(45.0), 0.1, 100.0);
    let mut controller = CameraController::new(2.0, 1.0);
    let perspective = projection.calc_matrix();

    controller.process_keyboard(KeyCode::KeyO, ElementState::Pressed);
    controller.update_camera(&mut camera, &mut projection, Duration::from_millis(16));
    assert_eq!(projection.mode, ProjectionMode::Orthographic);
    assert_ne!(projection.calc_matrix(), perspective);

    controller.process_keyboard(KeyCode::KeyP, ElementState::Pressed);
    controller.update_camera(&mut camera, &mut projection, Duration::from_millis(16));
    assert_eq!(projection.mode, ProjectionMode::Perspective);
}

#[test]
fn scrolling_changes_speed_within_bounds() {
    let mut controller = CameraController::new(4.0, 1.0);
    controller.process_scroll(&MouseScrollDelta::LineDelta(0.0, 2.0));
    assert_close(controller.speed, 6.0);
    controller.process_scroll(&MouseScrollDelta::LineDelta(0.0, -100.0));
    assert_close(controller.speed, 0.5);
}

#[test]
fn resize_updates_the_aspect_ratio() {
    let mut projection = Projection::new(800, 600, Deg(45.0), 0.1, 100.0);
    projection.resize(1920, 1080);
    assert_close(projection.aspect(), 1920.0 / 1080.0);
    projection.resize(100, 0);
    assert_close(projection.aspect(), 100.0);
}
