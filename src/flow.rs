//! Application event loop.
//!
//! [`run`] opens a window, prepares the desk scene once and then, on every
//! redraw, records the frame's draws through the scene manager and replays
//! them on the GPU.
//!
//! # Lifecycle
//!
//! 1. `resumed` creates the window, the GPU [`Context`] and loads the scene
//! 2. window and device events feed the [`CameraController`](crate::camera::CameraController)
//! 3. each redraw updates the camera, records the frame and presents it
//! 4. on exit the scene's textures are destroyed

use std::sync::Arc;

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    config::{self, SceneConfig},
    context::Context,
    render::{Frame, RenderTarget, SceneRenderer},
    scene::SceneManager,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// GPU context, scene and per-frame recorder of a running app.
pub struct AppState {
    pub(crate) ctx: Context,
    scene: SceneManager,
    frame: Frame,
    renderer: SceneRenderer,
    is_surface_configured: bool,
    started: Instant,
    last_frame: Instant,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &SceneConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config).await?;

        let mut scene = SceneManager::new();
        scene
            .prepare_scene(&ctx.device, &ctx.queue, &config.asset_root)
            .await;
        let renderer = SceneRenderer::new(&ctx.device, &ctx.queue, ctx.config.format);

        let now = Instant::now();
        Ok(Self {
            ctx,
            scene,
            frame: Frame::new(),
            renderer,
            is_surface_configured: false,
            started: now,
            last_frame: now,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let dt = self.last_frame.elapsed();
        self.last_frame = Instant::now();
        let ctx = &mut self.ctx;
        ctx.camera_controller
            .update_camera(&mut ctx.camera, &mut ctx.projection, dt);

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.frame.begin();
        ctx.camera.apply_uniforms(&ctx.projection, &mut self.frame);
        self.scene
            .render_scene(&mut self.frame, self.started.elapsed().as_secs_f32());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.renderer.render(
            &ctx.device,
            &ctx.queue,
            &mut encoder,
            RenderTarget {
                color: &view,
                depth: &ctx.depth_texture.view,
            },
            ctx.clear_colour,
            &self.frame,
            self.scene.meshes(),
            self.scene.texture_bind_groups(),
        );
        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub(crate) enum AppEvent {
    #[allow(dead_code)]
    Initialized(Box<AppState>),
    #[allow(dead_code)]
    Failed(String),
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<AppEvent>,
    config: SceneConfig,
    state: Option<AppState>,
}

impl App {
    fn new(event_loop: &EventLoop<AppEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config,
            state: None,
        })
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            state.scene.destroy_textures();
            log::info!("scene textures released");
        }
        event_loop.exit();
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(CANVAS_ID));
            match canvas {
                Some(canvas) => {
                    window_attributes =
                        window_attributes.with_canvas(Some(canvas.unchecked_into()));
                }
                None => log::warn!("no #{CANVAS_ID} element, winit will create a canvas"),
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("could not create a window: {e}");
                event_loop.exit();
                return;
            }
        };

        let config = self.config.clone();
        let init_future = async move { AppState::new(window, &config).await };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok(state) => self.state = Some(state),
                Err(e) => {
                    log::error!("App initialization failed: {e:#}");
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let event = match init_future.await {
                    Ok(state) => AppEvent::Initialized(Box::new(state)),
                    Err(e) => AppEvent::Failed(format!("{e:#}")),
                };
                if proxy.send_event(event).is_err() {
                    log::error!("event loop closed before initialization finished");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Initialized(state) => {
                // This is the message from our wasm `spawn_local`
                let mut state = *state;
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            AppEvent::Failed(reason) => {
                log::error!("App initialization failed: {reason}");
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            state.ctx.camera_controller.process_mouse(dx, dy);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                state.ctx.camera_controller.process_keyboard(key, key_state);
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => state
                .ctx
                .camera_controller
                .process_mouse_button(button, button_state),
            WindowEvent::MouseWheel { delta, .. } => {
                state.ctx.camera_controller.process_scroll(&delta)
            }
            WindowEvent::RedrawRequested => match state.render() {
                Ok(()) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {e}");
                }
            },
            _ => {}
        }
    }
}

/// Open the window and run the desk scene until it is closed.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    config::init_logging(config.log_filter.as_deref());
    log::info!("starting {} with assets from {}", config.title, config.asset_root.display());

    let event_loop: EventLoop<AppEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}

/// Browser entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    run(SceneConfig::default()).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}
