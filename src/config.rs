//! Runtime configuration and logger setup.

use std::{path::PathBuf, sync::Once};

/// Overrides [`SceneConfig::asset_root`].
pub const ASSET_DIR_ENV: &str = "DESK_NGIN_ASSET_DIR";
/// Overrides [`SceneConfig::log_filter`]. Uses the `env_logger` filter syntax.
pub const LOG_ENV: &str = "DESK_NGIN_LOG";

pub const DEFAULT_LOG_FILTER: &str = "desk_ngin=info,wgpu=warn,wgpu_core=warn,wgpu_hal=warn";

/// Start pose and lens of the viewer camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub position: (f32, f32, f32),
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub ortho_height: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: (0.0, 5.5, 10.0),
            yaw_degrees: -90.0,
            pitch_degrees: -25.0,
            fovy_degrees: 45.0,
            znear: 0.1,
            zfar: 100.0,
            ortho_height: 12.0,
            speed: 4.0,
            sensitivity: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Directory texture paths are resolved against.
    pub asset_root: PathBuf,
    pub clear_colour: wgpu::Color,
    pub camera: CameraConfig,
    /// `None` falls back to `RUST_LOG`, then to [`DEFAULT_LOG_FILTER`].
    pub log_filter: Option<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "desk-ngin".to_string(),
            width: 1280,
            height: 720,
            asset_root: PathBuf::from("assets"),
            clear_colour: wgpu::Color {
                r: 0.05,
                g: 0.06,
                b: 0.1,
                a: 1.0,
            },
            camera: CameraConfig::default(),
            log_filter: None,
        }
    }
}

impl SceneConfig {
    /// Defaults with the `DESK_NGIN_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ASSET_DIR_ENV).filter(|dir| !dir.is_empty()) {
            self.asset_root = PathBuf::from(dir);
        }
        if let Some(filter) = lookup(LOG_ENV).filter(|filter| !filter.is_empty()) {
            self.log_filter = Some(filter);
        }
        self
    }
}

static INIT: Once = Once::new();

/// Install the global logger. Later calls are ignored.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut builder = env_logger::Builder::new();
            match filter {
                Some(filter) => {
                    builder.parse_filters(filter);
                }
                None => match std::env::var("RUST_LOG") {
                    Ok(filter) => {
                        builder.parse_filters(&filter);
                    }
                    Err(_) => {
                        builder.parse_filters(DEFAULT_LOG_FILTER);
                    }
                },
            }
            if let Err(e) = builder.try_init() {
                eprintln!("Warning: could not initialize logger: {e}");
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let _ = filter;
            // fails only when another logger is already installed
            let _ = console_log::init_with_level(log::Level::Info);
        }

        log::debug!("logging initialized");
    });
}
