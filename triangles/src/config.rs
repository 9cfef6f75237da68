use std::path::{Path, PathBuf};

use cgmath::Deg;
use serde::Deserialize;
use thiserror::Error;

use crate::camera::{OrbitCamera, Projection};
use crate::scene::DemoKind;

/// Settings shared by both demos. Every field has a default, so config files may be partial.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub clear_color: [f32; 4],
    pub blending: bool,
    /// Directory holding the `*.vertexshader`/`*.fragmentshader` files.
    pub shader_dir: PathBuf,
    /// Delay between animation frames of the rotating demo.
    pub frame_interval_ms: u64,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Requested multisampling level.
    pub samples: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub step: f64,
    pub radius: f32,
    pub height: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: [0.0, 0.0, 0.4, 0.0],
            blending: true,
            shader_dir: PathBuf::from("shaders"),
            frame_interval_ms: 15,
            camera: CameraConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: None,
            width: 1024,
            height: 512,
            samples: 4,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            step: 0.02,
            radius: 1.0,
            height: 1.0,
            fov_degrees: 45.05,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl DemoConfig {
    pub fn title(&self, kind: DemoKind) -> &str {
        self.window
            .title
            .as_deref()
            .unwrap_or_else(|| kind.default_title())
    }

    pub fn projection(&self) -> Projection {
        let mut projection = Projection {
            fovy: Deg(self.camera.fov_degrees),
            near: self.camera.near,
            far: self.camera.far,
            ..Default::default()
        };
        projection.set_viewport(self.window.width, self.window.height);

        projection
    }

    pub fn orbit_camera(&self) -> OrbitCamera {
        OrbitCamera {
            step: self.camera.step,
            radius: self.camera.radius,
            height: self.camera.height,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), LoaderError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(LoaderError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        let camera = &self.camera;

        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(LoaderError::Invalid(format!(
                "field of view must be between 0 and 180 degrees, got {}",
                camera.fov_degrees
            )));
        }

        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(LoaderError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got near {} far {}",
                camera.near, camera.far
            )));
        }

        Ok(())
    }
}

pub struct ConfigLoader {}

impl ConfigLoader {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<DemoConfig, LoaderError> {
        let config_str = std::fs::read_to_string(path).map_err(LoaderError::InputError)?;

        Self::load_from_str(&config_str)
    }

    pub fn load_from_str(config_str: &str) -> Result<DemoConfig, LoaderError> {
        let config: DemoConfig = json5::from_str(config_str).map_err(LoaderError::FormatError)?;

        config.validate()?;

        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read config file: {0}")]
    InputError(std::io::Error),
    #[error("malformed config file: {0}")]
    FormatError(json5::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ConfigLoader::load_from_str("{}").unwrap();

        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 512);
        assert_eq!(config.clear_color, [0.0, 0.0, 0.4, 0.0]);
        assert_eq!(config.frame_interval_ms, 15);
        assert_eq!(config.shader_dir, PathBuf::from("shaders"));
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = ConfigLoader::load_from_str(
            r#"{
                // comments are fine in json5
                window: { title: "Triangles", width: 800 },
                camera: { step: 0.05 },
            }"#,
        )
        .unwrap();

        assert_eq!(config.title(DemoKind::Rotating), "Triangles");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 512);
        assert_approx_eq!(config.camera.step, 0.05);
        assert_approx_eq!(config.camera.near, 0.1);
    }

    #[test]
    fn sample_config_parses() {
        let config =
            ConfigLoader::load_from_str(include_str!("../../config/rotating.json5")).unwrap();

        assert_eq!(config.shader_dir, PathBuf::from("shaders"));
    }

    #[test]
    fn title_falls_back_to_demo_default() {
        let config = DemoConfig::default();

        assert_eq!(config.title(DemoKind::Static), "Red and green triangles");
        assert_eq!(config.title(DemoKind::Rotating), "Two rotating triangles");
    }

    #[test]
    fn projection_follows_window_aspect() {
        let mut config = DemoConfig::default();
        assert_approx_eq!(config.projection().aspect_ratio, 2.0);

        config.window.width = 600;
        config.window.height = 600;
        assert_approx_eq!(config.projection().aspect_ratio, 1.0);
    }

    #[test]
    fn orbit_camera_uses_camera_section() {
        let mut config = DemoConfig::default();
        config.camera.radius = 3.0;

        let camera = config.orbit_camera();

        assert_approx_eq!(camera.radius, 3.0);
        assert_approx_eq!(camera.angle, 0.0);
    }

    #[test]
    fn rejects_unknown_fields() {
        let res = ConfigLoader::load_from_str("{ windwo: {} }");

        assert!(matches!(res, Err(LoaderError::FormatError(_))));
    }

    #[test]
    fn rejects_degenerate_values() {
        for src in [
            "{ window: { width: 0 } }",
            "{ camera: { near: 0.0 } }",
            "{ camera: { near: 5.0, far: 1.0 } }",
            "{ camera: { fov_degrees: 180.0 } }",
        ] {
            let res = ConfigLoader::load_from_str(src);
            assert!(matches!(res, Err(LoaderError::Invalid(_))), "{src}");
        }
    }

    #[test]
    fn missing_file_is_input_error() {
        let res = ConfigLoader::load_from_path("does/not/exist.json5");

        assert!(matches!(res, Err(LoaderError::InputError(_))));
    }
}
