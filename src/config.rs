use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::{RotationAnimator, StepMode, FAN_AXIS, FAN_PIVOT};
use crate::camera::{Camera, CameraSettings, PITCH, YAW};
use crate::core::window::{Viewport, WindowDimensions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub near: f32,
    pub far: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Room Viewer".to_string(),
            width: 1500,
            height: 800,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub world_up: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    #[serde(flatten)]
    pub settings: CameraSettings,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [-3.0, 2.5, 4.3],
            world_up: [0.0, 1.0, 0.0],
            yaw: YAW,
            pitch: PITCH,
            settings: CameraSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    pub step_mode: StepMode,
    /// Overrides the default step for the chosen mode
    pub step: Option<f32>,
    pub spinning: bool,
}

/// Viewer settings, all optional in the JSON file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub fan: FanConfig,
}

impl ViewerConfig {
    /// Read a JSON config; `None` yields the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                Self::from_json(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse viewer config")
    }

    pub fn build_camera(&self) -> Camera {
        let camera = &self.camera;
        Camera::with_settings(
            Vec3::from_array(camera.position),
            Vec3::from_array(camera.world_up),
            camera.yaw,
            camera.pitch,
            camera.settings,
        )
    }

    pub fn build_fan(&self) -> RotationAnimator {
        let mut fan = RotationAnimator::fan(self.fan.step_mode);
        if let Some(step) = self.fan.step {
            fan = RotationAnimator::new(FAN_PIVOT, FAN_AXIS, step, self.fan.step_mode);
        }
        fan
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            WindowDimensions::new(self.window.width, self.window.height),
            self.window.near,
            self.window.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = ViewerConfig::from_json("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.build_camera().position(), Vec3::new(-3.0, 2.5, 4.3));
    }

    #[test]
    fn camera_settings_are_flattened() {
        let config = ViewerConfig::from_json(
            r#"{
                "camera": { "yaw": 0.0, "movement_speed": 5.0 },
                "fan": { "step_mode": "per_frame", "step": 2.0 }
            }"#,
        )
        .unwrap();
        let camera = config.build_camera();
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.movement_speed(), 5.0);

        let fan = config.build_fan();
        assert_eq!(fan.step, 2.0);
        assert_eq!(fan.step_mode, StepMode::PerFrame);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ViewerConfig::from_json("{ \"window\": 3 }").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ViewerConfig::load(Some(Path::new("/nonexistent/room.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/room.json"));
    }
}
