//! Render settings, loadable from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sphaera_core::SceneParams;
use sphaera_math::Vec3;
use sphaera_renderer::{CameraParams, RenderSettings, DEFAULT_BUCKET_SIZE};

/// Camera placement and lens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub lens_radius: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let params = CameraParams::default();
        Self {
            eye: params.eye.to_array(),
            target: params.target.to_array(),
            up: params.up.to_array(),
            vfov: params.vfov,
            lens_radius: params.lens_radius,
        }
    }
}

/// Everything the batch driver needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub max_samples: u32,
    pub bucket_size: u32,
    pub camera: CameraSettings,
    /// Absent means a fresh scene every run
    pub scene_seed: Option<u64>,
    pub render_seed: Option<u64>,
    pub output: PathBuf,
    pub snapshot_every: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        let render = RenderSettings::default();
        Self {
            width: render.width,
            height: render.height,
            max_samples: render.max_samples,
            bucket_size: DEFAULT_BUCKET_SIZE,
            camera: CameraSettings::default(),
            scene_seed: None,
            render_seed: None,
            output: PathBuf::from("render.png"),
            snapshot_every: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.width,
            height: self.height,
            max_samples: self.max_samples,
            bucket_size: self.bucket_size,
            seed: self.render_seed,
        }
    }

    pub fn camera_params(&self) -> CameraParams {
        CameraParams {
            eye: Vec3::from_array(self.camera.eye),
            target: Vec3::from_array(self.camera.target),
            up: Vec3::from_array(self.camera.up),
            vfov: self.camera.vfov,
            aspect: self.render_settings().aspect(),
            lens_radius: self.camera.lens_radius,
        }
    }

    pub fn scene_params(&self) -> SceneParams {
        SceneParams {
            seed: self.scene_seed,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(
            r#"{ "width": 200, "camera": { "vfov": 35.0 }, "scene_seed": 5 }"#,
        )
        .unwrap();

        assert_eq!(settings.width, 200);
        assert_eq!(settings.height, Settings::default().height);
        assert_eq!(settings.camera.vfov, 35.0);
        assert_eq!(settings.camera.eye, [13.0, 2.0, 3.0]);
        assert_eq!(settings.scene_seed, Some(5));
        assert_eq!(settings.scene_params().seed, Some(5));
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.snapshot_every = Some(8);
        let text = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&text).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json(r#"{ "width": "wide" }"#).is_err());
    }

    #[test]
    fn test_camera_aspect_follows_resolution() {
        let settings = Settings {
            width: 400,
            height: 200,
            ..Default::default()
        };
        assert_eq!(settings.camera_params().aspect, 2.0);
        assert_eq!(settings.render_settings().width, 400);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/sphaera.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }
}
