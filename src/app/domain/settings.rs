use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::AppError;

/// Webhook URL shipped in a fresh settings file. Must be replaced by the
/// integrator before sending works.
pub const PLACEHOLDER_ENDPOINT: &str = "YOUR_WEBHOOK_URL_HERE";

/// What happens to drawn content when the signature pad changes size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResizeBehavior {
    /// Reallocate the canvas; strokes and the last export are dropped.
    #[default]
    Clear,
    /// Replay recorded strokes onto the resized canvas.
    Preserve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,

    #[serde(default = "default_stroke_color")]
    pub stroke_color: [u8; 3],

    #[serde(default)]
    pub resize_behavior: ResizeBehavior,

    #[serde(default = "default_window_width")]
    pub window_width: i32,

    #[serde(default = "default_window_height")]
    pub window_height: i32,
}

fn default_endpoint_url() -> String {
    PLACEHOLDER_ENDPOINT.to_string()
}

fn default_stroke_width() -> f32 {
    2.0
}

fn default_stroke_color() -> [u8; 3] {
    [0, 0, 0]
}

fn default_window_width() -> i32 {
    820
}

fn default_window_height() -> i32 {
    900
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            stroke_width: default_stroke_width(),
            stroke_color: default_stroke_color(),
            resize_behavior: ResizeBehavior::default(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // First run: write defaults so the endpoint is easy to find
                let default = Self::default();
                if let Err(e) = default.save_to(path) {
                    tracing::debug!("Could not write default settings: {}", e);
                }
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("signpad");
        path.push("settings.json");
        path
    }

    pub fn endpoint_configured(&self) -> bool {
        let url = self.endpoint_url.trim();
        !url.is_empty() && url != PLACEHOLDER_ENDPOINT
    }

    /// Reject values the pad cannot render with.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.stroke_width > 0.0 && self.stroke_width <= 32.0) {
            return Err(AppError::Settings(format!(
                "stroke_width must be in (0, 32], got {}",
                self.stroke_width
            )));
        }
        if self.window_width < 200 || self.window_height < 200 {
            return Err(AppError::Settings("window must be at least 200x200".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.endpoint_url, PLACEHOLDER_ENDPOINT);
        assert_eq!(settings.stroke_width, 2.0);
        assert_eq!(settings.stroke_color, [0, 0, 0]);
        assert_eq!(settings.resize_behavior, ResizeBehavior::Clear);
        assert!(!settings.endpoint_configured());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"endpoint_url": "https://hook.example.com/abc"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert!(settings.endpoint_configured());
        assert_eq!(settings.stroke_width, 2.0);
        assert_eq!(settings.window_width, 820);
    }

    #[test]
    fn test_resize_behavior_serialization() {
        let settings = AppSettings {
            resize_behavior: ResizeBehavior::Preserve,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"Preserve\""));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            endpoint_url: "https://hook.example.com/xyz".to_string(),
            stroke_width: 3.5,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_writes_defaults_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_validate_rejects_bad_stroke_width() {
        let settings = AppSettings {
            stroke_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(AppError::Settings(_))));
    }
}
