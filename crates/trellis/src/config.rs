use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use trellis_core::geometry::{Position, Size};
use trellis_egui::Theme;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Placement of the application's log window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogWindowConfig {
    pub title: String,
    pub size: Size,
    pub position: Position,
}

impl Default for LogWindowConfig {
    fn default() -> Self {
        Self {
            title: "Log".to_string(),
            size: Size::new(500.0, 400.0),
            position: Position::ORIGIN,
        }
    }
}

/// Everything an [`Application`](crate::Application) needs before `init`.
///
/// Every field has a default, so a TOML file only lists what it changes:
///
/// ```toml
/// title = "Disk tool"
/// size = { width = 1024.0, height = 768.0 }
/// theme = "light"
///
/// [log]
/// position = { x = 520.0, y = 10.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub size: Size,
    pub log: LogWindowConfig,
    /// Body text size in points.
    pub font_size: f32,
    pub vsync: bool,
    /// Frame cap when vsync is off.
    pub target_fps: Option<f32>,
    /// Linear RGBA behind the UI.
    pub clear_color: [f32; 4],
    pub theme: Theme,
    /// Stop a headless run after this many frames.
    pub frame_limit: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Application".to_string(),
            size: Size::new(800.0, 600.0),
            log: LogWindowConfig::default(),
            font_size: 13.0,
            vsync: true,
            target_fps: None,
            clear_color: [0.1, 0.1, 0.1, 1.0],
            theme: Theme::Dark,
            frame_limit: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_log_title(mut self, title: impl Into<String>) -> Self {
        self.log.title = title.into();
        self
    }

    pub fn with_log_size(mut self, size: impl Into<Size>) -> Self {
        self.log.size = size.into();
        self
    }

    pub fn with_log_position(mut self, position: impl Into<Position>) -> Self {
        self.log.position = position.into();
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_target_fps(mut self, fps: f32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            title = "Disk tool"
            theme = "light"

            [log]
            position = { x = 520.0, y = 10.0 }
            "#,
        )
        .unwrap();

        assert_eq!(config.title, "Disk tool");
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.log.position, Position::new(520.0, 10.0));
        assert_eq!(config.log.size, Size::new(500.0, 400.0));
        assert_eq!(config.font_size, 13.0);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");
        let config = AppConfig::default()
            .with_title("saved")
            .with_frame_limit(3);
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!(matches!(
            AppConfig::from_toml_str("theme = \"sepia\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
