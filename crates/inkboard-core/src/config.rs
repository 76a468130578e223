//! Editor configuration.

use crate::element::{Background, Color};
use crate::history::MAX_UNDO_HISTORY;
use crate::scene::{DEFAULT_CANVAS_SIZE, DEFAULT_PLACEMENT_MARGIN};
use crate::tools::DEFAULT_ERASER_WIDTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for a new editor session. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub background_color: Background,
    /// Number of undo steps kept.
    pub history_limit: usize,
    /// Eraser diameter in canvas units.
    pub eraser_width: f64,
    /// Minimum distance from the canvas edge for added elements.
    pub placement_margin: f64,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_SIZE.width,
            canvas_height: DEFAULT_CANVAS_SIZE.height,
            background_color: Background::default(),
            history_limit: MAX_UNDO_HISTORY,
            eraser_width: DEFAULT_ERASER_WIDTH,
            placement_margin: DEFAULT_PLACEMENT_MARGIN,
            stroke_color: Color::ink(),
            stroke_width: 4.0,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EditorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn test_partial_config() {
        let config = EditorConfig::from_json_str(
            r#"{"canvasWidth": 800, "backgroundColor": "transparent", "eraserWidth": 8}"#,
        )
        .unwrap();
        assert!((config.canvas_width - 800.0).abs() < f64::EPSILON);
        assert!((config.canvas_height - 720.0).abs() < f64::EPSILON);
        assert_eq!(config.background_color, Background::Transparent);
        assert!((config.eraser_width - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_config() {
        assert!(matches!(
            EditorConfig::from_json_str(r#"{"strokeColor": "blue"}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EditorConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkboard.json");
        fs::write(&path, r#"{"historyLimit": 5}"#).unwrap();
        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.history_limit, 5);
    }
}
