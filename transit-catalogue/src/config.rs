//! Settings documents.
//!
//! A settings document is a JSON object with up to three sections; any
//! missing section falls back to its defaults:
//!
//! ```json
//! {
//!     "routing_settings": { "bus_wait_time": 6, "bus_velocity": 40 },
//!     "render_settings": { "width": 600, "color_palette": ["green", [255, 160, 0]] },
//!     "serialization_settings": { "file": "transport_catalogue.db" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::router::{RouterError, RoutingSettings};

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the expected shape.
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but holds unusable values.
    #[error(transparent)]
    Invalid(#[from] RouterError),
}

/// A colour as written in settings: a name, an RGB triple or an RGBA quad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl Color {
    /// Create a named colour.
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

/// Map drawing parameters.
///
/// Nothing in this crate draws; the values are carried so they can be
/// persisted next to the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: [f64; 2],
    pub stop_label_font_size: u32,
    pub stop_label_offset: [f64; 2],
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    /// Line colours, cycled through bus by bus
    pub color_palette: Vec<Color>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1200.0,
            padding: 50.0,
            line_width: 14.0,
            stop_radius: 5.0,
            bus_label_font_size: 20,
            bus_label_offset: [7.0, 15.0],
            stop_label_font_size: 20,
            stop_label_offset: [7.0, -3.0],
            underlayer_color: Color::Rgba(255, 255, 255, 0.85),
            underlayer_width: 3.0,
            color_palette: vec![
                Color::named("green"),
                Color::Rgb(255, 160, 0),
                Color::named("red"),
            ],
        }
    }
}

/// Where snapshots are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

impl Default for SerializationSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("transport_catalogue.db"),
        }
    }
}

/// A complete settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, rename = "routing_settings")]
    pub routing: RoutingSettings,

    #[serde(default, rename = "render_settings")]
    pub render: RenderSettings,

    #[serde(default, rename = "serialization_settings")]
    pub serialization: SerializationSettings,
}

impl Settings {
    /// Parse and validate a settings document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.routing.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = Settings::from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.routing, RoutingSettings::new(6, 40.0));
        assert_eq!(
            settings.serialization.file,
            PathBuf::from("transport_catalogue.db")
        );
    }

    #[test]
    fn sections_override_defaults() {
        let settings = Settings::from_json_str(
            r#"{
                "routing_settings": { "bus_wait_time": 2, "bus_velocity": 30 },
                "render_settings": { "width": 600, "stop_radius": 3.5 },
                "serialization_settings": { "file": "/tmp/city.db" }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.routing, RoutingSettings::new(2, 30.0));
        assert_eq!(settings.render.width, 600.0);
        assert_eq!(settings.render.stop_radius, 3.5);
        assert_eq!(settings.render.height, 1200.0);
        assert_eq!(settings.serialization.file, PathBuf::from("/tmp/city.db"));
    }

    #[test]
    fn colours_in_every_form() {
        let settings = Settings::from_json_str(
            r#"{
                "render_settings": {
                    "underlayer_color": [10, 20, 30, 0.5],
                    "color_palette": ["black", [1, 2, 3], [4, 5, 6, 0.25]]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.render.underlayer_color, Color::Rgba(10, 20, 30, 0.5));
        assert_eq!(
            settings.render.color_palette,
            vec![
                Color::named("black"),
                Color::Rgb(1, 2, 3),
                Color::Rgba(4, 5, 6, 0.25),
            ]
        );
    }

    #[test]
    fn colour_serializes_back_to_json_shape() {
        let json = serde_json::to_string(&Color::Rgb(255, 160, 0)).unwrap();
        assert_eq!(json, "[255,160,0]");
        let json = serde_json::to_string(&Color::named("red")).unwrap();
        assert_eq!(json, r#""red""#);
    }

    #[test]
    fn invalid_velocity_is_rejected() {
        let err = Settings::from_json_str(
            r#"{ "routing_settings": { "bus_wait_time": 6, "bus_velocity": 0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = Settings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));

        let err = Settings::from_json_str(r#"{ "routing_settings": { "bus_wait_time": -1 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "routing_settings": {{ "bus_wait_time": 3, "bus_velocity": 20 }} }}"#
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.routing, RoutingSettings::new(3, 20.0));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
