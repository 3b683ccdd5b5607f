use serde::{Deserialize, Serialize};

use crate::color_scheme::{ColorScheme, SCHEME_SIZE};
use crate::error::{Result, ViewerError};

/// Startup settings for the viewer.
///
/// Every field has a default, so a partial JSON object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// `id` of the `<canvas>` element to render into.
    pub canvas_id: String,
    pub initial_colors: Vec<String>,
    /// Viewport scale used at startup and on mode changes.
    pub initial_scale: f64,
    /// Auto-rotation speed in radians per millisecond.
    pub rotation_speed: f64,
    pub max_iterations: i32,
    /// Port appended to picker hosts given without one.
    pub picker_port: u16,
    /// `log` level filter name, e.g. `"debug"`.
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas_id: "main-canvas".to_owned(),
            initial_colors: ["#007549", "#fbdecb", "#005a6e", "#feedea", "#fb4300"]
                .map(str::to_owned)
                .to_vec(),
            initial_scale: 4.0,
            rotation_speed: 0.001,
            max_iterations: 200,
            picker_port: 8080,
            log_level: "info".to_owned(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(ViewerError::ConfigJson)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.initial_scale.is_finite() && self.initial_scale > 0.0) {
            return Err(ViewerError::Config(format!(
                "initial_scale must be positive, got {}",
                self.initial_scale
            )));
        }
        if !self.rotation_speed.is_finite() {
            return Err(ViewerError::Config("rotation_speed must be finite".into()));
        }
        if self.max_iterations <= 0 {
            return Err(ViewerError::Config(format!(
                "max_iterations must be positive, got {}",
                self.max_iterations
            )));
        }
        if self.initial_colors.len() > SCHEME_SIZE {
            return Err(ViewerError::Config(format!(
                "at most {SCHEME_SIZE} initial colors are supported, got {}",
                self.initial_colors.len()
            )));
        }
        self.initial_scheme().map(drop)
    }

    pub fn initial_scheme(&self) -> Result<ColorScheme> {
        ColorScheme::from_hexes(&self.initial_colors)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{"initial_scale": 2.5, "log_level": "debug"}"#)
            .unwrap();
        assert_eq!(config.initial_scale, 2.5);
        assert_eq!(config.canvas_id, "main-canvas");
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn default_scheme_uses_initial_colors() {
        let scheme = ViewerConfig::default().initial_scheme().unwrap();
        assert_eq!(scheme.color_hex(0).as_deref(), Some("#007549"));
        assert_eq!(scheme.color_hex(4).as_deref(), Some("#fb4300"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ViewerConfig::from_json(r#"{"initial_scale": 0}"#),
            Err(ViewerError::Config(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r##"{"initial_colors": ["#zzzzzz"]}"##),
            Err(ViewerError::InvalidHex(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json("{"),
            Err(ViewerError::ConfigJson(_))
        ));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let config = ViewerConfig {
            log_level: "loud".into(),
            ..ViewerConfig::default()
        };
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }
}
