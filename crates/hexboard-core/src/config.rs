//! Board configuration.
//!
//! The region size is not stored in saved documents, so whoever loads a document
//! must supply the same configuration that produced it.

use crate::board::BoardError;
use serde::{Deserialize, Serialize};

/// Radius of the default board (37 tiles)
pub const DEFAULT_RADIUS: u32 = 3;

/// Largest radius a board may be built with
pub const MAX_RADIUS: u32 = 1000;

/// Degrees a blocked tile turns per click
pub const DEFAULT_ROTATION_STEP: u16 = 60;

/// Terrain colors cycled by clicking a plain tile
pub const DEFAULT_PALETTE: [&str; 5] = ["transparent", "#ffffff", "#7ec8e3", "#a0522d", "#556b2f"];

/// Settings for building a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Radius of the hexagon-shaped region
    pub radius: u32,
    /// Terrain colors in click order; the first one is the default
    pub palette: Vec<String>,
    /// Degrees per blocked-tile rotation
    pub rotation_step: u16,
    /// When false the board is read-only and every gesture is ignored
    pub allow_editing: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            rotation_step: DEFAULT_ROTATION_STEP,
            allow_editing: true,
        }
    }
}

impl BoardConfig {
    /// Default settings with a different radius
    pub fn with_radius(radius: u32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BoardError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings can produce a usable board
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.palette.is_empty() {
            return Err(BoardError::InvalidConfig("palette must not be empty".into()));
        }
        if self.radius > MAX_RADIUS {
            return Err(BoardError::InvalidConfig(format!(
                "radius must be at most {}, got {}",
                MAX_RADIUS, self.radius
            )));
        }
        if self.rotation_step == 0 || self.rotation_step >= 360 {
            return Err(BoardError::InvalidConfig(format!(
                "rotation step must be in 1..360, got {}",
                self.rotation_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = BoardConfig::default();
        assert_eq!(config.radius, 3);
        assert_eq!(config.palette.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = BoardConfig::from_json(r#"{"radius": 5}"#).unwrap();
        assert_eq!(config, BoardConfig::with_radius(5));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = BoardConfig::from_json("radius=5").unwrap_err();
        assert!(matches!(err, BoardError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = BoardConfig::from_json(r#"{"palette": []}"#).unwrap_err();
        assert!(matches!(err, BoardError::InvalidConfig(_)));
    }

    #[test]
    fn test_rotation_step_bounds() {
        let mut config = BoardConfig::default();
        config.rotation_step = 0;
        assert!(config.validate().is_err());
        config.rotation_step = 360;
        assert!(config.validate().is_err());
        config.rotation_step = 90;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_radius_upper_bound() {
        let err = BoardConfig::from_json(r#"{"radius": 4294967295}"#).unwrap_err();
        assert!(matches!(err, BoardError::InvalidConfig(_)));
        assert!(BoardConfig::with_radius(MAX_RADIUS + 1).validate().is_err());
        assert!(BoardConfig::with_radius(MAX_RADIUS).validate().is_ok());
    }

    #[test]
    fn test_allow_editing_defaults_on() {
        assert!(BoardConfig::default().allow_editing);
        let config = BoardConfig::from_json(r#"{"allow_editing": false}"#).unwrap();
        assert!(!config.allow_editing);
        assert_eq!(config.radius, DEFAULT_RADIUS);
    }
}
