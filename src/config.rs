//! Render configuration: canvas, projection scale, and zoom behaviour.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// One rendering pipeline, parameterized instead of duplicated per map variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Mercator scale: drawing units per radian.
    pub scale: f64,
    pub enable_zoom: bool,
    /// Allowed zoom-scale range `[min, max]` when zoom is enabled.
    pub zoom_extent: [f64; 2],
    pub point_radius: f64,
}

impl Default for RenderConfig {
    fn default() -> Self { Self::static_map() }
}

impl RenderConfig {
    /// Fixed-size map without interaction.
    pub fn static_map() -> Self {
        Self {
            width: 960,
            height: 480,
            scale: 110_000.0,
            enable_zoom: false,
            zoom_extent: [1.0, 8.0],
            point_radius: 1.0,
        }
    }

    /// Larger, denser map meant for pan/zoom viewing.
    pub fn zoomable() -> Self {
        Self {
            width: 1200,
            height: 800,
            scale: 150_000.0,
            enable_zoom: true,
            ..Self::static_map()
        }
    }

    /// Read a (possibly partial) configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("[config] Invalid render config in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("[config] canvas must be non-empty, got {}x{}", self.width, self.height);
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            bail!("[config] scale must be positive, got {}", self.scale);
        }
        let [min, max] = self.zoom_extent;
        if !(min.is_finite() && max.is_finite() && 0.0 < min && min <= max) {
            bail!("[config] zoom extent must satisfy 0 < min <= max, got [{min}, {max}]");
        }
        if !(self.point_radius.is_finite() && self.point_radius >= 0.0) {
            bail!("[config] point radius must be non-negative, got {}", self.point_radius);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RenderConfig;

    #[test]
    fn presets_differ_only_where_intended() {
        let fixed = RenderConfig::static_map();
        let zoom = RenderConfig::zoomable();
        assert_eq!(RenderConfig::default(), fixed);
        assert!(!fixed.enable_zoom);
        assert!(zoom.enable_zoom);
        assert_eq!(zoom.zoom_extent, [1.0, 8.0]);
        assert_eq!(zoom.point_radius, fixed.point_radius);
        assert!(fixed.validate().is_ok() && zoom.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        std::fs::write(&path, r#"{ "width": 500, "enable_zoom": true }"#).unwrap();

        let config = RenderConfig::from_json_file(&path).unwrap();
        assert_eq!(config.width, 500);
        assert_eq!(config.height, 480);
        assert!(config.enable_zoom);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad = [
            RenderConfig { width: 0, ..RenderConfig::default() },
            RenderConfig { scale: -1.0, ..RenderConfig::default() },
            RenderConfig { zoom_extent: [8.0, 1.0], ..RenderConfig::default() },
            RenderConfig { point_radius: f64::NAN, ..RenderConfig::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?} should be invalid");
        }
    }
}
