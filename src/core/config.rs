//! Configuration for a [`Map`](crate::core::map::Map)
//!
//! Every field has a default, so a config can be built in code with the
//! `with_*` methods or loaded from a partial JSON document.

use crate::core::{constants::DEFAULT_PIXEL_RATIO, geo::Size, view::ViewOptions};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map size in CSS pixels
    pub size: Size,
    /// Device pixels per CSS pixel
    pub pixel_ratio: f64,
    /// Initial view
    pub view: ViewOptions,
}

impl MapConfig {
    /// Parses a config from JSON. Missing fields take their defaults; fields
    /// of the wrong type are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    pub fn with_view(mut self, view: ViewOptions) -> Self {
        self.view = view;
        self
    }
}

/// Serde adapter for an upper resolution bound. An unbounded maximum is
/// written as `null` and `null` reads back as unbounded.
pub(crate) mod max_resolution {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: Size::default(),
            pixel_ratio: DEFAULT_PIXEL_RATIO,
            view: ViewOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;
    use crate::MapError;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MapConfig::from_json(
            r#"{ "size": { "width": 800, "height": 600 }, "view": { "resolution": 10.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.size, Size::new(800, 600));
        assert_eq!(config.pixel_ratio, DEFAULT_PIXEL_RATIO);
        assert_eq!(config.view.resolution, 10.0);
        assert_eq!(config.view.center, Point::default());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = MapConfig::from_json(r#"{ "pixel_ratio": "high" }"#);
        assert!(matches!(result, Err(MapError::Config(_))));
    }

    #[test]
    fn test_default_config_survives_json() {
        let config = MapConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(MapConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_explicit_null_max_resolution_is_unbounded() {
        let config = MapConfig::from_json(r#"{ "view": { "max_resolution": null } }"#).unwrap();
        assert_eq!(config.view.max_resolution, f64::INFINITY);

        let config = MapConfig::from_json(r#"{ "view": { "max_resolution": 500.0 } }"#).unwrap();
        assert_eq!(config.view.max_resolution, 500.0);
    }

    #[test]
    fn test_builder_methods() {
        let config = MapConfig::default().with_size(10, 20).with_pixel_ratio(2.0);
        assert_eq!(config.size, Size::new(10, 20));
        assert_eq!(config.pixel_ratio, 2.0);
    }
}
