// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.
//!
//! Every field has a serde default, so an empty JSON object is a complete config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use statviz_charts::{DomainPadding, Margins, Size};
use statviz_core::Transition;

use crate::dataset::NumericPolicy;
use crate::error::ConfigError;

/// How the canvas size is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
    /// Always use `width` × `height`.
    #[default]
    Fixed,
    /// Use the viewport size passed to `initialize`.
    Viewport,
}

/// Margins in CSS order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Top margin.
    #[serde(default = "default_margin_top")]
    pub top: f64,
    /// Right margin.
    #[serde(default = "default_margin_right")]
    pub right: f64,
    /// Bottom margin.
    #[serde(default = "default_margin_bottom")]
    pub bottom: f64,
    /// Left margin.
    #[serde(default = "default_margin_left")]
    pub left: f64,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: default_margin_top(),
            right: default_margin_right(),
            bottom: default_margin_bottom(),
            left: default_margin_left(),
        }
    }
}

impl From<MarginConfig> for Margins {
    fn from(m: MarginConfig) -> Self {
        Self::new(m.top, m.right, m.bottom, m.left)
    }
}

/// Top-level chart configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Fixed canvas width.
    #[serde(default = "default_width")]
    pub width: f64,
    /// Fixed canvas height.
    #[serde(default = "default_height")]
    pub height: f64,
    /// Canvas sizing policy.
    #[serde(default)]
    pub sizing: Sizing,
    /// Space around the plot.
    #[serde(default)]
    pub margins: MarginConfig,
    /// Container the chart is mounted under.
    #[serde(default = "default_selector")]
    pub selector: String,
    /// Dataset location.
    #[serde(default = "default_data_path")]
    pub data_path: String,
    /// Marker circle radius.
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,
    /// Duration of selection-change transitions.
    #[serde(default = "default_transition_ms")]
    pub transition_ms: f64,
    /// Factor applied to a field's minimum.
    #[serde(default = "default_padding_lower")]
    pub domain_padding_lower: f64,
    /// Factor applied to a field's maximum.
    #[serde(default = "default_padding_upper")]
    pub domain_padding_upper: f64,
    /// Tooltip offset `[top, left]` from the hovered marker.
    #[serde(default = "default_tooltip_offset")]
    pub tooltip_offset: [f64; 2],
    /// Treatment of unparseable numbers.
    #[serde(default)]
    pub numeric_policy: NumericPolicy,
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    500.0
}

fn default_margin_top() -> f64 {
    20.0
}

fn default_margin_right() -> f64 {
    40.0
}

fn default_margin_bottom() -> f64 {
    80.0
}

fn default_margin_left() -> f64 {
    100.0
}

fn default_selector() -> String {
    "#scatter".to_owned()
}

fn default_data_path() -> String {
    "assets/data/data.csv".to_owned()
}

fn default_marker_radius() -> f64 {
    14.0
}

fn default_transition_ms() -> f64 {
    1000.0
}

fn default_padding_lower() -> f64 {
    0.8
}

fn default_padding_upper() -> f64 {
    1.2
}

fn default_tooltip_offset() -> [f64; 2] {
    [80.0, -60.0]
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            sizing: Sizing::default(),
            margins: MarginConfig::default(),
            selector: default_selector(),
            data_path: default_data_path(),
            marker_radius: default_marker_radius(),
            transition_ms: default_transition_ms(),
            domain_padding_lower: default_padding_lower(),
            domain_padding_upper: default_padding_upper(),
            tooltip_offset: default_tooltip_offset(),
            numeric_policy: NumericPolicy::default(),
        }
    }
}

impl ChartConfig {
    /// Parses a config from JSON text.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Returns the canvas size for a viewport, according to [`Sizing`].
    pub fn canvas_size(&self, viewport: Size) -> Size {
        match self.sizing {
            Sizing::Fixed => Size::new(self.width, self.height),
            Sizing::Viewport => viewport,
        }
    }

    /// Returns the margins.
    pub fn margins(&self) -> Margins {
        self.margins.into()
    }

    /// Returns the domain padding factors.
    pub fn domain_padding(&self) -> DomainPadding {
        DomainPadding::new(self.domain_padding_lower, self.domain_padding_upper)
    }

    /// Returns the selection-change transition.
    pub fn transition(&self) -> Transition {
        Transition::new(self.transition_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = ChartConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.selector, "#scatter");
        assert_eq!(config.margins(), Margins::new(20.0, 40.0, 80.0, 100.0));
        assert_eq!(config.tooltip_offset, [80.0, -60.0]);
        assert_eq!(config.transition().duration_ms, 1000.0);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = ChartConfig::from_json_str(
            r#"{
                "width": 640,
                "margins": {"left": 60},
                "numeric_policy": "drop_row",
                "sizing": "viewport"
            }"#,
        )
        .unwrap();
        assert_eq!(config.width, 640.0);
        assert_eq!(config.height, 500.0);
        assert_eq!(config.margins.left, 60.0);
        assert_eq!(config.margins.top, 20.0);
        assert_eq!(config.numeric_policy, NumericPolicy::DropRow);
        assert_eq!(
            config.canvas_size(Size::new(1024.0, 768.0)),
            Size::new(1024.0, 768.0)
        );
    }

    #[test]
    fn fixed_sizing_ignores_viewport() {
        let config = ChartConfig::default();
        assert_eq!(config.canvas_size(Size::new(10.0, 10.0)), Size::new(800.0, 500.0));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ChartConfig::from_json_str("{\"width\": \"wide\"}").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ChartConfig::from_path("/nonexistent/statviz.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
