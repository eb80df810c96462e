// crates/choromap-core/src/config.rs
use crate::error::Result;
use crate::scale::{ColorScale, LinearScale, SCHEME_BLUES_9};
use crate::tooltip::TooltipStyle;
use serde::{Deserialize, Serialize};

/// Fixed drawing parameters, built once and handed to the map.
///
/// `Default` reproduces the 960×600 education map: a 2.6%–75.1% domain over
/// nine blues, with the legend key spanning x = 600..860.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    /// Value domain covered by the color scale and the legend key.
    pub domain: (f64, f64),
    pub colors: Vec<String>,
    /// Pixel extent of the legend key.
    pub key_range: (f64, f64),
    pub key_height: f64,
    pub tick_size: f64,
    /// Translation of the legend group.
    pub legend_offset: (f64, f64),
    pub caption: String,
    /// Tooltip position relative to the pointer.
    pub tooltip_offset: (f64, f64),
    pub tooltip_opacity: f64,
    pub state_stroke: String,
    /// Topology objects holding the counties and the states.
    pub counties_object: String,
    pub states_object: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 600,
            domain: (2.6, 75.1),
            colors: SCHEME_BLUES_9.iter().map(|c| c.to_string()).collect(),
            key_range: (600.0, 860.0),
            key_height: 16.0,
            tick_size: 13.0,
            legend_offset: (0.0, 40.0),
            caption: String::new(),
            tooltip_offset: (10.0, -28.0),
            tooltip_opacity: 0.9,
            state_stroke: "#fff".to_string(),
            counties_object: "counties".to_string(),
            states_object: "states".to_string(),
        }
    }
}

impl MapConfig {
    pub fn color_scale(&self) -> Result<ColorScale> {
        ColorScale::uniform(self.domain.0, self.domain.1, self.colors.clone())
    }

    pub fn key_scale(&self) -> LinearScale {
        LinearScale::rounded(self.domain, self.key_range)
    }

    pub fn tooltip_style(&self) -> TooltipStyle {
        TooltipStyle {
            offset: self.tooltip_offset,
            opacity: self.tooltip_opacity,
        }
    }
}
