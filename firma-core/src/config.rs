//! Pad configuration.

use serde::{Deserialize, Serialize};

use crate::{PadResult, StrokeStyle};

/// Shape drawn at the ends of each segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat end exactly at the endpoint.
    Butt,
    /// Half-disc centred on the endpoint.
    #[default]
    Round,
    /// Half-square extending past the endpoint.
    Square,
}

impl LineCap {
    /// Canvas 2D `lineCap` keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Configuration for a [`SignaturePad`](crate::SignaturePad).
///
/// Every field has a default, so hosts may pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Stroke width in logical pixels.
    pub line_width: f64,
    /// Stroke color as RGBA bytes.
    pub stroke_color: [u8; 4],
    /// Segment end shape.
    pub line_cap: LineCap,
    /// Lower bound for the device pixel scale.
    pub min_scale: f64,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            stroke_color: [0, 0, 0, 255], // Black
            line_cap: LineCap::Round,
            min_scale: 1.0,
        }
    }
}

impl PadConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::Config`](crate::PadError::Config) if the JSON is
    /// malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> PadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The fixed stroke style this configuration draws with.
    #[must_use]
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            line_width: self.line_width,
            color: self.stroke_color,
            line_cap: self.line_cap,
        }
    }
}
