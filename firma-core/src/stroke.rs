//! Stroke tracking.
//!
//! A stroke is one down-to-up gesture. It is committed to the surface as a
//! polyline: every move while drawing yields one straight [`Segment`] from
//! the previous point, with no smoothing.

use serde::{Deserialize, Serialize};

use crate::{LineCap, Point};

/// A straight line between two logical points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
}

/// Fixed styling applied to every segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Width in logical pixels.
    pub line_width: f64,
    /// RGBA color.
    pub color: [u8; 4],
    /// End cap.
    pub line_cap: LineCap,
}

impl StrokeStyle {
    /// CSS `rgba()` form of the stroke color.
    #[must_use]
    pub fn css_color(&self) -> String {
        let [r, g, b, a] = self.color;
        let alpha = f64::from(a) / 255.0;
        format!("rgba({r},{g},{b},{alpha})")
    }
}

/// Two-state drawing flag with the last recorded point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum StrokeState {
    /// Not drawing; moves are ignored.
    #[default]
    Idle,
    /// Between a pointer-down and its pointer-up.
    Drawing {
        /// Where the previous segment ended.
        last: Point,
    },
}

impl StrokeState {
    /// Whether a stroke is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// The last recorded point, if drawing.
    #[must_use]
    pub fn last_point(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Drawing { last } => Some(*last),
        }
    }

    /// Pointer down: start a stroke at `at`.
    ///
    /// A second down without an up restarts the stroke at the new point.
    pub fn begin(&mut self, at: Point) {
        *self = Self::Drawing { last: at };
    }

    /// Pointer move: extend the stroke to `to`.
    ///
    /// Returns the segment to draw, or `None` when idle.
    pub fn extend(&mut self, to: Point) -> Option<Segment> {
        match self {
            Self::Idle => None,
            Self::Drawing { last } => {
                let segment = Segment { from: *last, to };
                *last = to;
                Some(segment)
            }
        }
    }

    /// Pointer up: end the stroke. Returns whether one was in progress.
    pub fn end(&mut self) -> bool {
        let was_drawing = self.is_drawing();
        *self = Self::Idle;
        was_drawing
    }
}
