//! Input events for the signature pad.
//!
//! Mouse and touch input are folded into one shape. Positions are viewport
//! (client) coordinates; the pad makes them element-local.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Phase of a pointer or touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed or finger down.
    Down,
    /// Pointer or finger moved.
    Move,
    /// Button released or finger lifted, anywhere in the window.
    Up,
    /// Touch cancelled by the platform. Handled like [`PointerPhase::Up`].
    Cancel,
}

impl PointerPhase {
    /// Whether this phase ends a stroke.
    #[must_use]
    pub fn is_release(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }

    /// Whether the platform's default action for this event (scrolling,
    /// text selection, synthesized mouse events) must be suppressed.
    #[must_use]
    pub fn suppresses_default(self) -> bool {
        matches!(self, Self::Down)
    }
}

/// Device that produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    /// Mouse or pen reported through mouse events.
    Mouse,
    /// Touch screen.
    Touch,
}

/// A unified pointer/touch event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Originating device.
    pub source: PointerSource,
    /// Client position, absent when a touch event carries no active touches.
    pub position: Option<Point>,
}

impl InputEvent {
    /// A mouse event at client position (`x`, `y`).
    #[must_use]
    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            source: PointerSource::Mouse,
            position: Some(Point::new(x, y)),
        }
    }

    /// A touch event. Only the first active touch is tracked.
    #[must_use]
    pub fn touch(phase: PointerPhase, touches: &[Point]) -> Self {
        Self {
            phase,
            source: PointerSource::Touch,
            position: touches.first().copied(),
        }
    }

    /// Translate a platform touch event from its phase and active touches.
    ///
    /// A release needs no touches; `touchend` and `touchcancel` usually
    /// arrive after the last finger has left. A down or move without touches
    /// carries nothing to draw and yields `None`.
    #[must_use]
    pub fn from_touches(phase: PointerPhase, touches: &[Point]) -> Option<Self> {
        if touches.is_empty() && !phase.is_release() {
            return None;
        }
        Some(Self::touch(phase, touches))
    }
}
