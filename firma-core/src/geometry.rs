//! Logical and device coordinate spaces.
//!
//! Input arrives in viewport (client) coordinates. The pad subtracts the
//! element's on-screen origin to get logical coordinates, and the surface
//! multiplies logical coordinates by [`DeviceTransform::scale`] when it
//! rasterizes. The two steps are independent: the transform is computed
//! once per bind or resize, the origin subtraction once per event.

use serde::{Deserialize, Serialize};

/// A position in logical (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An element's on-screen box, as reported by the layout engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge in viewport coordinates.
    pub left: f64,
    /// Top edge in viewport coordinates.
    pub top: f64,
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Rect {
    /// Create a rect from its origin and size.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Translate a viewport position into element-local logical coordinates.
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }
}

/// Mapping from logical drawing coordinates to the backing pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceTransform {
    /// Uniform scale from logical to device pixels. Never below the pad's
    /// minimum scale.
    pub scale: f64,
    /// Displayed width in logical pixels.
    pub logical_width: f64,
    /// Displayed height in logical pixels.
    pub logical_height: f64,
    /// Backing buffer width in device pixels.
    pub device_width: u32,
    /// Backing buffer height in device pixels.
    pub device_height: u32,
}

impl DeviceTransform {
    /// Compute the transform for an element displayed at `rect` on a screen
    /// reporting `device_pixel_ratio`, never scaling below `min_scale`.
    ///
    /// Buffer dimensions truncate toward zero, like assigning a fractional
    /// value to a canvas' `width`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn compute(rect: &Rect, device_pixel_ratio: f64, min_scale: f64) -> Self {
        let scale = effective_scale(device_pixel_ratio, min_scale);
        let logical_width = non_negative(rect.width);
        let logical_height = non_negative(rect.height);

        Self {
            scale,
            logical_width,
            logical_height,
            device_width: (logical_width * scale) as u32,
            device_height: (logical_height * scale) as u32,
        }
    }

    /// Backing buffer size in device pixels.
    #[must_use]
    pub fn device_size(&self) -> (u32, u32) {
        (self.device_width, self.device_height)
    }

    /// Whether the backing buffer has no pixels.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.device_width == 0 || self.device_height == 0
    }

    /// Map a logical point into device pixels.
    #[must_use]
    pub fn to_device(&self, point: Point) -> Point {
        Point::new(point.x * self.scale, point.y * self.scale)
    }
}

/// `max(ratio, min_scale)`, treating a missing or nonsensical ratio as 1.
fn effective_scale(device_pixel_ratio: f64, min_scale: f64) -> f64 {
    let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let floor = if min_scale.is_finite() && min_scale > 0.0 {
        min_scale
    } else {
        1.0
    };
    ratio.max(floor)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
