//! Seams between the pad and its platform.

use crate::{DeviceTransform, PadResult, Rect, Segment, StrokeStyle};

/// A raster drawing target owned by the pad while bound.
pub trait Surface {
    /// Resize the backing buffer to `transform`'s device size, apply its scale
    /// so later segments are given in logical coordinates, and set `style`.
    ///
    /// Pixels that still fit in the new buffer are kept unscaled; nothing is
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be allocated.
    fn configure(&mut self, transform: &DeviceTransform, style: &StrokeStyle) -> PadResult<()>;

    /// Erase every pixel to fully transparent.
    fn clear(&mut self);

    /// Rasterize one segment with the configured style.
    fn draw_segment(&mut self, segment: &Segment);

    /// Encode the current contents as a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    fn to_data_url(&self) -> PadResult<String>;

    /// Backing buffer size in device pixels.
    fn pixel_size(&self) -> (u32, u32);
}

/// The page hosting the pad.
///
/// The host resolves element ids to surfaces, reports layout and screen
/// density, and owns the input listeners that feed
/// [`SignaturePad::handle_input`](crate::SignaturePad::handle_input) and
/// [`SignaturePad::handle_resize`](crate::SignaturePad::handle_resize).
pub trait PadHost {
    /// Surface type produced by this host.
    type Surface: Surface;

    /// Find the drawing element named `target_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is missing or cannot be drawn on.
    fn locate_surface(&mut self, target_id: &str) -> PadResult<Self::Surface>;

    /// Whether two surfaces stand for the same element node.
    ///
    /// An element re-rendered under the same id is a different node.
    fn same_element(&self, bound: &Self::Surface, located: &Self::Surface) -> bool;

    /// Current on-screen box of `surface`'s element.
    fn display_rect(&self, surface: &Self::Surface) -> Rect;

    /// Reported device pixel ratio of the screen.
    fn device_pixel_ratio(&self) -> f64;

    /// Register pointer, touch, release and resize listeners for `surface`.
    ///
    /// Called once per bound lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error if a listener cannot be registered.
    fn attach_listeners(&mut self, surface: &Self::Surface) -> PadResult<()>;

    /// Remove everything registered by [`PadHost::attach_listeners`].
    fn detach_listeners(&mut self);
}
