//! Browser surface drawing on an HTML canvas through its 2D context.

use firma_core::{DeviceTransform, PadResult, Segment, StrokeStyle, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::error::{RenderError, RenderResult};

/// A `<canvas>` element and its 2D context.
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// Wrap an existing canvas element.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Surface`] if the 2D context is unavailable.
    pub fn new(canvas: HtmlCanvasElement) -> RenderResult<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| RenderError::Surface("getContext(2d) threw".to_string()))?
            .ok_or_else(|| RenderError::Surface("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::Surface("Failed to cast to 2D context".to_string()))?;

        Ok(Self { canvas, ctx })
    }

    /// The wrapped canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Copy the current bitmap, if it has any pixels.
    fn snapshot(&self) -> Option<ImageData> {
        let (width, height) = self.pixel_size();
        if width == 0 || height == 0 {
            return None;
        }
        self.ctx
            .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
            .map_err(|e| tracing::warn!("getImageData failed, resize will drop strokes: {e:?}"))
            .ok()
    }
}

impl Surface for Canvas2dSurface {
    fn configure(&mut self, transform: &DeviceTransform, style: &StrokeStyle) -> PadResult<()> {
        let saved = self.snapshot();

        // Assigning the size resets both the bitmap and the context state.
        let (width, height) = transform.device_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        if let Some(data) = saved {
            self.ctx
                .put_image_data(&data, 0.0, 0.0)
                .map_err(|_| RenderError::Surface("putImageData failed".to_string()))?;
        }

        self.ctx
            .scale(transform.scale, transform.scale)
            .map_err(|_| RenderError::Surface("scale failed".to_string()))?;
        self.ctx.set_line_width(style.line_width);
        self.ctx.set_line_cap(style.line_cap.as_css());
        self.ctx.set_stroke_style_str(&style.css_color());

        tracing::trace!("Canvas2D surface configured {width}x{height}");
        Ok(())
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    fn draw_segment(&mut self, segment: &Segment) {
        self.ctx.begin_path();
        self.ctx.move_to(segment.from.x, segment.from.y);
        self.ctx.line_to(segment.to.x, segment.to.y);
        self.ctx.stroke();
    }

    fn to_data_url(&self) -> PadResult<String> {
        Ok(self
            .canvas
            .to_data_url_with_type("image/png")
            .map_err(|_| RenderError::Export("toDataURL failed".to_string()))?)
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }
}
