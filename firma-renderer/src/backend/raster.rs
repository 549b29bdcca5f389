//! Headless raster surface backed by a tiny-skia pixmap.

use firma_core::{DeviceTransform, LineCap, PadResult, Segment, StrokeStyle, Surface};
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

use crate::error::{RenderError, RenderResult};
use crate::export::{png_data_url, EMPTY_DATA_URL};

/// In-memory surface that rasterizes segments with anti-aliasing.
///
/// A zero-sized transform leaves the surface without a pixmap; it then
/// draws nothing and exports [`EMPTY_DATA_URL`].
pub struct RasterSurface {
    pixmap: Option<Pixmap>,
    transform: Transform,
    stroke: Stroke,
    paint: Paint<'static>,
}

impl RasterSurface {
    /// Create an unconfigured surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pixmap: None,
            transform: Transform::identity(),
            stroke: Stroke::default(),
            paint: Paint::default(),
        }
    }

    /// The backing pixmap, if it has any pixels.
    #[must_use]
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Number of pixels with any coverage.
    #[must_use]
    pub fn inked_pixels(&self) -> usize {
        self.pixmap.as_ref().map_or(0, |pixmap| {
            pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
        })
    }

    /// Encode the contents as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface has no pixels or encoding fails.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or_else(|| RenderError::Export("surface has no pixels".to_string()))?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Reallocate the pixmap at `width` x `height`, keeping the overlapping
    /// top-left region of the previous contents.
    fn reallocate(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            self.pixmap = None;
            return Ok(());
        }
        if let Some(existing) = &self.pixmap {
            if existing.width() == width && existing.height() == height {
                return Ok(());
            }
        }

        let mut next = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Surface(format!("cannot allocate {width}x{height} pixmap"))
        })?;
        if let Some(previous) = &self.pixmap {
            next.draw_pixmap(
                0,
                0,
                previous.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
        self.pixmap = Some(next);
        Ok(())
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RasterSurface {
    #[allow(clippy::cast_possible_truncation)]
    fn configure(&mut self, transform: &DeviceTransform, style: &StrokeStyle) -> PadResult<()> {
        let (width, height) = transform.device_size();
        self.reallocate(width, height)?;

        let scale = transform.scale as f32;
        self.transform = Transform::from_scale(scale, scale);

        self.stroke = Stroke {
            width: style.line_width as f32,
            line_cap: match style.line_cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            ..Stroke::default()
        };

        let [r, g, b, a] = style.color;
        self.paint.set_color_rgba8(r, g, b, a);
        self.paint.anti_alias = true;

        tracing::trace!("Raster surface configured {width}x{height} @ {scale}x");
        Ok(())
    }

    fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(Color::TRANSPARENT);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_segment(&mut self, segment: &Segment) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(segment.from.x as f32, segment.from.y as f32);
        pb.line_to(segment.to.x as f32, segment.to.y as f32);

        match pb.finish() {
            Some(path) => {
                pixmap.stroke_path(&path, &self.paint, &self.stroke, self.transform, None);
            }
            None => tracing::trace!("Skipping degenerate segment {segment:?}"),
        }
    }

    fn to_data_url(&self) -> PadResult<String> {
        if self.pixmap.is_none() {
            return Ok(EMPTY_DATA_URL.to_string());
        }
        Ok(png_data_url(&self.encode_png()?))
    }

    fn pixel_size(&self) -> (u32, u32) {
        self.pixmap
            .as_ref()
            .map_or((0, 0), |pixmap| (pixmap.width(), pixmap.height()))
    }
}
