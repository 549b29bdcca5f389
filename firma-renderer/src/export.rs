//! Signature export to and from PNG data URLs.
//!
//! Surfaces export `data:image/png;base64,...`. A surface with no pixels
//! exports [`EMPTY_DATA_URL`], which is what a browser canvas returns for a
//! 0x0 bitmap.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{RenderError, RenderResult};

/// Prefix of every non-empty export.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Export of a surface with zero width or height.
pub const EMPTY_DATA_URL: &str = "data:,";

/// Wrap encoded PNG bytes in a data URL.
#[must_use]
pub fn png_data_url(png: &[u8]) -> String {
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len() * 4 / 3 + 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(png, &mut url);
    url
}

/// Recover the raw bytes from a data URL.
///
/// Everything up to the first comma is treated as the header and skipped; a
/// string without a comma is decoded as bare base64.
///
/// # Errors
///
/// Returns [`RenderError::Decode`] if the payload is not valid base64.
pub fn decode_data_url(data_url: &str) -> RenderResult<Vec<u8>> {
    let payload = data_url
        .split_once(',')
        .map_or(data_url, |(_, payload)| payload);
    STANDARD
        .decode(payload.trim())
        .map_err(|e| RenderError::Decode(format!("invalid base64 payload: {e}")))
}

/// A decoded signature image.
#[cfg(feature = "raster")]
#[derive(Debug, Clone)]
pub struct DecodedSignature {
    image: image::RgbaImage,
}

#[cfg(feature = "raster")]
impl DecodedSignature {
    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Alpha of the pixel at (`x`, `y`); zero outside the image.
    #[must_use]
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel_checked(x, y).map_or(0, |p| p.0[3])
    }

    /// Number of pixels with any coverage.
    #[must_use]
    pub fn inked_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] > 0).count()
    }

    /// Whether every pixel is fully transparent.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }
}

/// Decode PNG bytes.
///
/// # Errors
///
/// Returns [`RenderError::Decode`] if the bytes are not a PNG.
#[cfg(feature = "raster")]
pub fn decode_png(png: &[u8]) -> RenderResult<DecodedSignature> {
    let image = image::load_from_memory_with_format(png, image::ImageFormat::Png)
        .map_err(|e| RenderError::Decode(format!("PNG decoding failed: {e}")))?
        .to_rgba8();
    Ok(DecodedSignature { image })
}

/// Decode an exported data URL back into pixels.
///
/// # Errors
///
/// Returns [`RenderError::Decode`] for an empty export or an invalid payload.
#[cfg(feature = "raster")]
pub fn decode_signature(data_url: &str) -> RenderResult<DecodedSignature> {
    let png = decode_data_url(data_url)?;
    if png.is_empty() {
        return Err(RenderError::Decode("empty signature export".to_string()));
    }
    decode_png(&png)
}
