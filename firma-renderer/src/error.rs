//! Renderer error types.

use firma_core::PadError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while drawing or encoding.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The backing buffer or drawing context is unavailable.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Encoding to PNG or a data URL failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// A data URL or PNG could not be decoded.
    #[error("Decode failed: {0}")]
    Decode(String),
}

impl From<RenderError> for PadError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Surface(msg) => PadError::Surface(msg),
            RenderError::Export(msg) | RenderError::Decode(msg) => PadError::Export(msg),
        }
    }
}
