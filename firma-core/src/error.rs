//! Error types for signature pad operations.

use thiserror::Error;

/// Result type for signature pad operations.
pub type PadResult<T> = Result<T, PadError>;

/// Errors that can occur below the pad's fail-soft boundary.
#[derive(Debug, Error)]
pub enum PadError {
    /// No element with the requested id exists in the host page.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The element exists but cannot be drawn on.
    #[error("Element is not a drawing surface: {0}")]
    NotASurface(String),

    /// The surface refused to allocate or configure its backing buffer.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Encoding the surface contents failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Registering or removing an input listener failed.
    #[error("Listener error: {0}")]
    Listener(String),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A host payload is missing a required field.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
