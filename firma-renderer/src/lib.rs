//! # Firma Renderer
//!
//! Drawing surfaces for the signature pad and the PNG export around them.
//!
//! ## Surfaces
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │          firma_core::Surface trait          │
//! ├──────────────────────┬──────────────────────┤
//! │ RasterSurface        │ Canvas2dSurface      │
//! │ (tiny-skia, native)  │ (web-sys, browser)   │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! [`HeadlessHost`] binds a pad to raster surfaces without a browser, for
//! replaying recorded input on a server and for tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod error;
pub mod export;
#[cfg(feature = "raster")]
pub mod headless;

#[cfg(feature = "wasm")]
pub use backend::canvas2d::Canvas2dSurface;
#[cfg(feature = "raster")]
pub use backend::raster::RasterSurface;
pub use error::{RenderError, RenderResult};
pub use export::{decode_data_url, png_data_url, EMPTY_DATA_URL, PNG_DATA_URL_PREFIX};
#[cfg(feature = "raster")]
pub use export::{decode_png, decode_signature, DecodedSignature};
#[cfg(feature = "raster")]
pub use headless::{HeadlessHost, HeadlessSurface};
