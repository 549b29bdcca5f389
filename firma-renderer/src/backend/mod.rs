//! Surface backends.

#[cfg(feature = "wasm")]
pub mod canvas2d;
#[cfg(feature = "raster")]
pub mod raster;
