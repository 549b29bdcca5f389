//! # Firma Core
//!
//! Platform independent logic for the free-hand signature pad used by the
//! evaluation form.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 firma-core                  │
//! ├─────────────────────────────────────────────┤
//! │  SignaturePad    │  Geometry                │
//! │  - Binding       │  - Display rect          │
//! │  - Stroke state  │  - Device transform      │
//! ├─────────────────────────────────────────────┤
//! │  Seams           │  Host payload            │
//! │  - Surface       │  - Sign request          │
//! │  - PadHost       │                          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The pad never talks to a DOM directly. A [`PadHost`] finds the drawing
//! element and wires input listeners; a [`Surface`] owns the pixels.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod pad;
pub mod payload;
pub mod stroke;

pub use config::{LineCap, PadConfig};
pub use error::{PadError, PadResult};
pub use event::{InputEvent, PointerPhase, PointerSource};
pub use geometry::{DeviceTransform, Point, Rect};
pub use host::{PadHost, Surface};
pub use pad::{BindOutcome, InputOutcome, SignaturePad};
pub use payload::SignRequest;
pub use stroke::{Segment, StrokeState, StrokeStyle};

/// Firma core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
