//! The signature pad widget.
//!
//! A [`SignaturePad`] is either unbound or bound to one surface. Binding
//! sizes the surface for the screen density, clears it and asks the host to
//! attach listeners; unbinding detaches them. Every operation degrades to a
//! no-op or an empty result while unbound, so a host page can call them in
//! any order without guarding.

use crate::{
    DeviceTransform, InputEvent, PadConfig, PadError, PadHost, PadResult, PointerPhase,
    Segment, StrokeState, StrokeStyle, Surface,
};

/// Result of [`SignaturePad::bind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// Newly bound; listeners attached.
    Bound,
    /// Already bound to this target; surface resized and cleared, listeners
    /// left as they were.
    Rebound,
    /// The target element does not exist. The pad stays unbound.
    TargetMissing,
    /// The surface or its listeners could not be set up. The pad stays
    /// unbound.
    Failed,
}

/// What an input event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    /// Nothing changed.
    Ignored,
    /// A stroke began.
    StrokeStarted,
    /// A segment was drawn.
    SegmentDrawn(Segment),
    /// The stroke in progress ended.
    StrokeEnded,
}

struct BoundSurface<S> {
    target_id: String,
    surface: S,
    transform: DeviceTransform,
}

enum Binding<S> {
    Unbound,
    Bound(BoundSurface<S>),
}

/// Free-hand signature capture over a host-provided surface.
pub struct SignaturePad<H: PadHost> {
    host: H,
    config: PadConfig,
    style: StrokeStyle,
    binding: Binding<H::Surface>,
    stroke: StrokeState,
    segment_count: u64,
    inked: bool,
}

impl<H: PadHost> SignaturePad<H> {
    /// Create an unbound pad.
    #[must_use]
    pub fn new(host: H, config: PadConfig) -> Self {
        let style = config.stroke_style();
        Self {
            host,
            config,
            style,
            binding: Binding::Unbound,
            stroke: StrokeState::Idle,
            segment_count: 0,
            inked: false,
        }
    }

    /// Bind to the element named `target_id`.
    ///
    /// The element is looked up on every call. If it is the node already
    /// bound, sizing and clearing re-run without registering listeners a
    /// second time. Any other outcome releases the old binding first, so a
    /// pad never keeps drawing on an element that left the page.
    pub fn bind(&mut self, target_id: &str) -> BindOutcome {
        let mut surface = match self.host.locate_surface(target_id) {
            Ok(surface) => surface,
            Err(PadError::ElementNotFound(_)) => {
                self.unbind();
                tracing::debug!("Signature pad not bound: no element {target_id}");
                return BindOutcome::TargetMissing;
            }
            Err(e) => {
                self.unbind();
                tracing::warn!("Signature pad not bound: {e}");
                return BindOutcome::Failed;
            }
        };

        if let Binding::Bound(bound) = &mut self.binding {
            if bound.target_id == target_id && self.host.same_element(&bound.surface, &surface) {
                match prepare(&self.host, &mut bound.surface, &self.config, &self.style) {
                    Ok(transform) => {
                        bound.transform = transform;
                        self.inked = false;
                    }
                    Err(e) => tracing::warn!("Resizing {target_id} on rebind failed: {e}"),
                }
                tracing::debug!("Signature pad rebound to {target_id}");
                return BindOutcome::Rebound;
            }
        }

        self.unbind();

        let transform = match prepare(&self.host, &mut surface, &self.config, &self.style) {
            Ok(transform) => transform,
            Err(e) => {
                tracing::warn!("Signature surface {target_id} unavailable: {e}");
                return BindOutcome::Failed;
            }
        };

        if let Err(e) = self.host.attach_listeners(&surface) {
            tracing::warn!("Listener registration for {target_id} failed: {e}");
            self.host.detach_listeners();
            return BindOutcome::Failed;
        }

        tracing::debug!(
            "Signature pad bound to {target_id} ({}x{} @ {}x)",
            transform.device_width,
            transform.device_height,
            transform.scale
        );

        self.binding = Binding::Bound(BoundSurface {
            target_id: target_id.to_string(),
            surface,
            transform,
        });
        self.stroke = StrokeState::Idle;
        self.segment_count = 0;
        self.inked = false;
        BindOutcome::Bound
    }

    /// Remove listeners and release the surface. Idempotent.
    pub fn unbind(&mut self) {
        if let Binding::Bound(bound) = std::mem::replace(&mut self.binding, Binding::Unbound) {
            self.host.detach_listeners();
            tracing::debug!("Signature pad unbound from {}", bound.target_id);
        }
        self.stroke = StrokeState::Idle;
        self.segment_count = 0;
        self.inked = false;
    }

    /// Erase the drawing. Stroke state is left alone, so a stroke in progress
    /// continues from its last point.
    pub fn clear(&mut self) {
        if let Binding::Bound(bound) = &mut self.binding {
            bound.surface.clear();
            self.inked = false;
        }
    }

    /// Current drawing as a PNG data URL, or an empty string when unbound.
    #[must_use]
    pub fn export_image(&self) -> String {
        match &self.binding {
            Binding::Unbound => String::new(),
            Binding::Bound(bound) => bound.surface.to_data_url().unwrap_or_else(|e| {
                tracing::warn!("Signature export failed: {e}");
                String::new()
            }),
        }
    }

    /// Feed one pointer or touch event.
    pub fn handle_input(&mut self, event: &InputEvent) -> InputOutcome {
        let Binding::Bound(bound) = &mut self.binding else {
            return InputOutcome::Ignored;
        };

        if event.phase.is_release() {
            return if self.stroke.end() {
                InputOutcome::StrokeEnded
            } else {
                InputOutcome::Ignored
            };
        }

        let Some(client) = event.position else {
            return InputOutcome::Ignored;
        };
        let at = self.host.display_rect(&bound.surface).to_local(client);

        match event.phase {
            PointerPhase::Down => {
                self.stroke.begin(at);
                InputOutcome::StrokeStarted
            }
            PointerPhase::Move => match self.stroke.extend(at) {
                Some(segment) => {
                    bound.surface.draw_segment(&segment);
                    self.segment_count += 1;
                    self.inked |= has_pixels(&bound.surface);
                    tracing::trace!(
                        "Segment ({}, {}) -> ({}, {})",
                        segment.from.x,
                        segment.from.y,
                        segment.to.x,
                        segment.to.y
                    );
                    InputOutcome::SegmentDrawn(segment)
                }
                None => InputOutcome::Ignored,
            },
            PointerPhase::Up | PointerPhase::Cancel => InputOutcome::Ignored,
        }
    }

    /// Recompute geometry after the window resized.
    ///
    /// The backing buffer follows the new layout but existing pixels are
    /// neither cleared nor rescaled, and a stroke in progress keeps its last
    /// logical point.
    pub fn handle_resize(&mut self) {
        let Binding::Bound(bound) = &mut self.binding else {
            return;
        };
        let transform = measure(&self.host, &bound.surface, &self.config);
        match bound.surface.configure(&transform, &self.style) {
            Ok(()) => {
                tracing::debug!(
                    "Signature surface resized to {}x{}",
                    transform.device_width,
                    transform.device_height
                );
                bound.transform = transform;
            }
            Err(e) => tracing::warn!("Signature surface resize failed: {e}"),
        }
    }

    /// Whether a surface is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self.binding, Binding::Bound(_))
    }

    /// Whether a stroke is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_drawing()
    }

    /// Whether the surface holds no ink: unbound, zero-sized, or nothing
    /// drawn since the last bind or clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.binding {
            Binding::Unbound => true,
            Binding::Bound(bound) => !self.inked || !has_pixels(&bound.surface),
        }
    }

    /// Segments committed since the pad was bound.
    #[must_use]
    pub fn segment_count(&self) -> u64 {
        self.segment_count
    }

    /// Current stroke state.
    #[must_use]
    pub fn stroke(&self) -> StrokeState {
        self.stroke
    }

    /// Geometry of the bound surface.
    #[must_use]
    pub fn transform(&self) -> Option<DeviceTransform> {
        match &self.binding {
            Binding::Unbound => None,
            Binding::Bound(bound) => Some(bound.transform),
        }
    }

    /// Id of the bound element.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        match &self.binding {
            Binding::Unbound => None,
            Binding::Bound(bound) => Some(&bound.target_id),
        }
    }

    /// The bound surface.
    #[must_use]
    pub fn surface(&self) -> Option<&H::Surface> {
        match &self.binding {
            Binding::Unbound => None,
            Binding::Bound(bound) => Some(&bound.surface),
        }
    }

    /// Pad configuration.
    #[must_use]
    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: PadHost> Drop for SignaturePad<H> {
    fn drop(&mut self) {
        self.unbind();
    }
}

fn has_pixels<S: Surface>(surface: &S) -> bool {
    let (width, height) = surface.pixel_size();
    width > 0 && height > 0
}

fn measure<H: PadHost>(host: &H, surface: &H::Surface, config: &PadConfig) -> DeviceTransform {
    let rect = host.display_rect(surface);
    DeviceTransform::compute(&rect, host.device_pixel_ratio(), config.min_scale)
}

/// Size, style and clear a surface for a fresh bind.
fn prepare<H: PadHost>(
    host: &H,
    surface: &mut H::Surface,
    config: &PadConfig,
    style: &StrokeStyle,
) -> PadResult<DeviceTransform> {
    let transform = measure(host, surface, config);
    surface.configure(&transform, style)?;
    surface.clear();
    Ok(transform)
}
