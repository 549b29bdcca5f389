//! Integration tests for signature capture and export (firma-renderer).
//!
//! Drives a headless pad through bind, strokes, clear, resize and unbind and
//! checks the exported PNG pixels.

use firma_core::{
    BindOutcome, InputEvent, InputOutcome, PadConfig, PointerPhase, Rect, SignRequest,
    SignaturePad,
};
use firma_renderer::{
    decode_data_url, decode_signature, HeadlessHost, EMPTY_DATA_URL, PNG_DATA_URL_PREFIX,
};

const TARGET: &str = "sig-canvas";

/// Pad on a 300x150 element placed at (40, 80) in the viewport.
fn headless_pad(ratio: f64) -> SignaturePad<HeadlessHost> {
    let host = HeadlessHost::new(ratio).with_element(TARGET, Rect::new(40.0, 80.0, 300.0, 150.0));
    SignaturePad::new(host, PadConfig::default())
}

/// Client coordinates for an element-local point.
fn client(x: f64, y: f64) -> (f64, f64) {
    (x + 40.0, y + 80.0)
}

fn press(pad: &mut SignaturePad<HeadlessHost>, x: f64, y: f64) -> InputOutcome {
    let (cx, cy) = client(x, y);
    pad.handle_input(&InputEvent::mouse(PointerPhase::Down, cx, cy))
}

fn drag(pad: &mut SignaturePad<HeadlessHost>, x: f64, y: f64) -> InputOutcome {
    let (cx, cy) = client(x, y);
    pad.handle_input(&InputEvent::mouse(PointerPhase::Move, cx, cy))
}

fn release(pad: &mut SignaturePad<HeadlessHost>) -> InputOutcome {
    // Released outside the surface.
    pad.handle_input(&InputEvent::mouse(PointerPhase::Up, 2000.0, 2000.0))
}

// ==========================================================================
// Lifecycle before bind
// ==========================================================================

#[test]
fn test_export_before_bind_is_empty() {
    let mut pad = headless_pad(1.0);
    assert_eq!(pad.export_image(), "");
    pad.clear();
    pad.unbind();
    pad.handle_resize();
    assert_eq!(press(&mut pad, 10.0, 10.0), InputOutcome::Ignored);
    assert_eq!(pad.export_image(), "");
}

#[test]
fn test_missing_canvas_is_a_noop() {
    let mut pad = headless_pad(1.0);
    assert_eq!(pad.bind("firma-canvas"), BindOutcome::TargetMissing);
    assert_eq!(pad.export_image(), "");
    assert_eq!(pad.host().attach_count(), 0);
}

// ==========================================================================
// Stroke, export, clear
// ==========================================================================

#[test]
fn test_stroke_then_clear_scenario() {
    let mut pad = headless_pad(1.0);
    assert_eq!(pad.bind(TARGET), BindOutcome::Bound);

    press(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    assert_eq!(release(&mut pad), InputOutcome::StrokeEnded);

    let first = pad.export_image();
    assert!(first.starts_with(PNG_DATA_URL_PREFIX));
    let image = decode_signature(&first).expect("decode first export");
    assert_eq!((image.width(), image.height()), (300, 150));
    assert!(!image.is_blank());
    for x in [12, 20, 30, 40, 48] {
        assert!(image.alpha_at(x, 10) > 0, "expected ink at ({x}, 10)");
    }
    assert_eq!(image.alpha_at(30, 60), 0);
    assert_eq!(image.alpha_at(200, 10), 0);

    pad.clear();
    let second = pad.export_image();
    let image = decode_signature(&second).expect("decode second export");
    assert_eq!((image.width(), image.height()), (300, 150));
    assert!(image.is_blank());
    assert!(pad.is_empty());
}

#[test]
fn test_clear_always_yields_transparent_export() {
    let mut pad = headless_pad(2.0);
    pad.bind(TARGET);

    for stroke in 0..5 {
        let y = 20.0 + f64::from(stroke) * 20.0;
        press(&mut pad, 5.0, y);
        for step in 1..=10 {
            drag(&mut pad, 5.0 + f64::from(step) * 25.0, y + f64::from(step % 3));
        }
        release(&mut pad);
    }
    assert!(decode_signature(&pad.export_image()).expect("decode").inked_pixels() > 0);

    pad.clear();
    assert!(decode_signature(&pad.export_image()).expect("decode").is_blank());
}

#[test]
fn test_high_density_export_is_device_sized() {
    let mut pad = headless_pad(2.0);
    pad.bind(TARGET);
    press(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    release(&mut pad);

    let image = decode_signature(&pad.export_image()).expect("decode");
    assert_eq!((image.width(), image.height()), (600, 300));
    // Logical (30, 10) lands on device (60, 20).
    assert!(image.alpha_at(60, 20) > 0);
    assert_eq!(image.alpha_at(30, 10), 0);
}

#[test]
fn test_moves_without_press_leave_export_blank() {
    let mut pad = headless_pad(1.0);
    pad.bind(TARGET);
    drag(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    release(&mut pad);
    drag(&mut pad, 90.0, 90.0);

    assert!(decode_signature(&pad.export_image()).expect("decode").is_blank());
    assert_eq!(pad.segment_count(), 0);
}

// ==========================================================================
// Binding lifecycle
// ==========================================================================

#[test]
fn test_double_bind_attaches_listeners_once() {
    let mut pad = headless_pad(1.0);
    assert_eq!(pad.bind(TARGET), BindOutcome::Bound);
    assert_eq!(pad.bind(TARGET), BindOutcome::Rebound);
    assert_eq!(pad.host().attach_count(), 1);
    assert!(pad.host().is_listening());

    press(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    assert_eq!(pad.segment_count(), 1);
}

#[test]
fn test_rebind_clears_previous_signature() {
    let mut pad = headless_pad(1.0);
    pad.bind(TARGET);
    press(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    release(&mut pad);

    assert_eq!(pad.bind(TARGET), BindOutcome::Rebound);
    assert!(decode_signature(&pad.export_image()).expect("decode").is_blank());
}

#[test]
fn test_unbind_stops_drawing() {
    let mut pad = headless_pad(1.0);
    pad.bind(TARGET);
    press(&mut pad, 10.0, 10.0);
    pad.unbind();

    assert!(!pad.host().is_listening());
    assert_eq!(pad.host().detach_count(), 1);
    assert_eq!(drag(&mut pad, 50.0, 10.0), InputOutcome::Ignored);
    assert_eq!(pad.export_image(), "");

    // Reopening starts from a blank surface with fresh listeners.
    assert_eq!(pad.bind(TARGET), BindOutcome::Bound);
    assert_eq!(pad.host().attach_count(), 2);
    assert_eq!(drag(&mut pad, 50.0, 10.0), InputOutcome::Ignored);
    assert!(decode_signature(&pad.export_image()).expect("decode").is_blank());
}

#[test]
fn test_hidden_canvas_exports_empty_data_url() {
    let host = HeadlessHost::new(2.0).with_element(TARGET, Rect::new(0.0, 0.0, 0.0, 0.0));
    let mut pad = SignaturePad::new(host, PadConfig::default());
    assert_eq!(pad.bind(TARGET), BindOutcome::Bound);
    press(&mut pad, 1.0, 1.0);
    drag(&mut pad, 5.0, 5.0);
    assert_eq!(pad.export_image(), EMPTY_DATA_URL);
    assert!(pad.is_empty());
    assert!(SignRequest::new("jefe_inmediato", "Luis", pad.export_image()).is_err());
}

#[test]
fn test_rebind_after_canvas_removed() {
    let mut pad = headless_pad(1.0);
    pad.bind(TARGET);
    press(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    release(&mut pad);

    pad.host_mut().remove_element(TARGET);
    assert_eq!(pad.bind(TARGET), BindOutcome::TargetMissing);
    assert!(!pad.is_bound());
    assert!(!pad.host().is_listening());
    // No stale drawing from the detached canvas.
    assert_eq!(pad.export_image(), "");
}

#[test]
fn test_rebind_after_canvas_rerendered() {
    let mut pad = headless_pad(1.0);
    pad.bind(TARGET);
    press(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    release(&mut pad);

    pad.host_mut().rerender_element(TARGET);
    assert_eq!(pad.bind(TARGET), BindOutcome::Bound);
    assert_eq!(pad.host().attach_count(), 2);
    assert_eq!(pad.host().detach_count(), 1);
    assert!(pad.is_empty());
    assert!(decode_signature(&pad.export_image()).expect("decode").is_blank());

    press(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    assert!(decode_signature(&pad.export_image()).expect("decode").alpha_at(30, 10) > 0);
}

// ==========================================================================
// Resize
// ==========================================================================

#[test]
fn test_resize_mid_stroke() {
    let mut pad = headless_pad(1.0);
    pad.bind(TARGET);
    press(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    let last = pad.stroke().last_point();

    pad.host_mut()
        .set_element_rect(TARGET, Rect::new(40.0, 80.0, 400.0, 200.0));
    pad.handle_resize();

    // Buffer follows the layout; the stroke in progress does not move.
    assert_eq!(
        pad.transform().map(|t| t.device_size()),
        Some((400, 200))
    );
    assert_eq!(pad.stroke().last_point(), last);
    assert!(pad.is_drawing());

    drag(&mut pad, 50.0, 40.0);
    release(&mut pad);

    let image = decode_signature(&pad.export_image()).expect("decode");
    assert_eq!((image.width(), image.height()), (400, 200));
    // Pixels from before the resize are kept at their old position.
    assert!(image.alpha_at(30, 10) > 0);
    // The continued stroke runs down from the old last point.
    assert!(image.alpha_at(50, 25) > 0);
}

#[test]
fn test_density_change_on_resize_does_not_rescale_old_strokes() {
    let mut pad = headless_pad(1.0);
    pad.bind(TARGET);
    press(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    release(&mut pad);

    pad.host_mut().set_device_pixel_ratio(2.0);
    pad.handle_resize();

    let image = decode_signature(&pad.export_image()).expect("decode");
    assert_eq!((image.width(), image.height()), (600, 300));
    // Old ink stays at 1x coordinates.
    assert!(image.alpha_at(30, 10) > 0);
    assert_eq!(image.alpha_at(60, 20), 0);
}

// ==========================================================================
// Host payload
// ==========================================================================

#[test]
fn test_export_feeds_sign_request() {
    let mut pad = headless_pad(1.0);
    pad.bind(TARGET);
    press(&mut pad, 10.0, 10.0);
    drag(&mut pad, 50.0, 10.0);
    release(&mut pad);

    let request =
        SignRequest::new("jefe_inmediato", "María López", pad.export_image()).expect("request");
    let png = decode_data_url(&request.image_base64).expect("payload decodes");
    assert_eq!(&png[0..4], &[137, 80, 78, 71]);
}

#[test]
fn test_unbound_export_cannot_be_signed() {
    let pad = headless_pad(1.0);
    assert!(SignRequest::new("jefe_inmediato", "Luis", pad.export_image()).is_err());
}
