//! DOM host: finds the canvas, reads layout and owns the event listeners.

use std::{cell::RefCell, rc::Weak};

use firma_core::{
    InputEvent, PadError, PadHost, PadResult, Point, PointerPhase, Rect, SignaturePad,
};
use firma_renderer::Canvas2dSurface;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, MouseEvent};

type WeakPad = Weak<RefCell<SignaturePad<DomHost>>>;
type Callback = Closure<dyn FnMut(Event)>;

/// One registered listener. Dropping it removes it from its target.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Callback,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        callback: Callback,
        passive: Option<bool>,
    ) -> PadResult<Self> {
        let registered = match passive {
            Some(passive) => {
                let options = AddEventListenerOptions::new();
                options.set_passive(passive);
                target.add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    callback.as_ref().unchecked_ref(),
                    &options,
                )
            }
            None => {
                target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            }
        };
        registered.map_err(|_| PadError::Listener(format!("addEventListener({kind})")))?;

        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Host backed by the page's `document` and `window`.
///
/// Listeners hold a weak reference to the pad, so the pad owns its host
/// without a reference cycle.
pub(crate) struct DomHost {
    pad: WeakPad,
    listeners: Vec<Listener>,
}

impl DomHost {
    pub(crate) fn new(pad: WeakPad) -> Self {
        Self {
            pad,
            listeners: Vec::new(),
        }
    }

    fn mouse_callback(&self, phase: PointerPhase) -> Callback {
        let pad = self.pad.clone();
        Closure::wrap(Box::new(move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if phase.suppresses_default() {
                event.prevent_default();
            }
            let input = InputEvent::mouse(
                phase,
                f64::from(mouse.client_x()),
                f64::from(mouse.client_y()),
            );
            dispatch(&pad, &input);
        }) as Box<dyn FnMut(Event)>)
    }

    fn touch_callback(&self, phase: PointerPhase) -> Callback {
        let pad = self.pad.clone();
        Closure::wrap(Box::new(move |event: Event| {
            let Some(touch) = event.dyn_ref::<web_sys::TouchEvent>() else {
                return;
            };
            if phase.suppresses_default() {
                event.prevent_default();
            }
            let first = touch
                .touches()
                .get(0)
                .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())));
            if let Some(input) = InputEvent::from_touches(phase, first.as_slice()) {
                dispatch(&pad, &input);
            }
        }) as Box<dyn FnMut(Event)>)
    }

    fn resize_callback(&self) -> Callback {
        let pad = self.pad.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            let Some(pad) = pad.upgrade() else {
                return;
            };
            if let Ok(mut pad) = pad.try_borrow_mut() {
                pad.handle_resize();
            };
        }) as Box<dyn FnMut(Event)>)
    }
}

fn dispatch(pad: &WeakPad, input: &InputEvent) {
    let Some(pad) = pad.upgrade() else {
        return;
    };
    match pad.try_borrow_mut() {
        Ok(mut pad) => {
            pad.handle_input(input);
        }
        Err(_) => tracing::trace!("Dropping re-entrant {:?} event", input.phase),
    };
}

impl PadHost for DomHost {
    type Surface = Canvas2dSurface;

    fn locate_surface(&mut self, target_id: &str) -> PadResult<Canvas2dSurface> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| PadError::Surface("DOM not available".to_string()))?;
        let element = document
            .get_element_by_id(target_id)
            .ok_or_else(|| PadError::ElementNotFound(target_id.to_string()))?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| PadError::NotASurface(target_id.to_string()))?;

        Ok(Canvas2dSurface::new(canvas)?)
    }

    fn same_element(&self, bound: &Canvas2dSurface, located: &Canvas2dSurface) -> bool {
        bound.canvas() == located.canvas()
    }

    fn display_rect(&self, surface: &Canvas2dSurface) -> Rect {
        let rect = surface.canvas().get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn device_pixel_ratio(&self) -> f64 {
        web_sys::window().map_or(1.0, |w| w.device_pixel_ratio())
    }

    fn attach_listeners(&mut self, surface: &Canvas2dSurface) -> PadResult<()> {
        let window = web_sys::window()
            .ok_or_else(|| PadError::Listener("window not available".to_string()))?;
        let canvas: &EventTarget = surface.canvas().as_ref();
        let window: &EventTarget = window.as_ref();

        // Releases are tracked on the window so a stroke ends even when the
        // pointer leaves the canvas first.
        let listeners = vec![
            Listener::attach(canvas, "mousedown", self.mouse_callback(PointerPhase::Down), None)?,
            Listener::attach(canvas, "mousemove", self.mouse_callback(PointerPhase::Move), None)?,
            Listener::attach(window, "mouseup", self.mouse_callback(PointerPhase::Up), None)?,
            Listener::attach(
                canvas,
                "touchstart",
                self.touch_callback(PointerPhase::Down),
                Some(false),
            )?,
            Listener::attach(
                canvas,
                "touchmove",
                self.touch_callback(PointerPhase::Move),
                Some(false),
            )?,
            Listener::attach(window, "touchend", self.touch_callback(PointerPhase::Up), None)?,
            Listener::attach(
                window,
                "touchcancel",
                self.touch_callback(PointerPhase::Cancel),
                None,
            )?,
            Listener::attach(window, "resize", self.resize_callback(), None)?,
        ];

        self.listeners = listeners;
        Ok(())
    }

    fn detach_listeners(&mut self) {
        self.listeners.clear();
    }
}
