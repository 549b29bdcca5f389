//! # Firma Signature Widget
//!
//! WASM bindings that put the firma signature pad on a page canvas.
//!
//! ## Usage
//!
//! Build for WASM:
//! ```bash
//! wasm-pack build --target web firma-app
//! ```
//!
//! Then, from the evaluation page's signature modal:
//! ```javascript
//! import init, { SignatureWidget } from './pkg/firma_app.js';
//!
//! await init();
//! const sig = new SignatureWidget();
//!
//! // modal opened
//! sig.open('sig-canvas');
//!
//! // "Guardar" clicked
//! const body = sig.signRequestJson(role, signerName);
//! await fetch(`/api/evaluaciones/${id}/sign`, { method: 'POST', body, headers });
//! sig.close();
//! ```
//!
//! Each widget is independent; a page may create one per modal.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod dom;

use std::{cell::RefCell, rc::Rc};

use firma_core::{BindOutcome, PadConfig, SignRequest, SignaturePad};
use wasm_bindgen::prelude::*;

use crate::dom::DomHost;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    tracing::info!("Firma signature widget initialized");
}

/// A signature pad bound to a page canvas on demand.
///
/// `open`, `clear`, `toDataURL` and `close` never throw; before `open` (or
/// after it failed to find the canvas) they do nothing and `toDataURL`
/// returns an empty string.
#[wasm_bindgen]
pub struct SignatureWidget {
    pad: Rc<RefCell<SignaturePad<DomHost>>>,
}

#[wasm_bindgen]
impl SignatureWidget {
    /// Create a widget with the default black 2px round pen.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::with_pad_config(PadConfig::default())
    }

    /// Create a widget from a JSON pad configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<SignatureWidget, JsValue> {
        let config = PadConfig::from_json(json).map_err(|e| js_error(&e.to_string()))?;
        Ok(Self::with_pad_config(config))
    }

    /// Bind to the canvas with id `target_id`, sizing it for the screen and
    /// clearing it.
    pub fn open(&self, target_id: &str) {
        let Ok(mut pad) = self.pad.try_borrow_mut() else {
            tracing::warn!("Signature widget busy, open({target_id}) skipped");
            return;
        };
        match pad.bind(target_id) {
            BindOutcome::Bound | BindOutcome::Rebound => {}
            BindOutcome::TargetMissing => {
                tracing::debug!("No canvas #{target_id}; signature widget stays closed");
            }
            BindOutcome::Failed => {
                tracing::warn!("Signature widget could not open #{target_id}");
            }
        }
    }

    /// Erase the drawing.
    pub fn clear(&self) {
        if let Ok(mut pad) = self.pad.try_borrow_mut() {
            pad.clear();
        }
    }

    /// The drawing as a PNG data URL, or `""` when not open.
    #[wasm_bindgen(js_name = toDataURL)]
    #[must_use]
    pub fn to_data_url(&self) -> String {
        self.pad
            .try_borrow()
            .map(|pad| pad.export_image())
            .unwrap_or_default()
    }

    /// Remove all listeners. The canvas keeps its pixels.
    pub fn close(&self) {
        if let Ok(mut pad) = self.pad.try_borrow_mut() {
            pad.unbind();
        }
    }

    /// Whether the widget is currently bound to a canvas.
    #[wasm_bindgen(js_name = isOpen)]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pad.try_borrow().is_ok_and(|pad| pad.is_bound())
    }

    /// Whether nothing has been drawn since the last open or clear.
    #[wasm_bindgen(js_name = isEmpty)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pad.try_borrow().map_or(true, |pad| pad.is_empty())
    }

    /// Segments drawn since the widget was opened.
    #[wasm_bindgen(js_name = segmentCount)]
    #[must_use]
    pub fn segment_count(&self) -> u32 {
        self.pad.try_borrow().map_or(0, |pad| {
            u32::try_from(pad.segment_count()).unwrap_or(u32::MAX)
        })
    }

    /// JSON body for `POST /api/evaluaciones/{id}/sign` carrying the current
    /// drawing.
    ///
    /// # Errors
    ///
    /// Returns an error if the role or signer name is blank, or the widget is
    /// not open.
    #[wasm_bindgen(js_name = signRequestJson)]
    pub fn sign_request_json(&self, role: &str, signer_name: &str) -> Result<String, JsValue> {
        SignRequest::new(role, signer_name, self.to_data_url())
            .and_then(|request| request.to_json())
            .map_err(|e| js_error(&e.to_string()))
    }
}

impl SignatureWidget {
    fn with_pad_config(config: PadConfig) -> Self {
        let pad = Rc::new_cyclic(|weak| {
            RefCell::new(SignaturePad::new(DomHost::new(weak.clone()), config))
        });
        Self { pad }
    }
}

impl Default for SignatureWidget {
    fn default() -> Self {
        Self::new()
    }
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}
