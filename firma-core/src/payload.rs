//! Body of the evaluation API's sign request.
//!
//! The pad only produces the image string. Hosts wrap it in a
//! [`SignRequest`] and `POST` it to `/api/evaluaciones/{id}/sign`.

use serde::{Deserialize, Serialize};

use crate::{PadError, PadResult};

/// JSON body attaching a captured signature to an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignRequest {
    /// Signing role key, e.g. `jefe_inmediato`.
    pub role: String,
    /// Printed name of the person signing.
    pub signer_name: String,
    /// PNG data URL as returned by the pad's export.
    pub image_base64: String,
}

impl SignRequest {
    /// Build a request, trimming the role and signer name.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::MissingField`] if any field is empty after
    /// trimming, or if the image carries no data after its header (the
    /// `"data:,"` export of a zero-sized canvas). The API rejects the first
    /// with a 400 and would store the second as an empty file.
    pub fn new(role: &str, signer_name: &str, image_base64: String) -> PadResult<Self> {
        let role = role.trim();
        let signer_name = signer_name.trim();
        if role.is_empty() {
            return Err(PadError::MissingField("role"));
        }
        if signer_name.is_empty() {
            return Err(PadError::MissingField("signer_name"));
        }
        if image_payload(&image_base64).is_empty() {
            return Err(PadError::MissingField("image_base64"));
        }
        Ok(Self {
            role: role.to_string(),
            signer_name: signer_name.to_string(),
            image_base64,
        })
    }

    /// Serialize to the JSON the API expects.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PadResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Part of a data URL after the first comma; the whole string when there is
/// no comma.
fn image_payload(image: &str) -> &str {
    image
        .split_once(',')
        .map_or(image, |(_, payload)| payload)
        .trim()
}
