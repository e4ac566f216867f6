//! Wire envelope for the remote action-dispatch endpoint.
//!
//! The endpoint is a single URL that branches on the `action` field of the
//! request body. Its response shapes are asymmetric and fixed: `listcrops`
//! wraps the record array as a JSON-encoded string that needs a second
//! decode, while `getcrop` returns one bare record object. Both quirks are
//! modeled here so they cannot drift by convention.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::crop::CropRecord;
use crate::error::Error;

/// One request variant per remote action.
#[derive(Debug, Serialize)]
#[serde(tag = "action")]
pub enum ActionRequest<'a> {
    #[serde(rename = "addcrop")]
    AddCrop {
        crop_id: &'a str,
        crop_name: &'a str,
        yield_quantity: f64,
        harvest_date: String,
    },
    #[serde(rename = "listcrops")]
    ListCrops,
    #[serde(rename = "getcrop")]
    GetCrop { crop_id: &'a str },
    #[serde(rename = "deletecrop")]
    DeleteCrop { crop_id: &'a str },
}

impl ActionRequest<'_> {
    /// Action name as it appears on the wire; used in error details.
    pub fn name(&self) -> &'static str {
        match self {
            ActionRequest::AddCrop { .. } => "addcrop",
            ActionRequest::ListCrops => "listcrops",
            ActionRequest::GetCrop { .. } => "getcrop",
            ActionRequest::DeleteCrop { .. } => "deletecrop",
        }
    }
}

/// `listcrops` reply: the record array arrives JSON-encoded inside `body`.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope {
    pub body: String,
}

impl ListEnvelope {
    /// Second decode step for the wrapped record array.
    pub fn into_records(self) -> Result<Vec<CropRecord>, Error> {
        serde_json::from_str(&self.body)
            .map_err(|e| Error::MalformedResponse(format!("listcrops body: {}", e)))
    }
}

/// Decodes a `getcrop` reply: one bare record object, no wrapping.
///
/// The remote answers 200 with an empty item for unknown identifiers, so a
/// body without a `crop_id` is reported as a failed read, never as a record.
pub fn decode_single_record(body: JsonValue) -> Result<CropRecord, Error> {
    match body.get("crop_id") {
        Some(JsonValue::String(_)) => serde_json::from_value(body)
            .map_err(|e| Error::MalformedResponse(format!("getcrop record: {}", e))),
        _ => Err(Error::RemoteReadFailed {
            action: "getcrop",
            detail: "no record for the given crop_id".to_string(),
        }),
    }
}
