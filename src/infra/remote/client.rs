// All communication with the remote crop store lives here.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value as JsonValue;
use tracing::debug;
use uuid::Uuid;

use crate::domain::crop::{CropRecord, NewCrop};
use crate::error::Error;
use crate::infra::remote::protocol::{decode_single_record, ActionRequest, ListEnvelope};

/// Client for the remote action-dispatch endpoint.
///
/// Every CRUD intent is one synchronous request against a single URL;
/// replies are normalized into [`CropRecord`]s or typed errors. The client
/// is constructed explicitly and injected wherever remote access is needed,
/// so tests can point it at a substitute endpoint.
///
/// The deployed endpoint accepts these calls without any authentication
/// token; that matches the remote contract as it exists today and is an
/// open question, not a feature.
pub struct RecordProxy {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl RecordProxy {
    /// Builds a proxy with a bounded per-request timeout. The remote itself
    /// specifies no deadline and would otherwise block indefinitely.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Creates a crop record.
    ///
    /// The identifier is generated client-side before the call so it is
    /// available to the caller regardless of what the remote store assigns.
    /// Re-invoking after a failure creates a second record under a new
    /// identifier: the remote offers no idempotency guarantee and this
    /// proxy adds none.
    pub async fn add_crop(&self, new_crop: &NewCrop) -> Result<CropRecord, Error> {
        let crop_id = Uuid::new_v4().to_string();
        let harvest_date = new_crop.harvest_date.format("%Y-%m-%d").to_string();
        let request = ActionRequest::AddCrop {
            crop_id: &crop_id,
            crop_name: &new_crop.crop_name,
            yield_quantity: new_crop.yield_quantity,
            harvest_date: harvest_date.clone(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e, request.name(), true))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteWriteFailed {
                action: "addcrop",
                detail: format!("status {}", status),
            });
        }

        debug!(%crop_id, "crop accepted by remote store");
        Ok(CropRecord {
            crop_id,
            crop_name: new_crop.crop_name.clone(),
            yield_quantity: JsonValue::from(new_crop.yield_quantity),
            harvest_date: Some(harvest_date),
        })
    }

    /// Fetches every crop record. Reads are idempotent and safe to re-invoke.
    pub async fn list_crops(&self) -> Result<Vec<CropRecord>, Error> {
        let request = ActionRequest::ListCrops;
        let response = self
            .client
            .get(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e, request.name(), false))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::RemoteReadFailed {
                action: "listcrops",
                detail: format!("status {}", status),
            });
        }

        let envelope: ListEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) if e.is_timeout() => return Err(Error::RemoteTimeout(self.timeout)),
            Err(e) => {
                return Err(Error::MalformedResponse(format!("listcrops envelope: {}", e)))
            }
        };
        envelope.into_records()
    }

    /// Fetches one crop record by its identifier.
    pub async fn get_crop(&self, crop_id: &str) -> Result<CropRecord, Error> {
        let request = ActionRequest::GetCrop { crop_id };
        let response = self
            .client
            .get(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e, request.name(), false))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::RemoteReadFailed {
                action: "getcrop",
                detail: format!("status {}", status),
            });
        }

        let body: JsonValue = match response.json().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return Err(Error::RemoteTimeout(self.timeout)),
            Err(e) => return Err(Error::MalformedResponse(format!("getcrop body: {}", e))),
        };
        decode_single_record(body)
    }

    /// Removes a crop record by its identifier.
    pub async fn delete_crop(&self, crop_id: &str) -> Result<(), Error> {
        let request = ActionRequest::DeleteCrop { crop_id };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e, request.name(), true))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteWriteFailed {
                action: "deletecrop",
                detail: format!("status {}", status),
            });
        }
        debug!(%crop_id, "crop removed from remote store");
        Ok(())
    }

    fn transport_error(&self, err: reqwest::Error, action: &'static str, write: bool) -> Error {
        if err.is_timeout() {
            Error::RemoteTimeout(self.timeout)
        } else if write {
            Error::RemoteWriteFailed {
                action,
                detail: err.to_string(),
            }
        } else {
            Error::RemoteReadFailed {
                action,
                detail: err.to_string(),
            }
        }
    }
}
