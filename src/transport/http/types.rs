use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::error::Error;
use crate::infra::remote::RecordProxy;
use crate::notify::NotificationTransport;
use crate::storage::credentials::CredentialStore;

/// Shared handler state. Every dependency is constructed at startup and
/// injected here; there are no process-wide singletons, so tests swap in
/// substitute stores, endpoints, and transports freely.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialStore>,
    pub crops: Arc<RecordProxy>,
    pub notifier: Arc<dyn NotificationTransport>,
    pub image_bucket: String,
    pub notify_sender: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Form-style crop input; values are validated at the proxy boundary, not
/// here.
#[derive(Deserialize, Debug, ToSchema)]
pub struct AddCropRequest {
    pub crop_name: String,
    pub yield_quantity: String,
    pub harvest_date: String,
}

/// Maps an error kind to the status the presentation layer reports.
pub fn error_response(err: &Error) -> (StatusCode, Json<ApiResponse>) {
    let status = match err {
        Error::DuplicateIdentity => StatusCode::CONFLICT,
        Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
        Error::MalformedInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Error::RemoteWriteFailed { .. }
        | Error::RemoteReadFailed { .. }
        | Error::MalformedResponse(_)
        | Error::NotificationFailed(_) => StatusCode::BAD_GATEWAY,
        Error::RemoteTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        Error::Store(_) | Error::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::err(err.to_string())))
}
