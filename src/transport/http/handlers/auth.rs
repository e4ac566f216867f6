use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::notify::Message;
use crate::transport::http::types::{
    error_response, ApiResponse, AppState, SigninRequest, SignupRequest,
};

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse),
        (status = 409, description = "Username or email already registered", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> impl IntoResponse {
    let user_id = match state
        .credentials
        .register(&request.username, &request.email, &request.password)
        .await
    {
        Ok(id) => id,
        Err(e) => return error_response(&e).into_response(),
    };

    // Welcome mail is best-effort: a failed delivery is reported in the
    // payload and logs but never rolls back the registration.
    let message = Message::compose(
        &state.notify_sender,
        &request.email,
        "Account created",
        &format!(
            "Hi {}, your account was created successfully.",
            request.username
        ),
    );
    let welcome_email_sent = match state.notifier.send(&message).await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "welcome notification not delivered");
            false
        }
    };

    (
        StatusCode::CREATED,
        Json(ApiResponse::ok(json!({
            "user_id": user_id,
            "welcome_email_sent": welcome_email_sent,
        }))),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse),
        (status = 401, description = "Invalid email or password", body = ApiResponse)
    )
)]
pub async fn signin_handler(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> impl IntoResponse {
    match state
        .credentials
        .authenticate(&request.email, &request.password)
        .await
    {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "user": user }))),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}
