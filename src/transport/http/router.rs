use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

use crate::domain::crop::CropRecord;
use crate::domain::stats::YieldSummary;
use crate::storage::credentials::AuthenticatedUser;
use crate::transport::http::handlers::{auth, crops, health};
use crate::transport::http::types::{
    AddCropRequest, ApiResponse, AppState, SigninRequest, SignupRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        auth::signup_handler,
        auth::signin_handler,
        crops::list_crops_handler,
        crops::add_crop_handler,
        crops::get_crop_handler,
        crops::delete_crop_handler
    ),
    components(schemas(
        ApiResponse,
        SignupRequest,
        SigninRequest,
        AddCropRequest,
        CropRecord,
        YieldSummary,
        AuthenticatedUser
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/signin", post(auth::signin_handler))
        .route(
            "/crops",
            get(crops::list_crops_handler).post(crops::add_crop_handler),
        )
        .route(
            "/crops/:crop_id",
            get(crops::get_crop_handler).delete(crops::delete_crop_handler),
        )
        .with_state(app_state)
}
