use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::domain::crop::{image_url, NewCrop};
use crate::domain::stats::total_yield;
use crate::transport::http::types::{error_response, AddCropRequest, ApiResponse, AppState};

#[utoipa::path(
    get,
    path = "/crops",
    responses(
        (status = 200, description = "All crop records plus the yield summary", body = ApiResponse),
        (status = 502, description = "Remote store unavailable or returned a malformed reply", body = ApiResponse),
        (status = 504, description = "Remote store timed out", body = ApiResponse)
    )
)]
pub async fn list_crops_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.crops.list_crops().await {
        Ok(crops) => {
            let summary = total_yield(&crops);
            (
                StatusCode::OK,
                Json(ApiResponse::ok(json!({
                    "crops": crops,
                    "total_yield": summary.total,
                    "skipped": summary.skipped,
                }))),
            )
                .into_response()
        }
        Err(e) => error_response(&e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/crops",
    request_body = AddCropRequest,
    responses(
        (status = 201, description = "Crop created; identifier was generated client-side", body = ApiResponse),
        (status = 422, description = "Input failed validation", body = ApiResponse),
        (status = 502, description = "Remote store rejected the write", body = ApiResponse)
    )
)]
pub async fn add_crop_handler(
    State(state): State<AppState>,
    Json(request): Json<AddCropRequest>,
) -> impl IntoResponse {
    let new_crop = match NewCrop::parse(
        &request.crop_name,
        &request.yield_quantity,
        &request.harvest_date,
    ) {
        Ok(c) => c,
        Err(e) => return error_response(&e).into_response(),
    };

    match state.crops.add_crop(&new_crop).await {
        Ok(crop) => {
            let image = image_url(&state.image_bucket, &crop.crop_id);
            (
                StatusCode::CREATED,
                Json(ApiResponse::ok(json!({ "crop": crop, "image_url": image }))),
            )
                .into_response()
        }
        Err(e) => error_response(&e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/crops/{crop_id}",
    params(("crop_id" = String, Path, description = "Crop identifier")),
    responses(
        (status = 200, description = "The crop record", body = ApiResponse),
        (status = 502, description = "Remote store failed the read or holds no such record", body = ApiResponse)
    )
)]
pub async fn get_crop_handler(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> impl IntoResponse {
    match state.crops.get_crop(&crop_id).await {
        Ok(crop) => {
            let image = image_url(&state.image_bucket, &crop.crop_id);
            (
                StatusCode::OK,
                Json(ApiResponse::ok(json!({ "crop": crop, "image_url": image }))),
            )
                .into_response()
        }
        Err(e) => error_response(&e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/crops/{crop_id}",
    params(("crop_id" = String, Path, description = "Crop identifier")),
    responses(
        (status = 200, description = "Crop deleted", body = ApiResponse),
        (status = 502, description = "Remote store rejected the delete", body = ApiResponse)
    )
)]
pub async fn delete_crop_handler(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> impl IntoResponse {
    match state.crops.delete_crop(&crop_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "deleted": crop_id }))),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}
