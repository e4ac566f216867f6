//! Record proxy behavior against an in-process stand-in for the remote
//! action-dispatch endpoint, speaking its exact wire contract: a single URL
//! multiplexed by the `action` field, a double-encoded `listcrops` body,
//! and a bare record object from `getcrop`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value as JsonValue};
use tokio::sync::Mutex;

use cropdesk::{total_yield, Error, NewCrop, RecordProxy};

type CropTable = Arc<Mutex<HashMap<String, JsonValue>>>;

async fn dispatch(State(table): State<CropTable>, Json(payload): Json<JsonValue>) -> axum::response::Response {
    let action = payload
        .get("action")
        .and_then(|a| a.as_str())
        .unwrap_or_default()
        .to_string();
    let mut table = table.lock().await;
    match action.as_str() {
        "addcrop" => {
            let crop_id = payload["crop_id"].as_str().unwrap().to_string();
            let record = json!({
                "crop_id": crop_id,
                "crop_name": payload["crop_name"].clone(),
                "yield_quantity": payload["yield_quantity"].clone(),
                "harvest_date": payload["harvest_date"].clone(),
            });
            table.insert(crop_id, record);
            (StatusCode::OK, Json(json!({ "message": "crop added" }))).into_response()
        }
        "listcrops" => {
            let records: Vec<&JsonValue> = table.values().collect();
            // The real endpoint wraps the array as a JSON-encoded string.
            let body = serde_json::to_string(&records).unwrap();
            (StatusCode::OK, Json(json!({ "body": body }))).into_response()
        }
        "getcrop" => {
            let crop_id = payload["crop_id"].as_str().unwrap_or_default();
            match table.get(crop_id) {
                Some(record) => (StatusCode::OK, Json(record.clone())).into_response(),
                // Unknown ids come back as 200 with an empty item.
                None => (StatusCode::OK, Json(json!({}))).into_response(),
            }
        }
        "deletecrop" => {
            let crop_id = payload["crop_id"].as_str().unwrap_or_default();
            table.remove(crop_id);
            (StatusCode::OK, Json(json!({ "message": "crop deleted" }))).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "unknown action" })),
        )
            .into_response(),
    }
}

async fn spawn_fake_remote() -> String {
    let table: CropTable = Arc::new(Mutex::new(HashMap::new()));
    let router = Router::new()
        .route("/", get(dispatch).post(dispatch))
        .with_state(table);
    spawn_router(router).await
}

async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn proxy(endpoint: String) -> RecordProxy {
    RecordProxy::new(endpoint, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn add_then_get_round_trips() {
    let endpoint = spawn_fake_remote().await;
    let proxy = proxy(endpoint);

    let new_crop = NewCrop::parse("Wheat", "120", "2024-05-01").unwrap();
    let created = proxy.add_crop(&new_crop).await.unwrap();
    assert_eq!(created.crop_name, "Wheat");
    assert_eq!(created.harvest_date.as_deref(), Some("2024-05-01"));
    assert!(!created.crop_id.is_empty());

    let fetched = proxy.get_crop(&created.crop_id).await.unwrap();
    assert_eq!(fetched.crop_id, created.crop_id);
    assert_eq!(fetched.crop_name, "Wheat");
    assert_eq!(fetched.yield_quantity.as_f64(), Some(120.0));
    assert_eq!(fetched.harvest_date.as_deref(), Some("2024-05-01"));
}

#[tokio::test]
async fn each_add_generates_a_distinct_identifier() {
    let endpoint = spawn_fake_remote().await;
    let proxy = proxy(endpoint);

    let new_crop = NewCrop::parse("Oats", "40", "2024-09-15").unwrap();
    let first = proxy.add_crop(&new_crop).await.unwrap();
    let second = proxy.add_crop(&new_crop).await.unwrap();

    // Re-submission is not deduplicated: two independent records exist.
    assert_ne!(first.crop_id, second.crop_id);
    let listed = proxy.list_crops().await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn list_feeds_the_aggregator() {
    let endpoint = spawn_fake_remote().await;
    let proxy = proxy(endpoint);

    for (name, quantity, date) in [
        ("Wheat", "120", "2024-05-01"),
        ("Barley", "30.5", "2024-06-10"),
    ] {
        let new_crop = NewCrop::parse(name, quantity, date).unwrap();
        proxy.add_crop(&new_crop).await.unwrap();
    }

    let crops = proxy.list_crops().await.unwrap();
    assert_eq!(crops.len(), 2);
    let summary = total_yield(&crops);
    assert_eq!(summary.total, 150.5);
    assert_eq!(summary.skipped, 0);
}

#[tokio::test]
async fn delete_then_get_reports_a_failed_read() {
    let endpoint = spawn_fake_remote().await;
    let proxy = proxy(endpoint);

    let new_crop = NewCrop::parse("Maize", "75", "2024-08-20").unwrap();
    let created = proxy.add_crop(&new_crop).await.unwrap();

    proxy.delete_crop(&created.crop_id).await.unwrap();

    let err = proxy.get_crop(&created.crop_id).await.unwrap_err();
    assert!(
        matches!(
            err,
            Error::RemoteReadFailed {
                action: "getcrop",
                ..
            }
        ),
        "a deleted crop must never come back as a stale record, got {:?}",
        err
    );
}

#[tokio::test]
async fn malformed_list_body_is_reported_as_such() {
    let router = Router::new().route(
        "/",
        get(|| async { (StatusCode::OK, Json(json!({ "body": "this is not json" }))) }),
    );
    let endpoint = spawn_router(router).await;
    let proxy = proxy(endpoint);

    let err = proxy.list_crops().await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn non_200_list_is_a_failed_read() {
    let router = Router::new().route(
        "/",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "boom" })),
            )
        }),
    );
    let endpoint = spawn_router(router).await;
    let proxy = proxy(endpoint);

    let err = proxy.list_crops().await.unwrap_err();
    assert!(matches!(
        err,
        Error::RemoteReadFailed {
            action: "listcrops",
            ..
        }
    ));
}

#[tokio::test]
async fn rejected_write_is_a_failed_write() {
    let router = Router::new().route(
        "/",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR })
            .post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let endpoint = spawn_router(router).await;
    let proxy = proxy(endpoint);

    let new_crop = NewCrop::parse("Spelt", "10", "2024-07-07").unwrap();
    let add_err = proxy.add_crop(&new_crop).await.unwrap_err();
    assert!(matches!(
        add_err,
        Error::RemoteWriteFailed {
            action: "addcrop",
            ..
        }
    ));

    let delete_err = proxy.delete_crop("whatever-id").await.unwrap_err();
    assert!(matches!(
        delete_err,
        Error::RemoteWriteFailed {
            action: "deletecrop",
            ..
        }
    ));
}

#[tokio::test]
async fn slow_remote_times_out() {
    let router = Router::new().route(
        "/",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            (StatusCode::OK, Json(json!({ "body": "[]" })))
        }),
    );
    let endpoint = spawn_router(router).await;
    let proxy = RecordProxy::new(endpoint, Duration::from_millis(200)).unwrap();

    let err = proxy.list_crops().await.unwrap_err();
    assert!(matches!(err, Error::RemoteTimeout(_)));
}
