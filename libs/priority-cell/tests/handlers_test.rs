use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use priority_cell::priority_routes;
use schedule_store_cell::{AppState, Patient, ScheduleStore, SlotWindow};
use shared_utils::test_utils::{birth_date_for_age, TestConfig};

fn create_app_with_patient(age: i32, conditions: Vec<String>) -> (Router, Patient) {
    let mut store = ScheduleStore::new(SlotWindow::default());
    let patient = store.add_patient(Patient::new("Maria", birth_date_for_age(age), conditions));
    let state = AppState::with_store(TestConfig::default().to_app_config(), store);
    (priority_routes(state), patient)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_priority_score_endpoint() {
    let (app, patient) = create_app_with_patient(70, vec![]);

    let (status, body) = post_json(
        app,
        "/priority/score",
        json!({ "patient_id": patient.id, "appointment_type": "clinica_geral" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assessment"]["score"], 7);
    assert_eq!(body["waitlist_priority"], 4);
}

#[tokio::test]
async fn test_priority_score_unknown_patient() {
    let (app, _) = create_app_with_patient(40, vec![]);

    let (status, body) = post_json(
        app,
        "/priority/score",
        json!({ "patient_id": Uuid::new_v4(), "appointment_type": "consulta" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_no_show_endpoint_returns_probability() {
    let (app, patient) = create_app_with_patient(40, vec![]);

    let (status, body) = post_json(
        app,
        "/priority/no-show",
        json!({ "patient_id": patient.id, "date": "2026-03-16", "time": "10:00" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let probability = body["probability"].as_f64().unwrap();
    assert!((probability - 0.15).abs() < 1e-9);
}

#[tokio::test]
async fn test_best_time_endpoint() {
    let (app, patient) = create_app_with_patient(40, vec![]);

    let (status, body) = post_json(
        app,
        "/priority/best-time",
        json!({ "patient_id": patient.id, "available_times": ["08:00", "10:00", "16:30"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggested_time"], "10:00");
}

#[tokio::test]
async fn test_best_time_rejects_empty_list() {
    let (app, patient) = create_app_with_patient(40, vec![]);

    let (status, _) = post_json(
        app,
        "/priority/best-time",
        json!({ "patient_id": patient.id, "available_times": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
