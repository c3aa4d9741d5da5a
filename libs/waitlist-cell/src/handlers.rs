use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use schedule_store_cell::AppState;
use shared_models::error::AppError;

use crate::models::{AdjustPriorityRequest, CreateWaitlistEntryRequest, WaitlistQuery};
use crate::services::WaitlistService;

#[axum::debug_handler]
pub async fn add_to_waitlist(
    State(state): State<AppState>,
    Json(request): Json<CreateWaitlistEntryRequest>,
) -> Result<Json<Value>, AppError> {
    let entry = WaitlistService::from_state(&state)
        .add_to_waitlist(request)
        .await?;

    Ok(Json(json!(entry)))
}

#[axum::debug_handler]
pub async fn list_waitlist(
    State(state): State<AppState>,
    Query(query): Query<WaitlistQuery>,
) -> Result<Json<Value>, AppError> {
    let entries = WaitlistService::from_state(&state)
        .list(query.specialty.as_deref())
        .await;

    Ok(Json(json!({
        "entries": entries,
        "total": entries.len()
    })))
}

#[axum::debug_handler]
pub async fn record_contact(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let entry = WaitlistService::from_state(&state)
        .record_contact(entry_id)
        .await?;

    Ok(Json(json!(entry)))
}

#[axum::debug_handler]
pub async fn withdraw_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let entry = WaitlistService::from_state(&state).withdraw(entry_id).await?;

    Ok(Json(json!(entry)))
}

#[axum::debug_handler]
pub async fn adjust_priority(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<AdjustPriorityRequest>,
) -> Result<Json<Value>, AppError> {
    let entry = WaitlistService::from_state(&state)
        .adjust_priority(entry_id, request.priority)
        .await?;

    Ok(Json(json!(entry)))
}

#[axum::debug_handler]
pub async fn process_waitlist(
    State(state): State<AppState>,
    Path(specialty): Path<String>,
) -> Result<Json<Value>, AppError> {
    info!("Waitlist processing requested for {}", specialty);

    let run = WaitlistService::from_state(&state).process(&specialty).await;

    Ok(Json(json!({
        "run": run,
        "scheduled": run.scheduled_count(),
        "skipped": run.skipped_count()
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let result = WaitlistService::from_state(&state)
        .cancel_and_rebook(appointment_id)
        .await?;

    Ok(Json(json!(result)))
}
