use axum::{extract::State, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use schedule_store_cell::{AppState, Patient, ScheduleStore};
use shared_models::error::AppError;

use crate::models::{BestTimeRequest, NoShowRequest, PriorityScoreRequest, PriorityScoreResponse};
use crate::services::PriorityEngine;

fn find_patient(store: &ScheduleStore, patient_id: Uuid) -> Result<&Patient, AppError> {
    store
        .get_patient_by_id(patient_id)
        .ok_or_else(|| AppError::NotFound(format!("Patient {} not found", patient_id)))
}

#[axum::debug_handler]
pub async fn calculate_priority(
    State(state): State<AppState>,
    Json(request): Json<PriorityScoreRequest>,
) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;
    let patient = find_patient(&store, request.patient_id)?;

    let engine = PriorityEngine::new(&*store, AppState::today());
    let assessment = engine.calculate_priority(patient, &request.appointment_type);

    Ok(Json(json!(PriorityScoreResponse {
        patient_id: patient.id,
        waitlist_priority: assessment.waitlist_priority(),
        assessment,
    })))
}

#[axum::debug_handler]
pub async fn predict_no_show(
    State(state): State<AppState>,
    Json(request): Json<NoShowRequest>,
) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;
    let patient = find_patient(&store, request.patient_id)?;

    let engine = PriorityEngine::new(&*store, AppState::today());
    let probability = engine.predict_no_show_probability(patient, request.date, request.time);

    Ok(Json(json!({
        "patient_id": patient.id,
        "probability": probability
    })))
}

#[axum::debug_handler]
pub async fn suggest_best_time(
    State(state): State<AppState>,
    Json(request): Json<BestTimeRequest>,
) -> Result<Json<Value>, AppError> {
    if request.available_times.is_empty() {
        return Err(AppError::BadRequest("available_times cannot be empty".to_string()));
    }

    let store = state.store.read().await;
    let patient = find_patient(&store, request.patient_id)?;

    let engine = PriorityEngine::new(&*store, AppState::today());
    let suggested = engine
        .suggest_best_time(patient, &request.available_times)
        .map(|t| t.format("%H:%M").to_string());

    Ok(Json(json!({
        "patient_id": patient.id,
        "suggested_time": suggested
    })))
}
