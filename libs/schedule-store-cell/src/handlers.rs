use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    BlockScheduleRequest, BookAppointmentRequest, CreatePatientRequest, CreateScheduleRequest,
    OpenSchedulesQuery, Patient, SchedulingPolicy, UpdateAppointmentStatusRequest,
    UpdateConditionsRequest,
};
use crate::state::AppState;

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::ValidationError("name is required".to_string()));
    }

    let mut patient = Patient::new(request.name, request.birth_date, request.chronic_conditions);
    patient.cns = request.cns;

    let patient = state.store.write().await.add_patient(patient);
    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;
    let patient = store
        .get_patient_by_id(patient_id)
        .ok_or_else(|| AppError::NotFound(format!("Patient {} not found", patient_id)))?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn update_patient_conditions(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
    Json(request): Json<UpdateConditionsRequest>,
) -> Result<Json<Value>, AppError> {
    let mut store = state.store.write().await;
    if !store.update_chronic_conditions(patient_id, request.chronic_conditions) {
        return Err(AppError::NotFound(format!("Patient {} not found", patient_id)));
    }

    Ok(Json(json!(store.get_patient_by_id(patient_id))))
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;
    let mut appointments = store.get_appointments_for_patient(patient_id);
    appointments.sort_by_key(|a| (a.date, a.time));

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn list_facilities(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;
    let facilities = store.list_active_facilities();

    Ok(Json(json!({
        "facilities": facilities,
        "total": facilities.len()
    })))
}

#[axum::debug_handler]
pub async fn list_professionals(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;
    let professionals = store.list_all_professionals();

    Ok(Json(json!({
        "professionals": professionals,
        "total": professionals.len()
    })))
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let schedule = state.store.write().await.create_schedule(request)?;
    Ok(Json(json!(schedule)))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;
    let schedule = store
        .get_schedule_by_id(schedule_id)
        .ok_or_else(|| AppError::NotFound(format!("Schedule {} not found", schedule_id)))?;

    Ok(Json(json!(schedule)))
}

#[axum::debug_handler]
pub async fn find_open_schedules(
    State(state): State<AppState>,
    Query(query): Query<OpenSchedulesQuery>,
) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;
    let schedules = store.find_open_schedules(&query.specialty, query.date);

    Ok(Json(json!({
        "schedules": schedules,
        "total": schedules.len()
    })))
}

#[axum::debug_handler]
pub async fn block_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
    Json(request): Json<BlockScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let mut store = state.store.write().await;
    if !store.block_schedule(schedule_id, request.blocked, request.reason) {
        return Err(AppError::NotFound(format!("Schedule {} not found", schedule_id)));
    }

    Ok(Json(json!(store.get_schedule_by_id(schedule_id))))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppState>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .store
        .write()
        .await
        .book_appointment(request, AppState::today())?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateAppointmentStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .store
        .write()
        .await
        .update_appointment_status(appointment_id, request.status)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_configuration(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;
    Ok(Json(json!(store.get_configuration())))
}

#[axum::debug_handler]
pub async fn save_configuration(
    State(state): State<AppState>,
    Json(policy): Json<SchedulingPolicy>,
) -> Result<Json<Value>, AppError> {
    let mut store = state.store.write().await;
    store.save_configuration(policy)?;

    Ok(Json(json!(store.get_configuration())))
}
