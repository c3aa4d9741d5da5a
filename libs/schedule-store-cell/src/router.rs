use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::*;
use crate::state::AppState;

pub fn schedule_store_routes(state: AppState) -> Router {
    Router::new()
        .route("/patients", post(create_patient))
        .route("/patients/{id}", get(get_patient))
        .route("/patients/{id}/conditions", put(update_patient_conditions))
        .route("/patients/{id}/appointments", get(get_patient_appointments))
        .route("/facilities", get(list_facilities))
        .route("/professionals", get(list_professionals))
        .route("/schedules", post(create_schedule))
        .route("/schedules/open", get(find_open_schedules))
        .route("/schedules/{id}", get(get_schedule))
        .route("/schedules/{id}/block", put(block_schedule))
        .route("/appointments", post(book_appointment))
        .route("/appointments/{id}/status", put(update_appointment_status))
        .route("/configuration", get(get_configuration).put(save_configuration))
        .with_state(state)
}
