use axum::{
    routing::{get, post, put},
    Router,
};

use schedule_store_cell::AppState;

use crate::handlers::*;

pub fn waitlist_routes(state: AppState) -> Router {
    Router::new()
        .route("/waitlist", get(list_waitlist).post(add_to_waitlist))
        .route("/waitlist/process/{specialty}", post(process_waitlist))
        .route("/waitlist/{id}/contact", post(record_contact))
        .route("/waitlist/{id}/withdraw", post(withdraw_entry))
        .route("/waitlist/{id}/priority", put(adjust_priority))
        .route("/appointments/{id}/cancel", post(cancel_appointment))
        .with_state(state)
}
