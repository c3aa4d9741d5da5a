use axum::{routing::post, Router};

use schedule_store_cell::AppState;

use crate::handlers::*;

pub fn priority_routes(state: AppState) -> Router {
    Router::new()
        .route("/priority/score", post(calculate_priority))
        .route("/priority/no-show", post(predict_no_show))
        .route("/priority/best-time", post(suggest_best_time))
        .with_state(state)
}
