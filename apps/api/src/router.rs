use axum::{routing::get, Router};

use priority_cell::priority_routes;
use schedule_store_cell::{schedule_store_routes, AppState};
use waitlist_cell::waitlist_routes;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Municipal scheduling API is running!" }))
        .merge(schedule_store_routes(state.clone()))
        .merge(priority_routes(state.clone()))
        .merge(waitlist_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use shared_utils::test_utils::TestConfig;
    use tower::ServiceExt;

    fn app() -> Router {
        let mut config = TestConfig::default().to_app_config();
        config.seed_demo_data = true;
        create_router(AppState::new(config))
    }

    async fn get_status(uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        assert_eq!(get_status("/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_every_cell_is_mounted() {
        assert_eq!(get_status("/facilities").await, StatusCode::OK);
        assert_eq!(get_status("/configuration").await, StatusCode::OK);
        assert_eq!(get_status("/waitlist?specialty=Cardiologia").await, StatusCode::OK);

        let request = Request::builder()
            .method("POST")
            .uri("/priority/best-time")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"patient_id":"00000000-0000-0000-0000-000000000000","available_times":[]}"#,
            ))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
