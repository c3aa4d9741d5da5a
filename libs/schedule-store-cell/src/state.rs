use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use shared_config::AppConfig;

use crate::models::SlotWindow;
use crate::services::ScheduleStore;

/// Store handle shared by every cell. Any read-then-write sequence (booking a
/// slot, draining a waitlist, rebooking) must run under one write guard.
pub type SharedStore = Arc<RwLock<ScheduleStore>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: SharedStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let window = SlotWindow::from_config(&config);
        let store = if config.seed_demo_data {
            ScheduleStore::with_demo_data(window, Self::today())
        } else {
            ScheduleStore::new(window)
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: AppConfig, store: ScheduleStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}
