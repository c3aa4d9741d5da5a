use std::sync::Arc;
use chrono::{Datelike, NaiveDate};

use shared_config::AppConfig;

pub struct TestConfig {
    pub slot_window_start_hour: u32,
    pub slot_window_end_hour: u32,
    pub scheduling_horizon_days: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            slot_window_start_hour: 8,
            slot_window_end_hour: 17,
            scheduling_horizon_days: 30,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            slot_window_start_hour: self.slot_window_start_hour,
            slot_window_end_hour: self.slot_window_end_hour,
            scheduling_horizon_days: self.scheduling_horizon_days,
            seed_demo_data: false,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Fixed reference date so age and window calculations are reproducible.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

/// Birth date giving `age` full years on [`test_today`].
pub fn birth_date_for_age(age: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(test_today().year() - age, 1, 1).unwrap()
}
