use std::env;
use std::str::FromStr;
use tracing::warn;

/// Longest look-ahead, in days, any search or booking window may use.
pub const MAX_HORIZON_DAYS: u32 = 365;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub slot_window_start_hour: u32,
    pub slot_window_end_hour: u32,
    pub scheduling_horizon_days: u32,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            slot_window_start_hour: 8,
            slot_window_end_hour: 17,
            scheduling_horizon_days: 30,
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let mut config = Self {
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| {
                    warn!("BIND_ADDR not set, using default");
                    defaults.bind_addr.clone()
                }),
            slot_window_start_hour: parse_or_default(
                "SLOT_WINDOW_START_HOUR",
                defaults.slot_window_start_hour,
            ),
            slot_window_end_hour: parse_or_default(
                "SLOT_WINDOW_END_HOUR",
                defaults.slot_window_end_hour,
            ),
            scheduling_horizon_days: parse_or_default(
                "SCHEDULING_HORIZON_DAYS",
                defaults.scheduling_horizon_days,
            ),
            seed_demo_data: parse_or_default("SEED_DEMO_DATA", defaults.seed_demo_data),
        };

        if config.scheduling_horizon_days > MAX_HORIZON_DAYS {
            warn!(
                "SCHEDULING_HORIZON_DAYS {} is above {}, capping it",
                config.scheduling_horizon_days, MAX_HORIZON_DAYS
            );
            config.scheduling_horizon_days = MAX_HORIZON_DAYS;
        }

        if !config.is_configured() {
            warn!(
                "Slot window {}h-{}h is empty or out of range, schedules cannot be generated",
                config.slot_window_start_hour, config.slot_window_end_hour
            );
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        self.slot_window_start_hour < self.slot_window_end_hour
            && self.slot_window_end_hour <= 24
            && self.scheduling_horizon_days <= MAX_HORIZON_DAYS
    }

    /// Number of half-hour slots a freshly created schedule receives.
    pub fn slots_per_schedule(&self) -> usize {
        if self.slot_window_start_hour >= self.slot_window_end_hour
            || self.slot_window_end_hour > 24
        {
            return 0;
        }
        ((self.slot_window_end_hour - self.slot_window_start_hour) * 2) as usize
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {:?}", key, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {:?}", key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_has_eighteen_slots() {
        let config = AppConfig::default();
        assert!(config.is_configured());
        assert_eq!(config.slots_per_schedule(), 18);
    }

    #[test]
    fn test_inverted_window_is_not_configured() {
        let config = AppConfig {
            slot_window_start_hour: 18,
            slot_window_end_hour: 8,
            ..AppConfig::default()
        };
        assert!(!config.is_configured());
        assert_eq!(config.slots_per_schedule(), 0);
    }

    #[test]
    fn test_horizon_above_limit_is_not_configured() {
        let config = AppConfig {
            scheduling_horizon_days: MAX_HORIZON_DAYS + 1,
            ..AppConfig::default()
        };
        assert!(!config.is_configured());
        assert_eq!(config.slots_per_schedule(), 18);
    }

    #[test]
    fn test_from_env_caps_scheduling_horizon() {
        env::set_var("SCHEDULING_HORIZON_DAYS", "4294967295");
        let config = AppConfig::from_env();
        env::remove_var("SCHEDULING_HORIZON_DAYS");

        assert_eq!(config.scheduling_horizon_days, MAX_HORIZON_DAYS);
    }
}
