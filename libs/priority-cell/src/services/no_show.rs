use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use tracing::debug;

use schedule_store_cell::Patient;

use crate::services::history::AppointmentHistory;
use crate::services::priority::PriorityEngine;

pub const BASELINE_NO_SHOW_PROBABILITY: f64 = 0.15;

const SAME_WEEKDAY_ADJUSTMENT: f64 = 0.1;
const OFF_HOURS_ADJUSTMENT: f64 = 0.05;
const YOUNG_ADULT_ADJUSTMENT: f64 = 0.05;
const ELDERLY_ADJUSTMENT: f64 = -0.05;

impl<H: AppointmentHistory + ?Sized> PriorityEngine<'_, H> {
    /// Chance in `[0, 1]` that the patient misses an appointment at `date` `time`.
    pub fn predict_no_show_probability(&self, patient: &Patient, date: NaiveDate, time: NaiveTime) -> f64 {
        let history = self.history_of(patient.id);

        let mut probability = match history.no_show_rate() {
            None => BASELINE_NO_SHOW_PROBABILITY,
            Some(rate) => {
                let mut p = rate;
                if history.no_show_weekdays.contains(&date.weekday()) {
                    p += SAME_WEEKDAY_ADJUSTMENT;
                }
                p
            }
        };

        let hour = time.hour();
        if hour < 8 || hour > 16 {
            probability += OFF_HOURS_ADJUSTMENT;
        }

        let age = patient.age_on(self.today);
        if age < 25 {
            probability += YOUNG_ADULT_ADJUSTMENT;
        }
        if age > 65 {
            probability += ELDERLY_ADJUSTMENT;
        }

        let clamped = probability.clamp(0.0, 1.0);
        debug!(
            "No-show probability for patient {} on {} {}: {:.2}",
            patient.id, date, time, clamped
        );
        clamped
    }
}
