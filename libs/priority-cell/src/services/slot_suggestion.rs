use chrono::NaiveTime;

use schedule_store_cell::Patient;

use crate::services::history::AppointmentHistory;
use crate::services::priority::PriorityEngine;

/// Times offered first to patients we know nothing about.
pub const PREFERRED_TIMES: [(u32, u32); 4] = [(9, 0), (10, 0), (14, 0), (15, 0)];

impl<H: AppointmentHistory + ?Sized> PriorityEngine<'_, H> {
    /// Picks the slot the patient is most likely to attend. `None` only when
    /// `available_times` is empty.
    pub fn suggest_best_time(&self, patient: &Patient, available_times: &[NaiveTime]) -> Option<NaiveTime> {
        let first = *available_times.first()?;
        let history = self.history_of(patient.id);

        let suggestion = if history.is_empty() {
            PREFERRED_TIMES
                .iter()
                .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
                .find(|preferred| available_times.contains(preferred))
        } else {
            available_times
                .iter()
                .copied()
                .find(|time| history.completed_times.contains(time))
        };

        Some(suggestion.unwrap_or(first))
    }
}
