// libs/priority-cell/src/services/priority.rs
//
// Priority heuristics used to order the waiting list and to bias automatic
// rebooking. These are weighted rules, not a trained model.

use chrono::NaiveDate;
use tracing::{debug, instrument};
use uuid::Uuid;

use schedule_store_cell::Patient;

use crate::models::{PriorityAssessment, MAX_SCORE, MIN_SCORE};
use crate::services::history::{AppointmentHistory, PatientHistory};

const BASE_SCORE: f64 = 5.0;
const CHRONIC_CONDITION_WEIGHT: f64 = 0.5;
const CRITICAL_SPECIALTY_BONUS: f64 = 2.0;
const FREQUENT_NO_SHOW_RATE: f64 = 0.3;
const FREQUENT_NO_SHOW_PENALTY: f64 = 2.0;
const CHRONIC_NO_SHOW_RATE: f64 = 0.5;
const CHRONIC_NO_SHOW_PENALTY: f64 = 3.0;

/// Specialties whose appointments get a fixed bump, in both languages the UI
/// sends.
const CRITICAL_SPECIALTIES: &[&str] = &[
    "cardiologia",
    "cardiology",
    "oncologia",
    "oncology",
    "neurologia",
    "neurology",
];

pub struct PriorityEngine<'a, H: AppointmentHistory + ?Sized> {
    pub(crate) history: &'a H,
    pub(crate) today: NaiveDate,
}

impl<'a, H: AppointmentHistory + ?Sized> PriorityEngine<'a, H> {
    pub fn new(history: &'a H, today: NaiveDate) -> Self {
        Self { history, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub(crate) fn history_of(&self, patient_id: Uuid) -> PatientHistory {
        PatientHistory::collect(self.history, patient_id, self.today)
    }

    /// Scores clinical and social need from 1 (lowest) to 10 (highest).
    #[instrument(skip(self, patient), fields(patient_id = %patient.id))]
    pub fn calculate_priority(&self, patient: &Patient, appointment_type: &str) -> PriorityAssessment {
        let mut score = BASE_SCORE;
        let mut criteria = Vec::new();

        let age = patient.age_on(self.today);
        if age >= 65 {
            score += 2.0;
            criteria.push("elderly_65_plus".to_string());
        } else if age <= 2 {
            score += 3.0;
            criteria.push("infant_up_to_2".to_string());
        } else if age >= 60 {
            score += 1.0;
            criteria.push("senior_60_plus".to_string());
        }

        let conditions = patient.chronic_conditions.len();
        if conditions > 0 {
            score += CHRONIC_CONDITION_WEIGHT * conditions as f64;
            criteria.push(format!("chronic_conditions:{}", conditions));
        }

        if is_critical_specialty(appointment_type) {
            score += CRITICAL_SPECIALTY_BONUS;
            criteria.push("critical_specialty".to_string());
        }

        if let Some(rate) = self.history_of(patient.id).no_show_rate() {
            if rate > FREQUENT_NO_SHOW_RATE {
                score -= FREQUENT_NO_SHOW_PENALTY;
                criteria.push("frequent_no_show".to_string());
            }
            if rate > CHRONIC_NO_SHOW_RATE {
                score -= CHRONIC_NO_SHOW_PENALTY;
            }
        }

        let rounded = round_half_up(score).clamp(MIN_SCORE as f64, MAX_SCORE as f64) as u8;
        debug!("Priority for patient {}: raw {} -> {}", patient.id, score, rounded);

        PriorityAssessment {
            score: rounded,
            raw_score: score,
            criteria,
        }
    }
}

pub fn is_critical_specialty(appointment_type: &str) -> bool {
    let normalized = appointment_type.trim().to_lowercase();
    CRITICAL_SPECIALTIES.contains(&normalized.as_str())
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
