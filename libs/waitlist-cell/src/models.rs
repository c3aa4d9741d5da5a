use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use schedule_store_cell::Appointment;
use shared_utils::hhmm;

/// Appointment type given to every booking made from the waiting list.
pub const WAITLIST_APPOINTMENT_TYPE: &str = "consulta";

// ==============================================================================
// PROCESSING OUTCOMES
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    PatientNotFound,
}

/// What happened to one waitlist entry during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WaitlistOutcome {
    Scheduled {
        entry_id: Uuid,
        patient_id: Uuid,
        appointment_id: Uuid,
        schedule_id: Uuid,
        date: NaiveDate,
        #[serde(with = "hhmm")]
        time: NaiveTime,
    },
    Skipped {
        entry_id: Uuid,
        patient_id: Uuid,
        reason: SkipReason,
    },
}

impl WaitlistOutcome {
    pub fn entry_id(&self) -> Uuid {
        match self {
            WaitlistOutcome::Scheduled { entry_id, .. } | WaitlistOutcome::Skipped { entry_id, .. } => *entry_id,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, WaitlistOutcome::Scheduled { .. })
    }
}

/// Summary of one pass over a specialty's waiting list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitlistRun {
    pub specialty: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub outcomes: Vec<WaitlistOutcome>,
    /// Entries of the specialty still waiting once the run is over.
    pub remaining: usize,
}

impl WaitlistRun {
    pub fn scheduled_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_scheduled()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.scheduled_count()
    }

    pub fn appointment_ids(&self) -> Vec<Uuid> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                WaitlistOutcome::Scheduled { appointment_id, .. } => Some(*appointment_id),
                WaitlistOutcome::Skipped { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebookResult {
    pub cancelled: Appointment,
    pub rebooked: Option<Appointment>,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWaitlistEntryRequest {
    pub patient_id: Uuid,
    pub specialty: String,
    pub preferred_facility_id: Option<Uuid>,
    /// Left out to let the priority engine decide.
    pub priority: Option<u8>,
    #[serde(default)]
    pub criteria: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaitlistQuery {
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustPriorityRequest {
    pub priority: u8,
}
