use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{AppointmentStatus, WaitlistStatus};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Schedule not found: {0}")]
    ScheduleNotFound(Uuid),

    #[error("Patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(Uuid),

    #[error("Professional not found: {0}")]
    ProfessionalNotFound(Uuid),

    #[error("Facility not found: {0}")]
    FacilityNotFound(Uuid),

    #[error("Waitlist entry not found: {0}")]
    WaitlistEntryNotFound(Uuid),

    #[error("Waitlist entry {id} is already closed ({status:?})")]
    WaitlistEntryClosed { id: Uuid, status: WaitlistStatus },

    #[error("Schedule {schedule_id} is blocked{}", block_suffix(.reason))]
    ScheduleBlocked {
        schedule_id: Uuid,
        reason: Option<String>,
    },

    #[error("Schedule {schedule_id} has no slot at {time}")]
    SlotNotFound { schedule_id: Uuid, time: NaiveTime },

    #[error("Slot {time} of schedule {schedule_id} is already taken")]
    SlotUnavailable { schedule_id: Uuid, time: NaiveTime },

    #[error("Schedule {0} has no free quota left")]
    QuotaExhausted(Uuid),

    #[error("Invalid appointment status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Date {date} is outside the booking window {earliest}..={latest}")]
    OutsideBookingWindow {
        date: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

fn block_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default()
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::ScheduleNotFound(_)
            | StoreError::PatientNotFound(_)
            | StoreError::AppointmentNotFound(_)
            | StoreError::ProfessionalNotFound(_)
            | StoreError::FacilityNotFound(_)
            | StoreError::WaitlistEntryNotFound(_)
            | StoreError::SlotNotFound { .. } => AppError::NotFound(message),
            StoreError::ScheduleBlocked { .. }
            | StoreError::SlotUnavailable { .. }
            | StoreError::QuotaExhausted(_)
            | StoreError::InvalidStatusTransition { .. }
            | StoreError::WaitlistEntryClosed { .. } => AppError::Conflict(message),
            StoreError::OutsideBookingWindow { .. } | StoreError::ValidationError(_) => {
                AppError::ValidationError(message)
            }
        }
    }
}
