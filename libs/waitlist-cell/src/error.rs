use thiserror::Error;
use uuid::Uuid;

use schedule_store_cell::{StoreError, WaitlistStatus};
use shared_models::error::AppError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaitlistError {
    #[error("Patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("Facility not found: {0}")]
    FacilityNotFound(Uuid),

    #[error("Waitlist entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("Waitlist entry {id} is already closed ({status:?})")]
    EntryClosed { id: Uuid, status: WaitlistStatus },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<WaitlistError> for AppError {
    fn from(err: WaitlistError) -> Self {
        match err {
            WaitlistError::Store(inner) => AppError::from(inner),
            WaitlistError::PatientNotFound(_)
            | WaitlistError::FacilityNotFound(_)
            | WaitlistError::EntryNotFound(_) => AppError::NotFound(err.to_string()),
            WaitlistError::EntryClosed { .. } => AppError::Conflict(err.to_string()),
            WaitlistError::ValidationError(_) => AppError::ValidationError(err.to_string()),
        }
    }
}
