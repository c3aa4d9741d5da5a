use chrono::NaiveDate;
use tracing::{info, instrument};
use uuid::Uuid;

use priority_cell::PriorityEngine;
use schedule_store_cell::{
    AppState, AppointmentStatus, ScheduleStore, SharedStore, WaitlistEntry, HIGHEST_WAITLIST_PRIORITY,
    LOWEST_WAITLIST_PRIORITY,
};

use crate::error::WaitlistError;
use crate::models::{CreateWaitlistEntryRequest, RebookResult, WaitlistRun};
use crate::services::processor::process_waitlist;
use crate::services::queue::WaitlistQueue;
use crate::services::rebooking::auto_rebook;

/// Async front for the waitlist operations. Each method takes the store's
/// write guard once and keeps it until every mutation of the operation is
/// done, so concurrent runs cannot hand the same slot out twice.
#[derive(Clone)]
pub struct WaitlistService {
    store: SharedStore,
    horizon_days: u32,
    today: Option<NaiveDate>,
}

impl WaitlistService {
    pub fn new(store: SharedStore, horizon_days: u32) -> Self {
        Self {
            store,
            horizon_days,
            today: None,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.store.clone(), state.config.scheduling_horizon_days)
    }

    /// Pins the reference date instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(AppState::today)
    }

    #[instrument(skip(self))]
    pub async fn process(&self, specialty: &str) -> WaitlistRun {
        let mut store = self.store.write().await;
        process_waitlist(&mut store, specialty, self.today(), self.horizon_days)
    }

    /// Queues a patient. Without an explicit priority the engine scores the
    /// patient for the specialty and its criteria are merged into the entry.
    #[instrument(skip(self, request), fields(patient_id = %request.patient_id))]
    pub async fn add_to_waitlist(
        &self,
        request: CreateWaitlistEntryRequest,
    ) -> Result<WaitlistEntry, WaitlistError> {
        let specialty = request.specialty.trim();
        if specialty.is_empty() {
            return Err(WaitlistError::ValidationError("specialty is required".to_string()));
        }
        if let Some(priority) = request.priority {
            if !(HIGHEST_WAITLIST_PRIORITY..=LOWEST_WAITLIST_PRIORITY).contains(&priority) {
                return Err(WaitlistError::ValidationError(format!(
                    "priority must be between {} and {}, got {}",
                    HIGHEST_WAITLIST_PRIORITY, LOWEST_WAITLIST_PRIORITY, priority
                )));
            }
        }

        let mut store = self.store.write().await;
        let patient = store
            .get_patient_by_id(request.patient_id)
            .cloned()
            .ok_or(WaitlistError::PatientNotFound(request.patient_id))?;
        if let Some(facility_id) = request.preferred_facility_id {
            if store.get_facility_by_id(facility_id).is_none() {
                return Err(WaitlistError::FacilityNotFound(facility_id));
            }
        }

        let mut criteria = request.criteria;
        let priority = match request.priority {
            Some(priority) => priority,
            None => {
                let assessment =
                    PriorityEngine::new(&*store, self.today()).calculate_priority(&patient, specialty);
                for tag in &assessment.criteria {
                    if !criteria.contains(tag) {
                        criteria.push(tag.clone());
                    }
                }
                assessment.waitlist_priority()
            }
        };

        let mut entry = WaitlistEntry::new(patient.id, specialty, priority);
        entry.preferred_facility_id = request.preferred_facility_id;
        entry.criteria = criteria;
        store.add_waitlist_entry(entry.clone());

        info!(
            "Patient {} added to {} waitlist with priority {}",
            patient.id, specialty, entry.priority
        );
        Ok(entry)
    }

    /// Open entries of one specialty in serving order, or every entry.
    pub async fn list(&self, specialty: Option<&str>) -> Vec<WaitlistEntry> {
        let store = self.store.read().await;
        match specialty {
            Some(specialty) => {
                WaitlistQueue::from_entries(store.waitlist_for_specialty(specialty)).into_vec()
            }
            None => store.list_all_waitlist_entries().to_vec(),
        }
    }

    pub async fn record_contact(&self, entry_id: Uuid) -> Result<WaitlistEntry, WaitlistError> {
        let mut store = self.store.write().await;
        let entry = store
            .get_waitlist_entry_by_id(entry_id)
            .ok_or(WaitlistError::EntryNotFound(entry_id))?;
        if entry.status.is_terminal() {
            return Err(WaitlistError::EntryClosed {
                id: entry_id,
                status: entry.status,
            });
        }

        store.record_contact_attempt(entry_id);
        current_entry(&store, entry_id)
    }

    pub async fn withdraw(&self, entry_id: Uuid) -> Result<WaitlistEntry, WaitlistError> {
        let mut store = self.store.write().await;
        let entry = store
            .get_waitlist_entry_by_id(entry_id)
            .ok_or(WaitlistError::EntryNotFound(entry_id))?;
        if entry.status.is_terminal() {
            return Err(WaitlistError::EntryClosed {
                id: entry_id,
                status: entry.status,
            });
        }

        store.withdraw_waitlist_entry(entry_id);
        info!("Waitlist entry {} withdrawn", entry_id);
        current_entry(&store, entry_id)
    }

    pub async fn adjust_priority(
        &self,
        entry_id: Uuid,
        priority: u8,
    ) -> Result<WaitlistEntry, WaitlistError> {
        let mut store = self.store.write().await;
        let entry = store
            .get_waitlist_entry_by_id(entry_id)
            .ok_or(WaitlistError::EntryNotFound(entry_id))?;
        if entry.status.is_terminal() {
            return Err(WaitlistError::EntryClosed {
                id: entry_id,
                status: entry.status,
            });
        }

        store.adjust_waitlist_priority(entry_id, priority)?;
        current_entry(&store, entry_id)
    }

    /// Cancels an appointment, frees its slot and tries to move the patient
    /// to the next open schedule of the same specialty.
    #[instrument(skip(self))]
    pub async fn cancel_and_rebook(&self, appointment_id: Uuid) -> Result<RebookResult, WaitlistError> {
        let mut store = self.store.write().await;
        let cancelled = store.update_appointment_status(appointment_id, AppointmentStatus::Cancelled)?;

        let rebooked = auto_rebook(&mut store, &cancelled, self.today(), self.horizon_days)
            .and_then(|id| store.get_appointment_by_id(id).cloned());

        Ok(RebookResult { cancelled, rebooked })
    }
}

fn current_entry(
    store: &ScheduleStore,
    entry_id: Uuid,
) -> Result<WaitlistEntry, WaitlistError> {
    store
        .get_waitlist_entry_by_id(entry_id)
        .cloned()
        .ok_or(WaitlistError::EntryNotFound(entry_id))
}
