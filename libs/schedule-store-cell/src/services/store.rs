// libs/schedule-store-cell/src/services/store.rs
use std::collections::HashMap;

use chrono::{Days, NaiveDate, NaiveTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_utils::generate_confirmation_code;

use crate::error::StoreError;
use crate::models::{
    Appointment, AppointmentStatus, BookAppointmentRequest, CreateScheduleRequest, Facility,
    Patient, Professional, Schedule, SchedulingPolicy, SlotKind, SlotWindow, TimeSlot,
    same_specialty, WaitlistEntry, WaitlistStatus, HIGHEST_WAITLIST_PRIORITY,
    LOWEST_WAITLIST_PRIORITY, MAX_ADVANCE_DAYS,
};

/// In-memory registry for the scheduling core.
///
/// Schedules and waitlist entries keep insertion order so that scans are
/// deterministic. Lookups on unknown ids return `None`/`false` instead of
/// failing; only operations that validate input return [`StoreError`].
///
/// The store itself does no locking. Callers that share it wrap it in a
/// [`crate::SharedStore`] and hold the write guard for the whole
/// read-then-write unit.
#[derive(Debug, Default)]
pub struct ScheduleStore {
    window: SlotWindow,
    patients: HashMap<Uuid, Patient>,
    professionals: HashMap<Uuid, Professional>,
    facilities: HashMap<Uuid, Facility>,
    schedules: Vec<Schedule>,
    appointments: HashMap<Uuid, Appointment>,
    waitlist: Vec<WaitlistEntry>,
    policy: SchedulingPolicy,
}

impl ScheduleStore {
    pub fn new(window: SlotWindow) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn window(&self) -> SlotWindow {
        self.window
    }

    // ==========================================================================
    // PATIENTS / PROFESSIONALS / FACILITIES
    // ==========================================================================

    pub fn add_patient(&mut self, patient: Patient) -> Patient {
        debug!("Registering patient {}", patient.id);
        self.patients.insert(patient.id, patient.clone());
        patient
    }

    pub fn get_patient_by_id(&self, id: Uuid) -> Option<&Patient> {
        self.patients.get(&id)
    }

    pub fn list_all_patients(&self) -> Vec<&Patient> {
        let mut patients: Vec<&Patient> = self.patients.values().collect();
        patients.sort_by(|a, b| a.name.cmp(&b.name));
        patients
    }

    pub fn update_chronic_conditions(&mut self, id: Uuid, conditions: Vec<String>) -> bool {
        match self.patients.get_mut(&id) {
            Some(patient) => {
                patient.chronic_conditions = conditions;
                true
            }
            None => false,
        }
    }

    pub fn add_professional(&mut self, professional: Professional) -> Professional {
        self.professionals.insert(professional.id, professional.clone());
        professional
    }

    pub fn get_professional_by_id(&self, id: Uuid) -> Option<&Professional> {
        self.professionals.get(&id)
    }

    pub fn list_all_professionals(&self) -> Vec<&Professional> {
        let mut professionals: Vec<&Professional> = self.professionals.values().collect();
        professionals.sort_by(|a, b| a.name.cmp(&b.name));
        professionals
    }

    pub fn add_facility(&mut self, facility: Facility) -> Facility {
        self.facilities.insert(facility.id, facility.clone());
        facility
    }

    pub fn get_facility_by_id(&self, id: Uuid) -> Option<&Facility> {
        self.facilities.get(&id)
    }

    pub fn list_active_facilities(&self) -> Vec<&Facility> {
        let mut facilities: Vec<&Facility> =
            self.facilities.values().filter(|f| f.active).collect();
        facilities.sort_by(|a, b| a.name.cmp(&b.name));
        facilities
    }

    pub fn set_facility_active(&mut self, id: Uuid, active: bool) -> bool {
        match self.facilities.get_mut(&id) {
            Some(facility) => {
                facility.active = active;
                true
            }
            None => false,
        }
    }

    // ==========================================================================
    // SCHEDULES
    // ==========================================================================

    pub fn create_schedule(&mut self, request: CreateScheduleRequest) -> Result<Schedule, StoreError> {
        if request.total_quota == 0 {
            return Err(StoreError::ValidationError(
                "total_quota must be at least 1".to_string(),
            ));
        }
        if request.specialty.trim().is_empty() {
            return Err(StoreError::ValidationError("specialty is required".to_string()));
        }
        let professional = self
            .professionals
            .get(&request.professional_id)
            .ok_or(StoreError::ProfessionalNotFound(request.professional_id))?;
        if !professional.has_specialty(&request.specialty) {
            return Err(StoreError::ValidationError(format!(
                "professional {} does not attend {}",
                professional.id, request.specialty
            )));
        }
        let facility = self
            .facilities
            .get(&request.facility_id)
            .ok_or(StoreError::FacilityNotFound(request.facility_id))?;
        if !facility.active {
            return Err(StoreError::ValidationError(format!(
                "facility {} is inactive",
                facility.id
            )));
        }
        if !self.window.is_valid() {
            return Err(StoreError::ValidationError(format!(
                "slot window {}h-{}h is empty",
                self.window.start_hour, self.window.end_hour
            )));
        }

        let now = Utc::now();
        let slots = self
            .window
            .slot_times()
            .into_iter()
            .map(|time| TimeSlot {
                time,
                available: true,
                kind: SlotKind::Regular,
            })
            .collect();

        let schedule = Schedule {
            id: Uuid::new_v4(),
            professional_id: request.professional_id,
            facility_id: request.facility_id,
            specialty: request.specialty,
            date: request.date,
            total_quota: request.total_quota,
            used_quota: 0,
            reserved_quota: 0,
            blocked: false,
            block_reason: None,
            slots,
            created_at: now,
            updated_at: now,
        };

        info!(
            "Created schedule {} for {} on {} with {} slots",
            schedule.id,
            schedule.specialty,
            schedule.date,
            schedule.slots.len()
        );

        self.schedules.push(schedule.clone());
        Ok(schedule)
    }

    pub fn get_schedule_by_id(&self, id: Uuid) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    pub fn list_all_schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn block_schedule(&mut self, id: Uuid, blocked: bool, reason: Option<String>) -> bool {
        let Some(schedule) = self.schedules.iter_mut().find(|s| s.id == id) else {
            debug!("Ignoring block request for unknown schedule {}", id);
            return false;
        };

        schedule.blocked = blocked;
        schedule.block_reason = if blocked { reason } else { None };
        schedule.updated_at = Utc::now();

        if blocked {
            info!("Schedule {} blocked: {:?}", id, schedule.block_reason);
        } else {
            info!("Schedule {} unblocked", id);
        }
        true
    }

    /// Unblocked schedules of `specialty` on `date` that can still take a booking.
    pub fn find_open_schedules(&self, specialty: &str, date: NaiveDate) -> Vec<Schedule> {
        self.schedules
            .iter()
            .filter(|s| s.date == date && s.matches_specialty(specialty) && s.is_open())
            .cloned()
            .collect()
    }

    /// Open schedules for every day in `from..=to`, ordered by date then creation.
    pub fn find_open_schedules_between(
        &self,
        specialty: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<Schedule> {
        let mut found: Vec<Schedule> = self
            .schedules
            .iter()
            .filter(|s| {
                s.date >= from && s.date <= to && s.matches_specialty(specialty) && s.is_open()
            })
            .cloned()
            .collect();
        // Stable sort keeps creation order within a day.
        found.sort_by_key(|s| s.date);
        found
    }

    /// Takes one slot: flips it unavailable and consumes one unit of quota.
    pub fn book_slot(&mut self, schedule_id: Uuid, time: NaiveTime) -> Result<(), StoreError> {
        let schedule = self
            .schedules
            .iter_mut()
            .find(|s| s.id == schedule_id)
            .ok_or(StoreError::ScheduleNotFound(schedule_id))?;

        if schedule.blocked {
            return Err(StoreError::ScheduleBlocked {
                schedule_id,
                reason: schedule.block_reason.clone(),
            });
        }
        if schedule.free_quota() == 0 {
            return Err(StoreError::QuotaExhausted(schedule_id));
        }

        let slot = schedule
            .slots
            .iter_mut()
            .find(|slot| slot.time == time)
            .ok_or(StoreError::SlotNotFound { schedule_id, time })?;

        if !slot.available {
            return Err(StoreError::SlotUnavailable { schedule_id, time });
        }

        slot.available = false;
        schedule.used_quota += 1;
        schedule.updated_at = Utc::now();

        debug!(
            "Booked slot {} on schedule {} ({}/{})",
            time, schedule_id, schedule.used_quota, schedule.total_quota
        );
        Ok(())
    }

    /// Gives a slot back. Returns `false` when there was nothing to release.
    pub fn release_slot(&mut self, schedule_id: Uuid, time: NaiveTime) -> bool {
        let Some(schedule) = self.schedules.iter_mut().find(|s| s.id == schedule_id) else {
            return false;
        };
        let Some(slot) = schedule.slots.iter_mut().find(|slot| slot.time == time) else {
            return false;
        };
        if slot.available {
            return false;
        }

        slot.available = true;
        schedule.used_quota = schedule.used_quota.saturating_sub(1);
        schedule.updated_at = Utc::now();
        debug!("Released slot {} on schedule {}", time, schedule_id);
        true
    }

    // ==========================================================================
    // APPOINTMENTS
    // ==========================================================================

    pub fn add_appointment(&mut self, appointment: Appointment) -> Uuid {
        let id = appointment.id;
        self.appointments.insert(id, appointment);
        id
    }

    pub fn get_appointment_by_id(&self, id: Uuid) -> Option<&Appointment> {
        self.appointments.get(&id)
    }

    pub fn list_all_appointments(&self) -> Vec<&Appointment> {
        let mut appointments: Vec<&Appointment> = self.appointments.values().collect();
        appointments.sort_by_key(|a| (a.date, a.time));
        appointments
    }

    /// Every appointment the patient ever had. Order is not guaranteed.
    pub fn get_appointments_for_patient(&self, patient_id: Uuid) -> Vec<&Appointment> {
        self.appointments
            .values()
            .filter(|a| a.patient_id == patient_id)
            .collect()
    }

    /// Manual booking from the front desk, checked against the global policy.
    pub fn book_appointment(
        &mut self,
        request: BookAppointmentRequest,
        today: NaiveDate,
    ) -> Result<Appointment, StoreError> {
        if request.appointment_type.trim().is_empty() {
            return Err(StoreError::ValidationError(
                "appointment_type is required".to_string(),
            ));
        }
        if !self.patients.contains_key(&request.patient_id) {
            return Err(StoreError::PatientNotFound(request.patient_id));
        }

        let date = self
            .get_schedule_by_id(request.schedule_id)
            .map(|s| s.date)
            .ok_or(StoreError::ScheduleNotFound(request.schedule_id))?;

        let (Some(earliest), Some(latest)) = (
            days_after(today, self.policy.min_advance_days),
            days_after(today, self.policy.max_advance_days),
        ) else {
            return Err(StoreError::ValidationError(format!(
                "booking window of {} days does not fit the calendar",
                self.policy.max_advance_days
            )));
        };
        if date < earliest || date > latest {
            return Err(StoreError::OutsideBookingWindow {
                date,
                earliest,
                latest,
            });
        }

        self.book_slot(request.schedule_id, request.time)?;

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            schedule_id: request.schedule_id,
            date,
            time: request.time,
            appointment_type: request.appointment_type,
            status: AppointmentStatus::Scheduled,
            priority: request.priority,
            confirmation_code: generate_confirmation_code(),
            notification_sent: false,
            observations: request.observations,
            created_at: now,
            updated_at: now,
        };

        info!(
            "Booked appointment {} for patient {} on {} {}",
            appointment.id, appointment.patient_id, appointment.date, appointment.time
        );
        self.add_appointment(appointment.clone());
        Ok(appointment)
    }

    pub fn update_appointment_status(
        &mut self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, StoreError> {
        let appointment = self
            .appointments
            .get_mut(&id)
            .ok_or(StoreError::AppointmentNotFound(id))?;

        if !appointment.status.can_transition_to(&status) {
            return Err(StoreError::InvalidStatusTransition {
                from: appointment.status,
                to: status,
            });
        }

        appointment.status = status;
        appointment.updated_at = Utc::now();
        let updated = appointment.clone();

        if status == AppointmentStatus::Cancelled {
            self.release_slot(updated.schedule_id, updated.time);
        }

        debug!("Appointment {} moved to {}", id, status);
        Ok(updated)
    }

    /// Cancels and frees the slot. `None` if unknown or already closed.
    pub fn cancel_appointment(&mut self, id: Uuid) -> Option<Appointment> {
        match self.update_appointment_status(id, AppointmentStatus::Cancelled) {
            Ok(appointment) => {
                info!("Appointment {} cancelled", id);
                Some(appointment)
            }
            Err(e) => {
                warn!("Could not cancel appointment {}: {}", id, e);
                None
            }
        }
    }

    // ==========================================================================
    // WAITLIST
    // ==========================================================================

    pub fn add_waitlist_entry(&mut self, entry: WaitlistEntry) -> Uuid {
        let id = entry.id;
        debug!(
            "Waitlist entry {} for patient {} in {} (priority {})",
            id, entry.patient_id, entry.specialty, entry.priority
        );
        self.waitlist.push(entry);
        id
    }

    pub fn get_waitlist_entry_by_id(&self, id: Uuid) -> Option<&WaitlistEntry> {
        self.waitlist.iter().find(|e| e.id == id)
    }

    pub fn list_all_waitlist_entries(&self) -> &[WaitlistEntry] {
        &self.waitlist
    }

    /// Entries still waiting for a slot in `specialty`, in insertion order.
    pub fn waitlist_for_specialty(&self, specialty: &str) -> Vec<WaitlistEntry> {
        self.waitlist
            .iter()
            .filter(|e| !e.status.is_terminal() && same_specialty(&e.specialty, specialty))
            .cloned()
            .collect()
    }

    pub fn record_contact_attempt(&mut self, id: Uuid) -> bool {
        let Some(entry) = self.waitlist_entry_mut(id) else {
            return false;
        };
        if entry.status.is_terminal() {
            return false;
        }
        entry.contact_attempts += 1;
        entry.last_contact_at = Some(Utc::now());
        entry.status = WaitlistStatus::Contacted;
        true
    }

    pub fn adjust_waitlist_priority(&mut self, id: Uuid, priority: u8) -> Result<(), StoreError> {
        if !(HIGHEST_WAITLIST_PRIORITY..=LOWEST_WAITLIST_PRIORITY).contains(&priority) {
            return Err(StoreError::ValidationError(format!(
                "priority must be between {} and {}, got {}",
                HIGHEST_WAITLIST_PRIORITY, LOWEST_WAITLIST_PRIORITY, priority
            )));
        }
        let entry = self
            .waitlist_entry_mut(id)
            .ok_or(StoreError::WaitlistEntryNotFound(id))?;
        if entry.status.is_terminal() {
            return Err(StoreError::WaitlistEntryClosed {
                id,
                status: entry.status,
            });
        }
        entry.priority = priority;
        Ok(())
    }

    pub fn withdraw_waitlist_entry(&mut self, id: Uuid) -> bool {
        match self.waitlist_entry_mut(id) {
            Some(entry) if !entry.status.is_terminal() => {
                entry.status = WaitlistStatus::Withdrawn;
                true
            }
            _ => false,
        }
    }

    pub fn mark_waitlist_scheduled(&mut self, id: Uuid, appointment_id: Uuid) -> bool {
        match self.waitlist_entry_mut(id) {
            Some(entry) => {
                entry.status = WaitlistStatus::Scheduled;
                entry.appointment_id = Some(appointment_id);
                true
            }
            None => false,
        }
    }

    fn waitlist_entry_mut(&mut self, id: Uuid) -> Option<&mut WaitlistEntry> {
        self.waitlist.iter_mut().find(|e| e.id == id)
    }

    // ==========================================================================
    // CONFIGURATION
    // ==========================================================================

    pub fn get_configuration(&self) -> &SchedulingPolicy {
        &self.policy
    }

    pub fn save_configuration(&mut self, policy: SchedulingPolicy) -> Result<(), StoreError> {
        if policy.max_advance_days <= policy.min_advance_days {
            return Err(StoreError::ValidationError(format!(
                "max_advance_days ({}) must be greater than min_advance_days ({})",
                policy.max_advance_days, policy.min_advance_days
            )));
        }
        if policy.max_advance_days > MAX_ADVANCE_DAYS {
            return Err(StoreError::ValidationError(format!(
                "max_advance_days ({}) cannot exceed {}",
                policy.max_advance_days, MAX_ADVANCE_DAYS
            )));
        }
        if policy.max_no_shows_before_block == 0 {
            return Err(StoreError::ValidationError(
                "max_no_shows_before_block must be at least 1".to_string(),
            ));
        }
        info!("Scheduling configuration updated");
        self.policy = policy;
        Ok(())
    }
}

/// `today + days`, or `None` when the date would leave chrono's range.
pub fn days_after(today: NaiveDate, days: u32) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(days.into()))
}
