use chrono::{NaiveDate, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use priority_cell::PriorityEngine;
use schedule_store_cell::{days_after, Appointment, AppointmentStatus, ScheduleStore, MAX_ADVANCE_DAYS};
use shared_utils::generate_confirmation_code;

/// Moves the patient of a cancelled appointment into the first open schedule
/// of the same specialty, from tomorrow up to `today + horizon_days`. The
/// schedule the appointment came from is never a candidate. Returns the new
/// appointment id, or `None` without touching the store when nothing fits.
#[instrument(skip(store, cancelled), fields(appointment_id = %cancelled.id))]
pub fn auto_rebook(
    store: &mut ScheduleStore,
    cancelled: &Appointment,
    today: NaiveDate,
    horizon_days: u32,
) -> Option<Uuid> {
    let Some(patient) = store.get_patient_by_id(cancelled.patient_id).cloned() else {
        debug!("Patient {} no longer exists, skipping rebook", cancelled.patient_id);
        return None;
    };
    let Some(specialty) = store
        .get_schedule_by_id(cancelled.schedule_id)
        .map(|s| s.specialty.clone())
    else {
        debug!("Originating schedule {} no longer exists, skipping rebook", cancelled.schedule_id);
        return None;
    };

    let (Some(from), Some(to)) = (
        days_after(today, 1),
        days_after(today, horizon_days.min(MAX_ADVANCE_DAYS)),
    ) else {
        return None;
    };
    let Some(target) = store
        .find_open_schedules_between(&specialty, from, to)
        .into_iter()
        .find(|s| s.id != cancelled.schedule_id)
    else {
        info!("No open {} schedule between {} and {}", specialty, from, to);
        return None;
    };

    let times = target.available_times();
    let time = PriorityEngine::new(&*store, today).suggest_best_time(&patient, &times)?;

    if let Err(e) = store.book_slot(target.id, time) {
        warn!("Rebook slot {} on schedule {} rejected: {}", time, target.id, e);
        return None;
    }

    let now = Utc::now();
    let appointment = Appointment {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        schedule_id: target.id,
        date: target.date,
        time,
        appointment_type: cancelled.appointment_type.clone(),
        status: AppointmentStatus::Scheduled,
        priority: cancelled.priority,
        confirmation_code: generate_confirmation_code(),
        notification_sent: false,
        observations: Some(format!("Reagendamento automático do agendamento {}", cancelled.id)),
        created_at: now,
        updated_at: now,
    };

    let id = store.add_appointment(appointment);
    info!(
        "Appointment {} rebooked as {} on {} {}",
        cancelled.id, id, target.date, time
    );
    Some(id)
}
