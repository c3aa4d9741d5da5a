// libs/waitlist-cell/src/services/processor.rs
//
// Drains a specialty's waiting list into open slots. One call is one pass:
// schedules are visited in date order, slots in grid order, and each slot goes
// to the first queued entry whose patient still exists.

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use schedule_store_cell::{
    days_after, Appointment, AppointmentStatus, PriorityLabel, Schedule, ScheduleStore, StoreError,
    WaitlistEntry, MAX_ADVANCE_DAYS,
};
use shared_utils::generate_confirmation_code;

use crate::models::{SkipReason, WaitlistOutcome, WaitlistRun, WAITLIST_APPOINTMENT_TYPE};
use crate::services::queue::WaitlistQueue;

/// Books queued patients into every open slot of `specialty` between `today`
/// and `today + horizon_days` (capped at [`MAX_ADVANCE_DAYS`]). Entries whose
/// patient is gone are reported as skipped and left waiting; they never
/// consume a slot.
#[instrument(skip(store))]
pub fn process_waitlist(
    store: &mut ScheduleStore,
    specialty: &str,
    today: NaiveDate,
    horizon_days: u32,
) -> WaitlistRun {
    let to = days_after(today, horizon_days.min(MAX_ADVANCE_DAYS)).unwrap_or(NaiveDate::MAX);
    let mut queue = WaitlistQueue::from_entries(store.waitlist_for_specialty(specialty));
    let schedules = store.find_open_schedules_between(specialty, today, to);
    let mut outcomes = Vec::new();

    debug!(
        "Processing {} waitlist entries against {} open schedules",
        queue.len(),
        schedules.len()
    );

    'schedules: for schedule in &schedules {
        for time in schedule.available_times() {
            if queue.is_empty() {
                break 'schedules;
            }
            if !still_open(store, schedule.id) {
                continue 'schedules;
            }

            while let Some(entry) = queue.pop_front() {
                if store.get_patient_by_id(entry.patient_id).is_none() {
                    warn!(
                        "Waitlist entry {} references unknown patient {}, keeping it queued",
                        entry.id, entry.patient_id
                    );
                    outcomes.push(WaitlistOutcome::Skipped {
                        entry_id: entry.id,
                        patient_id: entry.patient_id,
                        reason: SkipReason::PatientNotFound,
                    });
                    continue;
                }

                match commit(store, schedule, time, &entry) {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => {
                        debug!("Slot {} of schedule {} not bookable: {}", time, schedule.id, e);
                        queue.push_front(entry);
                    }
                }
                break;
            }
        }
    }

    let run = WaitlistRun {
        specialty: specialty.to_string(),
        from: today,
        to,
        remaining: store.waitlist_for_specialty(specialty).len(),
        outcomes,
    };

    info!(
        "Waitlist run for {}: {} scheduled, {} skipped, {} still waiting",
        specialty,
        run.scheduled_count(),
        run.skipped_count(),
        run.remaining
    );
    run
}

fn still_open(store: &ScheduleStore, schedule_id: Uuid) -> bool {
    store
        .get_schedule_by_id(schedule_id)
        .map(Schedule::is_open)
        .unwrap_or(false)
}

/// Slot, appointment and entry status change together or not at all.
fn commit(
    store: &mut ScheduleStore,
    schedule: &Schedule,
    time: NaiveTime,
    entry: &WaitlistEntry,
) -> Result<WaitlistOutcome, StoreError> {
    store.book_slot(schedule.id, time)?;

    let now = Utc::now();
    let appointment = Appointment {
        id: Uuid::new_v4(),
        patient_id: entry.patient_id,
        schedule_id: schedule.id,
        date: schedule.date,
        time,
        appointment_type: WAITLIST_APPOINTMENT_TYPE.to_string(),
        status: AppointmentStatus::Scheduled,
        priority: if entry.is_urgent() {
            PriorityLabel::Urgent
        } else {
            PriorityLabel::Normal
        },
        confirmation_code: generate_confirmation_code(),
        notification_sent: false,
        observations: None,
        created_at: now,
        updated_at: now,
    };

    let appointment_id = store.add_appointment(appointment);
    store.mark_waitlist_scheduled(entry.id, appointment_id);

    info!(
        "Waitlist entry {} scheduled as appointment {} on {} {}",
        entry.id, appointment_id, schedule.date, time
    );

    Ok(WaitlistOutcome::Scheduled {
        entry_id: entry.id,
        patient_id: entry.patient_id,
        appointment_id,
        schedule_id: schedule.id,
        date: schedule.date,
        time,
    })
}
