use chrono::Utc;
use uuid::Uuid;

use schedule_store_cell::*;
use shared_utils::test_utils::test_today;
use waitlist_cell::auto_rebook;

mod fixtures;
use fixtures::{at, WaitlistFixture};

/// Books a follow-up today at 10:00 and cancels it.
fn cancelled_follow_up(fx: &mut WaitlistFixture, patient: &Patient) -> Appointment {
    let today = fx.schedule_in(0, 4);
    let booked = fx.book(patient.id, today.id, at(10, 0), "retorno");
    fx.store
        .update_appointment_status(booked.id, AppointmentStatus::Cancelled)
        .expect("cancel should succeed")
}

#[test]
fn test_no_open_schedule_returns_none_without_mutation() {
    let mut fx = WaitlistFixture::new();
    let patient = fx.patient(45);
    let cancelled = cancelled_follow_up(&mut fx, &patient);

    let schedules_before = fx.store.list_all_schedules().to_vec();
    let appointments_before = fx.store.list_all_appointments().len();

    let result = auto_rebook(&mut fx.store, &cancelled, test_today(), 30);

    assert_eq!(result, None);
    assert_eq!(fx.store.list_all_schedules(), schedules_before.as_slice());
    assert_eq!(fx.store.list_all_appointments().len(), appointments_before);
}

#[test]
fn test_schedule_beyond_horizon_is_not_used() {
    let mut fx = WaitlistFixture::new();
    let patient = fx.patient(45);
    let cancelled = cancelled_follow_up(&mut fx, &patient);
    let far = fx.schedule_in(31, 4);

    assert_eq!(auto_rebook(&mut fx.store, &cancelled, test_today(), 30), None);
    assert_eq!(fx.store.get_schedule_by_id(far.id).unwrap().used_quota, 0);
}

#[test]
fn test_rebook_carries_type_and_priority_label() {
    let mut fx = WaitlistFixture::new();
    let patient = fx.patient(45);
    let cancelled = cancelled_follow_up(&mut fx, &patient);
    let target = fx.schedule_in(3, 4);

    let new_id = auto_rebook(&mut fx.store, &cancelled, test_today(), 30).expect("should rebook");

    let rebooked = fx.store.get_appointment_by_id(new_id).unwrap();
    assert_ne!(rebooked.id, cancelled.id);
    assert_eq!(rebooked.patient_id, patient.id);
    assert_eq!(rebooked.schedule_id, target.id);
    assert_eq!(rebooked.date, target.date);
    assert_eq!(rebooked.appointment_type, "retorno");
    assert_eq!(rebooked.priority, PriorityLabel::Priority);
    assert_eq!(rebooked.status, AppointmentStatus::Scheduled);
    assert!(rebooked
        .observations
        .as_deref()
        .unwrap()
        .contains(&cancelled.id.to_string()));

    // New patient without past attendance gets the first preferred time.
    assert_eq!(rebooked.time, at(9, 0));

    let target = fx.store.get_schedule_by_id(target.id).unwrap();
    assert_eq!(target.used_quota, 1);
    assert!(!target.slot(at(9, 0)).unwrap().available);
}

#[test]
fn test_rebook_prefers_time_patient_attended_before() {
    let mut fx = WaitlistFixture::new();
    let patient = fx.patient(45);
    let past_schedule = fx.schedule_in(-14, 4);
    let now = Utc::now();
    fx.store.add_appointment(Appointment {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        schedule_id: past_schedule.id,
        date: past_schedule.date,
        time: at(15, 30),
        appointment_type: "consulta".to_string(),
        status: AppointmentStatus::Completed,
        priority: PriorityLabel::Normal,
        confirmation_code: "PAST0001".to_string(),
        notification_sent: true,
        observations: None,
        created_at: now,
        updated_at: now,
    });
    let cancelled = cancelled_follow_up(&mut fx, &patient);
    fx.schedule_in(1, 4);

    let new_id = auto_rebook(&mut fx.store, &cancelled, test_today(), 30).expect("should rebook");

    assert_eq!(fx.store.get_appointment_by_id(new_id).unwrap().time, at(15, 30));
}

#[test]
fn test_first_candidate_schedule_wins() {
    let mut fx = WaitlistFixture::new();
    let patient = fx.patient(45);
    let cancelled = cancelled_follow_up(&mut fx, &patient);
    let later = fx.schedule_in(10, 4);
    let sooner = fx.schedule_in(2, 4);

    let new_id = auto_rebook(&mut fx.store, &cancelled, test_today(), 30).unwrap();

    assert_eq!(fx.store.get_appointment_by_id(new_id).unwrap().schedule_id, sooner.id);
    assert_eq!(fx.store.get_schedule_by_id(later.id).unwrap().used_quota, 0);
}

#[test]
fn test_missing_patient_or_schedule_returns_none() {
    let mut fx = WaitlistFixture::new();
    let patient = fx.patient(45);
    let cancelled = cancelled_follow_up(&mut fx, &patient);
    fx.schedule_in(1, 4);

    let mut orphan = cancelled.clone();
    orphan.patient_id = Uuid::new_v4();
    assert_eq!(auto_rebook(&mut fx.store, &orphan, test_today(), 30), None);

    let mut unscheduled = cancelled.clone();
    unscheduled.schedule_id = Uuid::new_v4();
    assert_eq!(auto_rebook(&mut fx.store, &unscheduled, test_today(), 30), None);

    assert_eq!(fx.store.list_all_appointments().len(), 1);
}

#[test]
fn test_same_day_schedules_are_not_candidates() {
    let mut fx = WaitlistFixture::new();
    let patient = fx.patient(45);
    let cancelled = cancelled_follow_up(&mut fx, &patient);
    // Today's schedule still has free quota after the cancellation.
    assert!(fx
        .store
        .find_open_schedules(fixtures::SPECIALTY, test_today())
        .iter()
        .any(|s| s.id == cancelled.schedule_id));

    assert_eq!(auto_rebook(&mut fx.store, &cancelled, test_today(), 30), None);
}

#[test]
fn test_originating_schedule_is_skipped() {
    let mut fx = WaitlistFixture::new();
    let patient = fx.patient(45);
    let tomorrow = fx.schedule_in(1, 4);
    let booked = fx.book(patient.id, tomorrow.id, at(9, 0), "consulta");
    let cancelled = fx
        .store
        .update_appointment_status(booked.id, AppointmentStatus::Cancelled)
        .unwrap();
    let next = fx.schedule_in(2, 4);

    let new_id = auto_rebook(&mut fx.store, &cancelled, test_today(), 30).expect("should rebook");

    let rebooked = fx.store.get_appointment_by_id(new_id).unwrap();
    assert_eq!(rebooked.schedule_id, next.id);
    let tomorrow = fx.store.get_schedule_by_id(tomorrow.id).unwrap();
    assert!(tomorrow.slot(at(9, 0)).unwrap().available);
    assert_eq!(tomorrow.used_quota, 0);
}
