#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveTime};
use uuid::Uuid;

use schedule_store_cell::*;
use shared_utils::test_utils::{birth_date_for_age, test_today};

pub const SPECIALTY: &str = "Cardiologia";

/// Store with one cardiologist at one facility, plus helpers to queue patients.
pub struct WaitlistFixture {
    pub store: ScheduleStore,
    pub professional: Professional,
    pub facility: Facility,
    queued: i64,
}

impl WaitlistFixture {
    pub fn new() -> Self {
        let mut store = ScheduleStore::new(SlotWindow::default());
        let professional = store.add_professional(Professional::new(
            "Dr. Fila",
            vec![SPECIALTY.to_string(), "Neurologia".to_string()],
        ));
        let facility = store.add_facility(Facility::new("UBS Centro"));
        Self {
            store,
            professional,
            facility,
            queued: 0,
        }
    }

    pub fn patient(&mut self, age: i32) -> Patient {
        self.store.add_patient(Patient::new(
            format!("Paciente {}", age),
            birth_date_for_age(age),
            Vec::new(),
        ))
    }

    pub fn schedule_on(&mut self, specialty: &str, date: NaiveDate, quota: u32) -> Schedule {
        self.store
            .create_schedule(CreateScheduleRequest {
                professional_id: self.professional.id,
                facility_id: self.facility.id,
                specialty: specialty.to_string(),
                date,
                total_quota: quota,
            })
            .expect("schedule should be created")
    }

    pub fn schedule_in(&mut self, days_from_today: i64, quota: u32) -> Schedule {
        self.schedule_on(SPECIALTY, test_today() + Duration::days(days_from_today), quota)
    }

    /// Queues `patient_id` with inclusion times one minute apart, in call order.
    pub fn enqueue(&mut self, patient_id: Uuid, specialty: &str, priority: u8) -> WaitlistEntry {
        let mut entry = WaitlistEntry::new(patient_id, specialty, priority);
        entry.included_at = entry.included_at + Duration::minutes(self.queued);
        self.queued += 1;
        self.store.add_waitlist_entry(entry.clone());
        entry
    }

    pub fn entry(&self, id: Uuid) -> WaitlistEntry {
        self.store
            .get_waitlist_entry_by_id(id)
            .cloned()
            .expect("entry should exist")
    }

    pub fn book(&mut self, patient_id: Uuid, schedule_id: Uuid, time: NaiveTime, appointment_type: &str) -> Appointment {
        self.store
            .book_appointment(
                BookAppointmentRequest {
                    patient_id,
                    schedule_id,
                    time,
                    appointment_type: appointment_type.to_string(),
                    priority: PriorityLabel::Priority,
                    observations: None,
                },
                test_today(),
            )
            .expect("booking should succeed")
    }
}

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}
