#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};

use schedule_store_cell::*;
use shared_utils::test_utils::{birth_date_for_age, test_today};

/// Store pre-loaded with one professional and one facility.
pub struct StoreFixture {
    pub store: ScheduleStore,
    pub professional: Professional,
    pub facility: Facility,
}

impl StoreFixture {
    pub fn new() -> Self {
        let mut store = ScheduleStore::new(SlotWindow::default());
        let professional = store.add_professional(Professional::new(
            "Dra. Test",
            vec!["Cardiologia".to_string(), "Ortopedia".to_string()],
        ));
        let facility = store.add_facility(Facility::new("UBS Teste"));
        Self {
            store,
            professional,
            facility,
        }
    }

    pub fn patient(&mut self, age: i32, conditions: &[&str]) -> Patient {
        self.store.add_patient(Patient::new(
            format!("Paciente {}", age),
            birth_date_for_age(age),
            conditions.iter().map(|c| c.to_string()).collect(),
        ))
    }

    pub fn schedule(&mut self, specialty: &str, date: NaiveDate, quota: u32) -> Schedule {
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

    pub fn today_schedule(&mut self, quota: u32) -> Schedule {
        self.schedule("Cardiologia", test_today(), quota)
    }
}

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}
