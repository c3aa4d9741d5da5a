use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use shared_utils::generate_confirmation_code;

use crate::models::{
    Appointment, AppointmentStatus, CreateScheduleRequest, Facility, Patient, PriorityLabel,
    Professional, SlotWindow, WaitlistEntry,
};
use crate::services::store::ScheduleStore;

const SEED_DAYS: i64 = 7;

impl ScheduleStore {
    /// Registry pre-filled with a small municipal network, for demos and
    /// manual testing of the UI.
    pub fn with_demo_data(window: SlotWindow, today: NaiveDate) -> Self {
        let mut store = Self::new(window);

        let ubs_centro = store.add_facility(Facility::new("UBS Centro"));
        let policlinica = store.add_facility(Facility::new("Policlínica Municipal"));
        let mut desativada = Facility::new("UBS Vila Nova (reforma)");
        desativada.active = false;
        store.add_facility(desativada);

        let cardiologista = store.add_professional(Professional::new(
            "Dra. Helena Costa",
            vec!["Cardiologia".to_string()],
        ));
        let clinico = store.add_professional(Professional::new(
            "Dr. Paulo Mendes",
            vec!["Clínica Geral".to_string(), "Geriatria".to_string()],
        ));

        let year = |age: i32| NaiveDate::from_ymd_opt(today.year() - age, 5, 10).unwrap_or(today);
        let maria = store.add_patient(Patient::new(
            "Maria da Silva",
            year(72),
            vec!["hipertensão".to_string(), "diabetes".to_string()],
        ));
        let joao = store.add_patient(Patient::new("João Pereira", year(34), Vec::new()));
        let ana = store.add_patient(Patient::new("Ana Souza", year(1), Vec::new()));

        for offset in 0..SEED_DAYS {
            let date = today + Duration::days(offset);
            for (professional, facility, specialty) in [
                (&cardiologista, &policlinica, "Cardiologia"),
                (&clinico, &ubs_centro, "Clínica Geral"),
            ] {
                let request = CreateScheduleRequest {
                    professional_id: professional.id,
                    facility_id: facility.id,
                    specialty: specialty.to_string(),
                    date,
                    total_quota: window.slot_count() as u32,
                };
                if let Err(e) = store.create_schedule(request) {
                    warn!("Skipping demo schedule on {}: {}", date, e);
                }
            }
        }

        // Past history so the no-show and slot heuristics have something to read.
        let past_schedule = Uuid::new_v4();
        let history = [
            (joao.id, 14, "09:00", AppointmentStatus::NoShow),
            (joao.id, 7, "08:00", AppointmentStatus::NoShow),
            (joao.id, 21, "10:00", AppointmentStatus::Completed),
            (maria.id, 30, "14:00", AppointmentStatus::Completed),
        ];
        for (patient_id, days_ago, time, status) in history {
            let Ok(time) = NaiveTime::parse_from_str(time, "%H:%M") else {
                continue;
            };
            let now = Utc::now();
            store.add_appointment(Appointment {
                id: Uuid::new_v4(),
                patient_id,
                schedule_id: past_schedule,
                date: today - Duration::days(days_ago),
                time,
                appointment_type: "consulta".to_string(),
                status,
                priority: PriorityLabel::Normal,
                confirmation_code: generate_confirmation_code(),
                notification_sent: true,
                observations: None,
                created_at: now,
                updated_at: now,
            });
        }

        let mut urgent = WaitlistEntry::new(maria.id, "Cardiologia", 2);
        urgent.criteria = vec!["idoso".to_string(), "condição crônica".to_string()];
        store.add_waitlist_entry(urgent);
        store.add_waitlist_entry(WaitlistEntry::new(joao.id, "Cardiologia", 7));
        let mut infant = WaitlistEntry::new(ana.id, "Clínica Geral", 3);
        infant.criteria = vec!["criança até 2 anos".to_string()];
        store.add_waitlist_entry(infant);

        info!(
            "Demo data loaded: {} schedules, {} waitlist entries",
            store.list_all_schedules().len(),
            store.list_all_waitlist_entries().len()
        );
        store
    }
}
