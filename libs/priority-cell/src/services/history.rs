use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use uuid::Uuid;

use schedule_store_cell::{Appointment, AppointmentStatus, ScheduleStore};

/// Read access to past appointments, so the engine can run against the live
/// store or a plain slice.
pub trait AppointmentHistory {
    fn appointments_for(&self, patient_id: Uuid) -> Vec<&Appointment>;
}

impl AppointmentHistory for ScheduleStore {
    fn appointments_for(&self, patient_id: Uuid) -> Vec<&Appointment> {
        self.get_appointments_for_patient(patient_id)
    }
}

impl AppointmentHistory for [Appointment] {
    fn appointments_for(&self, patient_id: Uuid) -> Vec<&Appointment> {
        self.iter().filter(|a| a.patient_id == patient_id).collect()
    }
}

impl AppointmentHistory for Vec<Appointment> {
    fn appointments_for(&self, patient_id: Uuid) -> Vec<&Appointment> {
        self.as_slice().appointments_for(patient_id)
    }
}

/// Attendance summary over appointments dated before `today`. Cancelled
/// appointments count neither as attended nor as missed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientHistory {
    pub total: usize,
    pub no_shows: usize,
    pub no_show_weekdays: Vec<Weekday>,
    pub completed_times: Vec<NaiveTime>,
}

impl PatientHistory {
    pub fn collect<H>(source: &H, patient_id: Uuid, today: NaiveDate) -> Self
    where
        H: AppointmentHistory + ?Sized,
    {
        let mut history = Self::default();

        for appointment in source.appointments_for(patient_id) {
            if appointment.date >= today || appointment.status == AppointmentStatus::Cancelled {
                continue;
            }
            history.total += 1;
            match appointment.status {
                AppointmentStatus::NoShow => {
                    history.no_shows += 1;
                    history.no_show_weekdays.push(appointment.date.weekday());
                }
                AppointmentStatus::Completed => history.completed_times.push(appointment.time),
                _ => {}
            }
        }

        history
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn no_show_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.no_shows as f64 / self.total as f64)
    }
}
