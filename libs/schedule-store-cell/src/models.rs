// libs/schedule-store-cell/src/models.rs
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use shared_config::{AppConfig, MAX_HORIZON_DAYS};
use shared_utils::{age_on, hhmm};

// ==============================================================================
// REGISTRY MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    /// Cartão Nacional de Saúde number.
    pub cns: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate, chronic_conditions: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            birth_date,
            chronic_conditions,
            cns: None,
            created_at: Utc::now(),
        }
    }

    pub fn age_on(&self, today: NaiveDate) -> u32 {
        age_on(self.birth_date, today)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    pub specialties: Vec<String>,
    /// CRM/COREN style council registration.
    pub council_registry: Option<String>,
}

impl Professional {
    pub fn new(name: impl Into<String>, specialties: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            specialties,
            council_registry: None,
        }
    }

    pub fn has_specialty(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|s| same_specialty(s, specialty))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facility {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
}

impl Facility {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            active: true,
        }
    }
}

// ==============================================================================
// SCHEDULE (AGENDA) MODELS
// ==============================================================================

/// Case-insensitive specialty comparison, accents included ("CLÍNICA GERAL"
/// matches "Clínica Geral").
pub fn same_specialty(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    #[serde(alias = "normal")]
    Regular,
    #[serde(alias = "reservado", alias = "retorno")]
    Reserved,
    #[serde(alias = "encaixe")]
    WalkIn,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub available: bool,
    pub kind: SlotKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub facility_id: Uuid,
    pub specialty: String,
    pub date: NaiveDate,
    pub total_quota: u32,
    pub used_quota: u32,
    pub reserved_quota: u32,
    pub blocked: bool,
    pub block_reason: Option<String>,
    pub slots: Vec<TimeSlot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    pub fn matches_specialty(&self, specialty: &str) -> bool {
        same_specialty(&self.specialty, specialty)
    }

    /// Bookable capacity left once used and reserved quota are taken out.
    pub fn free_quota(&self) -> u32 {
        self.total_quota
            .saturating_sub(self.used_quota)
            .saturating_sub(self.reserved_quota)
    }

    pub fn available_times(&self) -> Vec<NaiveTime> {
        self.slots
            .iter()
            .filter(|slot| slot.available)
            .map(|slot| slot.time)
            .collect()
    }

    /// Open means a booking could land here right now.
    pub fn is_open(&self) -> bool {
        !self.blocked && self.free_quota() > 0 && self.slots.iter().any(|slot| slot.available)
    }

    pub fn slot(&self, time: NaiveTime) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.time == time)
    }
}

/// Working-hour window used to generate the half-hour slot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

pub const SLOT_MINUTES: i64 = 30;

impl Default for SlotWindow {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 17,
        }
    }
}

impl SlotWindow {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            start_hour: config.slot_window_start_hour,
            end_hour: config.slot_window_end_hour,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start_hour < self.end_hour && self.end_hour <= 24
    }

    pub fn slot_count(&self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        ((self.end_hour - self.start_hour) * 2) as usize
    }

    pub fn slot_times(&self) -> Vec<NaiveTime> {
        let Some(start) = NaiveTime::from_hms_opt(self.start_hour, 0, 0) else {
            return Vec::new();
        };
        (0..self.slot_count())
            .map(|i| start + Duration::minutes(SLOT_MINUTES * i as i64))
            .collect()
    }
}

// ==============================================================================
// APPOINTMENT (AGENDAMENTO) MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[serde(alias = "agendado")]
    Scheduled,
    #[serde(alias = "confirmado")]
    Confirmed,
    #[serde(alias = "realizado")]
    Completed,
    #[serde(alias = "cancelado")]
    Cancelled,
    #[serde(alias = "faltou")]
    NoShow,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    pub fn can_transition_to(&self, target: &AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        match (self, target) {
            (Scheduled, Confirmed) => true,
            (Scheduled | Confirmed, Completed | Cancelled | NoShow) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLabel {
    #[default]
    Normal,
    #[serde(alias = "prioritario")]
    Priority,
    #[serde(alias = "urgente")]
    Urgent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub schedule_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub appointment_type: String,
    pub status: AppointmentStatus,
    pub priority: PriorityLabel,
    pub confirmation_code: String,
    pub notification_sent: bool,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==============================================================================
// WAITLIST (LISTA DE ESPERA) MODELS
// ==============================================================================

pub const HIGHEST_WAITLIST_PRIORITY: u8 = 1;
pub const LOWEST_WAITLIST_PRIORITY: u8 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    #[serde(alias = "aguardando")]
    Waiting,
    #[serde(alias = "contatado")]
    Contacted,
    #[serde(alias = "agendado")]
    Scheduled,
    #[serde(alias = "desistiu")]
    Withdrawn,
}

impl WaitlistStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WaitlistStatus::Scheduled | WaitlistStatus::Withdrawn)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub specialty: String,
    pub preferred_facility_id: Option<Uuid>,
    /// 1 is served first, 10 last.
    pub priority: u8,
    pub included_at: DateTime<Utc>,
    pub contact_attempts: u32,
    pub last_contact_at: Option<DateTime<Utc>>,
    pub status: WaitlistStatus,
    #[serde(default)]
    pub criteria: Vec<String>,
    pub appointment_id: Option<Uuid>,
}

impl WaitlistEntry {
    pub fn new(patient_id: Uuid, specialty: impl Into<String>, priority: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            specialty: specialty.into(),
            preferred_facility_id: None,
            priority: priority.clamp(HIGHEST_WAITLIST_PRIORITY, LOWEST_WAITLIST_PRIORITY),
            included_at: Utc::now(),
            contact_attempts: 0,
            last_contact_at: None,
            status: WaitlistStatus::Waiting,
            criteria: Vec::new(),
            appointment_id: None,
        }
    }

    pub fn is_urgent(&self) -> bool {
        self.priority <= 3
    }
}

// ==============================================================================
// CONFIGURATION (CONFIGURACOES AGENDA)
// ==============================================================================

/// Upper bound for any day offset the policy or the scheduling horizon accepts.
pub const MAX_ADVANCE_DAYS: u32 = MAX_HORIZON_DAYS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulingPolicy {
    pub min_advance_days: u32,
    pub max_advance_days: u32,
    pub cancellation_notice_hours: u32,
    pub max_no_shows_before_block: u32,
    pub send_reminders: bool,
    pub reminder_hours_before: u32,
    pub request_confirmation: bool,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            min_advance_days: 0,
            max_advance_days: 60,
            cancellation_notice_hours: 24,
            max_no_shows_before_block: 3,
            send_reminders: true,
            reminder_hours_before: 24,
            request_confirmation: true,
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    pub cns: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConditionsRequest {
    pub chronic_conditions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub professional_id: Uuid,
    pub facility_id: Uuid,
    pub specialty: String,
    pub date: NaiveDate,
    pub total_quota: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockScheduleRequest {
    pub blocked: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSchedulesQuery {
    pub specialty: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: Uuid,
    pub schedule_id: Uuid,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub appointment_type: String,
    #[serde(default)]
    pub priority: PriorityLabel,
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}
