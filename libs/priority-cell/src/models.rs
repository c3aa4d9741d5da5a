use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_utils::hhmm;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// Outcome of the priority heuristic. A higher `score` means greater need.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriorityAssessment {
    pub score: u8,
    pub raw_score: f64,
    pub criteria: Vec<String>,
}

impl PriorityAssessment {
    pub fn waitlist_priority(&self) -> u8 {
        to_waitlist_priority(self.score)
    }
}

/// The waitlist serves 1 first and 10 last, the engine scores need from 1 to
/// 10, so the scale is flipped.
pub fn to_waitlist_priority(score: u8) -> u8 {
    (MAX_SCORE + 1) - score.clamp(MIN_SCORE, MAX_SCORE)
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityScoreRequest {
    pub patient_id: Uuid,
    pub appointment_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityScoreResponse {
    pub patient_id: Uuid,
    pub assessment: PriorityAssessment,
    pub waitlist_priority: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoShowRequest {
    pub patient_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestTimeRequest {
    pub patient_id: Uuid,
    #[serde(with = "hhmm::vec")]
    pub available_times: Vec<NaiveTime>,
}
