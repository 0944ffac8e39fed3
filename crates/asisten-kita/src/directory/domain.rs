use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EducationLevel, Gender, RateUnit, WorkArrangement};

/// Soft lifecycle for a profile; profiles are deactivated, never hard-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl WorkerStatus {
    pub const fn label(self) -> &'static str {
        match self {
            WorkerStatus::Active => "active",
            WorkerStatus::Inactive => "inactive",
            WorkerStatus::Suspended => "suspended",
        }
    }
}

/// Full profile document for a worker. Fields absent from a stored document
/// fall back to their serde defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerProfile {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_id: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub education: Option<EducationLevel>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub job_types: Vec<String>,
    #[serde(default)]
    pub work_arrangements: Vec<WorkArrangement>,
    #[serde(default)]
    pub experience_years: u8,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub rate_min: Option<u64>,
    #[serde(default)]
    pub rate_max: Option<u64>,
    #[serde(default)]
    pub rate_unit: Option<RateUnit>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub rating_avg: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub status: WorkerStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// List-item projection search results are mapped into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_id: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub work_arrangements: Vec<WorkArrangement>,
    #[serde(default)]
    pub experience_years: u8,
    #[serde(default)]
    pub rate_min: Option<u64>,
    #[serde(default)]
    pub rate_max: Option<u64>,
    #[serde(default)]
    pub rate_unit: Option<RateUnit>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub rating_avg: f64,
    #[serde(default)]
    pub rating_count: u32,
}

impl From<WorkerProfile> for WorkerSummary {
    fn from(profile: WorkerProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            avatar_id: profile.avatar_id,
            city: profile.city,
            district: profile.district,
            skills: profile.skills,
            work_arrangements: profile.work_arrangements,
            experience_years: profile.experience_years,
            rate_min: profile.rate_min,
            rate_max: profile.rate_max,
            rate_unit: profile.rate_unit,
            is_verified: profile.is_verified,
            rating_avg: profile.rating_avg,
            rating_count: profile.rating_count,
        }
    }
}

/// Profile fields supplied at signup completion or on edit. Verification and
/// rating state is owned by the platform and cannot be submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewWorkerProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_id: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub education: Option<EducationLevel>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub job_types: Vec<String>,
    #[serde(default)]
    pub work_arrangements: Vec<WorkArrangement>,
    #[serde(default)]
    pub experience_years: u8,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub rate_min: Option<u64>,
    #[serde(default)]
    pub rate_max: Option<u64>,
    #[serde(default)]
    pub rate_unit: Option<RateUnit>,
}

impl NewWorkerProfile {
    pub fn validate(&self) -> Result<(), ProfileRuleViolation> {
        if self.name.trim().is_empty() {
            return Err(ProfileRuleViolation::MissingName);
        }
        if let Some(age) = self.age {
            if !(17..=70).contains(&age) {
                return Err(ProfileRuleViolation::AgeOutOfRange { age });
            }
        }
        if let (Some(min), Some(max)) = (self.rate_min, self.rate_max) {
            if min > max {
                return Err(ProfileRuleViolation::InvertedRateRange { min, max });
            }
        }
        Ok(())
    }
}

/// Validation raised before a profile write reaches the store.
#[derive(Debug, thiserror::Error)]
pub enum ProfileRuleViolation {
    #[error("profile name is required")]
    MissingName,
    #[error("age {age} is outside the accepted 17-70 range")]
    AgeOutOfRange { age: u8 },
    #[error("rate range is inverted (min {min} > max {max})")]
    InvertedRateRange { min: u64, max: u64 },
}
