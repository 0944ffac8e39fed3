//! Vocabulary enums shared by worker profiles, job postings, and search
//! filters. Serialized forms are the snake_case strings stored in documents.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Indonesian school tiers, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Sd,
    Smp,
    Sma,
    Diploma,
    Sarjana,
}

impl EducationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::Sd => "sd",
            EducationLevel::Smp => "smp",
            EducationLevel::Sma => "sma",
            EducationLevel::Diploma => "diploma",
            EducationLevel::Sarjana => "sarjana",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkArrangement {
    LiveIn,
    DailyCommute,
    PartTime,
}

impl WorkArrangement {
    pub const fn label(self) -> &'static str {
        match self {
            WorkArrangement::LiveIn => "live_in",
            WorkArrangement::DailyCommute => "daily_commute",
            WorkArrangement::PartTime => "part_time",
        }
    }
}

/// Unit attached to a compensation range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RateUnit {
    pub const fn label(self) -> &'static str {
        match self {
            RateUnit::Hourly => "hourly",
            RateUnit::Daily => "daily",
            RateUnit::Weekly => "weekly",
            RateUnit::Monthly => "monthly",
            RateUnit::Yearly => "yearly",
        }
    }
}

/// Coarse experience buckets offered by the search UI. Each bucket maps to a
/// single inclusive lower bound on years of experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Experienced,
}

impl ExperienceLevel {
    pub const fn min_years(self) -> u8 {
        match self {
            ExperienceLevel::Beginner => 0,
            ExperienceLevel::Intermediate => 2,
            ExperienceLevel::Experienced => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Experienced => "experienced",
        }
    }
}
