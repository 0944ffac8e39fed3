use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EducationLevel, Gender, RateUnit, WorkArrangement};

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Lifecycle of a lowongan. Closed and expired are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingStatus {
    #[default]
    Draft,
    Published,
    Closed,
    Expired,
}

impl PostingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PostingStatus::Draft => "draft",
            PostingStatus::Published => "published",
            PostingStatus::Closed => "closed",
            PostingStatus::Expired => "expired",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, PostingStatus::Closed | PostingStatus::Expired)
    }
}

/// Full lowongan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub education: Option<EducationLevel>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub job_types: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub work_arrangements: Vec<WorkArrangement>,
    #[serde(default)]
    pub salary_min: Option<u64>,
    #[serde(default)]
    pub salary_max: Option<u64>,
    #[serde(default)]
    pub rate_unit: Option<RateUnit>,
    pub user_id: String,
    #[serde(default)]
    pub status: PostingStatus,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub applications_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// List-item projection returned by lowongan search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub job_types: Vec<String>,
    #[serde(default)]
    pub work_arrangements: Vec<WorkArrangement>,
    #[serde(default)]
    pub salary_min: Option<u64>,
    #[serde(default)]
    pub salary_max: Option<u64>,
    #[serde(default)]
    pub rate_unit: Option<RateUnit>,
    #[serde(default)]
    pub status: PostingStatus,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub applications_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields an employer supplies when drafting a lowongan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPosting {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub education: Option<EducationLevel>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub job_types: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub work_arrangements: Vec<WorkArrangement>,
    #[serde(default)]
    pub salary_min: Option<u64>,
    #[serde(default)]
    pub salary_max: Option<u64>,
    #[serde(default)]
    pub rate_unit: Option<RateUnit>,
}

impl NewPosting {
    pub fn validate(&self) -> Result<(), PostingRuleViolation> {
        let title_chars = self.title.trim().chars().count();
        if title_chars == 0 || title_chars > MAX_TITLE_CHARS {
            return Err(PostingRuleViolation::TitleLength { chars: title_chars });
        }
        let description_chars = self.description.chars().count();
        if description_chars > MAX_DESCRIPTION_CHARS {
            return Err(PostingRuleViolation::DescriptionLength {
                chars: description_chars,
            });
        }
        if self.city.trim().is_empty() {
            return Err(PostingRuleViolation::MissingCity);
        }
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                return Err(PostingRuleViolation::InvertedSalaryRange { min, max });
            }
        }
        Ok(())
    }
}

/// Validation raised before a posting write reaches the store.
#[derive(Debug, thiserror::Error)]
pub enum PostingRuleViolation {
    #[error("title must be 1-100 characters (got {chars})")]
    TitleLength { chars: usize },
    #[error("description is limited to 1000 characters (got {chars})")]
    DescriptionLength { chars: usize },
    #[error("a required city is missing")]
    MissingCity,
    #[error("salary range is inverted (min {min} > max {max})")]
    InvertedSalaryRange { min: u64, max: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewPosting {
        NewPosting {
            title: "ART menginap untuk keluarga kecil".to_string(),
            description: "Memasak dan bersih-bersih harian.".to_string(),
            city: "Malang".to_string(),
            ..NewPosting::default()
        }
    }

    #[test]
    fn accepts_a_well_formed_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn rejects_title_over_the_cap() {
        let mut posting = draft();
        posting.title = "x".repeat(MAX_TITLE_CHARS + 1);
        assert!(matches!(
            posting.validate(),
            Err(PostingRuleViolation::TitleLength { chars }) if chars == MAX_TITLE_CHARS + 1
        ));
    }

    #[test]
    fn rejects_description_over_the_cap() {
        let mut posting = draft();
        posting.description = "y".repeat(MAX_DESCRIPTION_CHARS + 1);
        assert!(matches!(
            posting.validate(),
            Err(PostingRuleViolation::DescriptionLength { .. })
        ));
    }

    #[test]
    fn rejects_missing_city_and_inverted_salary() {
        let mut posting = draft();
        posting.city = "  ".to_string();
        assert!(matches!(
            posting.validate(),
            Err(PostingRuleViolation::MissingCity)
        ));

        let mut posting = draft();
        posting.salary_min = Some(4_000_000);
        posting.salary_max = Some(2_000_000);
        assert!(matches!(
            posting.validate(),
            Err(PostingRuleViolation::InvertedSalaryRange { .. })
        ));
    }
}
