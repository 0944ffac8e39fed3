use serde::{Deserialize, Serialize};

use crate::domain::{EducationLevel, ExperienceLevel, Gender, WorkArrangement};

/// Page size used when a request does not name one.
pub const DEFAULT_PAGE_SIZE: usize = 12;
/// Upper bound on a single page so one request cannot drag a collection.
pub const MAX_PAGE_SIZE: usize = 100;

/// A search request: pagination window, optional free-text term, optional
/// typed filters, optional explicit ordering.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams<F> {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub filters: Option<F>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

impl<F> SearchParams<F> {
    /// Bare pagination window with no term, filters, or sort.
    pub fn page(limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            q: None,
            filters: None,
            sort: None,
        }
    }

    pub fn clamped_limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

impl<F> Default for SearchParams<F> {
    fn default() -> Self {
        Self::page(DEFAULT_PAGE_SIZE, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Inclusive numeric bounds, each side independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl RangeFilter {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFilter {
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub districts: Vec<String>,
}

impl LocationFilter {
    pub fn cities(cities: &[&str]) -> Self {
        Self {
            cities: cities.iter().map(|city| city.to_string()).collect(),
            districts: Vec::new(),
        }
    }
}

/// Typed filters for worker-profile search. Every field is optional and an
/// absent field emits no predicate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerFilters {
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<LocationFilter>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub rating: Option<RangeFilter>,
    #[serde(default)]
    pub experience: Option<ExperienceLevel>,
    #[serde(default)]
    pub work_types: Option<Vec<WorkArrangement>>,
    #[serde(default)]
    pub age: Option<RangeFilter>,
}

/// Typed filters for lowongan search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilters {
    #[serde(default)]
    pub job_types: Option<Vec<String>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub work_arrangements: Option<Vec<WorkArrangement>>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub education: Option<EducationLevel>,
    #[serde(default)]
    pub salary: Option<RangeFilter>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub owner: Option<String>,
}
