use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::directory::WorkerSummary;
use crate::search::{SortSpec, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Lifecycle of an application. Pending is the only state with outgoing
/// transitions; accepted, rejected, and withdrawn are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

/// How strictly status transitions are gated. `Permissive` mirrors the
/// historical behavior where any application could be re-decided;
/// `PendingOnly` rejects transitions out of absorbing states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    PendingOnly,
}

/// One worker's application to one lowongan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub id: String,
    pub lowongan_id: String,
    pub art_user_id: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub message: Option<String>,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Submission payload for a new application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewApplication {
    #[serde(default)]
    pub lowongan_id: String,
    #[serde(default)]
    pub art_user_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewApplication {
    pub fn for_pair(lowongan_id: &str, art_user_id: &str) -> Self {
        Self {
            lowongan_id: lowongan_id.to_string(),
            art_user_id: art_user_id.to_string(),
            message: None,
        }
    }
}

/// Filter/pagination parameters for listing applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub art_user_id: Option<String>,
    #[serde(default)]
    pub lowongan_id: Option<String>,
    #[serde(default)]
    pub statuses: Vec<ApplicationStatus>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ApplicationQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            art_user_id: None,
            lowongan_id: None,
            statuses: Vec::new(),
            sort: None,
        }
    }
}

impl ApplicationQuery {
    pub fn for_worker(art_user_id: &str, limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            art_user_id: Some(art_user_id.to_string()),
            ..Self::default()
        }
    }

    pub fn for_job(lowongan_id: &str, limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            lowongan_id: Some(lowongan_id.to_string()),
            ..Self::default()
        }
    }

    pub fn clamped_limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Application row joined with the applicant's profile summary. `worker` is
/// `None` when the profile could not be fetched; the row itself still counts.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithProfile {
    pub application: Application,
    pub worker: Option<WorkerSummary>,
}
