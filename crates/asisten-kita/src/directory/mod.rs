//! Worker-profile directory: the searchable roster of asisten rumah tangga.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    NewWorkerProfile, ProfileRuleViolation, WorkerProfile, WorkerStatus, WorkerSummary,
};
pub use router::worker_router;
pub use service::{DirectoryError, WorkerDirectoryService};
