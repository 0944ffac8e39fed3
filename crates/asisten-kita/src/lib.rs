//! Core library for the AsistenKita marketplace: a document-store-backed
//! worker directory (asisten rumah tangga), job board (lowongan), and
//! job-application lifecycle, plus the config/telemetry plumbing shared by
//! the service binary.

pub mod applications;
pub mod config;
pub mod directory;
pub mod domain;
pub mod error;
pub mod listings;
pub mod search;
pub mod store;
pub mod telemetry;
