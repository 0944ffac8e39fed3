//! Job board: lowongan lifecycle (draft, publish, close) and search.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{JobPosting, NewPosting, PostingRuleViolation, PostingStatus, PostingSummary};
pub use router::listing_router;
pub use service::{JobBoardService, ListingError};
