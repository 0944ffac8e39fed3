//! Job-application intake and lifecycle: one pending application per
//! (lowongan, worker) pair, owner decisions, applicant withdrawal, and the
//! list/join variants consumed by both sides of the marketplace.

pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationQuery, ApplicationStatus, ApplicationWithProfile, NewApplication,
    TransitionPolicy,
};
pub use router::application_router;
pub use service::{ApplicationError, ApplicationService};
