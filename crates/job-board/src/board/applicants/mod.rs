//! Applicant lifecycle: applications and the interviews scheduled against them.
//!
//! An application's status and the existence of its interview record change together.
//! Every compound transition is expressed as a [`UnitOfWork`] that the store commits
//! atomically, so readers never observe one half of a transition.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantKey, ApplicantSelector, ApplicantView, ApplicationRecord, ApplicationStatus,
    ApplyRequest, InterviewDetails, InterviewMode, InterviewRecord, InterviewRequest,
    InterviewSlot, StatusUpdateRequest,
};
pub use repository::{ApplicantRepository, StoreWrite, UnitOfWork};
pub use router::applicant_router;
pub use service::{ApplicantLifecycleService, LifecycleError};
