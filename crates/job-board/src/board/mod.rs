//! Job board domain: postings, accounts, the applicant lifecycle, and the store behind them.

pub mod accounts;
pub mod applicants;
pub mod clock;
pub mod dashboard;
pub(crate) mod http;
pub mod identity;
pub mod jobs;
pub mod repository;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use dashboard::{
    dashboard_router, AppliedJob, DashboardError, DashboardService, EmployerJobSummary,
};
pub use identity::{Email, JobId};
pub use repository::RepositoryError;
pub use store::{DocumentStore, StoreError};
