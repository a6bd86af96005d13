//! Job postings: validation, storage contract, CSV import, and HTTP routes.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{JobDraft, JobPosting, JobType};
pub use import::{JobCsvImporter, JobImportError};
pub use repository::JobRepository;
pub use router::job_router;
pub use service::{JobBoardService, JobServiceError};
