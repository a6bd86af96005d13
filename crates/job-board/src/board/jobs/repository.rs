use crate::board::identity::{Email, JobId};
use crate::board::repository::RepositoryError;

use super::domain::JobPosting;

/// Storage abstraction for job postings.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError>;
    fn update(&self, job: JobPosting) -> Result<JobPosting, RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    /// Removes the posting and returns it. Applications referencing it are left alone.
    fn delete(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError>;
    fn posted_by(&self, employer: &Email) -> Result<Vec<JobPosting>, RepositoryError>;
}
