use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{error, info};

use crate::board::clock::{Clock, SystemClock};
use crate::board::identity::{Email, JobId};
use crate::board::repository::RepositoryError;

use super::domain::{JobDraft, JobPosting};
use super::repository::JobRepository;

/// Create/read/update/delete over job postings.
pub struct JobBoardService<J> {
    repository: Arc<J>,
    clock: Arc<dyn Clock>,
}

impl<J> JobBoardService<J>
where
    J: JobRepository + 'static,
{
    pub fn new(repository: Arc<J>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<J>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub fn create(&self, draft: JobDraft) -> Result<JobPosting, JobServiceError> {
        let posting = self.build(&draft)?;
        let stored = self.repository.insert(posting).map_err(store_failure)?;
        info!(job_id = %stored.id, posted_by = %stored.posted_by, "job posted");
        Ok(stored)
    }

    /// Validates every draft before inserting any, so a bad row leaves the store untouched.
    pub fn import(&self, drafts: Vec<JobDraft>) -> Result<Vec<JobPosting>, JobServiceError> {
        let postings = drafts
            .iter()
            .enumerate()
            .map(|(index, draft)| {
                self.build(draft).map_err(|err| match err {
                    JobServiceError::InvalidInput(reason) => {
                        JobServiceError::InvalidInput(format!("row {}: {reason}", index + 1))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut stored = Vec::with_capacity(postings.len());
        for posting in postings {
            stored.push(self.repository.insert(posting).map_err(store_failure)?);
        }
        info!(count = stored.len(), "job postings imported");
        Ok(stored)
    }

    /// Newest postings first.
    pub fn list(&self) -> Result<Vec<JobPosting>, JobServiceError> {
        let mut jobs = self.repository.list().map_err(store_failure)?;
        sort_newest_first(&mut jobs);
        Ok(jobs)
    }

    pub fn posted_by(&self, employer: &Email) -> Result<Vec<JobPosting>, JobServiceError> {
        let mut jobs = self.repository.posted_by(employer).map_err(store_failure)?;
        sort_newest_first(&mut jobs);
        Ok(jobs)
    }

    pub fn get(&self, id: &JobId) -> Result<JobPosting, JobServiceError> {
        self.repository
            .fetch(id)
            .map_err(store_failure)?
            .ok_or_else(|| JobServiceError::NotFound(id.clone()))
    }

    /// Replaces the editable fields. Identity, poster and timestamp are preserved.
    pub fn update(&self, id: &JobId, draft: JobDraft) -> Result<JobPosting, JobServiceError> {
        let fields = draft.fields().map_err(JobServiceError::InvalidInput)?;
        let mut posting = self.get(id)?;
        fields.apply_to(&mut posting);

        match self.repository.update(posting) {
            Ok(updated) => {
                info!(job_id = %updated.id, "job updated");
                Ok(updated)
            }
            Err(RepositoryError::NotFound) => Err(JobServiceError::NotFound(id.clone())),
            Err(other) => Err(store_failure(other)),
        }
    }

    pub fn delete(&self, id: &JobId) -> Result<JobPosting, JobServiceError> {
        let removed = self
            .repository
            .delete(id)
            .map_err(store_failure)?
            .ok_or_else(|| JobServiceError::NotFound(id.clone()))?;
        info!(job_id = %removed.id, "job deleted");
        Ok(removed)
    }

    fn build(&self, draft: &JobDraft) -> Result<JobPosting, JobServiceError> {
        let fields = draft.fields().map_err(JobServiceError::InvalidInput)?;
        let posted_by = draft.poster().map_err(JobServiceError::InvalidInput)?;

        Ok(JobPosting {
            id: JobId::generate(),
            title: fields.title,
            company: fields.company,
            location: fields.location,
            job_type: fields.job_type,
            salary: fields.salary,
            description: fields.description,
            posted_by,
            posted_at: self.clock.now(),
        })
    }
}

fn sort_newest_first(jobs: &mut [JobPosting]) {
    jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at).then_with(|| a.id.cmp(&b.id)));
}

fn store_failure(err: RepositoryError) -> JobServiceError {
    error!(error = %err, "job store failure");
    JobServiceError::Repository(err)
}

/// Error raised by the job service.
#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error("invalid job posting: {0}")]
    InvalidInput(String),
    #[error("job {0} not found")]
    NotFound(JobId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl JobServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            JobServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            JobServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            JobServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
