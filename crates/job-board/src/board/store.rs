//! Document store backing every repository trait.
//!
//! All five collections live behind one mutex, so a [`UnitOfWork`] sees and writes a
//! consistent view. When opened with a path the store also keeps a JSON snapshot on disk,
//! rewritten through a temporary file and a rename after each successful mutation.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::board::accounts::{AccountRepository, EmployerAccount, SeekerAccount};
use crate::board::applicants::{
    ApplicantKey, ApplicantRepository, ApplicationRecord, InterviewRecord, UnitOfWork,
};
use crate::board::identity::{Email, JobId};
use crate::board::jobs::{JobPosting, JobRepository};
use crate::board::repository::RepositoryError;

#[derive(Debug, Default, Clone)]
struct Collections {
    jobs: BTreeMap<JobId, JobPosting>,
    seekers: BTreeMap<Email, SeekerAccount>,
    employers: BTreeMap<Email, EmployerAccount>,
    applications: BTreeMap<ApplicantKey, ApplicationRecord>,
    interviews: BTreeMap<ApplicantKey, InterviewRecord>,
}

/// On-disk layout. Maps are flattened to lists so keys never need string encodings.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    #[serde(default)]
    jobs: Vec<JobPosting>,
    #[serde(default)]
    seekers: Vec<SeekerAccount>,
    #[serde(default)]
    employers: Vec<EmployerAccount>,
    #[serde(default)]
    applications: Vec<ApplicationRecord>,
    #[serde(default)]
    interviews: Vec<InterviewRecord>,
}

impl From<&Collections> for Snapshot {
    fn from(collections: &Collections) -> Self {
        Self {
            jobs: collections.jobs.values().cloned().collect(),
            seekers: collections.seekers.values().cloned().collect(),
            employers: collections.employers.values().cloned().collect(),
            applications: collections.applications.values().cloned().collect(),
            interviews: collections.interviews.values().cloned().collect(),
        }
    }
}

impl From<Snapshot> for Collections {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            jobs: snapshot
                .jobs
                .into_iter()
                .map(|job| (job.id.clone(), job))
                .collect(),
            seekers: snapshot
                .seekers
                .into_iter()
                .map(|seeker| (seeker.email.clone(), seeker))
                .collect(),
            employers: snapshot
                .employers
                .into_iter()
                .map(|employer| (employer.email.clone(), employer))
                .collect(),
            applications: snapshot
                .applications
                .into_iter()
                .map(|application| (application.key(), application))
                .collect(),
            interviews: snapshot
                .interviews
                .into_iter()
                .map(|interview| (interview.key(), interview))
                .collect(),
        }
    }
}

/// Failure to load a snapshot when opening a persistent store.
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Corrupt { path: PathBuf, source: serde_json::Error },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "failed to read store {}: {source}", path.display())
            }
            StoreError::Corrupt { path, source } => {
                write!(f, "store {} is not a valid snapshot: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Corrupt { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Default)]
pub struct DocumentStore {
    collections: Mutex<Collections>,
    path: Option<PathBuf>,
}

impl DocumentStore {
    /// Store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the snapshot at `path` if it exists and persists every later mutation there.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let collections = match fs::read(&path) {
            Ok(bytes) => {
                let snapshot: Snapshot =
                    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                        path: path.clone(),
                        source,
                    })?;
                Collections::from(snapshot)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Collections::default(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        info!(
            path = %path.display(),
            jobs = collections.jobs.len(),
            applications = collections.applications.len(),
            interviews = collections.interviews.len(),
            "document store opened"
        );

        Ok(Self {
            collections: Mutex::new(collections),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, RepositoryError> {
        self.collections
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }

    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> Result<T, RepositoryError> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }

    /// Runs `f` against the collections. With a backing file the change is staged on a
    /// copy and only installed once the snapshot is written.
    ///
    /// The snapshot is serialized and written synchronously while the lock is held, so
    /// every write costs a full clone and a file rewrite and blocks the calling worker
    /// thread until the rename completes. A failed write leaves the in-memory state as it
    /// was.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Collections) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut guard = self.lock()?;
        match &self.path {
            None => f(&mut guard),
            Some(path) => {
                let mut staged = guard.clone();
                let value = f(&mut staged)?;
                persist(path, &staged)?;
                *guard = staged;
                Ok(value)
            }
        }
    }
}

fn persist(path: &Path, collections: &Collections) -> Result<(), RepositoryError> {
    let unavailable = |err: &dyn std::fmt::Display| {
        error!(path = %path.display(), error = %err, "failed to persist store snapshot");
        RepositoryError::Unavailable(format!("failed to write {}: {err}", path.display()))
    };

    let bytes =
        serde_json::to_vec_pretty(&Snapshot::from(collections)).map_err(|err| unavailable(&err))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| unavailable(&err))?;
    }

    let staging = path.with_extension("json.tmp");
    fs::write(&staging, bytes).map_err(|err| unavailable(&err))?;
    fs::rename(&staging, path).map_err(|err| unavailable(&err))?;
    debug!(path = %path.display(), "store snapshot written");
    Ok(())
}

impl JobRepository for DocumentStore {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        self.mutate(|c| {
            if c.jobs.contains_key(&job.id) {
                return Err(RepositoryError::Conflict);
            }
            c.jobs.insert(job.id.clone(), job.clone());
            Ok(job)
        })
    }

    fn update(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        self.mutate(|c| match c.jobs.get_mut(&job.id) {
            Some(slot) => {
                *slot = job.clone();
                Ok(job)
            }
            None => Err(RepositoryError::NotFound),
        })
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        self.read(|c| c.jobs.get(id).cloned())
    }

    fn delete(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        self.mutate(|c| Ok(c.jobs.remove(id)))
    }

    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        self.read(|c| c.jobs.values().cloned().collect())
    }

    fn posted_by(&self, employer: &Email) -> Result<Vec<JobPosting>, RepositoryError> {
        self.read(|c| {
            c.jobs
                .values()
                .filter(|job| &job.posted_by == employer)
                .cloned()
                .collect()
        })
    }
}

impl AccountRepository for DocumentStore {
    fn insert_seeker(&self, account: SeekerAccount) -> Result<SeekerAccount, RepositoryError> {
        self.mutate(|c| {
            if c.seekers.contains_key(&account.email) {
                return Err(RepositoryError::Conflict);
            }
            c.seekers.insert(account.email.clone(), account.clone());
            Ok(account)
        })
    }

    fn fetch_seeker(&self, email: &Email) -> Result<Option<SeekerAccount>, RepositoryError> {
        self.read(|c| c.seekers.get(email).cloned())
    }

    fn update_seeker(&self, account: SeekerAccount) -> Result<SeekerAccount, RepositoryError> {
        self.mutate(|c| match c.seekers.get_mut(&account.email) {
            Some(slot) => {
                *slot = account.clone();
                Ok(account)
            }
            None => Err(RepositoryError::NotFound),
        })
    }

    fn insert_employer(
        &self,
        account: EmployerAccount,
    ) -> Result<EmployerAccount, RepositoryError> {
        self.mutate(|c| {
            if c.employers.contains_key(&account.email) {
                return Err(RepositoryError::Conflict);
            }
            c.employers.insert(account.email.clone(), account.clone());
            Ok(account)
        })
    }

    fn fetch_employer(&self, email: &Email) -> Result<Option<EmployerAccount>, RepositoryError> {
        self.read(|c| c.employers.get(email).cloned())
    }
}

impl ApplicantRepository for DocumentStore {
    fn insert_application(
        &self,
        record: ApplicationRecord,
    ) -> Result<ApplicationRecord, RepositoryError> {
        self.mutate(|c| {
            let key = record.key();
            if c.applications.contains_key(&key) {
                return Err(RepositoryError::Conflict);
            }
            c.applications.insert(key, record.clone());
            Ok(record)
        })
    }

    fn fetch_application(
        &self,
        key: &ApplicantKey,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.read(|c| c.applications.get(key).cloned())
    }

    fn applications_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.read(|c| {
            c.applications
                .values()
                .filter(|record| &record.job_id == job_id)
                .cloned()
                .collect()
        })
    }

    fn applications_for_seeker(
        &self,
        email: &Email,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.read(|c| {
            c.applications
                .values()
                .filter(|record| &record.seeker_email == email)
                .cloned()
                .collect()
        })
    }

    fn fetch_interview(
        &self,
        key: &ApplicantKey,
    ) -> Result<Option<InterviewRecord>, RepositoryError> {
        self.read(|c| c.interviews.get(key).cloned())
    }

    fn interviews_for_job(&self, job_id: &JobId) -> Result<Vec<InterviewRecord>, RepositoryError> {
        self.read(|c| {
            c.interviews
                .values()
                .filter(|record| &record.job_id == job_id)
                .cloned()
                .collect()
        })
    }

    fn commit(&self, unit: UnitOfWork) -> Result<(), RepositoryError> {
        self.mutate(|c| unit.apply(&mut c.applications, &mut c.interviews))
    }
}
