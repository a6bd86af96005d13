/// Error enumeration for store failures shared by every repository trait.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record changed since it was read")]
    PreconditionFailed,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
