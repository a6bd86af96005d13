//! Seeker and employer accounts with salted password hashes.

pub mod credentials;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use credentials::PasswordHash;
pub use domain::{
    EmployerAccount, EmployerProfile, EmployerRegistration, LoginRequest, SeekerAccount,
    SeekerProfile, SeekerProfileUpdate, SeekerRegistration,
};
pub use repository::AccountRepository;
pub use router::account_router;
pub use service::{AccountService, AccountServiceError};
