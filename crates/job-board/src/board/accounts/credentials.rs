use std::fmt;

use argon2::password_hash::{
    self, PasswordHash as ParsedHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use serde::{Deserialize, Serialize};

const SALT_LEN: usize = 16;

/// Argon2id hash of an account password in PHC string form. Plaintext is never stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(password: &str) -> Result<Self, password_hash::Error> {
        let bytes: [u8; SALT_LEN] = rand::random();
        let salt = SaltString::encode_b64(&bytes)?;
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(Self(hash.to_string()))
    }

    /// A stored value that no longer parses as a PHC string never verifies.
    pub fn verify(&self, password: &str) -> bool {
        match ParsedHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
