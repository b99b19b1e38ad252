//! Login credential verification.
//!
//! Only SHA-256 digests of the configured username and password are kept in
//! memory; submitted values are hashed the same way and compared digest to
//! digest.

use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct Credentials {
    username_hash: String,
    password_hash: String,
}

fn hash(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username_hash: hash(username),
            password_hash: hash(password),
        }
    }

    /// Whether `username` and `password` both match the configured pair.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both so a wrong username costs the same as a wrong password
        let username_ok = hash(username) == self.username_hash;
        let password_ok = hash(password) == self.password_hash;
        username_ok & password_ok
    }
}
