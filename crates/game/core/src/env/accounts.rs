//! In-memory account registry backing login and registration.
//!
//! Passwords are never stored; each account keeps a random salt and the
//! SHA-256 digest of `salt || password`. The registry lives beside the game
//! state rather than inside it, so snapshots never carry credentials.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Credential {
    salt: [u8; 8],
    digest: [u8; 32],
}

impl Credential {
    fn new(salt: u64, password: &str) -> Self {
        let salt = salt.to_le_bytes();
        Self {
            salt,
            digest: digest(&salt, password),
        }
    }

    fn matches(&self, password: &str) -> bool {
        digest(&self.salt, password) == self.digest
    }
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

#[derive(Clone, Debug, Default)]
pub struct AccountRegistry {
    accounts: BTreeMap<String, Credential>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Adds a new account. Returns false if the name is already taken.
    pub fn register(&mut self, username: &str, password: &str, salt: u64) -> bool {
        if self.contains(username) {
            return false;
        }
        self.accounts
            .insert(username.to_owned(), Credential::new(salt, password));
        true
    }

    /// Returns true only for a known user with the matching password.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.accounts
            .get(username)
            .is_some_and(|credential| credential.matches(password))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
