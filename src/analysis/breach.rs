//! Compromised-password lookups.
//!
//! [`BreachSource`] is the seam for a real breach database. The only
//! implementation shipped is [`LocalBreachList`], which checks the
//! built-in common-password list and never touches the network.

use super::patterns::COMMON_PASSWORDS;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Outcome of a breach lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompromiseCheck {
    /// True if the password is known to be exposed.
    pub compromised: bool,
    /// Known exposure count, `None` when the source cannot tell.
    pub occurrences: Option<u64>,
    /// Human-readable verdict.
    pub message: &'static str,
}

impl CompromiseCheck {
    fn exposed(occurrences: Option<u64>) -> Self {
        Self {
            compromised: true,
            occurrences,
            message: "this password is widely used and may be dangerous",
        }
    }

    fn clean() -> Self {
        Self {
            compromised: false,
            occurrences: Some(0),
            message: "this password looks unique",
        }
    }
}

/// A source of known-compromised passwords.
pub trait BreachSource {
    /// Looks up a password.
    fn check(&self, password: &str) -> CompromiseCheck;
}

/// Breach source backed by SHA-256 digests of a local list.
///
/// Lookups are case-insensitive exact matches. Only digests are kept
/// in memory.
#[derive(Debug, Clone)]
pub struct LocalBreachList {
    digests: HashSet<[u8; 32]>,
}

impl LocalBreachList {
    /// Builds a list from plaintext passwords.
    pub fn from_passwords<I, S>(passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let digests = passwords
            .into_iter()
            .map(|p| digest(p.as_ref()))
            .collect();
        Self { digests }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Returns true if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

impl Default for LocalBreachList {
    fn default() -> Self {
        Self::from_passwords(COMMON_PASSWORDS)
    }
}

impl BreachSource for LocalBreachList {
    fn check(&self, password: &str) -> CompromiseCheck {
        if self.digests.contains(&digest(password)) {
            CompromiseCheck::exposed(None)
        } else {
            CompromiseCheck::clean()
        }
    }
}

fn digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.to_lowercase().as_bytes()).into()
}
