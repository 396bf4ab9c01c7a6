//! Explicit roster cache
//!
//! Parsed rosters are kept per path together with the SHA-256 digest of the
//! bytes they were parsed from. A `load` re-reads the file and only re-parses
//! when the digest changed. The cache lives as long as its owner; nothing
//! is memoized globally.

use super::roster::{ConfigError, Roster};
use crate::models::Catalog;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
struct CachedRoster {
    digest: String,
    roster: Arc<Roster>,
}

#[derive(Debug)]
pub struct RosterCache {
    catalog: Arc<Catalog>,
    entries: HashMap<PathBuf, CachedRoster>,
}

impl RosterCache {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            entries: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Load `path`, reusing the cached roster if the file is unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<Roster>, ConfigError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let digest = fingerprint(&bytes);

        if let Some(cached) = self.entries.get(path) {
            if cached.digest == digest {
                return Ok(cached.roster.clone());
            }
        }

        let roster = Arc::new(Roster::from_slice(&bytes, self.catalog.clone())?);
        self.entries.insert(
            path.to_path_buf(),
            CachedRoster {
                digest,
                roster: roster.clone(),
            },
        );
        Ok(roster)
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&mut self, path: impl AsRef<Path>) -> bool {
        self.entries.remove(path.as_ref()).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Hex SHA-256 of roster bytes
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
