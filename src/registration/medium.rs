//! String-keyed key-value media backing the credential store.
//!
//! A medium only moves strings. It may fail on read or write; the store decides
//! what a failure means.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MediumError {
    #[error("quota exceeded: value needs {needed} bytes, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistent string-to-string storage, in the shape of browser local storage.
pub trait KeyValueMedium {
    /// Returns `Ok(None)` when the key has never been written.
    ///
    /// # Errors
    /// Returns an error if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, MediumError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the value exceeds the quota or cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), MediumError>;
}

fn check_quota(quota: Option<usize>, value: &str) -> Result<(), MediumError> {
    match quota {
        Some(quota) if value.len() > quota => Err(MediumError::QuotaExceeded {
            needed: value.len(),
            quota,
        }),
        _ => Ok(()),
    }
}

/// In-process medium, used by tests and embedders that do not need durability.
#[derive(Debug, Default, Clone)]
pub struct MemoryMedium {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryMedium {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes whose value is larger than `quota` bytes.
    #[must_use]
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }
}

impl KeyValueMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>, MediumError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MediumError> {
        check_quota(self.quota, value)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed medium: each key is one `<key>.json` file.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader sees either the previous value or the new one.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileMedium {
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota: None,
        }
    }

    #[must_use]
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, MediumError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'));
        if !valid {
            return Err(MediumError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>, MediumError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MediumError> {
        let path = self.path_for(key)?;
        check_quota(self.quota, value)?;

        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
