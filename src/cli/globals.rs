use crate::cli::commands::store::DEFAULT_STORE_QUOTA;
use crate::registration::{CredentialStore, FileMedium};
use std::path::PathBuf;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub store_dir: PathBuf,
    pub store_quota: usize,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
            store_quota: DEFAULT_STORE_QUOTA,
        }
    }

    #[must_use]
    pub const fn with_quota(mut self, store_quota: usize) -> Self {
        self.store_quota = store_quota;
        self
    }

    /// Opens the file-backed credential store; nothing touches disk until the
    /// first read or write.
    #[must_use]
    pub fn open_store(&self) -> CredentialStore<FileMedium> {
        CredentialStore::new(FileMedium::new(&self.store_dir).with_quota(self.store_quota))
    }
}
