//! Credential store: normalized email -> registration record, persisted as a
//! single JSON object under one medium key.
//!
//! Neither operation fails. A missing, corrupt or oddly shaped value reads as an
//! empty store, and a failed write is logged and dropped so registration
//! feedback never waits on storage.

use super::medium::KeyValueMedium;
use super::role::{Role, StoredRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Medium key holding the whole credential map.
pub const STORAGE_KEY: &str = "careconnect-registered-users";

/// Persisted result of a successful registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub first_name: String,
    pub last_name: String,
    /// Normalized email; always equal to the record's key in the store.
    pub email: String,
    pub allowed_roles: Vec<StoredRole>,
}

impl RegistrationRecord {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        roles: &[Role],
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            allowed_roles: roles.iter().copied().map(StoredRole::from).collect(),
        }
    }
}

/// Credential map as read from storage, ordered by email.
pub type CredentialMap = BTreeMap<String, RegistrationRecord>;

/// What happened to an upsert once it reached the medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    Written,
    /// The write failed and was swallowed.
    Dropped,
}

#[derive(Debug, Clone)]
pub struct CredentialStore<M> {
    medium: M,
}

impl<M: KeyValueMedium> CredentialStore<M> {
    pub const fn new(medium: M) -> Self {
        Self { medium }
    }

    pub const fn medium(&self) -> &M {
        &self.medium
    }

    pub fn medium_mut(&mut self) -> &mut M {
        &mut self.medium
    }

    /// Reads the whole map. Never fails: read errors, malformed JSON and a
    /// non-object value all yield an empty map.
    pub fn load(&self) -> CredentialMap {
        match self.medium.get(STORAGE_KEY) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => CredentialMap::new(),
            Err(err) => {
                warn!("credential store unreadable, treating as empty: {err}");
                CredentialMap::new()
            }
        }
    }

    /// Inserts or fully replaces the record under `record.email`
    /// (last write wins) and writes the map back.
    ///
    /// A failed write is swallowed and reported as [`Persisted::Dropped`].
    pub fn upsert(&mut self, record: RegistrationRecord) -> Persisted {
        let mut mapping = self.load();
        let email = record.email.clone();
        mapping.insert(email.clone(), record);

        let encoded = match serde_json::to_string(&mapping) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!("failed to encode credential store: {err}");
                return Persisted::Dropped;
            }
        };

        match self.medium.set(STORAGE_KEY, &encoded) {
            Ok(()) => {
                debug!("stored registration for {email}");
                Persisted::Written
            }
            Err(err) => {
                warn!("failed to persist registration for {email}: {err}");
                Persisted::Dropped
            }
        }
    }
}

/// Decodes the stored value, keeping only entries that have the record shape
/// and whose email matches their key.
fn decode(raw: &str) -> CredentialMap {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(entries)) => entries,
        Ok(_) => {
            warn!("credential store is not a JSON object, treating as empty");
            return CredentialMap::new();
        }
        Err(err) => {
            warn!("credential store is not valid JSON, treating as empty: {err}");
            return CredentialMap::new();
        }
    };

    entries
        .into_iter()
        .filter_map(
            |(key, value)| match serde_json::from_value::<RegistrationRecord>(value) {
                Ok(record) if record.email == key => Some((key, record)),
                Ok(_) => {
                    warn!("skipping stored record whose email differs from key {key}");
                    None
                }
                Err(err) => {
                    warn!("skipping malformed stored record {key}: {err}");
                    None
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::medium::{MediumError, MemoryMedium};

    fn record(email: &str, roles: &[Role]) -> RegistrationRecord {
        RegistrationRecord::new("Ann", "Lee", email, roles)
    }

    fn store_with(raw: &str) -> CredentialStore<MemoryMedium> {
        let mut medium = MemoryMedium::new();
        let _ = medium.set(STORAGE_KEY, raw);
        CredentialStore::new(medium)
    }

    struct BrokenMedium;

    impl KeyValueMedium for BrokenMedium {
        fn get(&self, _key: &str) -> Result<Option<String>, MediumError> {
            Err(MediumError::Io(std::io::Error::other("disk gone")))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), MediumError> {
            Err(MediumError::Io(std::io::Error::other("disk gone")))
        }
    }

    #[test]
    fn load_missing_key_is_empty() {
        let store = CredentialStore::new(MemoryMedium::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_invalid_json_is_empty() {
        assert!(store_with("invalid").load().is_empty());
        assert!(store_with("{\"a@b.co\":").load().is_empty());
    }

    #[test]
    fn load_non_object_is_empty() {
        assert!(store_with("[]").load().is_empty());
        assert!(store_with("null").load().is_empty());
        assert!(store_with("\"text\"").load().is_empty());
    }

    #[test]
    fn load_read_error_is_empty() {
        assert!(CredentialStore::new(BrokenMedium).load().is_empty());
    }

    #[test]
    fn upsert_then_load_round_trips() {
        let mut store = CredentialStore::new(MemoryMedium::new());
        let ann = record("ann@example.com", &[Role::Patient]);

        assert_eq!(store.upsert(ann.clone()), Persisted::Written);
        assert_eq!(store.load().get("ann@example.com"), Some(&ann));
    }

    #[test]
    fn upsert_is_last_write_wins() {
        let mut store = CredentialStore::new(MemoryMedium::new());
        store.upsert(record("ann@example.com", &[Role::Patient]));
        let replacement = RegistrationRecord::new("Anne", "Leigh", "ann@example.com", &[Role::Caregiver]);
        store.upsert(replacement.clone());

        let mapping = store.load();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("ann@example.com"), Some(&replacement));
    }

    #[test]
    fn upsert_keeps_other_records() {
        let mut store = CredentialStore::new(MemoryMedium::new());
        store.upsert(record("ann@example.com", &[Role::Patient]));
        store.upsert(record("bob@example.com", &[Role::Caregiver]));
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn upsert_over_corrupt_store_starts_fresh() {
        let mut store = store_with("invalid");
        assert_eq!(
            store.upsert(record("ann@example.com", &[Role::Patient])),
            Persisted::Written
        );
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn upsert_write_failure_is_swallowed() {
        let mut store = CredentialStore::new(MemoryMedium::new().with_quota(8));
        assert_eq!(
            store.upsert(record("ann@example.com", &[Role::Patient])),
            Persisted::Dropped
        );
        assert!(store.load().is_empty());

        let mut broken = CredentialStore::new(BrokenMedium);
        assert_eq!(
            broken.upsert(record("ann@example.com", &[Role::Patient])),
            Persisted::Dropped
        );
    }

    #[test]
    fn stored_layout_uses_camel_case_fields() {
        let mut store = CredentialStore::new(MemoryMedium::new());
        store.upsert(RegistrationRecord::new(
            "Ann",
            "Lee",
            "ann@example.com",
            &[Role::Caregiver, Role::Patient],
        ));

        let raw = store.medium().get(STORAGE_KEY).ok().flatten().unwrap_or_default();
        let value: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);
        assert_eq!(
            value,
            serde_json::json!({
                "ann@example.com": {
                    "firstName": "Ann",
                    "lastName": "Lee",
                    "email": "ann@example.com",
                    "allowedRoles": ["caregiver", "patient"]
                }
            })
        );
    }

    #[test]
    fn load_skips_malformed_entries_only() {
        let store = store_with(
            r#"{
                "ann@example.com": {"firstName": "Ann", "lastName": "Lee", "email": "ann@example.com", "allowedRoles": ["patient"]},
                "bad@example.com": {"firstName": "Bad"},
                "roles@example.com": {"firstName": "R", "lastName": "S", "email": "roles@example.com", "allowedRoles": "patient"},
                "other@example.com": {"firstName": "O", "lastName": "P", "email": "someone@example.com", "allowedRoles": []}
            }"#,
        );

        let mapping = store.load();
        assert_eq!(
            mapping.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["ann@example.com"]
        );
    }

    #[test]
    fn load_keeps_foreign_role_entries() {
        let store = store_with(
            r#"{"ann@example.com": {"firstName": "Ann", "lastName": "Lee", "email": "ann@example.com", "allowedRoles": ["caregiver", "other", {"x": 1}], "extra": true}}"#,
        );

        let roles = store
            .load()
            .get("ann@example.com")
            .map(|record| record.allowed_roles.clone())
            .unwrap_or_default();
        assert_eq!(roles.len(), 3);
        assert_eq!(roles.first().and_then(StoredRole::role), Some(Role::Caregiver));
        assert_eq!(
            roles.get(1),
            Some(&StoredRole::Foreign(Value::String("other".to_string())))
        );
    }
}
