use super::medium::KeyValueMedium;
use super::role::{Role, StoredRole, DEFAULT_ROLES};
use super::sanitize::sanitize_email;
use super::store::CredentialStore;
use tracing::debug;

/// Role set a sign-in with `raw_email` is allowed to use.
///
/// Unknown emails and records with no roles get [`DEFAULT_ROLES`]. Otherwise the
/// stored roles are filtered to known values in stored order. Emptiness is not
/// re-checked after filtering, so a record holding only foreign values resolves
/// to an empty set.
pub fn resolve_roles_for_login<M: KeyValueMedium>(
    store: &CredentialStore<M>,
    raw_email: &str,
) -> Vec<Role> {
    let email = sanitize_email(raw_email);
    let mapping = store.load();

    let Some(record) = mapping.get(&email) else {
        debug!("no registration for {email}, granting default roles");
        return DEFAULT_ROLES.to_vec();
    };

    if record.allowed_roles.is_empty() {
        debug!("registration for {email} has no roles, granting default roles");
        return DEFAULT_ROLES.to_vec();
    }

    record
        .allowed_roles
        .iter()
        .filter_map(StoredRole::role)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::medium::MemoryMedium;
    use crate::registration::store::{RegistrationRecord, STORAGE_KEY};

    fn store_with(raw: &str) -> CredentialStore<MemoryMedium> {
        let mut medium = MemoryMedium::new();
        let _ = medium.set(STORAGE_KEY, raw);
        CredentialStore::new(medium)
    }

    #[test]
    fn unknown_email_gets_default_roles() {
        let store = CredentialStore::new(MemoryMedium::new());
        assert_eq!(
            resolve_roles_for_login(&store, "nobody@example.com"),
            vec![Role::Caregiver, Role::Patient]
        );
    }

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        let mut store = CredentialStore::new(MemoryMedium::new());
        store.upsert(RegistrationRecord::new(
            "Ann",
            "Lee",
            "ann@example.com",
            &[Role::Patient],
        ));

        assert_eq!(
            resolve_roles_for_login(&store, "  ANN@Example.com "),
            vec![Role::Patient]
        );
    }

    #[test]
    fn empty_role_list_gets_default_roles() {
        let store = store_with(
            r#"{"ann@example.com": {"firstName": "Ann", "lastName": "Lee", "email": "ann@example.com", "allowedRoles": []}}"#,
        );
        assert_eq!(
            resolve_roles_for_login(&store, "ann@example.com"),
            DEFAULT_ROLES.to_vec()
        );
    }

    #[test]
    fn non_list_roles_get_default_roles() {
        let store = store_with(
            r#"{"ann@example.com": {"firstName": "Ann", "lastName": "Lee", "email": "ann@example.com", "allowedRoles": "patient"}}"#,
        );
        assert_eq!(
            resolve_roles_for_login(&store, "ann@example.com"),
            DEFAULT_ROLES.to_vec()
        );
    }

    #[test]
    fn foreign_roles_are_filtered_in_order() {
        let store = store_with(
            r#"{"ann@example.com": {"firstName": "Ann", "lastName": "Lee", "email": "ann@example.com", "allowedRoles": ["caregiver", "other", "patient"]}}"#,
        );
        assert_eq!(
            resolve_roles_for_login(&store, "ann@example.com"),
            vec![Role::Caregiver, Role::Patient]
        );
    }

    #[test]
    fn only_foreign_roles_resolve_to_empty_set() {
        // Pinned: filtering does not fall back to the default pair.
        let store = store_with(
            r#"{"ann@example.com": {"firstName": "Ann", "lastName": "Lee", "email": "ann@example.com", "allowedRoles": ["admin", "Patient"]}}"#,
        );
        assert!(resolve_roles_for_login(&store, "ann@example.com").is_empty());
    }

    #[test]
    fn corrupt_store_gets_default_roles() {
        let store = store_with("invalid");
        assert_eq!(
            resolve_roles_for_login(&store, "ann@example.com"),
            DEFAULT_ROLES.to_vec()
        );
    }
}
