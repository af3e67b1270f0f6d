//! # CareConnect (Local Registration & Role Resolution)
//!
//! `careconnect` holds the only stateful logic behind the CareConnect sign-in and
//! registration form: input sanitizers, the registration validator, a small
//! persisted credential store, and the role resolver used at sign-in time.
//!
//! ## Registration
//!
//! Every keystroke is normalized by a per-field sanitizer before it reaches form
//! state. On submit the form is trimmed and validated exhaustively; every violated
//! rule is reported at once. A clean form becomes a `RegistrationRecord` keyed by
//! the normalized (trimmed, lowercased) email and is written with last-write-wins
//! semantics.
//!
//! ## Sign-in
//!
//! Sign-in is a local simulation: there is no password check and no session. The
//! entered email is normalized and looked up; the resulting role set (`caregiver`,
//! `patient`, or both) is handed to whoever performs navigation. Unknown emails get
//! both roles.
//!
//! ## Storage Failure Model
//!
//! The store never fails loudly. A corrupted value reads as an empty store and a
//! failed write is logged and dropped while the registration flow still reports
//! success.

pub mod cli;
pub mod registration;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
