//! Credential registration and role resolution.
//!
//! Leaves first: [`sanitize`] normalizes keystrokes, [`validate`] checks a
//! submitted form, [`store`] persists records over a [`medium`], [`resolver`]
//! turns a login email into a role set, and [`controller`] wires them into the
//! two-mode form.
//!
//! ## Stored Layout
//!
//! One medium key, `careconnect-registered-users`, holds a JSON object keyed by
//! normalized email:
//!
//! ```json
//! {
//!   "ann@example.com": {
//!     "firstName": "Ann",
//!     "lastName": "Lee",
//!     "email": "ann@example.com",
//!     "allowedRoles": ["caregiver", "patient"]
//!   }
//! }
//! ```

pub mod controller;
pub mod form;
pub mod medium;
pub mod resolver;
pub mod role;
pub mod sanitize;
pub mod store;
pub mod validate;

pub use controller::{
    submit_registration, Mode, RegistrationFormController, RegistrationOutcome, SubmitOutcome,
};
pub use form::{Field, RegistrationForm, SignInForm};
pub use medium::{FileMedium, KeyValueMedium, MediumError, MemoryMedium};
pub use resolver::resolve_roles_for_login;
pub use role::{Role, RoleSelection, StoredRole, DEFAULT_ROLES};
pub use store::{CredentialMap, CredentialStore, Persisted, RegistrationRecord, STORAGE_KEY};
pub use validate::{validate, FormErrorMap};
