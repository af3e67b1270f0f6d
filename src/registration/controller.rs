//! Sign-in / registration form state machine.
//!
//! Two modes only. Field edits run through the live sanitizers; submit either
//! resolves roles (sign-in) or validates and persists a registration.

use super::form::{Field, RegistrationForm, SignInForm};
use super::medium::KeyValueMedium;
use super::resolver::resolve_roles_for_login;
use super::role::{Role, RoleSelection};
use super::sanitize::sanitize_email;
use super::store::{CredentialStore, Persisted, RegistrationRecord};
use super::validate::{validate, FormErrorMap};
use secrecy::ExposeSecret;
use tracing::{debug, info};

pub const SIGN_IN_EMAIL_MESSAGE: &str = "enter your email";
pub const SIGN_IN_PASSWORD_MESSAGE: &str = "enter your password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SignIn,
    Register,
}

/// Result of [`submit_registration`].
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Registered {
        record: RegistrationRecord,
        persisted: Persisted,
    },
    Invalid(FormErrorMap),
}

/// Trims, validates and, when clean, upserts a registration.
///
/// Nothing is written when any field is invalid. A swallowed storage failure
/// still counts as registered.
pub fn submit_registration<M: KeyValueMedium>(
    store: &mut CredentialStore<M>,
    form: &RegistrationForm,
) -> RegistrationOutcome {
    let form = form.trimmed();
    let errors = validate(&form);
    if !errors.is_empty() {
        debug!("registration rejected with {} field error(s)", errors.len());
        return RegistrationOutcome::Invalid(errors);
    }

    let allowed_roles = form
        .registration_role
        .parse::<RoleSelection>()
        .map(RoleSelection::allowed_roles)
        .unwrap_or_default();

    let record = RegistrationRecord::new(
        form.first_name,
        form.last_name,
        sanitize_email(&form.email),
        &allowed_roles,
    );
    let persisted = store.upsert(record.clone());

    info!("registered account for {}", record.email);
    RegistrationOutcome::Registered { record, persisted }
}

/// What a submit produced, for the caller that renders or navigates.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Sign-in accepted; hand the roles to navigation.
    SignedIn { allowed_roles: Vec<Role> },
    /// Registration stored (or its write swallowed); the form is back in sign-in.
    Registered {
        message: String,
        record: RegistrationRecord,
        persisted: Persisted,
    },
    /// Errors are also kept on the controller for inline display.
    Rejected(FormErrorMap),
}

#[must_use]
pub fn success_message(email: &str) -> String {
    format!("Account created for {email}. Sign in to continue.")
}

#[derive(Debug)]
pub struct RegistrationFormController<M> {
    store: CredentialStore<M>,
    mode: Mode,
    sign_in: SignInForm,
    registration: RegistrationForm,
    errors: FormErrorMap,
    success_message: Option<String>,
}

impl<M: KeyValueMedium> RegistrationFormController<M> {
    /// Starts in sign-in mode with empty fields.
    pub fn new(store: CredentialStore<M>) -> Self {
        Self {
            store,
            mode: Mode::SignIn,
            sign_in: SignInForm::default(),
            registration: RegistrationForm::default(),
            errors: FormErrorMap::new(),
            success_message: None,
        }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn errors(&self) -> &FormErrorMap {
        &self.errors
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub const fn sign_in_form(&self) -> &SignInForm {
        &self.sign_in
    }

    pub const fn registration_form(&self) -> &RegistrationForm {
        &self.registration
    }

    pub const fn store(&self) -> &CredentialStore<M> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CredentialStore<M> {
        &mut self.store
    }

    /// "Register" link: only meaningful from sign-in.
    pub fn show_register(&mut self) {
        if self.mode == Mode::SignIn {
            self.mode = Mode::Register;
            self.success_message = None;
        }
    }

    /// "Back to Sign In": drops errors but keeps whatever was typed.
    pub fn back_to_sign_in(&mut self) {
        if self.mode == Mode::Register {
            self.mode = Mode::SignIn;
            self.errors.clear();
        }
    }

    /// Input-change event for any field, in either mode.
    pub fn edit(&mut self, field: Field, raw: &str) {
        let value = field.sanitize(raw);
        if field.is_sign_in() {
            self.sign_in.set(field, value);
        } else {
            self.registration.set(field, value);
        }
        self.errors.remove(&field);
        self.success_message = None;
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        self.errors.clear();
        match self.mode {
            Mode::SignIn => self.submit_sign_in(),
            Mode::Register => self.submit_register(),
        }
    }

    fn submit_sign_in(&mut self) -> SubmitOutcome {
        if !self.sign_in.is_complete() {
            if self.sign_in.email.is_empty() {
                self.errors.insert(Field::SignInEmail, SIGN_IN_EMAIL_MESSAGE);
            }
            if self.sign_in.password.expose_secret().is_empty() {
                self.errors
                    .insert(Field::SignInPassword, SIGN_IN_PASSWORD_MESSAGE);
            }
            return SubmitOutcome::Rejected(self.errors.clone());
        }

        let allowed_roles = resolve_roles_for_login(&self.store, &self.sign_in.email);
        debug!("sign-in resolved roles {allowed_roles:?}");
        SubmitOutcome::SignedIn { allowed_roles }
    }

    fn submit_register(&mut self) -> SubmitOutcome {
        match submit_registration(&mut self.store, &self.registration) {
            RegistrationOutcome::Invalid(errors) => {
                self.errors = errors.clone();
                SubmitOutcome::Rejected(errors)
            }
            RegistrationOutcome::Registered { record, persisted } => {
                let message = success_message(&record.email);
                self.mode = Mode::SignIn;
                self.sign_in = SignInForm {
                    email: record.email.clone(),
                    ..SignInForm::default()
                };
                self.registration = RegistrationForm::default();
                self.success_message = Some(message.clone());
                SubmitOutcome::Registered {
                    message,
                    record,
                    persisted,
                }
            }
        }
    }
}
