//! Form state for the sign-in and registration panels.

use super::sanitize::{
    clamp_chars, sanitize_email, sanitize_phone_display, sanitize_postal_display, sanitize_secret,
    sanitize_text, TEXT_MAX_CHARS,
};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Identifier of every input the form renders, across both modes.
///
/// Ordering follows the on-screen order, so error maps keyed by `Field` list
/// problems top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Address1,
    City,
    State,
    PostalCode,
    RegistrationRole,
    Password,
    ConfirmPassword,
    SignInEmail,
    SignInPassword,
}

impl Field {
    /// Registration inputs in on-screen order.
    pub const REGISTRATION: [Self; 11] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Address1,
        Self::City,
        Self::State,
        Self::PostalCode,
        Self::RegistrationRole,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Form identifier as used by the rendering layer.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address1 => "address1",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postalCode",
            Self::RegistrationRole => "registrationRole",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::SignInEmail => "signInEmail",
            Self::SignInPassword => "signInPassword",
        }
    }

    /// Applies the live sanitizer for this input. Select-backed inputs (state,
    /// role) pass through unchanged.
    #[must_use]
    pub fn sanitize(self, raw: &str) -> String {
        match self {
            Self::FirstName | Self::LastName | Self::Address1 | Self::City => {
                clamp_chars(&sanitize_text(raw), TEXT_MAX_CHARS)
            }
            Self::Email | Self::SignInEmail => sanitize_email(raw),
            Self::Phone => sanitize_phone_display(raw),
            Self::PostalCode => sanitize_postal_display(raw),
            Self::Password | Self::ConfirmPassword | Self::SignInPassword => sanitize_secret(raw),
            Self::State | Self::RegistrationRole => raw.to_string(),
        }
    }

    #[must_use]
    pub const fn is_sign_in(self) -> bool {
        matches!(self, Self::SignInEmail | Self::SignInPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration panel values. Passwords are kept as secrets so `Debug` never
/// prints them.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub registration_role: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl RegistrationForm {
    /// Stores an already-sanitized value. Sign-in fields are ignored.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Address1 => self.address1 = value,
            Field::City => self.city = value,
            Field::State => self.state = value,
            Field::PostalCode => self.postal_code = value,
            Field::RegistrationRole => self.registration_role = value,
            Field::Password => self.password = SecretString::from(value),
            Field::ConfirmPassword => self.confirm_password = SecretString::from(value),
            Field::SignInEmail | Field::SignInPassword => {}
        }
    }

    /// Current value of a registration input; empty for sign-in fields.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address1 => &self.address1,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::PostalCode => &self.postal_code,
            Field::RegistrationRole => &self.registration_role,
            Field::Password => self.password.expose_secret(),
            Field::ConfirmPassword => self.confirm_password.expose_secret(),
            Field::SignInEmail | Field::SignInPassword => "",
        }
    }

    /// Copy with name, address, city and postal fields trimmed, as submitted
    /// to the validator. Email, phone, selects and passwords are untouched.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            address1: self.address1.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    #[must_use]
    pub fn confirm_password(&self) -> &str {
        self.confirm_password.expose_secret()
    }
}

/// Sign-in panel values.
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: SecretString,
}

impl SignInForm {
    /// Stores an already-sanitized value. Registration fields are ignored.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::SignInEmail => self.email = value,
            Field::SignInPassword => self.password = SecretString::from(value),
            _ => {}
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.expose_secret().is_empty()
    }
}
