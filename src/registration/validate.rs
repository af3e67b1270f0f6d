//! Registration validator.
//!
//! Validation is exhaustive: every rule runs regardless of earlier failures and
//! every violation is reported at once. It never touches storage.

use super::form::{Field, RegistrationForm};
use super::role::RoleSelection;
use super::sanitize::{phone_digits, EMAIL_MAX_CHARS, PHONE_DIGITS};
use regex::Regex;
use std::collections::BTreeMap;

/// Per-field error messages for a single submit attempt.
pub type FormErrorMap = BTreeMap<Field, &'static str>;

pub const NAME_MESSAGE: &str = "must be 2-50 characters, letters only";
pub const EMAIL_MESSAGE: &str = "enter a valid email";
pub const PHONE_MESSAGE: &str = "phone must be 10 digits";
pub const ADDRESS_MESSAGE: &str = "address 5-100 chars";
pub const CITY_MESSAGE: &str = "enter a valid city";
pub const STATE_MESSAGE: &str = "select valid state/territory";
pub const POSTAL_MESSAGE: &str = "enter valid ZIP (12345 or 12345-6789)";
pub const ROLE_MESSAGE: &str = "select an account role";
pub const PASSWORD_MESSAGE: &str = "needs 12+ chars, upper/lower/digit/symbol";
pub const CONFIRM_MESSAGE: &str = "passwords do not match";

const ADDRESS_MIN_CHARS: usize = 5;
const ADDRESS_MAX_CHARS: usize = 100;
const PASSWORD_MIN_CHARS: usize = 12;

/// US states, DC, territories and military mail codes accepted by the state
/// selector.
pub const US_STATE_CODES: [&str; 56] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC", "PR", "VI", "AA", "AE", "AP",
];

/// Letter-led name: 2-50 characters of letters, apostrophe, hyphen or space.
fn valid_name(value: &str) -> bool {
    Regex::new(r"^[A-Za-z][A-Za-z' -]{1,49}$").is_ok_and(|regex| regex.is_match(value))
}

/// One `@`, a dot after it, at least two characters after the last dot, no
/// whitespace anywhere.
pub(crate) fn valid_email(value: &str) -> bool {
    value.chars().count() <= EMAIL_MAX_CHARS
        && Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").is_ok_and(|regex| regex.is_match(value))
}

fn valid_phone(value: &str) -> bool {
    phone_digits(value).len() == PHONE_DIGITS
}

fn valid_address(value: &str) -> bool {
    (ADDRESS_MIN_CHARS..=ADDRESS_MAX_CHARS).contains(&value.trim().chars().count())
}

fn valid_state(value: &str) -> bool {
    US_STATE_CODES.contains(&value)
}

fn valid_postal_code(value: &str) -> bool {
    Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").is_ok_and(|regex| regex.is_match(value))
}

fn valid_role(value: &str) -> bool {
    value.parse::<RoleSelection>().is_ok()
}

/// At least 12 characters with an ASCII lowercase letter, an ASCII uppercase
/// letter, a digit and something that is none of those.
fn valid_password(value: &str) -> bool {
    value.chars().count() >= PASSWORD_MIN_CHARS
        && value.chars().any(|ch| ch.is_ascii_lowercase())
        && value.chars().any(|ch| ch.is_ascii_uppercase())
        && value.chars().any(|ch| ch.is_ascii_digit())
        && value.chars().any(|ch| !ch.is_ascii_alphanumeric())
}

/// Checks a trimmed registration form and returns every violation.
#[must_use]
pub fn validate(form: &RegistrationForm) -> FormErrorMap {
    let checks: [(Field, bool, &'static str); 11] = [
        (Field::FirstName, valid_name(&form.first_name), NAME_MESSAGE),
        (Field::LastName, valid_name(&form.last_name), NAME_MESSAGE),
        (Field::Email, valid_email(&form.email), EMAIL_MESSAGE),
        (Field::Phone, valid_phone(&form.phone), PHONE_MESSAGE),
        (Field::Address1, valid_address(&form.address1), ADDRESS_MESSAGE),
        (Field::City, valid_name(&form.city), CITY_MESSAGE),
        (Field::State, valid_state(&form.state), STATE_MESSAGE),
        (
            Field::PostalCode,
            valid_postal_code(&form.postal_code),
            POSTAL_MESSAGE,
        ),
        (
            Field::RegistrationRole,
            valid_role(&form.registration_role),
            ROLE_MESSAGE,
        ),
        (
            Field::Password,
            valid_password(form.password()),
            PASSWORD_MESSAGE,
        ),
        (
            Field::ConfirmPassword,
            form.password().as_bytes() == form.confirm_password().as_bytes(),
            CONFIRM_MESSAGE,
        ),
    ];

    checks
        .into_iter()
        .filter(|(_, ok, _)| !ok)
        .map(|(field, _, message)| (field, message))
        .collect()
}
