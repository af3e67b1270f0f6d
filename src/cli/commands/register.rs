//! `register` subcommand: one flag per registration input.

use crate::registration::{Field, RegistrationForm};
use clap::{Arg, ArgMatches, Command};

pub const NAME: &str = "register";

/// Flag id, help text and optional env fallback for each registration input.
const FIELD_ARGS: [(Field, &str, &str, Option<&str>); 11] = [
    (Field::FirstName, "first-name", "First name", None),
    (Field::LastName, "last-name", "Last name", None),
    (Field::Email, "email", "Email address, used as the account key", None),
    (Field::Phone, "phone", "10-digit US phone number", None),
    (Field::Address1, "address1", "Street address", None),
    (Field::City, "city", "City", None),
    (Field::State, "state", "Two-letter state, territory or military code", None),
    (Field::PostalCode, "postal-code", "ZIP code (12345 or 12345-6789)", None),
    (
        Field::RegistrationRole,
        "role",
        "Account role: caregiver, patient or both",
        None,
    ),
    (
        Field::Password,
        "password",
        "Password (12+ chars, upper/lower/digit/symbol)",
        Some("CARECONNECT_PASSWORD"),
    ),
    (
        Field::ConfirmPassword,
        "confirm-password",
        "Password again",
        Some("CARECONNECT_CONFIRM_PASSWORD"),
    ),
];

#[must_use]
pub fn command() -> Command {
    FIELD_ARGS.iter().fold(
        Command::new(NAME).about("Register a local account"),
        |command, &(_, id, help, env)| {
            let arg = Arg::new(id).long(id).help(help);
            let arg = match env {
                Some(env) => arg.env(env).hide_env_values(true),
                None => arg,
            };
            command.arg(arg)
        },
    )
}

/// Raw, unsanitized registration input. Missing flags are empty so the
/// validator reports them.
#[must_use]
pub fn parse(matches: &ArgMatches) -> RegistrationForm {
    let mut form = RegistrationForm::default();
    for (field, id, _, _) in FIELD_ARGS {
        form.set(
            field,
            matches.get_one::<String>(id).cloned().unwrap_or_default(),
        );
    }
    form
}
