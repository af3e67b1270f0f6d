//! `login` subcommand.

use crate::registration::{Field, SignInForm};
use clap::{Arg, ArgMatches, Command};

pub const NAME: &str = "login";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Sign in and print the roles the account may use")
        .arg(
            Arg::new(ARG_EMAIL)
                .long(ARG_EMAIL)
                .help("Email address")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Password (not verified)")
                .env("CARECONNECT_PASSWORD")
                .hide_env_values(true),
        )
}

#[must_use]
pub fn parse(matches: &ArgMatches) -> SignInForm {
    let mut form = SignInForm::default();
    form.set(
        Field::SignInEmail,
        matches.get_one::<String>(ARG_EMAIL).cloned().unwrap_or_default(),
    );
    form.set(
        Field::SignInPassword,
        matches
            .get_one::<String>(ARG_PASSWORD)
            .cloned()
            .unwrap_or_default(),
    );
    form
}
