//! Maps parsed CLI matches to the action the binary runs.

use crate::cli::actions::{login, register, Action};
use crate::cli::commands;
use anyhow::{bail, Context, Result};

/// # Errors
/// Returns an error if no subcommand was given or its arguments are inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub) = matches
        .subcommand()
        .context("missing subcommand: register or login")?;
    let globals = commands::store::parse(sub)?;

    match name {
        commands::register::NAME => Ok(Action::Register(register::Args {
            globals,
            form: commands::register::parse(sub),
        })),
        commands::login::NAME => Ok(Action::Login(login::Args {
            globals,
            form: commands::login::parse(sub),
        })),
        other => bail!("unknown subcommand: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::Field;
    use std::path::PathBuf;

    #[test]
    fn register_maps_to_register_action() {
        let matches = commands::new().get_matches_from([
            "careconnect",
            "--store-dir",
            "/tmp/cc",
            "register",
            "--first-name",
            "Ann",
        ]);

        match handler(&matches) {
            Ok(Action::Register(args)) => {
                assert_eq!(args.globals.store_dir, PathBuf::from("/tmp/cc"));
                assert_eq!(args.form.value(Field::FirstName), "Ann");
            }
            other => panic!("expected register action, got {other:?}"),
        }
    }

    #[test]
    fn login_maps_to_login_action() {
        let matches =
            commands::new().get_matches_from(["careconnect", "login", "--email", "A@B.co"]);

        match handler(&matches) {
            Ok(Action::Login(args)) => assert_eq!(args.form.email, "A@B.co"),
            other => panic!("expected login action, got {other:?}"),
        }
    }
}
