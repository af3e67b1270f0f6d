use crate::cli::{actions::describe_errors, globals::GlobalArgs};
use crate::registration::{
    Field, KeyValueMedium, RegistrationFormController, SignInForm, SubmitOutcome,
};
use anyhow::{anyhow, Context, Result};
use secrecy::ExposeSecret;
use std::io::Write;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub form: SignInForm,
}

/// Execute the login action.
/// # Errors
/// Returns an error if email or password is missing or stdout cannot be written.
pub fn execute(args: Args) -> Result<()> {
    let mut controller = RegistrationFormController::new(args.globals.open_store());
    run(&mut controller, &args.form, &mut std::io::stdout().lock())
}

/// Signs in and prints the resolved roles as a JSON array.
#[instrument(skip_all)]
pub(crate) fn run<M: KeyValueMedium, W: Write>(
    controller: &mut RegistrationFormController<M>,
    form: &SignInForm,
    out: &mut W,
) -> Result<()> {
    controller.edit(Field::SignInEmail, &form.email);
    controller.edit(Field::SignInPassword, form.password.expose_secret());

    match controller.submit() {
        SubmitOutcome::SignedIn { allowed_roles } => {
            let roles = serde_json::to_string(&allowed_roles)?;
            debug!("login roles: {roles}");
            writeln!(out, "{roles}").context("failed to write login result")?;
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => Err(anyhow!(
            "login rejected:\n{}",
            describe_errors(&errors)
        )),
        SubmitOutcome::Registered { .. } => Err(anyhow!("sign-in panel was not active")),
    }
}
