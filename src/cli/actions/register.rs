use crate::cli::{actions::describe_errors, globals::GlobalArgs};
use crate::registration::{
    Field, KeyValueMedium, Persisted, RegistrationForm, RegistrationFormController, SubmitOutcome,
};
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use tracing::{instrument, warn};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    /// Raw flag values; the controller sanitizes them as edits.
    pub form: RegistrationForm,
}

/// Execute the register action.
/// # Errors
/// Returns an error if any field is invalid or stdout cannot be written.
pub fn execute(args: Args) -> Result<()> {
    let mut controller = RegistrationFormController::new(args.globals.open_store());
    run(&mut controller, &args.form, &mut std::io::stdout().lock())
}

/// Drives the controller through the registration panel the way a user would:
/// open it, type every field, press submit.
#[instrument(skip_all)]
pub(crate) fn run<M: KeyValueMedium, W: Write>(
    controller: &mut RegistrationFormController<M>,
    form: &RegistrationForm,
    out: &mut W,
) -> Result<()> {
    controller.show_register();
    for field in Field::REGISTRATION {
        controller.edit(field, form.value(field));
    }

    match controller.submit() {
        SubmitOutcome::Registered {
            message, persisted, ..
        } => {
            if persisted == Persisted::Dropped {
                warn!("registration was accepted but could not be saved");
            }
            writeln!(out, "{message}").context("failed to write registration result")?;
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => Err(anyhow!(
            "registration rejected:\n{}",
            describe_errors(&errors)
        )),
        SubmitOutcome::SignedIn { .. } => Err(anyhow!("registration panel was not active")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::validate::{EMAIL_MESSAGE, ROLE_MESSAGE};
    use crate::registration::{CredentialStore, MemoryMedium, Role, StoredRole};

    fn controller(medium: MemoryMedium) -> RegistrationFormController<MemoryMedium> {
        RegistrationFormController::new(CredentialStore::new(medium))
    }

    fn form(email: &str, role: &str) -> RegistrationForm {
        let mut form = RegistrationForm::default();
        for (field, value) in [
            (Field::FirstName, "Ann"),
            (Field::LastName, "Lee"),
            (Field::Email, email),
            (Field::Phone, "5551234567"),
            (Field::Address1, "12 Elm Street"),
            (Field::City, "Reno"),
            (Field::State, "NV"),
            (Field::PostalCode, "89501"),
            (Field::RegistrationRole, role),
            (Field::Password, "Correct-Horse9"),
            (Field::ConfirmPassword, "Correct-Horse9"),
        ] {
            form.set(field, value.to_string());
        }
        form
    }

    #[test]
    fn test_register_prints_success_message() {
        let mut controller = controller(MemoryMedium::new());
        let mut out = Vec::new();

        let result = run(&mut controller, &form("Ann@Example.com", "patient"), &mut out);
        assert!(result.is_ok());
        assert_eq!(
            String::from_utf8_lossy(&out),
            "Account created for ann@example.com. Sign in to continue.\n"
        );

        let stored = controller.store().load();
        let roles: Vec<Option<Role>> = stored
            .get("ann@example.com")
            .map(|record| record.allowed_roles.iter().map(StoredRole::role).collect())
            .unwrap_or_default();
        assert_eq!(roles, vec![Some(Role::Patient)]);
    }

    #[test]
    fn test_register_rejects_invalid_fields() {
        let mut controller = controller(MemoryMedium::new());
        let mut out = Vec::new();

        let result = run(&mut controller, &form("not-an-email", "admin"), &mut out);
        let message = result.err().map(|err| err.to_string()).unwrap_or_default();
        assert!(message.contains(&format!("email: {EMAIL_MESSAGE}")));
        assert!(message.contains(&format!("registrationRole: {ROLE_MESSAGE}")));
        assert!(out.is_empty());
        assert!(controller.store().load().is_empty());
    }

    #[test]
    fn test_register_reports_success_when_write_is_dropped() {
        let mut controller = controller(MemoryMedium::new().with_quota(8));
        let mut out = Vec::new();

        assert!(run(&mut controller, &form("ann@example.com", "both"), &mut out).is_ok());
        assert!(!out.is_empty());
        assert!(controller.store().load().is_empty());
    }
}
