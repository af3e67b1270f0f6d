pub mod login;
pub mod register;

// Internal "interpreter" for `Action`.
mod run;

use crate::registration::FormErrorMap;

#[derive(Debug)]
pub enum Action {
    Register(register::Args),
    Login(login::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub fn execute(self) -> anyhow::Result<()> {
        run::execute(self)
    }
}

/// One `field: message` pair per line, in form order.
fn describe_errors(errors: &FormErrorMap) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}
