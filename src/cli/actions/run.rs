use crate::cli::actions::{login, register, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub fn execute(action: Action) -> Result<()> {
    match action {
        Action::Register(args) => register::execute(args),
        Action::Login(args) => login::execute(args),
    }
}
