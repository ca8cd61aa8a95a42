use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, merge::merge},
};

/// Dispatch to the command handler for the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with error counts and exit behavior
/// - `Err` if the command fails (e.g., invalid config, unwritable output)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Merge(cmd)) => merge(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
