use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, list::list},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
///
/// `Ok(ExitStatus)` carries success or a partial listing; `Err` means the
/// command could not run at all (bad config, unreadable input, fetch error).
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::List(cmd)) => list(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
