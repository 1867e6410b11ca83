use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        batch::batch, config::config, generate::generate, init::init, scan::scan, switch::switch,
    },
    exit_status::ExitStatus,
};

/// Dispatch to the command handler for the parsed arguments.
///
/// # Returns
/// - `Ok(ExitStatus)` once the command ran, including partial failures
/// - `Err` on internal errors (invalid config, unwritable catalog, ...)
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Init(cmd)) => init(cmd),
        Some(Command::Config(cmd)) => config(cmd),
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Batch(cmd)) => batch(cmd),
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Switch(cmd)) => switch(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
