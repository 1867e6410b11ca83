use anyhow::Result;

use super::super::args::ScanCommand;
use super::super::exit_status::ExitStatus;
use super::{Project, process_files};

/// Process the files named on the command line, in order.
pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    Ok(process_files(&project, &cmd.files))
}
