use anyhow::Result;
use colored::Colorize;

use super::super::args::BatchCommand;
use super::super::exit_status::ExitStatus;
use super::{Project, process_files};
use crate::core::file_scanner::scan_files;

/// Discover supported files under `--dir` (or the project root) and process
/// them sequentially.
pub fn batch(cmd: BatchCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    let dir = cmd.dir.clone().unwrap_or_else(|| project.root.clone());

    if !dir.is_dir() {
        eprintln!("Error: Not a directory: {}", dir.display());
        return Ok(ExitStatus::Failure);
    }

    let scanned = scan_files(&dir, &cmd.exclude, &project.config);
    if scanned.skipped_count > 0 {
        eprintln!(
            "{} {} path(s) could not be read",
            "warning:".bold().yellow(),
            scanned.skipped_count
        );
    }
    if scanned.files.is_empty() {
        println!("No supported files found in {}", dir.display());
        return Ok(ExitStatus::Success);
    }

    println!("Found {} file(s) in {}", scanned.files.len(), dir.display());
    Ok(process_files(&project, &scanned.files))
}
