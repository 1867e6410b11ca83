use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command ran to completion, even if some files failed
/// - `Failure` (1): Nothing could be done (no file processed, or a precondition is unmet)
/// - `Error` (2): Command failed due to internal error (invalid config, I/O error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// `Failure` when work was attempted and none of it succeeded.
    pub fn from_counts(succeeded: usize, attempted: usize) -> Self {
        if attempted > 0 && succeeded == 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
