//! Optional formatting of rewritten script files.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{Context, Result, bail};

use crate::config::Config;

/// Placeholder in `formatCommand` replaced by a file name with the right
/// extension, so tools that infer the parser from the path pick the right one.
pub const FILE_PLACEHOLDER: &str = "{file}";

pub trait Formatter {
    fn format(&self, source: &str, extension: &str) -> Result<String>;
}

/// Leaves text untouched.
pub struct NoFormat;

impl Formatter for NoFormat {
    fn format(&self, source: &str, _extension: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Pipes text through an external command (stdin to stdout).
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    argv: Vec<String>,
}

impl CommandFormatter {
    pub fn new(argv: Vec<String>) -> Option<Self> {
        if argv.first().is_some_and(|program| !program.trim().is_empty()) {
            Some(Self { argv })
        } else {
            None
        }
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, source: &str, extension: &str) -> Result<String> {
        let file_name = format!("i18n-auto-input.{}", extension);
        let args: Vec<String> = self.argv[1..]
            .iter()
            .map(|arg| arg.replace(FILE_PLACEHOLDER, &file_name))
            .collect();

        let mut child = Command::new(&self.argv[0])
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to run formatter: {}", self.argv[0]))?;

        let mut stdin = child.stdin.take().context("Formatter stdin unavailable")?;
        let input = source.to_string();
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .context("Failed to wait for formatter")?;
        writer
            .join()
            .map_err(|_| anyhow::anyhow!("Formatter input thread panicked"))?
            .context("Failed to write to formatter")?;

        if !output.status.success() {
            bail!(
                "Formatter exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        String::from_utf8(output.stdout).context("Formatter produced invalid UTF-8")
    }
}

/// The formatter configured by `formatCommand`, or [`NoFormat`].
pub fn formatter_from_config(config: &Config) -> Box<dyn Formatter> {
    match CommandFormatter::new(config.format_command.clone()) {
        Some(formatter) => Box::new(formatter),
        None => Box::new(NoFormat),
    }
}
