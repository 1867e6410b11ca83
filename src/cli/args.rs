//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `init`: Create the configuration file and empty catalogs
//! - `config`: Show the effective configuration, or edit it with `--edit`
//! - `scan`: Extract text from the given files
//! - `batch`: Extract text from every supported file under a directory
//! - `generate`: Build catalogs for other languages
//! - `switch`: List catalogs or preview one

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::translate::TranslationService;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.command
            .as_ref()
            .is_some_and(|command| command.common().verbose)
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory; the config file is searched from here upwards
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ConfigCommand {
    /// Open the config file in $EDITOR, creating it first if missing
    #[arg(long)]
    pub edit: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct BatchCommand {
    /// Directory to scan (default: project root)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Skip paths containing this text or matching this glob.
    /// Can be specified multiple times: --exclude legacy --exclude "**/*.spec.ts"
    #[arg(long)]
    pub exclude: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Target languages (default: en).
    /// Can be specified multiple times: -l en -l ja
    #[arg(short, long = "lang")]
    pub languages: Vec<String>,

    /// Translation service (default: first configured)
    #[arg(short, long, value_enum)]
    pub service: Option<TranslationService>,

    /// Write missing entries as empty strings instead of translating
    #[arg(long, conflicts_with = "service")]
    pub no_translate: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SwitchCommand {
    /// Language to preview
    pub language: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create automatically-i18n-config.json and empty catalogs
    Init(InitCommand),
    /// Show the configuration in effect
    Config(ConfigCommand),
    /// Extract Chinese text from the given files
    Scan(ScanCommand),
    /// Extract Chinese text from every supported file in a directory
    Batch(BatchCommand),
    /// Generate catalogs for other languages from the base catalog
    Generate(GenerateCommand),
    /// List available catalogs, or preview one
    Switch(SwitchCommand),
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Init(cmd) => &cmd.common,
            Command::Config(cmd) => &cmd.common,
            Command::Scan(cmd) => &cmd.common,
            Command::Batch(cmd) => &cmd.common,
            Command::Generate(cmd) => &cmd.common,
            Command::Switch(cmd) => &cmd.common,
        }
    }
}
