use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, ReconcileArgs};

/// Top-level CLI parser for the `annot-sync` binary.
#[derive(Debug, Parser)]
#[command(
    name = "annot-sync",
    version,
    about = "Refresh cached object symbols and names in FULL_ANNOT"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Summary output on stdout: text, json, raw
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (log every changed field)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML config file, layered above ./annot-sync.toml
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}
