//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use vigil_core::config::CliOverrides;

#[derive(Debug, Parser)]
#[command(name = "vigil", author, version, about = "Audit a knowledge repository and report its health", long_about = None)]
pub struct Cli {
    /// Repository root to audit
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,

    /// Apply safe auto-fixes and commit them
    #[arg(long)]
    pub fix: bool,

    /// Path to a configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for the trend store, reports and credentials
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<String>,

    /// Run date used for the trend entry and report name
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Do not send the operator notification
    #[arg(long)]
    pub no_notify: bool,

    /// Summary printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,

    /// Include passing checks in console output
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Json => "json",
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_file: self.config.clone(),
            state_dir: self.state_dir.clone(),
            content_dir: None,
            notify_enabled: self.no_notify.then_some(false),
        }
    }
}
