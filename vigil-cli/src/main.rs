//! `vigil`: run one repository health audit.
//!
//! Exit codes: 0 clean or warnings only, 2 when any Critical finding
//! exists, 1 for configuration errors and failed preconditions.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;

use vigil_analysis::enforcement::reporters::console::ConsoleReporter;
use vigil_analysis::enforcement::reporters::{create_reporter, Reporter};
use vigil_analysis::{AuditEngine, AuditOptions};
use vigil_core::config::VigilConfig;
use vigil_core::errors::{AuditError, VigilErrorCode};
use vigil_core::tracing::init_tracing;

mod cli;
use cli::{Cli, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(code = e.error_code(), error = %e, "audit aborted");
            eprintln!("{}", e.coded_string());
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<u8, AuditError> {
    let config = VigilConfig::load(&cli.repo, Some(&cli.overrides()))?;
    let engine = AuditEngine::new(&cli.repo, config);
    let options = AuditOptions {
        fix: cli.fix,
        notify: !cli.no_notify,
        date: cli.date,
    };
    let outcome = engine.run(&options)?;

    match render(cli, &outcome) {
        Ok(text) => println!("{text}"),
        Err(message) => tracing::warn!(error = %message, "summary not rendered"),
    }
    tracing::info!(report = %outcome.report_path.display(), "report written");

    Ok(u8::try_from(outcome.exit_code()).unwrap_or(1))
}

fn render(cli: &Cli, outcome: &vigil_analysis::AuditOutcome) -> Result<String, String> {
    let ctx = outcome.context();
    match cli.format {
        OutputFormat::Console => {
            let use_color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
            let reporter = ConsoleReporter {
                use_color,
                verbose: cli.verbose,
            };
            let mut text = reporter.generate(&ctx)?;
            text.push_str(&format!("\nReport: {}", outcome.report_path.display()));
            Ok(text)
        }
        other => create_reporter(other.as_str())
            .ok_or_else(|| format!("unknown format {}", other.as_str()))?
            .generate(&ctx),
    }
}
