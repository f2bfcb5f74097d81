//! The two repairs the engine knows: rebuilding the index and filling
//! derivable header keys. Both are safe to apply repeatedly.

use std::path::Path;
use std::time::Duration;

use vigil_core::config::FixConfig;
use vigil_core::errors::FixError;

use crate::enforcement::findings::{AutoFix, FixAction};
use crate::frontmatter::parse_header;
use crate::process::run_with_timeout;

/// Description, and dedup key, of the index rebuild.
pub const REBUILD_INDEX: &str = "Rebuild content index";

/// The rebuild fix, if an index command is configured.
pub fn rebuild_index_fix(config: &FixConfig) -> Option<AutoFix> {
    let (program, args) = config.index_command()?;
    Some(AutoFix::new(
        REBUILD_INDEX,
        FixAction::RunCommand {
            program: program.to_string(),
            args: args.to_vec(),
        },
    ))
}

/// Apply one action from the repository root. Returns a short summary.
pub fn apply_action(action: &FixAction, repo_root: &Path, timeout: Duration) -> Result<String, FixError> {
    match action {
        FixAction::RunCommand { program, args } => run_command(program, args, repo_root, timeout),
        FixAction::FillMetadata { path, title, category } => {
            let changed = fill_metadata(&repo_root.join(path), title.as_deref(), category.as_deref())?;
            Ok(if changed {
                format!("filled metadata in {}", path.display())
            } else {
                format!("{} already complete", path.display())
            })
        }
    }
}

fn run_command(program: &str, args: &[String], cwd: &Path, timeout: Duration) -> Result<String, FixError> {
    let output = run_with_timeout(program, args, cwd, timeout).map_err(|e| FixError::Spawn {
        program: program.to_string(),
        message: e.to_string(),
    })?;
    if output.timed_out {
        return Err(FixError::Timeout {
            program: program.to_string(),
            timeout_secs: timeout.as_secs(),
        });
    }
    if !output.success() {
        if !output.stderr.is_empty() {
            tracing::warn!(program, stderr = %output.stderr, "fix command failed");
        }
        return Err(FixError::CommandFailed {
            program: program.to_string(),
            code: output.code(),
        });
    }
    Ok(format!("`{program}` succeeded"))
}

/// Insert `title` / `category` where the header lacks them. Existing
/// non-empty values are left alone. Returns whether the file changed.
pub fn fill_metadata(path: &Path, title: Option<&str>, category: Option<&str>) -> Result<bool, FixError> {
    let io_err = |source| FixError::Io {
        path: path.to_path_buf(),
        source,
    };
    let text = std::fs::read_to_string(path).map_err(io_err)?;
    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let header = parse_header(&text);

    let mut lines = String::new();
    for (key, value) in [("title", title), ("category", category)] {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        if header.as_ref().is_some_and(|h| h.has(key)) {
            continue;
        }
        lines.push_str(&format!("{key}: {value}{newline}"));
    }
    if lines.is_empty() {
        return Ok(false);
    }

    let updated = match &header {
        Some(h) => format!("{}{lines}{}", &text[..h.closing_offset], &text[h.closing_offset..]),
        None => {
            let (bom, body) = match text.strip_prefix('\u{feff}') {
                Some(rest) => ("\u{feff}", rest),
                None => ("", text.as_str()),
            };
            format!("{bom}---{newline}{lines}---{newline}{body}")
        }
    };
    std::fs::write(path, updated).map_err(io_err)?;
    Ok(true)
}
