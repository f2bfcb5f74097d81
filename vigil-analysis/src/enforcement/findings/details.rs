//! Shared formatting for finding details.

use vigil_core::constants::MAX_DETAIL_ITEMS;

/// One item per line, at most 20, then `+N more`.
pub fn bounded_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines: Vec<String> = Vec::new();
    let mut extra = 0usize;
    for item in items {
        if lines.len() < MAX_DETAIL_ITEMS {
            lines.push(item.as_ref().to_string());
        } else {
            extra += 1;
        }
    }
    if extra > 0 {
        lines.push(format!("+{extra} more"));
    }
    lines.join("\n")
}

/// `1536` -> `1.5 KB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Signed delta, `+3` / `-2` / `0`.
pub fn signed(delta: i64) -> String {
    if delta > 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}
