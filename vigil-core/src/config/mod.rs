//! Configuration system for Vigil.
//! TOML-based, layered resolution: CLI > env > explicit file > project > user > defaults.

pub mod check_config;
pub mod fix_config;
pub mod layout_config;
pub mod notify_config;
pub mod state_config;
pub mod trend_config;
pub mod vigil_config;

pub use check_config::CheckConfig;
pub use fix_config::FixConfig;
pub use layout_config::LayoutConfig;
pub use notify_config::NotifyConfig;
pub use state_config::StateConfig;
pub use trend_config::TrendConfig;
pub use vigil_config::{CliOverrides, VigilConfig};

use std::path::{Path, PathBuf};

/// Resolve a configured path: `~/` expands to the home directory, relative
/// paths are taken from `base`.
pub fn resolve_path(base: &Path, raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Cross-platform home directory resolution.
pub(crate) fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
