//! Shared constants for the Vigil audit engine.

/// Vigil version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file name, looked up in the repository root.
pub const PROJECT_CONFIG_FILE: &str = "vigil.toml";

/// Directory under `$HOME` holding user config and default state.
pub const USER_DIR: &str = ".vigil";

// ---- Layout ----

/// Default content directory (Markdown knowledge base).
pub const DEFAULT_CONTENT_DIR: &str = "kb";

/// Default memory directory.
pub const DEFAULT_MEMORY_DIR: &str = "memory";

/// Default scripts directory.
pub const DEFAULT_SCRIPTS_DIR: &str = "scripts";

/// Default index document, relative to the content directory.
pub const DEFAULT_INDEX_FILE: &str = "_index.json";

/// Default topic discovery document, relative to the content directory.
pub const DEFAULT_TOPICS_FILE: &str = "_topics.json";

/// Default keyword discovery document, relative to the content directory.
pub const DEFAULT_KEYWORDS_FILE: &str = "_keywords.json";

// ---- Checks ----

/// Header keys every document must carry.
pub const DEFAULT_REQUIRED_KEYS: [&str; 4] = ["title", "category", "tags", "summary"];

/// Trailing window (days) for content-risk matching.
pub const DEFAULT_CONTENT_RISK_WINDOW_DAYS: u32 = 7;

/// Consecutive failures that trip a job's circuit breaker.
pub const DEFAULT_CIRCUIT_BREAKER_THRESHOLD: u32 = 3;

/// Single-file size that counts as bloat (5 MiB).
pub const DEFAULT_LARGE_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Total content directory budget (200 MiB).
pub const DEFAULT_CONTENT_BUDGET_BYTES: u64 = 200 * 1024 * 1024;

/// Total memory directory budget (50 MiB).
pub const DEFAULT_MEMORY_BUDGET_BYTES: u64 = 50 * 1024 * 1024;

/// Files above this size are not pattern-scanned (2 MiB).
pub const DEFAULT_MAX_SCAN_BYTES: u64 = 2 * 1024 * 1024;

/// Per-check time budget in seconds before a slow-check warning is logged.
pub const DEFAULT_CHECK_BUDGET_SECS: u64 = 30;

/// Maximum items enumerated in a finding's details before `+N more`.
pub const MAX_DETAIL_ITEMS: usize = 20;

/// A job is overdue once its last run is older than this many schedule intervals.
pub const OVERDUE_GRACE_FACTOR: u32 = 2;

// ---- Trends ----

/// Maximum entries kept in the trend store.
pub const DEFAULT_MAX_TREND_ENTRIES: usize = 90;

/// Weekday on which the weekly rollup is produced.
pub const DEFAULT_WEEKLY_ROLLUP_DAY: &str = "sun";

/// Documents untouched for this many days are reported as stale in the rollup.
pub const DEFAULT_STALE_AFTER_DAYS: u32 = 30;

/// Entries compared for regression detection.
pub const REGRESSION_WINDOW: usize = 2;

/// Entries examined for recurring-issue detection.
pub const RECURRENCE_WINDOW: usize = 7;

/// Entries covered by the weekly rollup.
pub const ROLLUP_WINDOW: usize = 5;

/// Memory growth ratio that counts as a regression.
pub const MEMORY_GROWTH_RATIO: f64 = 1.5;

/// Memory growth below this absolute size is ignored (5 MiB).
pub const MEMORY_GROWTH_FLOOR_BYTES: u64 = 5 * 1024 * 1024;

/// Warning-count jump that counts as a regression.
pub const WARNING_JUMP_THRESHOLD: u32 = 2;

// ---- Fixes ----

/// Timeout for the external index command and `git push`.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 120;

/// Default remote used when publishing fixes.
pub const DEFAULT_REMOTE: &str = "origin";

// ---- Notification ----

/// Default notification API base.
pub const DEFAULT_NOTIFY_API_BASE: &str = "https://api.telegram.org";

/// Default notification request timeout in seconds.
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;

/// Default credentials file name inside the state directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = "notify.json";

/// Default job-health document name inside the state directory.
pub const DEFAULT_JOB_HEALTH_FILE: &str = "jobs-health.json";

/// Trend store file name inside the state directory.
pub const TREND_STORE_FILE: &str = "trends.json";

/// Report directory name inside the state directory.
pub const REPORTS_DIR: &str = "reports";
