//! One audit run end to end.
//!
//! Preconditions, snapshot, checks, grading, trend upsert and analytics,
//! optional fixes, the archived report, then the notification. Only the
//! preconditions and a failed report write abort a run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Datelike, NaiveDate};

use vigil_core::config::VigilConfig;
use vigil_core::errors::{AuditError, StorageError, VigilErrorCode};
use vigil_core::traits::{Clock, SystemClock};
use vigil_core::tracing::metrics::{AUDIT_SPAN, TREND_SPAN};
use vigil_storage::{ReportArchive, RetentionPolicy, TrendEntry, TrendGuard, TrendLock, TrendStore};

use crate::enforcement::audit::{stale_documents, AuditRun, TrendAnalysis, TrendAnalyzer};
use crate::enforcement::checks::CheckContext;
use crate::enforcement::findings::{Category, Finding};
use crate::enforcement::fixes::{FixOrchestrator, FixReport};
use crate::enforcement::reporters::markdown::MarkdownReporter;
use crate::enforcement::reporters::notification::NotificationReporter;
use crate::enforcement::reporters::{ReportContext, Reporter};
use crate::enforcement::runner::CheckRunner;
use crate::notify::{load_credentials, NotificationSink, TelegramSink};
use crate::scanner::RepositorySnapshot;

/// Per-invocation switches.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Apply and publish auto-fixes.
    pub fix: bool,
    /// Send the condensed notification when credentials are configured.
    pub notify: bool,
    /// Run date; defaults to the clock's today.
    pub date: Option<NaiveDate>,
}

/// Results of a completed run.
#[derive(Debug)]
pub struct AuditOutcome {
    pub run: AuditRun,
    pub analysis: TrendAnalysis,
    /// Trend series after this run's upsert.
    pub history: Vec<TrendEntry>,
    pub fixes: Option<FixReport>,
    pub notes: Vec<String>,
    pub report_path: PathBuf,
    pub notified: bool,
}

impl AuditOutcome {
    /// 2 when any Critical finding exists, else 0.
    pub fn exit_code(&self) -> i32 {
        if self.run.has_critical() {
            2
        } else {
            0
        }
    }

    pub fn context(&self) -> ReportContext<'_> {
        ReportContext {
            run: &self.run,
            analysis: &self.analysis,
            history: &self.history,
            fixes: self.fixes.as_ref(),
            notes: &self.notes,
        }
    }
}

pub struct AuditEngine {
    repo_root: PathBuf,
    config: VigilConfig,
    clock: Box<dyn Clock>,
    runner: CheckRunner,
    sink: Option<Box<dyn NotificationSink>>,
}

impl AuditEngine {
    pub fn new(repo_root: impl Into<PathBuf>, config: VigilConfig) -> Self {
        let budget = Duration::from_secs(config.checks.effective_check_budget_secs());
        Self {
            repo_root: repo_root.into(),
            config,
            clock: Box::new(SystemClock),
            runner: CheckRunner::new().with_budget(budget),
            sink: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_runner(mut self, runner: CheckRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Use this sink instead of building one from the credentials file.
    pub fn with_sink(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn config(&self) -> &VigilConfig {
        &self.config
    }

    pub fn run(&self, options: &AuditOptions) -> Result<AuditOutcome, AuditError> {
        let now = self.clock.now();
        let date = options.date.unwrap_or_else(|| self.clock.today());
        let span = tracing::info_span!(AUDIT_SPAN, %date, fix = options.fix);
        let _guard = span.enter();

        self.check_preconditions()?;
        let mut notes: Vec<String> = Vec::new();

        // Held until the upsert is saved so overlapping runs serialize.
        let mut lock = TrendLock::open(self.config.trend_store_path(&self.repo_root))?;
        let store_guard = lock.acquire()?;
        let mut store = self.load_store(&store_guard)?;
        let mut store_findings = Vec::new();
        if let Some(notice) = store.corruption() {
            store_findings.push(
                Finding::critical(
                    Category::Trends,
                    format!(
                        "Trend store was corrupt; moved to {} and a fresh series started",
                        notice.moved_to.display()
                    ),
                )
                .with_details(notice.message.clone()),
            );
        }

        let snapshot = RepositorySnapshot::capture(&self.repo_root, &self.config);
        let ctx = CheckContext {
            repo_root: &self.repo_root,
            config: &self.config,
            snapshot: &snapshot,
            now,
        };
        let output = self.runner.run(&ctx);

        let mut findings = output.findings;
        findings.extend(store_findings);
        let run = AuditRun::new(
            date,
            now,
            self.repo_root.clone(),
            findings,
            snapshot.stats(),
            store.latest_before(date).cloned(),
            output.timings,
        );
        tracing::info!(
            grade = %run.grade,
            critical = run.counts.critical,
            warning = run.counts.warning,
            "checks graded"
        );

        {
            let _trend = tracing::info_span!(TREND_SPAN, entries = store.len()).entered();
            store.upsert(run.trend_entry());
            if let Err(e) = store.save(&store_guard) {
                tracing::error!(code = e.error_code(), error = %e, "trend store not saved");
                notes.push(format!("Trend store not saved: {e}"));
            }
        }
        drop(store_guard);

        let analyzer = TrendAnalyzer::from_config(&self.config.trends);
        let stale = if date.weekday() == analyzer.rollup_day() {
            stale_documents(&snapshot, now, self.config.trends.effective_stale_after_days())
        } else {
            Vec::new()
        };
        let analysis = analyzer.analyze(store.entries(), date, stale);

        let fixes = options
            .fix
            .then(|| FixOrchestrator::new(&self.repo_root, &self.config.fixes, date).run(output.fixes));

        let mut outcome = AuditOutcome {
            run,
            analysis,
            history: store.entries().to_vec(),
            fixes,
            notes,
            report_path: PathBuf::new(),
            notified: false,
        };

        let report = MarkdownReporter
            .generate(&outcome.context())
            .map_err(|message| StorageError::Serialization { message })?;
        let archive = ReportArchive::new(self.config.reports_dir(&self.repo_root));
        outcome.report_path = archive.write(date, &report)?;

        if options.notify && self.config.notify.effective_enabled() {
            match self.notify(&outcome) {
                Ok(sent) => outcome.notified = sent,
                Err(message) => {
                    tracing::warn!(error = %message, "notification not sent");
                    outcome.notes.push(format!("Notification not sent: {message}"));
                }
            }
        }
        Ok(outcome)
    }

    fn check_preconditions(&self) -> Result<(), AuditError> {
        if !self.repo_root.is_dir() {
            return Err(AuditError::RepositoryMissing(self.repo_root.clone()));
        }
        let content_root = self.config.content_root(&self.repo_root);
        if !content_root.is_dir() {
            return Err(AuditError::ContentDirMissing(content_root));
        }
        Ok(())
    }

    fn load_store(&self, guard: &TrendGuard<'_>) -> Result<TrendStore, AuditError> {
        let policy = RetentionPolicy::new(self.config.trends.effective_max_entries());
        let store = TrendStore::load(guard, policy)?;
        if let Some(notice) = store.corruption() {
            tracing::error!(moved_to = %notice.moved_to.display(), "trend store was corrupt");
        }
        Ok(store)
    }

    /// `Ok(false)` when no sink is configured.
    fn notify(&self, outcome: &AuditOutcome) -> Result<bool, String> {
        let text = NotificationReporter::default().generate(&outcome.context())?;
        if let Some(sink) = &self.sink {
            sink.send(&text).map_err(|e| e.to_string())?;
            return Ok(true);
        }

        let path = self.config.credentials_path(&self.repo_root);
        let Some(credentials) = load_credentials(&path).map_err(|e| e.to_string())? else {
            tracing::debug!(path = %path.display(), "no notification credentials, skipping");
            return Ok(false);
        };
        let timeout = Duration::from_secs(self.config.notify.effective_timeout_secs());
        let sink = TelegramSink::new(self.config.notify.effective_api_base(), &credentials, timeout)
            .map_err(|e| e.to_string())?;
        sink.send(&text).map_err(|e| e.to_string())?;
        Ok(true)
    }
}
