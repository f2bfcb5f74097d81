//! The declarative pattern table.
//!
//! Bump [`CATALOG_VERSION`] whenever an entry is added, removed or its regex
//! changes, so reports can say which rule set produced them.

use crate::enforcement::findings::Severity;

/// Version of the table below.
pub const CATALOG_VERSION: u32 = 1;

/// Which check a pattern belongs to, and therefore its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Full corpus, every run.
    Credential,
    /// Recently modified content only, minus the allow-list.
    ContentRisk,
}

/// One catalogue entry.
#[derive(Debug, Clone, Copy)]
pub struct PatternDef {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: PatternKind,
    pub pattern: &'static str,
    pub severity: Severity,
}

macro_rules! pattern {
    ($id:expr, $name:expr, $kind:ident, $severity:ident, $regex:expr) => {
        PatternDef {
            id: $id,
            name: $name,
            kind: PatternKind::$kind,
            pattern: $regex,
            severity: Severity::$severity,
        }
    };
}

/// All patterns.
pub static CATALOG: &[PatternDef] = &[
    // ── Cloud provider keys ────────────────────────────────────────────────
    pattern!("aws-access-key", "AWS access key", Credential, Critical, r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b"),
    pattern!(
        "aws-secret-key",
        "AWS secret access key",
        Credential,
        Critical,
        r#"(?i)aws_secret_access_key\s*[=:]\s*['"]?[A-Za-z0-9/+=]{40}['"]?"#
    ),
    pattern!("google-api-key", "Google API key", Credential, Critical, r"\bAIza[0-9A-Za-z_-]{35}\b"),
    // ── Source hosting / chat ──────────────────────────────────────────────
    pattern!("github-token", "GitHub token", Credential, Critical, r"\bgh[pousr]_[A-Za-z0-9]{36,}\b"),
    pattern!(
        "github-fine-grained-token",
        "GitHub fine-grained token",
        Credential,
        Critical,
        r"\bgithub_pat_[A-Za-z0-9_]{60,}\b"
    ),
    pattern!("slack-token", "Slack token", Credential, Critical, r"\bxox[abposr]-[A-Za-z0-9-]{10,}\b"),
    pattern!(
        "slack-webhook",
        "Slack webhook URL",
        Credential,
        Critical,
        r"https://hooks\.slack\.com/services/T[A-Z0-9]+/B[A-Z0-9]+/[A-Za-z0-9]+"
    ),
    pattern!("telegram-bot-token", "Telegram bot token", Credential, Critical, r"\b\d{8,10}:AA[A-Za-z0-9_-]{33}\b"),
    // ── LLM providers ──────────────────────────────────────────────────────
    pattern!("anthropic-api-key", "Anthropic API key", Credential, Critical, r"\bsk-ant-[A-Za-z0-9_-]{20,}"),
    pattern!("openai-api-key", "OpenAI API key", Credential, Critical, r"\bsk-(?:proj-)?[A-Za-z0-9]{20,}\b"),
    // ── Key material / connection strings ──────────────────────────────────
    pattern!(
        "private-key-block",
        "Private key block",
        Credential,
        Critical,
        r"-----BEGIN (?:RSA |EC |DSA |OPENSSH |PGP |ENCRYPTED )?PRIVATE KEY(?: BLOCK)?-----"
    ),
    pattern!(
        "connection-string-password",
        "Connection string with password",
        Credential,
        Critical,
        r"(?i)\b(?:postgres(?:ql)?|mysql|mongodb(?:\+srv)?|redis|amqp|mssql)://[^\s:/@]+:[^\s@/]+@[^\s]+"
    ),
    pattern!(
        "generic-secret-assignment",
        "Generic secret assignment",
        Credential,
        Warning,
        r#"(?i)\b(?:password|passwd|secret|api[_-]?key|access[_-]?token|auth[_-]?token|client[_-]?secret)\s*[=:]\s*['"]?[A-Za-z0-9_\-/+=]{12,}['"]?"#
    ),
    // ── Instruction injection ──────────────────────────────────────────────
    pattern!(
        "injection-ignore-instructions",
        "Instruction override phrasing",
        ContentRisk,
        Critical,
        r"(?i)\b(?:ignore|disregard|forget)\s+(?:all\s+)?(?:of\s+)?(?:the\s+|your\s+)?(?:previous|prior|above|earlier)\s+(?:instructions|prompts|rules)\b"
    ),
    pattern!(
        "injection-role-override",
        "Role override phrasing",
        ContentRisk,
        Warning,
        r"(?i)\byou\s+are\s+now\s+(?:in\s+)?(?:developer\s+mode|dan|jailbroken|unrestricted)\b"
    ),
    pattern!(
        "injection-prompt-extraction",
        "System prompt extraction phrasing",
        ContentRisk,
        Warning,
        r"(?i)\b(?:reveal|print|output|repeat|show)\s+(?:me\s+)?(?:your\s+|the\s+)?(?:system\s+prompt|hidden\s+instructions)\b"
    ),
    // ── Exfiltration ───────────────────────────────────────────────────────
    pattern!(
        "exfiltration-capture-domain",
        "Request-capture domain",
        ContentRisk,
        Critical,
        r"(?i)\b(?:webhook\.site|requestbin\.(?:com|net)|pipedream\.net|ngrok\.io|ngrok-free\.app|interact\.sh|oast\.(?:fun|live|me|pro)|burpcollaborator\.net)\b"
    ),
    pattern!(
        "exfiltration-pipe-to-shell",
        "Download piped into a shell",
        ContentRisk,
        Warning,
        r"(?i)\b(?:curl|wget)\s[^|\n]*\|\s*(?:sudo\s+)?(?:ba|z)?sh\b"
    ),
    // ── Hidden characters ──────────────────────────────────────────────────
    pattern!(
        "invisible-characters",
        "Invisible or bidirectional control characters",
        ContentRisk,
        Warning,
        r"[\x{200B}-\x{200D}\x{2060}\x{202A}-\x{202E}\x{2066}-\x{2069}]"
    ),
    // ── Destructive commands ───────────────────────────────────────────────
    pattern!(
        "destructive-rm-root",
        "Recursive delete of root or home",
        ContentRisk,
        Critical,
        r"\brm\s+-[A-Za-z]*(?:rf|fr)[A-Za-z]*\s+(?:--no-preserve-root\s+)?(?:/|~|\$HOME)(?:\s|$|\*)"
    ),
    pattern!("destructive-fork-bomb", "Fork bomb", ContentRisk, Critical, r":\(\)\s*\{\s*:\s*\|\s*:\s*&\s*\}\s*;\s*:"),
    pattern!(
        "destructive-disk-write",
        "Raw disk overwrite",
        ContentRisk,
        Critical,
        r"\b(?:mkfs(?:\.\w+)?\s+/dev/|dd\s+[^\n]*\bof=/dev/(?:sd|nvme|hd|disk))"
    ),
];

/// Entries of one kind, in table order.
pub fn patterns_of(kind: PatternKind) -> impl Iterator<Item = &'static PatternDef> {
    CATALOG.iter().filter(move |p| p.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn ids_are_unique_and_regexes_compile() {
        let mut seen = FxHashSet::default();
        for def in CATALOG {
            assert!(seen.insert(def.id), "duplicate id {}", def.id);
            assert!(regex::Regex::new(def.pattern).is_ok(), "bad regex {}", def.id);
        }
    }

    #[test]
    fn both_kinds_present() {
        assert!(patterns_of(PatternKind::Credential).count() >= 10);
        assert!(patterns_of(PatternKind::ContentRisk).count() >= 6);
    }
}
