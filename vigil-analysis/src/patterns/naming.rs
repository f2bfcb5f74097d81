//! Naming rules for documents and scripts.

use std::sync::LazyLock;

use regex::Regex;

static KEBAB_CASE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").ok());

static VERSION_SUFFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)[-_.]?(?:v\d+(?:\.\d+)*|\d+|old|new|backup|bak|copy|final|fixed|tmp|temp|draft|orig|legacy)$").ok()
});

/// True when the document name (extension stripped) is kebab-case.
pub fn is_kebab_case_document(file_name: &str) -> bool {
    let stem = strip_extension(file_name);
    KEBAB_CASE.as_ref().is_some_and(|re| re.is_match(stem))
}

/// Family stem of a script: extension removed, then version-ish suffixes
/// (`-v2`, `_old`, `.bak`, `-final`, trailing digits) stripped repeatedly.
///
/// `sync-v2.py`, `sync_old.py` and `sync.sh` all belong to family `sync`.
pub fn script_family(file_name: &str) -> String {
    let mut stem = strip_extension(file_name).to_string();
    if let Some(re) = VERSION_SUFFIX.as_ref() {
        loop {
            let stripped = re.replace(&stem, "").into_owned();
            if stripped.is_empty() || stripped == stem {
                break;
            }
            stem = stripped;
        }
    }
    stem.to_lowercase()
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(idx) => &file_name[..idx],
    }
}
