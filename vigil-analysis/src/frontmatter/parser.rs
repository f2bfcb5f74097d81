//! Header block parser.
//!
//! Recognizes a block that opens on the first line with `---` and closes on a
//! later `---` line. Inside, `key: value` lines become entries; bracketed
//! values (`[a, "b"]`) and `- item` continuation lines become lists. Lines
//! that fit neither shape are skipped. An unterminated block is no header.

use super::types::{Header, HeaderValue};

const DELIMITER: &str = "---";

/// Parse the header block at the top of `text`, if any.
pub fn parse_header(text: &str) -> Option<Header> {
    let start = if text.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
    let mut lines = LineCursor::new(text, start);

    let (first, _) = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let mut pending: Vec<(String, HeaderValue)> = Vec::new();
    let mut last_key: Option<String> = None;

    while let Some((line, offset)) = lines.next() {
        if line.trim_end() == DELIMITER {
            let mut header = Header::new(0..lines.position(), offset);
            for (key, value) in pending {
                header.insert(key, value);
            }
            return Some(header);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| (trimmed == "-").then_some("")) {
            if let Some((_, value)) = last_key
                .as_ref()
                .and_then(|k| pending.iter_mut().rev().find(|(key, _)| key == k))
            {
                let item = unquote(item.trim());
                if matches!(&*value, HeaderValue::Scalar(s) if s.is_empty()) {
                    *value = HeaderValue::List(Vec::new());
                }
                if let HeaderValue::List(items) = &mut *value {
                    if !item.is_empty() {
                        items.push(item.to_string());
                    }
                }
            }
            continue;
        }

        let Some((raw_key, raw_value)) = trimmed.split_once(':') else {
            last_key = None;
            continue;
        };
        let key = raw_key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            last_key = None;
            continue;
        }
        let value = parse_value(raw_value.trim());
        pending.retain(|(k, _)| k != key);
        pending.push((key.to_string(), value));
        last_key = Some(key.to_string());
    }

    None
}

fn parse_value(raw: &str) -> HeaderValue {
    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(|item| unquote(item.trim()))
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        return HeaderValue::List(items);
    }
    HeaderValue::Scalar(unquote(raw).to_string())
}

fn unquote(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'').trim()
}

/// Line iterator that also reports byte offsets.
struct LineCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    /// Offset just past the last line returned (its newline included).
    fn position(&self) -> usize {
        self.pos
    }

    fn next(&mut self) -> Option<(&'a str, usize)> {
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.text[start..];
        let (line, advance) = match rest.find('\n') {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        self.pos += advance;
        Some((line.strip_suffix('\r').unwrap_or(line), start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::types::Field;

    #[test]
    fn parses_scalars_and_lists() {
        let text = "---\ntitle: \"Deploy Guide\"\ncategory: ops\ntags: [deploy, 'ci', ]\nsummary: How we ship\n---\n# Body\n";
        let header = parse_header(text).unwrap();
        assert_eq!(header.scalar("title"), Some("Deploy Guide"));
        assert_eq!(header.scalar("category"), Some("ops"));
        assert_eq!(header.list("tags").unwrap(), ["deploy", "ci"]);
        assert_eq!(&text[header.range.clone()], "---\ntitle: \"Deploy Guide\"\ncategory: ops\ntags: [deploy, 'ci', ]\nsummary: How we ship\n---\n");
        assert!(text[header.closing_offset..].starts_with("---\n# Body"));
    }

    #[test]
    fn no_header_cases() {
        assert!(parse_header("# Just a doc\n").is_none());
        assert!(parse_header("").is_none());
        assert!(parse_header("---\ntitle: never closed\n").is_none());
        assert!(parse_header("\n---\ntitle: late\n---\n").is_none());
    }

    #[test]
    fn empty_values_count_as_missing() {
        let header = parse_header("---\ntitle: X\nsummary:\ntags: []\n---\n").unwrap();
        assert_eq!(header.field("summary"), Field::Missing);
        assert_eq!(header.field("tags"), Field::Missing);
        assert_eq!(header.field("absent"), Field::Missing);
        let required: Vec<String> = ["title", "tags", "summary"].iter().map(|s| s.to_string()).collect();
        assert_eq!(header.missing(&required), vec!["tags", "summary"]);
    }

    #[test]
    fn dash_lists_and_malformed_lines() {
        let text = "---\ntags:\n  - alpha\n  - \"beta\"\nthis line is junk\nkey with space: no\ncategory: ref\n---\n";
        let header = parse_header(text).unwrap();
        assert_eq!(header.list("tags").unwrap(), ["alpha", "beta"]);
        assert_eq!(header.scalar("category"), Some("ref"));
        assert_eq!(header.keys().collect::<Vec<_>>(), vec!["tags", "category"]);
    }

    #[test]
    fn crlf_and_bom_are_tolerated() {
        let text = "\u{feff}---\r\ntitle: Win\r\n---\r\nbody";
        let header = parse_header(text).unwrap();
        assert_eq!(header.scalar("title"), Some("Win"));
    }
}
