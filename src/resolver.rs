//! Source URL discovery from audio filenames.

use regex::Regex;
use std::sync::OnceLock;

/// Delimiters that conventionally separate a display name from the source
/// URL inside a filename, in priority order.
const URL_DELIMITERS: &[&str] = &[" - ", "_URL_", "[", "("];

/// Scheme, a domain-like token containing a dot, then a non-whitespace path.
fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://[^\s.]+\.[^\s]+").expect("static pattern"))
}

/// Resolves the source page URL for a file, or `None` if the file should be
/// skipped.
///
/// Ordered heuristics, first success wins:
/// 1. For each delimiter present in the filename: split on its last
///    occurrence, truncate the trailing segment at its first `.` (drops the
///    extension), and accept the result if it starts with `http`. The
///    truncation also cuts URLs whose tail still contains dots, e.g. a bare
///    domain; filenames are expected to encode dot-free URL tails. Kept
///    as-is and pinned by a test rather than silently changed.
/// 2. A URL-shaped substring anywhere in the filename.
/// 3. The batch-level fallback, if one was supplied.
pub fn resolve_source_url(filename: &str, fallback: Option<&str>) -> Option<String> {
    for delim in URL_DELIMITERS {
        let Some(idx) = filename.rfind(delim) else {
            continue;
        };
        let tail = &filename[idx + delim.len()..];
        let candidate = &tail[..tail.find('.').unwrap_or(tail.len())];
        if candidate.starts_with("http") {
            return Some(candidate.to_string());
        }
    }

    if let Some(m) = url_pattern().find(filename) {
        return Some(m.as_str().to_string());
    }

    fallback.map(str::to_string)
}
