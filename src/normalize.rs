//! Text cleanup for tag values and album folder names.

use unicode_normalization::UnicodeNormalization;

/// Placeholder when cleanup strips a non-empty input down to nothing.
pub const UNKNOWN: &str = "Unknown";

/// Characters that are unsafe in filenames on common platforms.
const FILESYSTEM_UNSAFE: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Cleans raw text into a filesystem-safe, printable-ASCII string.
///
/// Applies NFKD decomposition so combining marks separate from their base
/// characters, drops filesystem-unsafe characters, drops everything outside
/// printable ASCII (0x20..=0x7E; a lossy transliteration, accepted as a
/// limitation), and collapses whitespace runs to a single space with no
/// leading or trailing space.
///
/// Empty input yields `None`. Input that cleans down to nothing yields
/// `"Unknown"`; the empty string is never a valid output.
pub fn normalize(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.nfkd() {
        if FILESYSTEM_UNSAFE.contains(&c) {
            continue;
        }
        if !(' '..='~').contains(&c) {
            continue;
        }
        if c == ' ' {
            // Collapse runs and drop leading spaces in one pass.
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }

    if out.is_empty() {
        Some(UNKNOWN.to_string())
    } else {
        Some(out)
    }
}
