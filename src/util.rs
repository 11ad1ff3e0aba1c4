//! Text helpers shared across the compiler.

use std::borrow::Cow;
use std::sync::LazyLock;

use memchr::memmem;
use regex::Regex;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from a `<meta charset>` tag)
/// 3. Falls back to Windows-1252 (common in exported office documents)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the charset label from a `<meta charset=...>` or
/// `content="...; charset=..."` declaration in the first kilobyte.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let head = &bytes[..bytes.len().min(1024)];
    let start = memmem::find(head, b"charset=")? + b"charset=".len();
    let rest = &head[start..];
    let rest = rest
        .strip_prefix(b"\"")
        .or_else(|| rest.strip_prefix(b"'"))
        .unwrap_or(rest);
    let end = rest
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b' ' | b'>' | b'/'))
        .unwrap_or(rest.len());
    std::str::from_utf8(&rest[..end])
        .ok()
        .filter(|label| !label.is_empty())
}

/// Shorten `s` to at most `max` characters.
///
/// Longer strings keep their first `max - 4` characters followed by `…`.
pub fn truncate(s: &str, max: usize) -> Cow<'_, str> {
    if s.chars().count() <= max {
        return Cow::Borrowed(s);
    }
    let keep = max.saturating_sub(4);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    Cow::Owned(out)
}

static ARTICLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(the|an?)\b").expect("valid regex"));
static PENN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bpa\b").expect("valid regex"));
static POSSESSIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.?['’]s").expect("valid regex"));
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_]+").expect("valid regex"));

/// Turn free text into a URL slug.
///
/// Lowercases, drops articles, spells out `pa`, folds possessives, and joins
/// the remaining words with `-`.
pub fn slugify_url(s: &str) -> String {
    let s = s.to_lowercase();
    let s = ARTICLE_RE.replace_all(&s, " ");
    let s = PENN_RE.replace_all(&s, "pennsylvania");
    let s = POSSESSIVE_RE.replace_all(&s, "s");
    let s = NON_WORD_RE.replace_all(&s, " ");
    NON_WORD_RE.replace_all(s.trim(), "-").into_owned()
}

/// Number of whitespace-separated words.
pub fn word_count(s: &str) -> usize {
    s.split(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'))
        .filter(|word| !word.is_empty())
        .count()
}
