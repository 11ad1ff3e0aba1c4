//! Tag balance checking for pasted embed code.

use memchr::{memchr, memmem};

use crate::dom::tags;

/// Elements whose content is plain text up to the matching end tag.
fn is_raw_content(tag: &str) -> bool {
    matches!(
        tag,
        "script"
            | "style"
            | "textarea"
            | "title"
            | "xmp"
            | "iframe"
            | "noembed"
            | "noframes"
            | "noscript"
    )
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'_' | b'.')
}

/// Offset of the `>` closing the tag that starts at `from`, skipping quoted
/// attribute values.
fn tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote = None;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i),
            None => {}
        }
    }
    None
}

/// Report whether every opening tag in `html` has a matching closing tag,
/// properly nested.
///
/// Void elements (`<br>`, `<img>`) and self-closing tags (`<x/>`) need no
/// closing tag. Comments, doctypes and the contents of `script`, `style` and
/// similar raw-text elements are skipped. A stray or mismatched closing tag,
/// or any tag still open at the end of input, makes the markup unbalanced.
pub fn is_balanced(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut open: Vec<&str> = Vec::new();
    let mut pos = 0;

    while let Some(offset) = memchr(b'<', &bytes[pos..]) {
        let start = pos + offset;
        let rest = &bytes[start + 1..];

        if rest.starts_with(b"!--") {
            match memmem::find(&bytes[start + 4..], b"-->") {
                Some(end) => pos = start + 4 + end + 3,
                None => break,
            }
        } else if rest.starts_with(b"!") || rest.starts_with(b"?") {
            match memchr(b'>', rest) {
                Some(end) => pos = start + 1 + end + 1,
                None => break,
            }
        } else if let Some(after_slash) = rest.strip_prefix(b"/") {
            let name_len = after_slash.iter().take_while(|&&b| is_name_byte(b)).count();
            let name_start = start + 2;
            let name = &lower[name_start..name_start + name_len];
            let Some(end) = tag_end(bytes, name_start + name_len) else {
                break;
            };
            pos = end + 1;
            if name.is_empty() {
                continue;
            }
            if open.pop() != Some(name) {
                return false;
            }
        } else if rest.first().is_some_and(u8::is_ascii_alphabetic) {
            let name_start = start + 1;
            let name_len = rest.iter().take_while(|&&b| is_name_byte(b)).count();
            let name = &lower[name_start..name_start + name_len];
            let Some(end) = tag_end(bytes, name_start + name_len) else {
                break;
            };
            pos = end + 1;

            let self_closing = bytes[end - 1] == b'/';
            if self_closing || tags::is_void(name) {
                continue;
            }
            if is_raw_content(name) {
                let closer = format!("</{name}");
                match memmem::find(&bytes[pos..], closer.as_bytes()) {
                    Some(close) => {
                        let close_start = pos + close;
                        match tag_end(bytes, close_start + closer.len()) {
                            Some(close_end) => pos = close_end + 1,
                            None => return false,
                        }
                    }
                    None => return false,
                }
                continue;
            }
            open.push(name);
        } else {
            pos = start + 1;
        }
    }

    open.is_empty()
}
