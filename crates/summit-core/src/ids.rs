//! Session-id parsing and slug helpers.
//!
//! Session ids follow `<EVENT>-<letters?><digits>[k<digits>]`, e.g.
//! `SAN19-210`, `BUD20-113k1` or `SAN19-keynote2`. Content files embed the
//! lower-case form, so extraction works on lower-cased input and returns the
//! canonical upper-case id.

/// Extract a session id from a file name or path.
///
/// `event_code` is the event prefix (any case). Returns the canonical
/// upper-case id, or `None` when the input does not contain one.
#[must_use]
pub fn extract_session_id(input: &str, event_code: &str) -> Option<String> {
    let haystack = input.to_lowercase();
    let prefix = format!("{}-", event_code.to_lowercase());

    let start = haystack.find(&prefix)?;
    let tail = &haystack[start + prefix.len()..];

    let mut chars = tail.char_indices().peekable();
    let mut end = 0;

    // Optional leading letters (e.g. "keynote2").
    while let Some((idx, ch)) = chars.peek().copied() {
        if ch.is_ascii_lowercase() {
            chars.next();
            end = idx + ch.len_utf8();
        } else {
            break;
        }
    }

    let digits_start = end;
    while let Some((idx, ch)) = chars.peek().copied() {
        if ch.is_ascii_digit() {
            chars.next();
            end = idx + 1;
        } else {
            break;
        }
    }
    if end == digits_start {
        // A session number is required.
        return None;
    }

    // Optional sub-session suffix: "k" plus digits.
    if let Some((_, 'k')) = chars.peek().copied() {
        let mut lookahead = chars.clone();
        lookahead.next();
        let mut sub_end = None;
        while let Some((idx, ch)) = lookahead.peek().copied() {
            if ch.is_ascii_digit() {
                lookahead.next();
                sub_end = Some(idx + 1);
            } else {
                break;
            }
        }
        if let Some(sub) = sub_end {
            end = sub;
        }
    }

    Some(format!("{}-{}", event_code.to_uppercase(), &tail[..end]).to_uppercase())
}

/// Turn a display name into a file-name-safe slug.
///
/// Lower-cases, keeps ASCII alphanumerics, and collapses every other run of
/// characters into a single `-`.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
