//! Width-aware text helpers shared by the renderer, composer and modes.
//!
//! Widths are terminal display columns: ANSI escape sequences count as zero and
//! wide (CJK, emoji) characters count as two. The renderer only produces plain
//! text, but the chunking helpers also run over styled lines, so every slicing
//! helper here walks escape sequences without counting them.

use console::measure_text_width;
use unicode_width::UnicodeWidthChar;

/// Marker inserted wherever content was cut.
pub const ELLIPSIS: &str = "...";

/// Returns the display width of a string, ignoring ANSI escape codes.
///
/// ```rust
/// use glimpse::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("\x1b[31mred\x1b[0m"), 3);
/// ```
pub fn display_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Removes ANSI styling, leaving only printable text.
///
/// ```rust
/// use glimpse::strip_styling;
///
/// assert_eq!(strip_styling("\x1b[94m(int)\x1b[0m"), "(int)");
/// ```
pub fn strip_styling(s: &str) -> String {
    console::strip_ansi_codes(s).into_owned()
}

/// Keeps the longest prefix of `s` whose display width is at most `max_width`.
///
/// Escape sequences inside the kept prefix are preserved.
pub fn take_head(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if measure_text_width(s) <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let mut in_escape = false;

    for c in s.chars() {
        if c == '\x1b' {
            result.push(c);
            in_escape = true;
            continue;
        }
        if in_escape {
            result.push(c);
            // CSI sequences end with a letter (@ through ~)
            if c.is_ascii_alphabetic() || c == '~' {
                in_escape = false;
            }
            continue;
        }

        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Keeps the longest suffix of plain text `s` whose display width is at most
/// `max_width`.
pub fn take_tail(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut start = s.len();
    let mut current_width = 0;
    for (i, c) in s.char_indices().rev() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        current_width += char_width;
        start = i;
    }

    s[start..].to_string()
}

/// A run of dots no wider than `budget`, used when not even a full ellipsis fits.
pub(crate) fn dots(budget: usize) -> String {
    ".".repeat(budget.min(ELLIPSIS.len()))
}

/// Returns `s` unchanged if it fits, otherwise a run of dots that does.
pub(crate) fn fit_or_dots(s: &str, budget: usize) -> String {
    if display_width(s) <= budget {
        s.to_string()
    } else {
        dots(budget)
    }
}

/// Shortens `s` to `budget` columns keeping its start, an ellipsis, and its
/// last `tail` columns.
///
/// With room to spare the head gets `budget - 3 - tail` columns. When the
/// budget is smaller than that layout the tail shrinks first, then the
/// ellipsis itself.
///
/// ```rust
/// use glimpse::elide;
///
/// assert_eq!(elide("123456789012345", 12, 5), "1234...12345");
/// assert_eq!(elide("short", 12, 5), "short");
/// ```
pub fn elide(s: &str, budget: usize, tail: usize) -> String {
    if display_width(s) <= budget {
        return s.to_string();
    }
    if budget < ELLIPSIS.len() {
        return dots(budget);
    }

    let room = budget - ELLIPSIS.len();
    let tail = tail.min(room);
    let head = room - tail;

    format!("{}{}{}", take_head(s, head), ELLIPSIS, take_tail(s, tail))
}

/// Splits a (possibly styled) line into chunks of at most `width` columns.
///
/// Escape sequences stay attached to the chunk they appear in, so styling that
/// spans a chunk boundary simply continues on the next terminal line.
pub fn chunk_by_width(s: &str, width: usize) -> Vec<String> {
    if width == 0 || measure_text_width(s) <= width {
        return vec![s.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    let mut in_escape = false;

    for c in s.chars() {
        if c == '\x1b' {
            current.push(c);
            in_escape = true;
            continue;
        }
        if in_escape {
            current.push(c);
            if c.is_ascii_alphabetic() || c == '~' {
                in_escape = false;
            }
            continue;
        }

        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > width && current_width > 0 {
            chunks.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += char_width;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Strips module paths from a Rust type name, keeping generic structure.
///
/// ```rust
/// use glimpse::short_type_name;
///
/// assert_eq!(short_type_name("alloc::vec::Vec<core::option::Option<i32>>"), "Vec<Option<i32>>");
/// assert_eq!(short_type_name("my_app::model::Point"), "Point");
/// ```
pub fn short_type_name(full: &str) -> String {
    fn flush(segment: &mut String, out: &mut String) {
        let last = segment.rsplit("::").next().unwrap_or("");
        out.push_str(last);
        segment.clear();
    }

    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();

    for c in full.chars() {
        match c {
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' | '*' => {
                flush(&mut segment, &mut out);
                out.push(c);
            }
            _ => segment.push(c),
        }
    }
    flush(&mut segment, &mut out);

    out
}
