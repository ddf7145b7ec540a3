//! Display names for summarized values.
//!
//! The macros ([`glimpse!`](crate::glimpse), [`glimpse_raw!`](crate::glimpse_raw),
//! [`glimpse_wrapped!`](crate::glimpse_wrapped)) capture the argument text at
//! compile time. The plain functions fall back to reading the caller's source
//! line, located through `#[track_caller]`, and extracting the text between
//! the parentheses of the call. That lookup is best-effort: a missing source
//! file or a call spanning several lines yields an empty name.

use std::panic::Location;
use std::path::{Path, PathBuf};

/// Strips trailing arguments and a leading borrow from argument text.
///
/// ```rust
/// use glimpse::strip_trailing_args;
///
/// assert_eq!(strip_trailing_args("&x, None, true"), "x");
/// assert_eq!(strip_trailing_args("&mut  cfg.items"), "cfg.items");
/// assert_eq!(strip_trailing_args("f(a, b), true"), "f(a, b)");
/// ```
pub fn strip_trailing_args(text: &str) -> String {
    let first = match top_level_comma(text) {
        Some(at) => &text[..at],
        None => text,
    };
    let mut name = first.trim();
    loop {
        if let Some(rest) = name.strip_prefix("&mut ") {
            name = rest.trim_start();
        } else if let Some(rest) = name.strip_prefix('&') {
            name = rest.trim_start();
        } else {
            break;
        }
    }
    name.to_string()
}

/// Byte offset of the first comma outside brackets and string literals.
fn top_level_comma(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '"' => skip_string(&mut chars),
            ',' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Advances past the closing quote of a string literal.
fn skip_string(chars: &mut std::str::CharIndices<'_>) {
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => return,
            _ => {}
        }
    }
}

/// Byte offset of the `)` closing a group whose `(` was just consumed.
fn matching_close(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '"' => skip_string(&mut chars),
            _ => {}
        }
    }
    None
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Finds `token` as a whole identifier in `line`.
fn find_token(line: &str, token: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = line[from..].find(token) {
        let at = from + pos;
        let end = at + token.len();
        let before_ok = !line[..at].chars().next_back().is_some_and(is_ident_char);
        let after_ok = !line[end..].chars().next().is_some_and(is_ident_char);
        if before_ok && after_ok {
            return Some(at);
        }
        from = end;
    }
    None
}

/// Extracts the argument text of the `callee(...)` call found at or after
/// `column` (1-based) in `line`.
///
/// ```rust
/// use glimpse::extract_argument;
///
/// let line = "    glimpse::compact_debug(&scores[1..], None, false);";
/// assert_eq!(
///     extract_argument(line, 5, "compact_debug").as_deref(),
///     Some("&scores[1..], None, false")
/// );
/// ```
pub fn extract_argument(line: &str, column: usize, callee: &str) -> Option<String> {
    let from = line
        .get(column.saturating_sub(1)..)
        .filter(|rest| find_token(rest, callee).is_some())
        .unwrap_or(line);
    let at = find_token(from, callee)?;
    let after = &from[at + callee.len()..];
    let open = after.find('(')?;
    // Only a turbofish may sit between the callee and its parenthesis.
    let between = after[..open].trim();
    if !(between.is_empty() || between.starts_with("::<")) {
        return None;
    }
    let inner = &after[open + 1..];
    let close = matching_close(inner)?;
    Some(inner[..close].trim().to_string())
}

fn source_candidates(file: &str) -> Vec<PathBuf> {
    let path = Path::new(file);
    if path.is_absolute() {
        return vec![path.to_path_buf()];
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.ancestors().map(|dir| dir.join(path)).collect(),
        Err(_) => vec![path.to_path_buf()],
    }
}

fn read_source_line(file: &str, line: u32) -> Option<String> {
    let index = usize::try_from(line.checked_sub(1)?).ok()?;
    source_candidates(file)
        .iter()
        .find_map(|path| std::fs::read_to_string(path).ok())?
        .lines()
        .nth(index)
        .map(str::to_owned)
}

/// Best-effort name of the first argument of the `callee` call at `location`.
///
/// Returns an empty string when the source cannot be read or the call cannot
/// be found on that line.
pub fn resolve_name(location: &Location<'_>, callee: &str) -> String {
    let resolved = read_source_line(location.file(), location.line()).and_then(|line| {
        extract_argument(&line, location.column() as usize, callee)
    });
    match resolved {
        Some(args) => strip_trailing_args(&args),
        None => {
            tracing::trace!(
                file = location.file(),
                line = location.line(),
                callee,
                "could not resolve argument name"
            );
            String::new()
        }
    }
}

pub(crate) fn name_or_resolve(
    name_hint: Option<&str>,
    location: &Location<'_>,
    callee: &str,
) -> String {
    match name_hint {
        Some(name) => strip_trailing_args(name),
        None => resolve_name(location, callee),
    }
}

/// Prints a compact summary of an expression, named after its source text.
///
/// ```rust,no_run
/// let scores = vec![3, 1, 4];
/// glimpse::glimpse!(scores);
/// // DEBUG: scores (list: int) = [3, 1, 4] (3 elts)
///
/// glimpse::glimpse!(scores, highlighted);
/// ```
#[macro_export]
macro_rules! glimpse {
    ($value:expr, highlighted $(,)?) => {
        $crate::compact_debug(
            &$value,
            ::core::option::Option::Some(::core::stringify!($value)),
            true,
        )
    };
    ($value:expr $(,)?) => {
        $crate::compact_debug(
            &$value,
            ::core::option::Option::Some(::core::stringify!($value)),
            false,
        )
    };
}

/// Prints an untruncated summary of an expression.
#[macro_export]
macro_rules! glimpse_raw {
    ($value:expr, highlighted $(,)?) => {
        $crate::raw_debug(
            &$value,
            ::core::option::Option::Some(::core::stringify!($value)),
            true,
        )
    };
    ($value:expr $(,)?) => {
        $crate::raw_debug(
            &$value,
            ::core::option::Option::Some(::core::stringify!($value)),
            false,
        )
    };
}

/// Prints a summary of an expression wrapped over several lines.
///
/// ```rust,no_run
/// let matrix = vec![vec![0.5; 40]; 40];
/// glimpse::glimpse_wrapped!(matrix);
/// glimpse::glimpse_wrapped!(matrix, lines = 5);
/// glimpse::glimpse_wrapped!(matrix, lines = 5, highlighted);
/// ```
#[macro_export]
macro_rules! glimpse_wrapped {
    ($value:expr, lines = $lines:expr, highlighted $(,)?) => {
        $crate::wrapped_debug(
            &$value,
            ::core::option::Option::Some(::core::stringify!($value)),
            ::core::option::Option::Some($lines),
            true,
        )
    };
    ($value:expr, lines = $lines:expr $(,)?) => {
        $crate::wrapped_debug(
            &$value,
            ::core::option::Option::Some(::core::stringify!($value)),
            ::core::option::Option::Some($lines),
            false,
        )
    };
    ($value:expr, highlighted $(,)?) => {
        $crate::wrapped_debug(
            &$value,
            ::core::option::Option::Some(::core::stringify!($value)),
            ::core::option::Option::None,
            true,
        )
    };
    ($value:expr $(,)?) => {
        $crate::wrapped_debug(
            &$value,
            ::core::option::Option::Some(::core::stringify!($value)),
            ::core::option::Option::None,
            false,
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_marker_arguments() {
        assert_eq!(strip_trailing_args("x, true"), "x");
        assert_eq!(strip_trailing_args("  x  "), "x");
        assert_eq!(strip_trailing_args("&&x"), "x");
        assert_eq!(strip_trailing_args("m[\"a,b\"], None"), "m[\"a,b\"]");
        assert_eq!(strip_trailing_args(""), "");
    }

    #[test]
    fn extract_simple_call() {
        let line = "compact_debug(&x, None, false);";
        assert_eq!(
            extract_argument(line, 1, "compact_debug").as_deref(),
            Some("&x, None, false")
        );
    }

    #[test]
    fn extract_respects_nesting_and_strings() {
        let line = r#"log.debug(&f(a, ")"), None)?;"#;
        assert_eq!(
            extract_argument(line, 5, "debug").as_deref(),
            Some(r#"&f(a, ")"), None"#)
        );
    }

    #[test]
    fn extract_ignores_longer_identifiers() {
        let line = "my_debug(&a); debug(&b);";
        assert_eq!(extract_argument(line, 1, "debug").as_deref(), Some("&b"));
    }

    #[test]
    fn extract_fails_without_call() {
        assert_eq!(extract_argument("let x = 5;", 1, "debug"), None);
        assert_eq!(extract_argument("debug(&x", 1, "debug"), None);
    }

    #[test]
    fn resolves_this_call_site() {
        #[track_caller]
        fn probe_name<T>(_value: &T) -> String {
            resolve_name(Location::caller(), "probe_name")
        }

        let answer = 42;
        assert_eq!(probe_name(&answer), "answer");
    }

    #[test]
    fn hint_wins_over_source() {
        assert_eq!(
            name_or_resolve(Some("&total, true"), Location::caller(), "unused"),
            "total"
        );
    }
}
