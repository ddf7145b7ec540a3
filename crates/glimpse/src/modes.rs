//! Presentation modes.
//!
//! | Mode | Budget | Output |
//! |------|--------|--------|
//! | compact | width - margin - prefix | one line |
//! | raw | unbounded, no metadata | one line (the terminal wraps it) |
//! | wrapped | width x lines - margin - prefix | up to `lines` rows |
//!
//! Each mode can also be *highlighted*: the summary goes into a bordered
//! block titled `DEBUG` whose content is 4 columns narrower than the width.
//!
//! [`Inspector`] returns the text; the free functions print it to stdout.

use std::panic::Location;

use crate::banner::Banner;
use crate::compose::{compose, compose_raw};
use crate::config::Settings;
use crate::inspect::Inspect;
use crate::name::name_or_resolve;
use crate::palette::{Palette, Role};
use crate::util::{chunk_by_width, display_width};

const BANNER_TITLE: &str = "DEBUG";

/// Formats summaries according to a set of [`Settings`].
///
/// ```rust
/// use glimpse::{ColorChoice, Inspector, Settings};
///
/// let inspector = Inspector::new(Settings::new().width(60).color(ColorChoice::Never));
/// assert_eq!(
///     inspector.compact("xs", &vec![1, 2], false),
///     "DEBUG: xs (list: int) = [1, 2] (2 elts)"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    settings: Settings,
}

impl Inspector {
    pub fn new(settings: Settings) -> Self {
        Inspector { settings }
    }

    /// Inspector configured by [`Settings::from_env`].
    pub fn from_env() -> Self {
        Self::new(Settings::from_env())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn prefix(&self, palette: &Palette) -> String {
        palette.paint(Role::Prefix, &self.settings.prefix)
    }

    fn banner<'a>(&self, palette: &'a Palette, width: usize) -> Banner<'a> {
        Banner::new(BANNER_TITLE, width, palette).border(self.settings.border)
    }

    /// One line, truncated to the width.
    pub fn compact(&self, name: &str, value: &dyn Inspect, highlighted: bool) -> String {
        let palette = self.settings.palette();
        let width = self.settings.resolved_width();

        if highlighted {
            let banner = self.banner(&palette, width);
            let line = compose(name, value, banner.content_width(), &palette);
            return banner.render(&[line]);
        }

        let budget =
            width.saturating_sub(self.settings.margin + display_width(&self.settings.prefix));
        format!(
            "{}{}",
            self.prefix(&palette),
            compose(name, value, budget, &palette)
        )
    }

    /// The whole value, without truncation or metadata suffixes.
    pub fn raw(&self, name: &str, value: &dyn Inspect, highlighted: bool) -> String {
        let palette = self.settings.palette();
        let line = compose_raw(name, value, &palette);

        if highlighted {
            let banner = self.banner(&palette, self.settings.resolved_width());
            return banner.render(&[line]);
        }
        format!("{}{}", self.prefix(&palette), line)
    }

    /// Up to `max_lines` rows (default from the settings), split at the width.
    pub fn wrapped(
        &self,
        name: &str,
        value: &dyn Inspect,
        max_lines: Option<usize>,
        highlighted: bool,
    ) -> String {
        let palette = self.settings.palette();
        let width = self.settings.resolved_width();
        let lines = max_lines.unwrap_or(self.settings.max_lines).max(1);

        if highlighted {
            let banner = self.banner(&palette, width);
            let line = compose(
                name,
                value,
                banner.content_width().saturating_mul(lines),
                &palette,
            );
            return banner.render(&[line]);
        }

        let budget = width
            .saturating_mul(lines)
            .saturating_sub(self.settings.margin + display_width(&self.settings.prefix));
        let line = format!(
            "{}{}",
            self.prefix(&palette),
            compose(name, value, budget, &palette)
        );
        chunk_by_width(&line, width).join("\n")
    }
}

/// Prints a one-line summary of `value`.
///
/// Without a `name_hint` the name is read from the calling source line.
#[track_caller]
pub fn compact_debug<T: Inspect + ?Sized>(value: &T, name_hint: Option<&str>, highlighted: bool) {
    let name = name_or_resolve(name_hint, Location::caller(), "compact_debug");
    println!(
        "{}",
        Inspector::from_env().compact(&name, &value, highlighted)
    );
}

/// Prints an untruncated summary of `value`.
#[track_caller]
pub fn raw_debug<T: Inspect + ?Sized>(value: &T, name_hint: Option<&str>, highlighted: bool) {
    let name = name_or_resolve(name_hint, Location::caller(), "raw_debug");
    println!("{}", Inspector::from_env().raw(&name, &value, highlighted));
}

/// Prints a summary of `value` over at most `max_lines` rows.
#[track_caller]
pub fn wrapped_debug<T: Inspect + ?Sized>(
    value: &T,
    name_hint: Option<&str>,
    max_lines: Option<usize>,
    highlighted: bool,
) {
    let name = name_or_resolve(name_hint, Location::caller(), "wrapped_debug");
    println!(
        "{}",
        Inspector::from_env().wrapped(&name, &value, max_lines, highlighted)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ColorChoice;

    fn plain(width: usize) -> Inspector {
        Inspector::new(Settings::new().width(width).color(ColorChoice::Never))
    }

    #[test]
    fn test_compact_fits_width() {
        let v: Vec<i64> = (0..500).collect();
        let line = plain(50).compact("v", &v, false);
        assert!(line.starts_with("DEBUG: v (list: int) = [0, 1"));
        // width minus the margin
        assert!(display_width(&line) <= 49, "{line}");
    }

    #[test]
    fn test_compact_highlighted() {
        let out = plain(40).compact("n", &5, true);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("╭─ DEBUG "));
        assert!(rows[1].starts_with("│ n (int) = 5 "));
        assert!(rows.iter().all(|row| display_width(row) == 40));
    }

    #[test]
    fn test_raw_is_not_truncated() {
        let v: Vec<i64> = (0..100).collect();
        let line = plain(30).raw("v", &v, false);
        assert!(line.starts_with("DEBUG: v (list: int) = [0, 1, 2"));
        assert!(line.ends_with("98, 99]"));
        assert!(!line.contains("elts"));
    }

    #[test]
    fn test_wrapped_uses_several_rows() {
        let v: Vec<i64> = (0..500).collect();
        let out = plain(30).wrapped("v", &v, None, false);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| display_width(row) <= 30));
        assert!(out.ends_with("(500 elts)"));
    }

    #[test]
    fn test_wrapped_line_override() {
        let v: Vec<i64> = (0..500).collect();
        let out = plain(30).wrapped("v", &v, Some(5), false);
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn test_wrapped_highlighted() {
        let v: Vec<i64> = (0..500).collect();
        let out = plain(30).wrapped("v", &v, Some(2), true);
        let rows: Vec<&str> = out.lines().collect();
        // border, two content rows, border
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| display_width(row) == 30));
    }

    #[test]
    fn test_wrapped_huge_line_limit() {
        let out = plain(30).wrapped("v", &vec![1, 2], Some(usize::MAX / 2), false);
        assert_eq!(out.replace('\n', ""), "DEBUG: v (list: int) = [1, 2] (2 elts)");
        let boxed = plain(60).wrapped("v", &vec![1, 2], Some(usize::MAX), true);
        assert_eq!(boxed.lines().count(), 3);
    }

    #[test]
    fn test_custom_prefix() {
        let inspector = Inspector::new(
            Settings::new()
                .width(40)
                .prefix(">> ")
                .color(ColorChoice::Never),
        );
        assert_eq!(inspector.compact("b", &true, false), ">> b (bool) = true");
    }
}
