//! Bordered block used by the highlighted presentation modes.
//!
//! ```text
//! ╭─ DEBUG ──────────────────────────╮
//! │ x (list: int) = [1, 2] (2 elts)  │
//! ╰──────────────────────────────────╯
//! ```

use console::{pad_str, Alignment};

use crate::palette::{Palette, Role};
use crate::util::{chunk_by_width, display_width};

/// Border style for the highlighted block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    /// ASCII borders: +, -, |
    Ascii,
    /// Light box-drawing characters: ┌, ─, ┐, │, └, ┘
    Light,
    /// Heavy box-drawing characters: ┏, ━, ┓, ┃, ┗, ┛
    Heavy,
    /// Double-line box-drawing characters: ╔, ═, ╗, ║, ╚, ╝
    Double,
    /// Rounded corners with light lines: ╭, ─, ╮, │, ╰, ╯
    #[default]
    Rounded,
}

impl BorderStyle {
    fn chars(&self) -> BorderChars {
        match self {
            BorderStyle::Ascii => BorderChars {
                horizontal: '-',
                vertical: '|',
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
            },
            BorderStyle::Light => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
            },
            BorderStyle::Heavy => BorderChars {
                horizontal: '━',
                vertical: '┃',
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
            },
            BorderStyle::Double => BorderChars {
                horizontal: '═',
                vertical: '║',
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
            },
            BorderStyle::Rounded => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct BorderChars {
    horizontal: char,
    vertical: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
}

/// A titled box `width` columns wide.
#[derive(Debug, Clone)]
pub struct Banner<'a> {
    title: &'a str,
    width: usize,
    border: BorderStyle,
    palette: &'a Palette,
}

impl<'a> Banner<'a> {
    pub fn new(title: &'a str, width: usize, palette: &'a Palette) -> Self {
        Banner {
            title,
            width,
            border: BorderStyle::default(),
            palette,
        }
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Columns available for content: the width minus a border and a space
    /// on each side.
    pub fn content_width(&self) -> usize {
        self.width.saturating_sub(4)
    }

    /// Draws the box around `lines`. Lines wider than the content width are
    /// split across several rows.
    pub fn render<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let chars = self.border.chars();
        let inner = self.content_width();
        let mut rows = Vec::with_capacity(lines.len() + 2);

        // ╭─ TITLE ───╮
        let fill = self
            .width
            .saturating_sub(5 + display_width(self.title));
        let top = format!(
            "{}{} {} {}{}",
            chars.top_left,
            chars.horizontal,
            self.title,
            repeat(chars.horizontal, fill),
            chars.top_right
        );
        rows.push(self.palette.paint(Role::Border, &top));

        let side = self.palette.paint(Role::Border, &chars.vertical.to_string());
        for line in lines {
            for chunk in chunk_by_width(line.as_ref(), inner) {
                let padded = pad_str(&chunk, inner, Alignment::Left, None);
                rows.push(format!("{side} {padded} {side}"));
            }
        }

        let bottom = format!(
            "{}{}{}",
            chars.bottom_left,
            repeat(chars.horizontal, self.width.saturating_sub(2)),
            chars.bottom_right
        );
        rows.push(self.palette.paint(Role::Border, &bottom));

        rows.join("\n")
    }
}

fn repeat(c: char, n: usize) -> String {
    c.to_string().repeat(n)
}
