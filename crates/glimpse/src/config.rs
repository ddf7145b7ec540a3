//! Presentation settings.
//!
//! [`Settings`] holds everything the presentation modes need besides the
//! value: width, margin, prefix, line limit, color and border. Defaults match
//! an interactive terminal; [`Settings::from_env`] layers environment
//! overrides on top:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `GLIMPSE_WIDTH` | fixed width instead of the detected terminal width |
//! | `GLIMPSE_MAX_LINES` | default line limit of the wrapped mode |
//! | `GLIMPSE_COLOR` | `auto`, `always` or `never` |
//! | `NO_COLOR` | any non-empty value disables color |
//!
//! Invalid values are logged and ignored.

use crate::banner::BorderStyle;
use crate::error::{GlimpseError, Result};
use crate::palette::{ColorChoice, Palette};
use crate::terminal::terminal_width;

pub const ENV_WIDTH: &str = "GLIMPSE_WIDTH";
pub const ENV_MAX_LINES: &str = "GLIMPSE_MAX_LINES";
pub const ENV_COLOR: &str = "GLIMPSE_COLOR";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Fixed width; `None` follows the terminal.
    pub width: Option<usize>,
    /// Columns left free at the right edge.
    pub margin: usize,
    pub prefix: String,
    /// Line limit of the wrapped mode.
    pub max_lines: usize,
    pub color: ColorChoice,
    pub border: BorderStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: None,
            margin: 1,
            prefix: "DEBUG: ".to_string(),
            max_lines: 3,
            color: ColorChoice::Auto,
            border: BorderStyle::Rounded,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        for key in [ENV_WIDTH, ENV_MAX_LINES, ENV_COLOR, ENV_NO_COLOR] {
            if let Ok(value) = std::env::var(key) {
                if let Err(err) = settings.apply(key, &value) {
                    tracing::warn!(error = %err, "ignoring setting");
                }
            }
        }
        settings
    }

    /// Applies one `KEY=value` override.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            ENV_WIDTH => self.width = Some(parse_positive(ENV_WIDTH, value)?),
            ENV_MAX_LINES => self.max_lines = parse_positive(ENV_MAX_LINES, value)?,
            ENV_COLOR => self.color = value.parse()?,
            ENV_NO_COLOR => {
                if !value.is_empty() {
                    self.color = ColorChoice::Never;
                }
            }
            _ => tracing::debug!(key, "unknown setting"),
        }
        Ok(())
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines.max(1);
        self
    }

    pub fn color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// The fixed width, or the current terminal width.
    pub fn resolved_width(&self) -> usize {
        self.width.unwrap_or_else(terminal_width)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_choice(self.color)
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(GlimpseError::InvalidSetting {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.margin, 1);
        assert_eq!(settings.prefix, "DEBUG: ");
        assert_eq!(settings.max_lines, 3);
        assert_eq!(settings.color, ColorChoice::Auto);
        assert_eq!(settings.border, BorderStyle::Rounded);
    }

    #[test]
    fn test_apply_overrides() {
        let mut settings = Settings::default();
        settings.apply(ENV_WIDTH, "100").unwrap();
        settings.apply(ENV_MAX_LINES, " 5 ").unwrap();
        settings.apply(ENV_COLOR, "never").unwrap();
        assert_eq!(settings.width, Some(100));
        assert_eq!(settings.max_lines, 5);
        assert_eq!(settings.color, ColorChoice::Never);
        assert_eq!(settings.resolved_width(), 100);
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.apply(ENV_WIDTH, "wide"),
            Err(GlimpseError::InvalidSetting { key: ENV_WIDTH, .. })
        ));
        assert!(settings.apply(ENV_MAX_LINES, "0").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_empty_no_color_is_ignored() {
        let mut settings = Settings::default();
        settings.apply(ENV_NO_COLOR, "").unwrap();
        assert_eq!(settings.color, ColorChoice::Auto);
        settings.apply(ENV_NO_COLOR, "1").unwrap();
        assert_eq!(settings.color, ColorChoice::Never);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::remove_var(ENV_NO_COLOR);
        std::env::set_var(ENV_WIDTH, "64");
        std::env::set_var(ENV_COLOR, "bogus");
        let settings = Settings::from_env();
        std::env::remove_var(ENV_WIDTH);
        std::env::remove_var(ENV_COLOR);
        assert_eq!(settings.width, Some(64));
        assert_eq!(settings.color, ColorChoice::Auto);
    }

    #[test]
    fn test_builder() {
        let settings = Settings::new()
            .width(40)
            .margin(0)
            .prefix("> ")
            .max_lines(0)
            .color(ColorChoice::Always)
            .border(BorderStyle::Ascii);
        assert_eq!(settings.width, Some(40));
        assert_eq!(settings.margin, 0);
        assert_eq!(settings.prefix, "> ");
        assert_eq!(settings.max_lines, 1);
        assert!(settings.palette().is_enabled());
    }
}
