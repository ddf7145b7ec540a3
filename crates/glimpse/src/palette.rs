//! Colors for the parts of a summary line.
//!
//! Styling goes through [`console::Style`]. A [`Palette`] is either fully
//! colored or [plain](Palette::plain); the plain palette emits no escape
//! codes at all, which is what log files and tests want.

use std::str::FromStr;

use console::{Style, Term};

use crate::error::GlimpseError;

/// Whether summaries are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color when stdout supports it.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves to a concrete decision.
    pub fn should_use_color(&self) -> bool {
        match self {
            ColorChoice::Auto => Term::stdout().features().colors_supported(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl FromStr for ColorChoice {
    type Err = GlimpseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" | "on" | "true" | "1" => Ok(ColorChoice::Always),
            "never" | "off" | "false" | "0" => Ok(ColorChoice::Never),
            _ => Err(GlimpseError::InvalidSetting {
                key: "GLIMPSE_COLOR",
                value: s.to_string(),
            }),
        }
    }
}

/// Role of a styled fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// `(list: int)` and array dtypes.
    Label,
    /// Lengths, shapes and parameter counts.
    Count,
    Device,
    /// Gradient tracking on.
    Grad,
    /// Gradient tracking off.
    NoGrad,
    /// The `DEBUG: ` line prefix.
    Prefix,
    Border,
}

#[derive(Debug, Clone)]
pub struct Palette {
    enabled: bool,
    label: Style,
    count: Style,
    device: Style,
    grad: Style,
    prefix: Style,
    border: Style,
}

impl Palette {
    pub fn colored() -> Self {
        Palette {
            enabled: true,
            label: Style::new().blue().bright().force_styling(true),
            count: Style::new().magenta().bright().force_styling(true),
            device: Style::new().red().bright().force_styling(true),
            grad: Style::new().green().bright().force_styling(true),
            prefix: Style::new().bold().force_styling(true),
            border: Style::new().yellow().bright().bold().force_styling(true),
        }
    }

    pub fn plain() -> Self {
        Palette {
            enabled: false,
            label: Style::new(),
            count: Style::new(),
            device: Style::new(),
            grad: Style::new(),
            prefix: Style::new(),
            border: Style::new(),
        }
    }

    pub fn for_choice(choice: ColorChoice) -> Self {
        if choice.should_use_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Styles `text` for `role`.
    ///
    /// The gradient-off flag is struck through when colored, and spelled
    /// `no-grad` when plain so the distinction survives in log files.
    pub fn paint(&self, role: Role, text: &str) -> String {
        if !self.enabled {
            return match role {
                Role::NoGrad => text.replace("req-grad", "no-grad"),
                _ => text.to_string(),
            };
        }
        match role {
            Role::Label => self.label.apply_to(text).to_string(),
            Role::Count => self.count.apply_to(text).to_string(),
            Role::Device => self.device.apply_to(text).to_string(),
            Role::Grad => self.grad.apply_to(text).to_string(),
            Role::NoGrad => self
                .grad
                .clone()
                .strikethrough()
                .apply_to(text)
                .to_string(),
            Role::Prefix => self.prefix.apply_to(text).to_string(),
            Role::Border => self.border.apply_to(text).to_string(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::strip_styling;

    #[test]
    fn test_plain_palette_emits_no_escapes() {
        let palette = Palette::plain();
        assert_eq!(palette.paint(Role::Label, "(int)"), "(int)");
        assert_eq!(palette.paint(Role::Count, " (3 elts)"), " (3 elts)");
    }

    #[test]
    fn test_colored_palette_keeps_text() {
        let palette = Palette::colored();
        let painted = palette.paint(Role::Label, "(int)");
        assert_ne!(painted, "(int)");
        assert_eq!(strip_styling(&painted), "(int)");
    }

    #[test]
    fn test_no_grad_spelled_out_when_plain() {
        assert_eq!(
            Palette::plain().paint(Role::NoGrad, " (req-grad)"),
            " (no-grad)"
        );
        let colored = Palette::colored().paint(Role::NoGrad, " (req-grad)");
        assert_eq!(strip_styling(&colored), " (req-grad)");
    }

    #[test]
    fn test_color_choice_parsing() {
        assert_eq!("always".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!("NEVER".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert_eq!(" auto ".parse::<ColorChoice>().unwrap(), ColorChoice::Auto);
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_explicit_choices() {
        assert!(ColorChoice::Always.should_use_color());
        assert!(!ColorChoice::Never.should_use_color());
        assert!(Palette::for_choice(ColorChoice::Always).is_enabled());
        assert!(!Palette::for_choice(ColorChoice::Never).is_enabled());
    }
}
