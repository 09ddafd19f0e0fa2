//! Console colorization of banners and per-test result lines

use clap::ValueEnum;
use console::Style;

/// Result token for a failing test, including its trailing space
pub const FAILED_TOKEN: &str = "Failed ";

/// Result token for a passing test, including its trailing space
pub const PASSED_TOKEN: &str = "Passed ";

/// Specifies whether to colorize output
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Colorize when stdout is a terminal that supports it
    #[default]
    Auto,

    /// Always emit ANSI escapes
    Always,

    /// Never emit ANSI escapes
    Never,
}

impl ColorChoice {
    /// Whether output should carry ANSI styling
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Auto => console::colors_enabled(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// The set of styles used for console output
///
/// A disabled palette returns text untouched, so callers never need to
/// branch on whether color is on.
#[derive(Clone, Debug)]
pub struct Palette {
    enabled: bool,
    red: Style,
    green: Style,
    blue: Style,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Palette {
            enabled,
            red: Style::new().red().force_styling(true),
            green: Style::new().green().force_styling(true),
            blue: Style::new().blue().bold().force_styling(true),
        }
    }

    pub fn from_choice(choice: ColorChoice) -> Self {
        Self::new(choice.should_colorize())
    }

    /// A palette that never styles anything
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(&self.red, text)
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(&self.green, text)
    }

    pub fn blue(&self, text: &str) -> String {
        self.paint(&self.blue, text)
    }

    /// Highlight every result token in `line`, leaving other text untouched
    pub fn highlight_result(&self, line: &str) -> String {
        if !self.enabled {
            return line.to_string();
        }
        line.replace(FAILED_TOKEN, &self.red(FAILED_TOKEN))
            .replace(PASSED_TOKEN, &self.green(PASSED_TOKEN))
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.enabled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_choice(ColorChoice::Auto)
    }
}
