//! Terminal colour support

use owo_colors::{OwoColorize, Style};

/// Whether stdout should receive coloured output
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

fn paint(text: &str, style: Style) -> String {
    if supports_color() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Confirmations and effect messages (green)
    fn success(&self) -> String;
    /// Load failures (yellow)
    fn warning(&self) -> String;
    /// Names and values (blue)
    fn info(&self) -> String;
    /// Secondary text
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), Style::new().green())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), Style::new().yellow())
    }

    fn info(&self) -> String {
        paint(self.as_ref(), Style::new().bright_blue())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), Style::new().dimmed())
    }
}
