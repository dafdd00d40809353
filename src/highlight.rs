use inksac::prelude::*;

/// Styles user-facing shell messages, degrading to plain text when the
/// terminal has no color support.
#[derive(Debug, Clone, Copy)]
pub struct MessageHighlighter {
    color_support: ColorSupport,
}

impl Default for MessageHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn highlight_error(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();

        message.to_string().style(error_style).to_string()
    }

    pub fn highlight_banner(&self, line: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return line.to_string();
        }

        let banner_style = Style::builder().foreground(Color::Cyan).build();

        line.to_string().style(banner_style).to_string()
    }
}
