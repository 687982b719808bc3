//! Text measurement used to place the fake caret.

use blog_shell_contract::FontProfile;

/// Measures rendered text width for a font.
pub trait TextMeasure {
    /// Width in pixels of `text` rendered with `font`, whitespace preserved.
    fn text_width(&self, text: &str, font: &FontProfile) -> f64;
}

#[derive(Debug, Clone, Copy)]
/// Fixed-advance measurement for monospace fonts and headless tests.
pub struct MonospaceTextMeasure {
    /// Advance of one character as a fraction of the font size.
    pub advance_em: f64,
}

impl Default for MonospaceTextMeasure {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasure for MonospaceTextMeasure {
    fn text_width(&self, text: &str, font: &FontProfile) -> f64 {
        let count = text.chars().count() as f64;
        count * (font.size_px * self.advance_em + font.letter_spacing_px)
    }
}
