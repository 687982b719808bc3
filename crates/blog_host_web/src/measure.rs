//! Canvas-backed text measurement for the fake caret.

use blog_host::{MonospaceTextMeasure, TextMeasure};
use blog_shell_contract::FontProfile;

use crate::bridge;

/// CSS `font` shorthand for `font`, as accepted by `CanvasRenderingContext2D.font`.
pub fn font_css(font: &FontProfile) -> String {
    format!("{} {}px {}", font.weight, font.size_px, font.family)
}

#[derive(Debug, Clone, Copy, Default)]
/// Measures with a 2D canvas, falling back to a fixed monospace advance off the browser.
pub struct CanvasTextMeasure {
    fallback: MonospaceTextMeasure,
}

impl TextMeasure for CanvasTextMeasure {
    fn text_width(&self, text: &str, font: &FontProfile) -> f64 {
        match bridge::measure_text(text, &font_css(font)) {
            // Canvas ignores CSS letter-spacing.
            Some(width) => width + text.chars().count() as f64 * font.letter_spacing_px,
            None => self.fallback.text_width(text, font),
        }
    }
}
