//! Editable prompt model and fake-caret placement.

use blog_host::TextMeasure;
use blog_shell_contract::{CaretGeometry, FontProfile, InputLayout};
use shell_line_headless::byte_offset;

const MIN_CARET_HEIGHT_PX: f64 = 16.0;
const CARET_HEIGHT_RATIO: f64 = 0.9;

/// Text of the editable prompt and the caret position in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptInput {
    text: String,
    caret: usize,
}

impl PromptInput {
    /// Creates an input with the caret at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self { text, caret }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caret offset in characters.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Replaces the text and caret; the caret is clamped to the text length.
    pub fn set(&mut self, text: impl Into<String>, caret: usize) {
        self.text = text.into();
        self.caret = caret.min(self.char_len());
    }

    /// Moves the caret, clamped to the text length.
    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.char_len());
    }

    /// Replaces the text and puts the caret after its last character.
    pub fn replace_with_caret_at_end(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.char_len();
    }

    /// Empties the input.
    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    /// Text left of the caret.
    pub fn before_caret(&self) -> &str {
        &self.text[..byte_offset(&self.text, self.caret)]
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The single editable prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePrompt {
    /// Increases every time a fresh prompt is created.
    pub id: u64,
    /// Prompt prefix.
    pub ps1: String,
    /// Editable text.
    pub input: PromptInput,
}

/// Places the fake caret after the text left of the caret.
pub fn caret_geometry(
    measure: &dyn TextMeasure,
    font: &FontProfile,
    layout: &InputLayout,
    input: &PromptInput,
) -> CaretGeometry {
    CaretGeometry {
        left_px: layout.offset_left + measure.text_width(input.before_caret(), font),
        top_px: layout.offset_top + layout.height / 2.0,
        height_px: MIN_CARET_HEIGHT_PX.max(layout.height * CARET_HEIGHT_RATIO),
    }
}

#[cfg(test)]
mod tests {
    use blog_host::MonospaceTextMeasure;

    use super::*;

    #[test]
    fn caret_is_clamped() {
        let mut input = PromptInput::new("ls");
        assert_eq!(input.caret(), 2);
        input.set_caret(10);
        assert_eq!(input.caret(), 2);
        input.set("한글 입력", 2);
        assert_eq!(input.before_caret(), "한글");
        input.clear();
        assert_eq!((input.text(), input.caret()), ("", 0));
    }

    #[test]
    fn geometry_uses_width_before_caret() {
        let measure = MonospaceTextMeasure { advance_em: 0.5 };
        let font = FontProfile {
            size_px: 10.0,
            ..FontProfile::default()
        };
        let layout = InputLayout {
            offset_left: 100.0,
            offset_top: 4.0,
            height: 30.0,
        };
        let mut input = PromptInput::new("open post");
        input.set_caret(4);

        let geometry = caret_geometry(&measure, &font, &layout, &input);
        assert_eq!(geometry.left_px, 120.0);
        assert_eq!(geometry.top_px, 19.0);
        assert_eq!(geometry.height_px, 27.0);
    }

    #[test]
    fn short_inputs_get_minimum_caret_height() {
        let layout = InputLayout {
            height: 10.0,
            ..InputLayout::default()
        };
        let geometry = caret_geometry(
            &MonospaceTextMeasure::default(),
            &FontProfile::default(),
            &layout,
            &PromptInput::default(),
        );
        assert_eq!(geometry.left_px, 0.0);
        assert_eq!(geometry.height_px, 16.0);
    }
}
