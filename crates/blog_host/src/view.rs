//! View switching contract (theme, scene, language-scoped labels).

use std::{cell::RefCell, rc::Rc};

use blog_shell_contract::{Language, Scene, Theme};

/// Page-side effects requested by the shell.
pub trait ViewController {
    /// Applies the visual theme.
    fn set_theme(&self, theme: Theme);

    /// Shows the terminal, the post list, or the post reader.
    fn switch_scene(&self, scene: Scene);

    /// Relabels language-scoped page chrome.
    fn apply_language(&self, language: Language);
}

#[derive(Debug, Clone, Copy, Default)]
/// View controller that ignores every request.
pub struct NoopViewController;

impl ViewController for NoopViewController {
    fn set_theme(&self, _theme: Theme) {}

    fn switch_scene(&self, _scene: Scene) {}

    fn apply_language(&self, _language: Language) {}
}

/// One recorded view request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCall {
    /// [`ViewController::set_theme`].
    Theme(Theme),
    /// [`ViewController::switch_scene`].
    Scene(Scene),
    /// [`ViewController::apply_language`].
    Language(Language),
}

#[derive(Debug, Clone, Default)]
/// View controller that records requests for assertions.
pub struct RecordingViewController {
    calls: Rc<RefCell<Vec<ViewCall>>>,
}

impl RecordingViewController {
    /// Returns the requests received so far.
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }
}

impl ViewController for RecordingViewController {
    fn set_theme(&self, theme: Theme) {
        self.calls.borrow_mut().push(ViewCall::Theme(theme));
    }

    fn switch_scene(&self, scene: Scene) {
        self.calls.borrow_mut().push(ViewCall::Scene(scene));
    }

    fn apply_language(&self, language: Language) {
        self.calls.borrow_mut().push(ViewCall::Language(language));
    }
}
