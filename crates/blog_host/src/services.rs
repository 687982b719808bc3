//! Bundle of host collaborators injected into a shell session.

use std::rc::Rc;

use crate::{
    markdown::{MarkdownRenderer, PulldownMarkdownRenderer},
    posts::{MemoryPostSource, PostSource},
    view::{NoopViewController, ViewController},
};

#[derive(Clone)]
/// Host collaborators consumed by the shell engine.
pub struct HostServices {
    /// Post index and post bodies.
    pub posts: Rc<dyn PostSource>,
    /// Markdown renderer for opened posts.
    pub markdown: Rc<dyn MarkdownRenderer>,
    /// Theme, scene, and language switching.
    pub view: Rc<dyn ViewController>,
}

impl HostServices {
    /// Creates a bundle from explicit collaborators.
    pub fn new(
        posts: Rc<dyn PostSource>,
        markdown: Rc<dyn MarkdownRenderer>,
        view: Rc<dyn ViewController>,
    ) -> Self {
        Self {
            posts,
            markdown,
            view,
        }
    }

    /// Services backed by an in-memory post source and a no-op view.
    pub fn memory(posts: MemoryPostSource) -> Self {
        Self::new(
            Rc::new(posts),
            Rc::new(PulldownMarkdownRenderer),
            Rc::new(NoopViewController),
        )
    }

    /// Replaces the view controller.
    pub fn with_view(mut self, view: Rc<dyn ViewController>) -> Self {
        self.view = view;
        self
    }
}
