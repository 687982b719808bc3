//! Concrete service wiring for the browser page.

use std::rc::Rc;

use blog_host::{HostServices, PulldownMarkdownRenderer, ShellConfig};

use crate::{BodyViewController, WebPostSource};

/// Builds the browser collaborator bundle for `config`.
pub fn build_host_services(config: &ShellConfig) -> HostServices {
    HostServices::new(
        Rc::new(WebPostSource::new(config.content_root.clone())),
        Rc::new(PulldownMarkdownRenderer),
        Rc::new(BodyViewController),
    )
}
