//! Body-level view switching: `theme-*` class plus `data-scene` and `data-lang` attributes.

use blog_host::ViewController;
use blog_shell_contract::{Language, Scene, Theme};
use leptos::logging;

use crate::bridge;

fn scene_token(scene: Scene) -> &'static str {
    match scene {
        Scene::Terminal => "terminal",
        Scene::BlogList => "blog-list",
        Scene::BlogPost => "blog-post",
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Reflects shell view state onto `<body>` so page CSS can follow it.
pub struct BodyViewController;

impl ViewController for BodyViewController {
    fn set_theme(&self, theme: Theme) {
        if let Err(err) = bridge::set_body_theme(theme.as_str()) {
            logging::warn!("theme class update failed: {err}");
        }
    }

    fn switch_scene(&self, scene: Scene) {
        if let Err(err) = bridge::set_body_attribute("data-scene", scene_token(scene)) {
            logging::warn!("scene attribute update failed: {err}");
        }
    }

    fn apply_language(&self, language: Language) {
        if let Err(err) = bridge::set_body_attribute("data-lang", language.code()) {
            logging::warn!("language attribute update failed: {err}");
        }
    }
}
