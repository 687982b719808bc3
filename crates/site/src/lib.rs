//! Browser entry for the terminal blog page: routes, header, and the two scenes.

mod config;
mod permalink;
mod web_app;

pub use config::load_shell_config;
pub use permalink::{slug_hash, PermalinkTable, PostQuery};
pub use web_app::SiteApp;

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
