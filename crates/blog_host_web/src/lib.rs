//! Browser (`wasm32`) implementations of the [`blog_host`] collaborator contracts.
//!
//! This crate is the concrete browser-side wiring layer for post fetching, caret text
//! measurement, body-level theme/scene/language state, and saved page preferences.
//!
//! All JavaScript interop lives under `bridge`, which routes to a `wasm32` implementation or a
//! native fallback so the adapters stay testable off the browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
mod bridge;
pub mod measure;
pub mod posts;
pub mod prefs;
pub mod view;

pub use adapters::build_host_services;
pub use measure::{font_css, CanvasTextMeasure};
pub use posts::WebPostSource;
pub use prefs::{PagePrefs, WebPrefsStore, PAGE_PREFS_KEY};
pub use view::BodyViewController;
