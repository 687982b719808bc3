//! Typed host-domain contracts for the terminal blog shell.
//!
//! This crate is the API-first boundary for everything the shell engine consumes from the page:
//! the post index and post bodies, markdown rendering, view switching, localized strings, text
//! measurement, and configuration. In-memory adapters live next to each contract so the engine
//! can be exercised headlessly; browser adapters live in `blog_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod i18n;
pub mod markdown;
pub mod measure;
pub mod posts;
pub mod services;
pub mod time;
pub mod view;

pub use config::ShellConfig;
pub use i18n::{translate, Message};
pub use markdown::{extract_title, MarkdownRenderer, PulldownMarkdownRenderer};
pub use measure::{MonospaceTextMeasure, TextMeasure};
pub use posts::{filter_posts, HostError, HostFuture, MemoryPostSource, PostSource};
pub use services::HostServices;
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
pub use view::{NoopViewController, RecordingViewController, ViewCall, ViewController};
