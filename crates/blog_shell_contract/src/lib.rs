//! Shared contracts used by the terminal blog shell engine, host adapters, and page UI.
//!
//! This crate is intentionally runtime-agnostic. It defines the post manifest model, view
//! selections, transcript entries, completion payloads, caret geometry, and the shell error
//! taxonomy without depending on Leptos, browser APIs, or the engine itself.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered text lines flowing between pipeline stages.
pub type Stream = Vec<String>;

/// One post entry from a language-scoped `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// File stem of the markdown document.
    pub slug: String,
    /// Display title. Falls back to the slug when the manifest omits it.
    #[serde(default)]
    pub title: String,
    /// Publication date as written in the manifest (usually `YYYY-MM-DD`).
    #[serde(default)]
    pub date: String,
    /// Topic tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PostSummary {
    /// Markdown filename shown by `ls` and accepted by `open`.
    pub fn filename(&self) -> String {
        format!("{}.md", self.slug)
    }

    /// Title or slug when the title is blank.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.slug
        } else {
            &self.title
        }
    }
}

/// Parsed `manifest.json` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostManifest {
    /// Posts in manifest order.
    #[serde(default)]
    pub posts: Vec<PostSummary>,
}

impl PostManifest {
    /// Parses a manifest document.
    ///
    /// # Errors
    ///
    /// Returns the JSON error text when the payload is not a valid manifest.
    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        let mut manifest: PostManifest = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        for post in &mut manifest.posts {
            if post.title.is_empty() {
                post.title = post.slug.clone();
            }
        }
        Ok(manifest)
    }
}

/// Visual theme of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Green-on-black terminal look.
    #[default]
    Terminal,
    /// Reading-oriented blog look.
    Blog,
}

impl Theme {
    /// Lowercase name used by the `theme` command and body classes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Blog => "blog",
        }
    }

    /// Parses a theme name case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "terminal" => Some(Self::Terminal),
            "blog" => Some(Self::Blog),
            _ => None,
        }
    }

    /// The other theme, used by the header toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Terminal => Self::Blog,
            Self::Blog => Self::Terminal,
        }
    }
}

/// Interface and content language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    /// English.
    En,
    /// Korean.
    #[default]
    Kr,
}

impl Language {
    /// Directory and toggle code.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Kr => "kr",
        }
    }

    /// `en` selects English; every other value selects Korean.
    pub fn from_code(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("en") {
            Self::En
        } else {
            Self::Kr
        }
    }

    /// The other supported language.
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Kr,
            Self::Kr => Self::En,
        }
    }
}

/// Which part of the page is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scene {
    /// Interactive terminal.
    #[default]
    Terminal,
    /// Blog post list.
    BlogList,
    /// Single post reader.
    BlogPost,
}

/// Styling class of a rendered transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineClass {
    /// Regular output.
    #[default]
    Plain,
    /// Success notice.
    Ok,
    /// Error notice.
    Error,
}

/// One entry of the terminal transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TranscriptEntry {
    /// A frozen prompt echoing the raw submitted text.
    Prompt {
        /// Prompt prefix such as `guest@blog:~$`.
        ps1: String,
        /// Submitted text, untrimmed.
        echo: String,
    },
    /// Output line carrying trusted markup.
    Line {
        /// HTML fragment; producers escape untrusted text before building it.
        html: String,
        /// Styling class.
        class: LineClass,
    },
    /// Completion candidates listed after a repeated completion gesture.
    Suggestions {
        /// Candidate values in display order.
        items: Vec<String>,
    },
}

/// Result of locating the completion fragment under the caret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCandidates {
    /// Sorted candidates that start with the fragment (case-insensitive).
    pub candidates: Vec<String>,
    /// Partially typed token being completed.
    pub fragment: String,
    /// Character offset where the fragment begins in the full input.
    pub replace_start: usize,
}

/// Direction of a completion gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionDirection {
    /// Tab.
    #[default]
    Forward,
    /// Shift+Tab.
    Backward,
}

/// Font metrics that influence text measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontProfile {
    /// CSS font family list.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f64,
    /// CSS font weight.
    pub weight: String,
    /// Extra spacing between characters in pixels.
    pub letter_spacing_px: f64,
}

impl Default for FontProfile {
    fn default() -> Self {
        Self {
            family: "monospace".to_string(),
            size_px: 14.0,
            weight: "400".to_string(),
            letter_spacing_px: 0.0,
        }
    }
}

/// Layout box of the active prompt input relative to its line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputLayout {
    /// Left offset of the input inside the prompt line.
    pub offset_left: f64,
    /// Top offset of the input inside the prompt line.
    pub offset_top: f64,
    /// Rendered input height.
    pub height: f64,
}

/// Absolute placement of the fake caret element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CaretGeometry {
    /// CSS `left` in pixels.
    pub left_px: f64,
    /// CSS `top` in pixels (vertical centre of the input).
    pub top_px: f64,
    /// CSS `height` in pixels.
    pub height_px: f64,
}

/// A post opened for reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenedPost {
    /// Post slug.
    pub slug: String,
    /// Heading shown above the content.
    pub title: String,
    /// `<file> • <date>` line.
    pub meta_line: String,
    /// Topic tags.
    pub tags: Vec<String>,
    /// Injection-safe rendered body.
    pub html: String,
}

/// Failure raised while resolving or running a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum ShellError {
    /// The stage's command token is not registered.
    #[error("command not found: {0}")]
    UnknownCommand(String),
    /// Malformed option or value.
    #[error("bad argument: {0}")]
    BadArgument(String),
    /// The referenced post does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// External content could not be fetched.
    #[error("fetch failed for `{slug}`: {reason}")]
    FetchFailure {
        /// Requested slug.
        slug: String,
        /// Transport or host failure text.
        reason: String,
    },
}

impl ShellError {
    /// Creates a bad-argument error.
    pub fn bad_argument(detail: impl Into<String>) -> Self {
        Self::BadArgument(detail.into())
    }

    /// Collapses fetch failures into not-found, which is how users see them.
    pub fn for_display(self) -> Self {
        match self {
            Self::FetchFailure { slug, .. } => Self::NotFound(slug),
            other => other,
        }
    }
}
