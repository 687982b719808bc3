//! Shell configuration loaded from `shell.toml`.

use blog_shell_contract::{Language, Theme};
use serde::{Deserialize, Serialize};

use crate::posts::HostError;

/// Session settings for the terminal shell.
///
/// Every field has a default, so a partial TOML document is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// User name shown in the prompt and in `ls -al` owner columns.
    pub user: String,
    /// Host name shown in the prompt.
    pub host: String,
    /// Working directory shown in the prompt.
    pub cwd: String,
    /// Initial language.
    pub language: Language,
    /// Initial theme.
    pub theme: Theme,
    /// Base URL of the language-scoped post directories.
    pub content_root: String,
    /// Maximum gap between two completion gestures that lists suggestions.
    pub suggestion_window_ms: u64,
    /// Maximum number of remembered command lines.
    pub history_limit: usize,
    /// Maximum number of transcript entries kept on screen.
    pub max_transcript_entries: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: "guest".to_string(),
            host: "blog".to_string(),
            cwd: "~".to_string(),
            language: Language::default(),
            theme: Theme::default(),
            content_root: "blog".to_string(),
            suggestion_window_ms: 600,
            history_limit: 500,
            max_transcript_entries: 500,
        }
    }
}

impl ShellConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Decode`] when the document is not valid TOML or has mistyped fields.
    pub fn from_toml_str(raw: &str) -> Result<Self, HostError> {
        toml::from_str(raw)
            .map_err(|err| HostError::Decode(format!("failed to parse shell config: {err}")))
    }

    /// Prompt prefix, e.g. `guest@blog:~$`.
    pub fn ps1(&self) -> String {
        format!("{}@{}:{}$", self.user, self.host, self.cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let config = ShellConfig::from_toml_str(
            r#"
user = "visitor"
language = "en"
suggestion_window_ms = 400
"#,
        )
        .expect("config");
        assert_eq!(config.user, "visitor");
        assert_eq!(config.language, Language::En);
        assert_eq!(config.suggestion_window_ms, 400);
        assert_eq!(config.theme, Theme::Terminal);
        assert_eq!(config.history_limit, 500);
        assert_eq!(config.ps1(), "visitor@blog:~$");
    }

    #[test]
    fn mistyped_field_is_a_decode_error() {
        assert!(matches!(
            ShellConfig::from_toml_str("history_limit = \"many\""),
            Err(HostError::Decode(_))
        ));
    }
}
