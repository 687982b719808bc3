//! Built-in shell settings for the page.

use blog_host::ShellConfig;
use leptos::logging;

const SHELL_TOML: &str = include_str!("../shell.toml");

/// Parses the bundled `shell.toml`, falling back to defaults when it is malformed.
pub fn load_shell_config() -> ShellConfig {
    parse_or_default(SHELL_TOML)
}

fn parse_or_default(raw: &str) -> ShellConfig {
    ShellConfig::from_toml_str(raw).unwrap_or_else(|err| {
        logging::warn!("using default shell config: {err}");
        ShellConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use blog_shell_contract::{Language, Theme};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bundled_config_parses() {
        let config = ShellConfig::from_toml_str(SHELL_TOML).expect("bundled config");
        assert_eq!(config.ps1(), "guest@blog:~$");
        assert_eq!(config.language, Language::Kr);
        assert_eq!(config.theme, Theme::Terminal);
        assert_eq!(config.suggestion_window_ms, 600);
    }

    #[test]
    fn malformed_config_falls_back() {
        assert_eq!(parse_or_default("user = ["), ShellConfig::default());
    }
}
