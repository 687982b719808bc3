//! `localStorage`-backed page preferences.

use blog_host::ShellConfig;
use blog_shell_contract::Language;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::bridge;

/// Storage key of [`PagePrefs`].
pub const PAGE_PREFS_KEY: &str = "blog.page.prefs";

/// Page choices restored on the next visit. The theme follows the URL instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePrefs {
    /// Last selected language.
    pub language: Language,
}

impl PagePrefs {
    /// Overrides the configured start language.
    pub fn apply_to(self, config: &mut ShellConfig) {
        config.language = self.language;
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser preference store backed by `window.localStorage`.
pub struct WebPrefsStore;

impl WebPrefsStore {
    /// Loads and deserializes a typed value. Missing or malformed entries read as `None`.
    pub fn load_typed<T: DeserializeOwned>(self, key: &str) -> Option<T> {
        let raw = bridge::local_storage_get(key)?;
        serde_json::from_str(&raw).ok()
    }

    /// Serializes and saves a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the localStorage write fails.
    pub fn save_typed<T: Serialize>(self, key: &str, value: &T) -> Result<(), String> {
        let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
        bridge::local_storage_set(key, &raw)
    }

    /// Saved page preferences, if any.
    pub fn load_page_prefs(self) -> Option<PagePrefs> {
        self.load_typed(PAGE_PREFS_KEY)
    }

    /// Saves page preferences.
    ///
    /// # Errors
    ///
    /// Returns an error when the localStorage write fails.
    pub fn save_page_prefs(self, prefs: PagePrefs) -> Result<(), String> {
        self.save_typed(PAGE_PREFS_KEY, &prefs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn prefs_serialize_with_lowercase_tokens() {
        let prefs = PagePrefs {
            language: Language::En,
        };
        let raw = serde_json::to_string(&prefs).expect("serialize");
        assert_eq!(raw, r#"{"language":"en"}"#);
        assert_eq!(serde_json::from_str::<PagePrefs>(&raw).expect("parse"), prefs);
    }

    #[test]
    fn prefs_override_config() {
        let mut config = ShellConfig::default();
        PagePrefs {
            language: Language::En,
        }
        .apply_to(&mut config);
        assert_eq!(config.language, Language::En);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_store_is_empty_and_accepts_writes() {
        let store = WebPrefsStore;
        assert_eq!(store.load_page_prefs(), None);
        assert!(store
            .save_page_prefs(PagePrefs {
                language: Language::Kr,
            })
            .is_ok());
    }
}
