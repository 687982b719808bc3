//! `fetch`-backed post source reading `<root>/<lang>/manifest.json` and `<root>/<lang>/<slug>.md`.

use blog_host::{HostError, HostFuture, PostSource};
use blog_shell_contract::{Language, PostManifest};

use crate::bridge;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Browser post source rooted at a content directory relative to the page.
pub struct WebPostSource {
    content_root: String,
}

impl WebPostSource {
    /// Creates a source for `content_root` (for example `blog` or `/static/blog`).
    pub fn new(content_root: impl Into<String>) -> Self {
        Self {
            content_root: content_root.into(),
        }
    }

    /// URL of the manifest for `language`.
    pub fn manifest_url(&self, language: Language) -> String {
        format!("{}/{}/manifest.json", self.base(), language.code())
    }

    /// URL of the markdown body for `slug` in `language`.
    pub fn post_url(&self, language: Language, slug: &str) -> String {
        format!("{}/{}/{slug}.md", self.base(), language.code())
    }

    fn base(&self) -> String {
        let root = self.content_root.trim().trim_end_matches('/');
        if root.is_empty() {
            ".".to_string()
        } else if root.starts_with('/') || root.starts_with('.') || root.contains("://") {
            root.to_string()
        } else {
            format!("./{root}")
        }
    }
}

impl Default for WebPostSource {
    fn default() -> Self {
        Self::new("blog")
    }
}

async fn fetch_required(url: String) -> Result<String, HostError> {
    match bridge::fetch_text(&url).await {
        Ok(Some(text)) => Ok(text),
        Ok(None) => Err(HostError::NotFound(url)),
        Err(err) => Err(HostError::Unavailable(err)),
    }
}

impl PostSource for WebPostSource {
    fn load_manifest<'a>(
        &'a self,
        language: Language,
    ) -> HostFuture<'a, Result<PostManifest, HostError>> {
        Box::pin(async move {
            let raw = fetch_required(self.manifest_url(language)).await?;
            PostManifest::from_json_str(&raw).map_err(HostError::Decode)
        })
    }

    fn fetch_post_body<'a>(
        &'a self,
        language: Language,
        slug: &'a str,
    ) -> HostFuture<'a, Result<String, HostError>> {
        Box::pin(fetch_required(self.post_url(language, slug)))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn urls_are_relative_to_the_page_by_default() {
        let source = WebPostSource::default();
        assert_eq!(source.manifest_url(Language::En), "./blog/en/manifest.json");
        assert_eq!(source.post_url(Language::Kr, "first-post"), "./blog/kr/first-post.md");
    }

    #[test]
    fn absolute_and_explicit_roots_are_kept() {
        assert_eq!(
            WebPostSource::new("/static/blog/").manifest_url(Language::Kr),
            "/static/blog/kr/manifest.json"
        );
        assert_eq!(
            WebPostSource::new("https://cdn.example.com/posts").post_url(Language::En, "a"),
            "https://cdn.example.com/posts/en/a.md"
        );
        assert_eq!(WebPostSource::new("").manifest_url(Language::En), "./en/manifest.json");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_fetch_is_unavailable() {
        let source = WebPostSource::default();
        assert!(matches!(
            block_on(source.load_manifest(Language::En)),
            Err(HostError::Unavailable(_))
        ));
        assert!(matches!(
            block_on(source.fetch_post_body(Language::En, "hello")),
            Err(HostError::Unavailable(_))
        ));
    }
}
