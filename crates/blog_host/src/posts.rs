//! Post index and post body contracts.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use blog_shell_contract::{Language, PostManifest, PostSummary};
use thiserror::Error;

/// Object-safe boxed future used by host service async methods.
pub type HostFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Failure reported by a host collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The requested resource does not exist.
    #[error("resource not found: {0}")]
    NotFound(String),
    /// The host could not be reached or the API is missing on this target.
    #[error("host unavailable: {0}")]
    Unavailable(String),
    /// The payload could not be decoded.
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Language-scoped source of post metadata and markdown bodies.
pub trait PostSource {
    /// Loads `manifest.json` for `language`.
    fn load_manifest<'a>(&'a self, language: Language)
        -> HostFuture<'a, Result<PostManifest, HostError>>;

    /// Fetches the markdown body for `slug`.
    fn fetch_post_body<'a>(
        &'a self,
        language: Language,
        slug: &'a str,
    ) -> HostFuture<'a, Result<String, HostError>>;
}

#[derive(Debug, Clone, Default)]
/// In-memory post source keyed by language, used by tests and offline previews.
pub struct MemoryPostSource {
    inner: Rc<RefCell<MemoryPosts>>,
}

#[derive(Debug, Default)]
struct MemoryPosts {
    manifests: HashMap<Language, PostManifest>,
    bodies: HashMap<(Language, String), String>,
    failing_manifests: bool,
}

impl MemoryPostSource {
    /// Adds a post and its body for `language`.
    pub fn insert(&self, language: Language, post: PostSummary, body: impl Into<String>) {
        let mut inner = self.inner.borrow_mut();
        inner
            .bodies
            .insert((language, post.slug.clone()), body.into());
        inner.manifests.entry(language).or_default().posts.push(post);
    }

    /// Adds a manifest entry whose body is missing.
    pub fn insert_listing_only(&self, language: Language, post: PostSummary) {
        self.inner
            .borrow_mut()
            .manifests
            .entry(language)
            .or_default()
            .posts
            .push(post);
    }

    /// Makes every manifest load fail, simulating an unreachable host.
    pub fn fail_manifests(&self, failing: bool) {
        self.inner.borrow_mut().failing_manifests = failing;
    }
}

impl PostSource for MemoryPostSource {
    fn load_manifest<'a>(
        &'a self,
        language: Language,
    ) -> HostFuture<'a, Result<PostManifest, HostError>> {
        Box::pin(async move {
            let inner = self.inner.borrow();
            if inner.failing_manifests {
                return Err(HostError::Unavailable("manifest not found".to_string()));
            }
            Ok(inner.manifests.get(&language).cloned().unwrap_or_default())
        })
    }

    fn fetch_post_body<'a>(
        &'a self,
        language: Language,
        slug: &'a str,
    ) -> HostFuture<'a, Result<String, HostError>> {
        Box::pin(async move {
            self.inner
                .borrow()
                .bodies
                .get(&(language, slug.to_string()))
                .cloned()
                .ok_or_else(|| HostError::NotFound(format!("{}/{slug}.md", language.code())))
        })
    }
}

/// Filters posts by a case-insensitive query against title, tags, and slug.
///
/// A blank query returns every post.
pub fn filter_posts<'a>(posts: &'a [PostSummary], query: &str) -> Vec<&'a PostSummary> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return posts.iter().collect();
    }
    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&query)
                || post.slug.to_lowercase().contains(&query)
                || post
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    fn post(slug: &str, title: &str, tags: &[&str]) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: title.to_string(),
            date: "2024-01-01".to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    #[test]
    fn memory_source_serves_language_scoped_posts() {
        let source = MemoryPostSource::default();
        source.insert(Language::En, post("hello", "Hello", &[]), "# Hello");
        let source_obj: &dyn PostSource = &source;

        let manifest = block_on(source_obj.load_manifest(Language::En)).expect("manifest");
        assert_eq!(manifest.posts.len(), 1);
        assert!(block_on(source_obj.load_manifest(Language::Kr))
            .expect("manifest")
            .posts
            .is_empty());
        assert_eq!(
            block_on(source_obj.fetch_post_body(Language::En, "hello")).expect("body"),
            "# Hello"
        );
        assert!(matches!(
            block_on(source_obj.fetch_post_body(Language::Kr, "hello")),
            Err(HostError::NotFound(_))
        ));
    }

    #[test]
    fn failing_manifest_reports_unavailable() {
        let source = MemoryPostSource::default();
        source.fail_manifests(true);
        assert!(matches!(
            block_on(source.load_manifest(Language::En)),
            Err(HostError::Unavailable(_))
        ));
    }

    #[test]
    fn filter_matches_title_tag_and_slug() {
        let posts = vec![
            post("rust-intro", "Getting Started", &["lang"]),
            post("cooking", "Kimchi", &["Food"]),
        ];
        assert_eq!(filter_posts(&posts, "").len(), 2);
        assert_eq!(filter_posts(&posts, "RUST")[0].slug, "rust-intro");
        assert_eq!(filter_posts(&posts, "food")[0].slug, "cooking");
        assert_eq!(filter_posts(&posts, "kimchi")[0].slug, "cooking");
        assert!(filter_posts(&posts, "zzz").is_empty());
    }
}
