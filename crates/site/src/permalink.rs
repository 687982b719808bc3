//! Short numeric post permalinks for the `/posts` route.
//!
//! `/posts?=<id>` and `/posts?<id>` address a post by a 7-digit hash of its slug;
//! `/posts?id=<slug>` addresses it directly.

use std::collections::HashMap;

use blog_shell_contract::PostSummary;

const HASH_SPACE: u32 = 10_000_000;
const MAX_PROBES: u32 = 9;

/// djb2-xor hash of the slug's UTF-16 units, reduced to seven digits.
pub fn slug_hash(slug: &str) -> u32 {
    slug.encode_utf16()
        .fold(5381u32, |hash, unit| {
            (hash << 5).wrapping_add(hash) ^ u32::from(unit)
        })
        % HASH_SPACE
}

/// Post address parsed from a `/posts` query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostQuery {
    /// Numeric permalink id.
    Id(u32),
    /// Explicit slug.
    Slug(String),
}

impl PostQuery {
    /// Parses `?=123`, `?123`, or `?id=<slug>[.md]`. Anything else addresses no post.
    pub fn parse(search: &str) -> Option<Self> {
        let query = search.strip_prefix('?').unwrap_or(search);
        if query.is_empty() {
            return None;
        }
        let (key, value) = query.split_once('=').unwrap_or((query, ""));
        match (key, value) {
            (number, "") => number.parse().ok().map(Self::Id),
            ("", number) => number.parse().ok().map(Self::Id),
            ("id", slug) => {
                let decoded = urlencoding::decode(slug).ok()?;
                let slug = decoded.strip_suffix(".md").unwrap_or(&decoded);
                Some(Self::Slug(slug.to_string()))
            }
            _ => None,
        }
    }
}

/// Two-way slug/id table for the current post index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermalinkTable {
    slug_to_id: HashMap<String, u32>,
    id_to_slug: HashMap<u32, String>,
}

impl PermalinkTable {
    /// Assigns ids in index order, probing forward on collisions.
    pub fn build(posts: &[PostSummary]) -> Self {
        let mut table = Self::default();
        for post in posts {
            let base = slug_hash(&post.slug);
            let mut id = base;
            let mut probes = 0;
            while table
                .id_to_slug
                .get(&id)
                .is_some_and(|owner| owner != &post.slug)
            {
                probes += 1;
                id = (base + probes) % HASH_SPACE;
                if probes > MAX_PROBES {
                    break;
                }
            }
            table.slug_to_id.insert(post.slug.clone(), id);
            table.id_to_slug.insert(id, post.slug.clone());
        }
        table
    }

    /// Slug addressed by `query`; explicit slugs pass through even when unknown.
    pub fn resolve(&self, query: PostQuery) -> Option<String> {
        match query {
            PostQuery::Id(id) => self.id_to_slug.get(&id).cloned(),
            PostQuery::Slug(slug) => Some(slug),
        }
    }

    /// Route for `slug`, numeric when the slug is indexed.
    pub fn href(&self, slug: &str) -> String {
        match self.slug_to_id.get(slug) {
            Some(id) => format!("/posts?={id}"),
            None => format!("/posts?id={}", urlencoding::encode(slug)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary(slug: &str) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: String::new(),
            date: String::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn hash_matches_reference_values() {
        assert_eq!(slug_hash(""), 5381);
        assert_eq!(slug_hash("a"), 177_604);
        assert_eq!(slug_hash("hello"), 8_056_679);
        assert_eq!(slug_hash("rust-notes"), 9_629_963);
    }

    #[test]
    fn query_forms() {
        assert_eq!(PostQuery::parse("?=8056679"), Some(PostQuery::Id(8_056_679)));
        assert_eq!(PostQuery::parse("?42"), Some(PostQuery::Id(42)));
        assert_eq!(
            PostQuery::parse("?id=rust%20notes.md"),
            Some(PostQuery::Slug("rust notes".to_string()))
        );
        assert_eq!(PostQuery::parse(""), None);
        assert_eq!(PostQuery::parse("?page=2"), None);
        assert_eq!(PostQuery::parse("?abc"), None);
    }

    #[test]
    fn table_round_trips_indexed_slugs() {
        let table = PermalinkTable::build(&[summary("hello"), summary("rust-notes")]);
        assert_eq!(table.href("hello"), "/posts?=8056679");
        assert_eq!(
            table.resolve(PostQuery::Id(9_629_963)),
            Some("rust-notes".to_string())
        );
        assert_eq!(table.resolve(PostQuery::Id(1)), None);
        assert_eq!(table.href("new post"), "/posts?id=new%20post");
    }

    #[test]
    fn duplicate_slugs_share_an_id() {
        let table = PermalinkTable::build(&[summary("a"), summary("a")]);
        assert_eq!(table.href("a"), "/posts?=177604");
        assert_eq!(table.id_to_slug.len(), 1);
    }
}
