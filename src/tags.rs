//! Derived tag index over published submissions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::cache::{TAG_INDEX_TTL, TtlCache};
use crate::slug::slugify;

/// One navigable tag: its URL slug and canonical display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagItem {
    pub slug: String,
    pub name: String,
}

/// Ordered, de-duplicated view of every tag across published content.
///
/// Rebuildable on demand from the store; never persisted.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    /// Unique tag names in first-seen order.
    pub names: Vec<String>,
    /// `{slug, name}` pairs in the same order, one per reachable slug.
    pub items: Vec<TagItem>,
    /// Slug to canonical name. At most one name per slug; on collision
    /// between distinct names the first seen wins.
    pub slug_to_name: HashMap<String, String>,
}

impl TagIndex {
    /// Resolves a slug to its canonical tag name.
    pub fn name_for(&self, slug: &str) -> Option<&str> {
        self.slug_to_name.get(slug).map(String::as_str)
    }

    /// True when no published submission carries any tag.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Builds the tag index from per-record tag lists.
///
/// Records must be supplied in creation order so the output is
/// reproducible across calls. Tags are collected in encounter order and
/// de-duplicated keeping the first occurrence; later repeats are dropped,
/// never reordered. Names are case-sensitive; empty strings are skipped.
///
/// Two distinct names can collapse to the same slug (`"C++"` and `"C--"`
/// both slugify to `"c"`): the first name keeps the slug and the second
/// becomes unreachable by slug lookup. That limitation is accepted rather
/// than papered over with disambiguation suffixes.
///
/// # Arguments
///
/// * `tag_lists`: One tag slice per published record, creation order
///
/// # Returns
///
/// The ordered names, the slug/name items, and the slug lookup map
pub fn build_tag_index<'a>(tag_lists: impl IntoIterator<Item = &'a [String]>) -> TagIndex {
    let mut names: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for tags in tag_lists {
        for tag in tags {
            if tag.is_empty() || seen.contains(tag) {
                continue;
            }
            seen.insert(tag.clone());
            names.push(tag.clone());
        }
    }

    let mut items = Vec::with_capacity(names.len());
    let mut slug_to_name = HashMap::with_capacity(names.len());

    for name in &names {
        let slug = slugify(name);
        if slug_to_name.contains_key(&slug) {
            continue;
        }
        slug_to_name.insert(slug.clone(), name.clone());
        items.push(TagItem {
            slug,
            name: name.clone(),
        });
    }

    TagIndex {
        names,
        items,
        slug_to_name,
    }
}

/// Process-wide cache holding the most recent tag index.
///
/// The full index lives under one fixed key for ten minutes. It is built
/// lazily on the first request after a miss and is never invalidated by
/// writes; newly attached tags surface when the entry expires.
pub struct TagIndexCache {
    cache: TtlCache<Arc<TagIndex>>,
}

/// Single cache key: the index is global, not per-record.
const TAG_INDEX_KEY: &str = "tag-index";

impl TagIndexCache {
    /// Creates a cache with the standard ten minute lifetime.
    pub fn new() -> Self {
        Self::with_ttl(TAG_INDEX_TTL)
    }

    /// Creates a cache with an injected lifetime (tests use zero).
    pub fn with_ttl(ttl: std::time::Duration) -> Self {
        Self {
            cache: TtlCache::new(ttl),
        }
    }

    /// Returns the cached index, building and storing it on a miss.
    pub fn get_or_build(&self, build: impl FnOnce() -> TagIndex) -> Arc<TagIndex> {
        if let Some(index) = self.cache.get(TAG_INDEX_KEY) {
            return index;
        }

        let index = Arc::new(build());
        self.cache.set(TAG_INDEX_KEY, Arc::clone(&index));
        index
    }
}

impl Default for TagIndexCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn lists(input: &[&[&str]]) -> Vec<Vec<String>> {
        input
            .iter()
            .map(|tags| tags.iter().map(|t| t.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_first_seen_order_with_dedup() {
        // Arrange
        let records = lists(&[&["python", "django"], &["django", "go"]]);

        // Act
        let index = build_tag_index(records.iter().map(Vec::as_slice));

        // Assert
        assert_eq!(
            index.names,
            vec!["python", "django", "go"],
            "Order follows first occurrence, repeats dropped"
        );
    }

    #[test]
    fn test_items_follow_name_order() {
        // Arrange
        let records = lists(&[&["Postgres", "Redis"]]);

        // Act
        let index = build_tag_index(records.iter().map(Vec::as_slice));

        // Assert
        assert_eq!(index.items.len(), 2);
        assert_eq!(index.items[0].slug, "postgres");
        assert_eq!(index.items[0].name, "Postgres");
        assert_eq!(index.items[1].slug, "redis");
    }

    #[test]
    fn test_slug_lookup_maps_to_canonical_name() {
        // Arrange
        let records = lists(&[&["Next.js"]]);

        // Act
        let index = build_tag_index(records.iter().map(Vec::as_slice));

        // Assert
        assert_eq!(index.name_for("next-js"), Some("Next.js"));
        assert_eq!(index.name_for("unknown"), None);
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        // Arrange
        let records = lists(&[&["Rust", "rust"]]);

        // Act
        let index = build_tag_index(records.iter().map(Vec::as_slice));

        // Assert
        assert_eq!(
            index.names,
            vec!["Rust", "rust"],
            "Case variants are distinct names"
        );
    }

    #[test]
    fn test_slug_collision_first_name_wins() {
        // Arrange: distinct names, same slug
        let records = lists(&[&["C++", "C--"]]);

        // Act
        let index = build_tag_index(records.iter().map(Vec::as_slice));

        // Assert
        assert_eq!(index.names.len(), 2, "Both names stay in the name list");
        assert_eq!(index.items.len(), 1, "Only one slug entry exists");
        assert_eq!(
            index.name_for("c"),
            Some("C++"),
            "First name seen keeps the slug"
        );
    }

    #[test]
    fn test_empty_tags_skipped() {
        // Arrange
        let records = lists(&[&["", "real"]]);

        // Act
        let index = build_tag_index(records.iter().map(Vec::as_slice));

        // Assert
        assert_eq!(index.names, vec!["real"]);
    }

    #[test]
    fn test_no_records_builds_empty_index() {
        // Act
        let index = build_tag_index(std::iter::empty());

        // Assert
        assert!(index.is_empty());
        assert!(index.items.is_empty());
        assert!(index.slug_to_name.is_empty());
    }

    #[test]
    fn test_deterministic_across_calls() {
        // Arrange
        let records = lists(&[&["b", "a"], &["c", "a"]]);

        // Act
        let first = build_tag_index(records.iter().map(Vec::as_slice));
        let second = build_tag_index(records.iter().map(Vec::as_slice));

        // Assert
        assert_eq!(first.names, second.names, "Same input, same order");
    }

    #[test]
    fn test_cache_serves_stored_index_within_ttl() {
        // Arrange
        let cache = TagIndexCache::with_ttl(Duration::from_secs(60));
        let records = lists(&[&["python"]]);
        let mut builds = 0;

        // Act
        let first = cache.get_or_build(|| {
            builds += 1;
            build_tag_index(records.iter().map(Vec::as_slice))
        });
        let second = cache.get_or_build(|| {
            builds += 1;
            TagIndex::default()
        });

        // Assert
        assert_eq!(builds, 1, "Second call must hit the cache");
        assert_eq!(first.names, second.names);
        assert_eq!(second.names, vec!["python"], "Cached value is served");
    }

    #[test]
    fn test_cache_rebuilds_after_expiry() {
        // Arrange: zero TTL forces a rebuild every call
        let cache = TagIndexCache::with_ttl(Duration::ZERO);
        let mut builds = 0;

        // Act
        cache.get_or_build(|| {
            builds += 1;
            TagIndex::default()
        });
        cache.get_or_build(|| {
            builds += 1;
            TagIndex::default()
        });

        // Assert
        assert_eq!(builds, 2, "Expired entry must be rebuilt");
    }
}
