//! Time-bounded in-process caches.
//!
//! The render cache and the tag index cache are the only shared mutable
//! state in the crate. Both are explicit service objects constructed once
//! per process and handed to the code that needs them; there is no global
//! cache state. Caches are an optimization, never a correctness
//! dependency: any failure path degrades to recomputation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::markdown::render_markdown;
use crate::model::Submission;

/// How long a rendered HTML fragment stays cached.
///
/// Edits invalidate earlier than this through the key (it embeds the
/// record's modification second), so the TTL only bounds memory held for
/// content nobody edits.
pub const RENDER_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// How long a built tag index stays cached. New tags become visible only
/// after expiry; that staleness window is accepted.
pub const TAG_INDEX_TTL: Duration = Duration::from_secs(10 * 60);

/// Generic expiring key/value cache.
///
/// Entries are written with a fixed TTL and dropped lazily on the first
/// read after expiry. Reads and writes are atomic per key; two concurrent
/// misses for the same key may both recompute, which is harmless because
/// the values they store are identical.
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, V)>>,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache with the given entry lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the live value for a key, dropping it if expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some((stored, value)) if stored.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a value under a key, restarting its lifetime.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.lock().insert(key.into(), (Instant::now(), value));
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Locks the entry map, recovering from poisoning.
    ///
    /// A writer that panicked mid-request leaves the map itself intact
    /// (insert/remove finish or never start), so later requests keep the
    /// cache rather than failing.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, (Instant, V)>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Versioned cache of sanitized HTML per content field.
///
/// Keys combine the field name, the record id, and the record's
/// modification time truncated to whole seconds. An edit bumps the
/// timestamp and therefore produces a fresh key; stale HTML is never
/// served after an edit and no explicit invalidation call exists.
pub struct RenderCache {
    cache: TtlCache<String>,
    render: Box<dyn Fn(&str) -> String + Send + Sync>,
}

impl RenderCache {
    /// Creates a render cache with the standard markdown pipeline and TTL.
    pub fn new() -> Self {
        Self::with_renderer(RENDER_TTL, render_markdown)
    }

    /// Creates a render cache with an injected renderer.
    ///
    /// Tests substitute a counting stub here to observe cache hits.
    pub fn with_renderer(
        ttl: Duration,
        render: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            cache: TtlCache::new(ttl),
            render: Box::new(render),
        }
    }

    /// Returns sanitized HTML for one field of one record version.
    ///
    /// On a hit the cached string is returned unchanged with no
    /// re-sanitization. On a miss the raw text is rendered, stored, and
    /// returned.
    ///
    /// # Arguments
    ///
    /// * `id`: Stable record identifier
    /// * `field`: Field name the raw text came from
    /// * `raw`: Raw markdown for that field
    /// * `updated_at_secs`: Record modification time in whole seconds
    pub fn rendered_field(&self, id: Uuid, field: &str, raw: &str, updated_at_secs: i64) -> String {
        let key = format!("render:{}:{}:{}", field, id, updated_at_secs);
        if let Some(html) = self.cache.get(&key) {
            return html;
        }

        let html = (self.render)(raw);
        self.cache.set(key, html.clone());
        html
    }

    /// Renders one named section of a submission through the cache.
    pub fn rendered_section(&self, submission: &Submission, section: &str) -> String {
        self.rendered_field(
            submission.id,
            section,
            submission.section(section),
            submission.updated_at.timestamp(),
        )
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}
