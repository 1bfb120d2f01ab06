//! Content records for project retrospectives.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::markdown::strip_structural_headings;

/// Canonical markdown section names, in display order.
pub const SECTIONS: &[&str] = &["description", "idea", "tech", "failure", "lessons", "wins"];

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 120;

/// Maximum tagline length in characters.
pub const TAGLINE_MAX: usize = 320;

/// Lifecycle state of a submission. Drives visibility: listings and the
/// tag index show `Published` only; detail pages hide `Removed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Published,
    Flagged,
    Removed,
}

/// A published (or in-progress) project retrospective.
///
/// The slug is assigned exactly once at creation and never changes, even
/// when the title is edited later; outbound links stay valid permanently.
/// Section writes go through [`Submission::set_section`], which strips
/// structural headings and bumps `updated_at` so render-cache keys roll
/// over. Those invariants are enforced here, at the data-owning boundary,
/// not trusted to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub title: String,
    slug: String,
    pub tagline: String,
    sections: BTreeMap<String, String>,
    tags: Vec<String>,
    pub links: Vec<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    /// Builds a record from validated input and an assigned slug.
    ///
    /// Every incoming section passes through the heading stripper; tags
    /// are trimmed and de-duplicated preserving first occurrence.
    pub(crate) fn assemble(new: NewSubmission, slug: String) -> Self {
        let now = Utc::now();

        let mut sections = BTreeMap::new();
        for (name, text) in new.sections {
            sections.insert(name, strip_structural_headings(&text));
        }

        Self {
            id: Uuid::new_v4(),
            title: new.title,
            slug,
            tagline: new.tagline,
            sections,
            tags: normalize_tags(new.tags),
            links: new.links,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// The immutable URL slug.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Raw markdown for a named section, empty if never written.
    pub fn section(&self, name: &str) -> &str {
        self.sections.get(name).map(String::as_str).unwrap_or("")
    }

    /// Replaces one section's markdown.
    ///
    /// Strips structural headings before storing and bumps the
    /// modification timestamp.
    pub fn set_section(&mut self, name: &str, text: &str) {
        self.sections
            .insert(name.to_string(), strip_structural_headings(text));
        self.touch();
    }

    /// Tags in attachment order, de-duplicated.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Replaces the tag list. Labels are trimmed and de-duplicated
    /// preserving first occurrence; no case folding.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = normalize_tags(tags);
        self.touch();
    }

    /// Advances `updated_at`, strictly, at whole-second granularity.
    ///
    /// Cache keys truncate the timestamp to seconds, so two edits inside
    /// the same wall-clock second must still produce distinct values.
    fn touch(&mut self) {
        let bumped = self.updated_at + Duration::seconds(1);
        self.updated_at = Utc::now().max(bumped);
    }
}

/// Input for creating a submission; validated by [`crate::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSubmission {
    pub title: String,
    pub tagline: String,
    /// `(section name, markdown)` pairs; names come from [`SECTIONS`].
    pub sections: Vec<(String, String)>,
    pub tags: Vec<String>,
    pub links: Vec<String>,
    pub status: Status,
}

impl Default for Status {
    fn default() -> Self {
        Status::Draft
    }
}

/// Trims labels, drops empties, de-duplicates preserving first occurrence.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}
