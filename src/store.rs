//! Submission storage.
//!
//! Storage sits behind a trait so the site generator, the seeder, and the
//! tests can share one code path over different backends: an in-memory
//! store for tests and a JSON-file store for the CLI. The store is the
//! single authority on slug uniqueness; creation funnels through
//! [`SubmissionStore::create`] so no caller can persist a colliding or
//! empty slug.

mod fs;
mod memory;

pub use fs::JsonStore;
pub use memory::MemoryStore;

use crate::error::{Error, Result};
use crate::model::{NewSubmission, Status, Submission};
use crate::slug::{SLUG_ATTEMPTS, short_id, slug_base};

/// Abstract interface over a submission collection.
///
/// Implementations must keep submissions in creation order and reject
/// duplicate slugs on insert with [`Error::SlugTaken`].
pub trait SubmissionStore {
    /// True when a slug is already present in the unique index.
    fn slug_exists(&self, slug: &str) -> bool;

    /// Inserts a fully-formed submission.
    ///
    /// # Errors
    ///
    /// [`Error::SlugTaken`] when the slug is already in use.
    fn insert(&mut self, submission: Submission) -> Result<()>;

    /// Looks up a submission by slug.
    fn get(&self, slug: &str) -> Option<&Submission>;

    /// All submissions in creation order.
    fn submissions(&self) -> &[Submission];

    /// Rewrites one markdown section of a submission.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownSection`] for a name outside the canonical set,
    /// [`Error::NotFound`] when the slug matches nothing.
    fn update_section(&mut self, slug: &str, section: &str, text: &str) -> Result<()>;

    /// Replaces a submission's tag list.
    fn set_tags(&mut self, slug: &str, tags: Vec<String>) -> Result<()>;

    /// Moves a submission to a new lifecycle state.
    fn set_status(&mut self, slug: &str, status: Status) -> Result<()>;

    /// Creates a submission, assigning its slug.
    ///
    /// Derives the base from the title and tries up to [`SLUG_ATTEMPTS`]
    /// random suffixes. The pre-check via [`SubmissionStore::slug_exists`]
    /// is advisory; the insert itself is the arbiter, and an insert-time
    /// [`Error::SlugTaken`] (a concurrent writer won the candidate) counts
    /// against the same attempt budget and triggers a fresh suffix.
    ///
    /// # Errors
    ///
    /// [`Error::SlugExhausted`] when every attempt collides.
    fn create(&mut self, new: NewSubmission) -> Result<Submission> {
        let base = slug_base(&new.title);

        for _ in 0..SLUG_ATTEMPTS {
            let candidate = format!("{}-{}", base, short_id());
            if self.slug_exists(&candidate) {
                continue;
            }

            let submission = Submission::assemble(new.clone(), candidate);
            match self.insert(submission.clone()) {
                Ok(()) => return Ok(submission),
                Err(Error::SlugTaken(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(Error::SlugExhausted {
            base,
            attempts: SLUG_ATTEMPTS,
        })
    }

    /// Published submissions in creation order.
    ///
    /// This is the record set the tag index is built from; drafts,
    /// flagged, and removed submissions never feed it.
    fn published(&self) -> Vec<&Submission> {
        self.submissions()
            .iter()
            .filter(|s| s.status == Status::Published)
            .collect()
    }
}
