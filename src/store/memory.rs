//! In-memory submission store.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{SECTIONS, Status, Submission};

use super::SubmissionStore;

/// Vec-backed store keeping submissions in creation order.
///
/// The slug set mirrors a database unique index: membership is checked
/// on every insert, independently of any pre-check the caller ran.
#[derive(Debug, Default)]
pub struct MemoryStore {
    submissions: Vec<Submission>,
    slugs: HashSet<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from previously persisted submissions.
    ///
    /// # Errors
    ///
    /// [`Error::SlugTaken`] when the input contains a duplicate slug;
    /// persisted data that violates the unique index is corrupt.
    pub fn from_submissions(submissions: Vec<Submission>) -> Result<Self> {
        let mut store = Self::new();
        for submission in submissions {
            store.insert(submission)?;
        }
        Ok(store)
    }

    fn find_mut(&mut self, slug: &str) -> Result<&mut Submission> {
        self.submissions
            .iter_mut()
            .find(|s| s.slug() == slug)
            .ok_or_else(|| Error::NotFound(slug.to_string()))
    }
}

impl SubmissionStore for MemoryStore {
    fn slug_exists(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    fn insert(&mut self, submission: Submission) -> Result<()> {
        if self.slugs.contains(submission.slug()) {
            return Err(Error::SlugTaken(submission.slug().to_string()));
        }
        self.slugs.insert(submission.slug().to_string());
        self.submissions.push(submission);
        Ok(())
    }

    fn get(&self, slug: &str) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.slug() == slug)
    }

    fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    fn update_section(&mut self, slug: &str, section: &str, text: &str) -> Result<()> {
        if !SECTIONS.contains(&section) {
            return Err(Error::UnknownSection(section.to_string()));
        }
        self.find_mut(slug)?.set_section(section, text);
        Ok(())
    }

    fn set_tags(&mut self, slug: &str, tags: Vec<String>) -> Result<()> {
        self.find_mut(slug)?.set_tags(tags);
        Ok(())
    }

    fn set_status(&mut self, slug: &str, status: Status) -> Result<()> {
        self.find_mut(slug)?.status = status;
        Ok(())
    }
}
