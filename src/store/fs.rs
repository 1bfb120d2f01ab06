//! File-backed submission store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::{Status, Submission};

use super::{MemoryStore, SubmissionStore};

/// Store persisted as a single JSON document.
///
/// The whole collection is loaded at open and rewritten after every
/// mutation. That is the right trade for a community site's content
/// volume; listing and rendering never touch the disk again.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonStore {
    /// Opens a store file, creating an empty store when the file does not
    /// exist yet.
    ///
    /// # Arguments
    ///
    /// * `path`: Location of the JSON document
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or
    /// parsed, or when it contains duplicate slugs.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let inner = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let submissions: Vec<Submission> = serde_json::from_str(&raw)?;
            MemoryStore::from_submissions(submissions)?
        } else {
            MemoryStore::new()
        };

        Ok(Self { path, inner })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the full collection back to disk.
    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(self.inner.submissions())?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SubmissionStore for JsonStore {
    fn slug_exists(&self, slug: &str) -> bool {
        self.inner.slug_exists(slug)
    }

    fn insert(&mut self, submission: Submission) -> Result<()> {
        self.inner.insert(submission)?;
        self.persist()
    }

    fn get(&self, slug: &str) -> Option<&Submission> {
        self.inner.get(slug)
    }

    fn submissions(&self) -> &[Submission] {
        self.inner.submissions()
    }

    fn update_section(&mut self, slug: &str, section: &str, text: &str) -> Result<()> {
        self.inner.update_section(slug, section, text)?;
        self.persist()
    }

    fn set_tags(&mut self, slug: &str, tags: Vec<String>) -> Result<()> {
        self.inner.set_tags(slug, tags)?;
        self.persist()
    }

    fn set_status(&mut self, slug: &str, status: Status) -> Result<()> {
        self.inner.set_status(slug, status)?;
        self.persist()
    }
}
