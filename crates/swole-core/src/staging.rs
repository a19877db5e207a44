//! The staging area: files whose contents ride along with every request.
//!
//! Staged entries are paths, not contents. Contents are read fresh at send
//! time by [`StagingArea::materialize`], so the payload always reflects the
//! file on disk at that moment. A path that cannot be read fails the whole
//! materialization naming that exact path; a partial payload is never sent.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::ChatError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: PathBuf,
    pub content: String,
}

/// An ordered, duplicate-free collection of staged paths. Insertion order is
/// preserved for display and for payload ordering.
#[derive(Debug, Clone, Default)]
pub struct StagingArea {
    paths: Vec<PathBuf>,
}

impl StagingArea {
    pub fn new() -> StagingArea {
        StagingArea::default()
    }

    /// Adds a path to the staging area. Re-staging an already staged path is
    /// a no-op; returns whether the set changed.
    pub fn stage(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.paths.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    pub fn unstage(&mut self, path: &Path) -> bool {
        let before = self.paths.len();
        self.paths.retain(|staged| staged != path);
        self.paths.len() != before
    }

    pub fn reset(&mut self) {
        self.paths.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|staged| staged == path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Reads every staged path's current bytes, in staging order. Fails with
    /// the first unreadable path; nothing is skipped silently.
    pub async fn materialize(&self) -> Result<Vec<StagedFile>, ChatError> {
        let mut files = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let content = fs::read_to_string(path)
                .await
                .map_err(|err| ChatError::staging(path, err))?;
            files.push(StagedFile {
                path: path.clone(),
                content,
            });
        }
        Ok(files)
    }
}
