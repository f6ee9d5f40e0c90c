//! Artifact storage.
//!
//! Writing bytes to persistent storage is a thin collaborator behind the
//! [`ArtifactStore`] trait: a directory-backed store for the CLI and an
//! in-memory store for tests. Each artifact is written exactly once, with
//! no partial-write recovery.

use std::io;
use std::path::PathBuf;

/// Destination for named text artifacts.
pub trait ArtifactStore {
    fn write(&mut self, name: &str, contents: &str) -> io::Result<()>;
}

/// Stores artifacts as files under one output directory.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Create the output directory (and parents) and a store over it.
    pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl ArtifactStore for DirStore {
    fn write(&mut self, name: &str, contents: &str) -> io::Result<()> {
        std::fs::write(self.root.join(name), contents)
    }
}

/// Keeps artifacts in memory, in write order.
#[derive(Debug, Default)]
pub struct MemStore {
    artifacts: Vec<(String, String)>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifact names in the order they were written.
    pub fn names(&self) -> Vec<&str> {
        self.artifacts.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, contents)| contents.as_str())
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactStore for MemStore {
    fn write(&mut self, name: &str, contents: &str) -> io::Result<()> {
        self.artifacts.push((name.to_string(), contents.to_string()));
        Ok(())
    }
}
