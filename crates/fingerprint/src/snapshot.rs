// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive directory snapshots.

use crate::category::{ArtifactCategory, CategoryRules};
use crate::digest::{digest_file_chunked, FileDigest, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that abort a snapshot. A snapshot is never returned partially.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot root is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Failed to walk '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },
}

/// How symbolic links met during the walk are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymlinkPolicy {
    /// Ignore links to files and directories alike.
    #[default]
    Skip,
    /// Fingerprint link targets as if they were regular entries.
    Follow,
}

/// Digest of one file plus the categories its path falls into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintEntry {
    pub digest: FileDigest,
    pub categories: BTreeSet<ArtifactCategory>,
}

impl FingerprintEntry {
    pub fn new(digest: FileDigest, categories: BTreeSet<ArtifactCategory>) -> Self {
        Self { digest, categories }
    }

    pub fn is_in_any(&self, categories: &BTreeSet<ArtifactCategory>) -> bool {
        !self.categories.is_disjoint(categories)
    }
}

/// Relative file path to content digest, for every regular file under a root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    root: PathBuf,
    entries: BTreeMap<String, FingerprintEntry>,
}

impl Fingerprint {
    /// Build a fingerprint from already computed entries.
    pub fn from_entries(
        root: impl Into<PathBuf>,
        entries: impl IntoIterator<Item = (String, FingerprintEntry)>,
    ) -> Self {
        Self {
            root: root.into(),
            entries: entries.into_iter().collect(),
        }
    }

    /// Directory the snapshot was taken from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, relative_path: &str) -> Option<&FingerprintEntry> {
        self.entries.get(relative_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FingerprintEntry)> {
        self.entries.iter()
    }

    /// Distinct content present in the snapshot, regardless of where it lives.
    pub fn digest_set(&self) -> BTreeSet<FileDigest> {
        self.entries.values().map(|e| e.digest.clone()).collect()
    }

    pub fn distinct_count(&self) -> usize {
        self.digest_set().len()
    }

    /// Number of entries tagged with `category`.
    pub fn count_in(&self, category: &ArtifactCategory) -> usize {
        self.entries
            .values()
            .filter(|e| e.categories.contains(category))
            .count()
    }

    pub(crate) fn retain_cloned<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&str, &FingerprintEntry) -> bool,
    {
        Self {
            root: self.root.clone(),
            entries: self
                .entries
                .iter()
                .filter(|(path, entry)| keep(path, entry))
                .map(|(path, entry)| (path.clone(), entry.clone()))
                .collect(),
        }
    }
}

/// Walks a directory and fingerprints every regular file in it.
#[derive(Clone, Debug)]
pub struct Snapshotter {
    rules: CategoryRules,
    symlinks: SymlinkPolicy,
    chunk_size: usize,
}

impl Snapshotter {
    pub fn new(rules: CategoryRules) -> Self {
        Self {
            rules,
            symlinks: SymlinkPolicy::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn symlinks(mut self, policy: SymlinkPolicy) -> Self {
        self.symlinks = policy;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn rules(&self) -> &CategoryRules {
        &self.rules
    }

    /// Fingerprint everything under `root`.
    ///
    /// Entries are visited in file-name order so the result does not depend
    /// on filesystem enumeration order. Symlinks follow [`SymlinkPolicy`];
    /// FIFOs, sockets and device nodes are always skipped.
    pub fn snapshot(&self, root: &Path) -> Result<Fingerprint, SnapshotError> {
        if !root.is_dir() {
            return Err(SnapshotError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let walker = WalkDir::new(root)
            .follow_links(self.symlinks == SymlinkPolicy::Follow)
            .sort_by_file_name();

        let mut entries = BTreeMap::new();
        for entry in walker {
            let entry = entry.map_err(|source| SnapshotError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                source,
            })?;

            // With Follow, file_type() already reports the link target.
            if !entry.file_type().is_file() {
                continue;
            }

            let relative =
                relative_key(root, entry.path()).ok_or_else(|| SnapshotError::NonUtf8Path {
                    path: entry.path().to_path_buf(),
                })?;
            let digest = digest_file_chunked(entry.path(), self.chunk_size).map_err(|source| {
                SnapshotError::Read {
                    path: entry.path().to_path_buf(),
                    source,
                }
            })?;
            let categories = self.rules.classify(&relative);
            entries.insert(relative, FingerprintEntry::new(digest, categories));
        }

        Ok(Fingerprint {
            root: root.to_path_buf(),
            entries,
        })
    }
}

impl Default for Snapshotter {
    fn default() -> Self {
        Self::new(CategoryRules::default())
    }
}

/// `/`-joined path of `path` below `root`, or `None` when a component is
/// not valid UTF-8. Lossy conversion would let distinct files share a key.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
