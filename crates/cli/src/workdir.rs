// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario working directories.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to create working directory under '{}': {source}", parent.display())]
pub struct WorkdirError {
    pub parent: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Fresh empty directory owned by one scenario, removed on drop.
#[derive(Debug)]
pub struct ScopedWorkdir {
    dir: TempDir,
}

impl ScopedWorkdir {
    /// Create under `parent`, or the system temp dir when `None`.
    pub fn create(parent: Option<&Path>, label: &str) -> Result<Self, WorkdirError> {
        let prefix = format!("astrocheck-{}-", sanitize(label));
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);

        let result = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        };
        let dir = result.map_err(|source| WorkdirError {
            parent: parent
                .map(Path::to_path_buf)
                .unwrap_or_else(std::env::temp_dir),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove now and report errors instead of ignoring them on drop.
    pub fn release(self) -> std::io::Result<()> {
        self.dir.close()
    }
}

fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}

#[cfg(test)]
#[path = "workdir_tests.rs"]
mod tests;
