// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming SHA-256 file digests.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read buffer size used when hashing files.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Lowercase hex SHA-256 of a file's full content.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileDigest(String);

impl FileDigest {
    /// Hex representation of the digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for diagnostics.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl std::fmt::Display for FileDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash everything `reader` yields, `chunk_size` bytes at a time.
///
/// A zero chunk size is treated as [`DEFAULT_CHUNK_SIZE`].
pub fn digest_reader<R: Read>(mut reader: R, chunk_size: usize) -> io::Result<FileDigest> {
    let chunk_size = if chunk_size == 0 {
        DEFAULT_CHUNK_SIZE
    } else {
        chunk_size
    };

    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }

    Ok(FileDigest(hex::encode(hasher.finalize())))
}

/// Hash the file at `path` with the default chunk size.
pub fn digest_file(path: &Path) -> io::Result<FileDigest> {
    digest_file_chunked(path, DEFAULT_CHUNK_SIZE)
}

pub(crate) fn digest_file_chunked(path: &Path, chunk_size: usize) -> io::Result<FileDigest> {
    let file = File::open(path)?;
    digest_reader(file, chunk_size)
}

#[cfg(test)]
#[path = "digest_tests.rs"]
mod tests;
