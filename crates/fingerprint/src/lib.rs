// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Content-addressed directory fingerprints.
//!
//! A [`Fingerprint`] maps every regular file under a directory to the SHA-256
//! digest of its bytes. Entries are tagged with [`ArtifactCategory`] values at
//! snapshot time so that whole categories of pipeline output can be excluded
//! before two fingerprints are compared as sets of digests.

mod category;
mod digest;
mod filter;
mod snapshot;

pub use category::{ArtifactCategory, CategoryRule, CategoryRules};
pub use digest::{digest_file, digest_reader, FileDigest, DEFAULT_CHUNK_SIZE};
pub use filter::ExclusionRules;
pub use snapshot::{Fingerprint, FingerprintEntry, SnapshotError, Snapshotter, SymlinkPolicy};
