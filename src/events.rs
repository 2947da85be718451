// SPDX-License-Identifier: GPL-3.0-or-later

//! This module defines the unit of output of the log scanner.
//!
//! An extraction event names one source file discovered in a compiler
//! invocation, together with the build subdirectory the invocation was issued
//! from and the compile flags reconstructed for it. Events are handed over a
//! channel to whatever consumer sits downstream (the shipped binary writes
//! them as a JSON array, a library user may feed them to a parser).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Represents one source file extracted from a build log.
///
/// There can be multiple events for the same invocation, one per source file
/// named on the command line; all of them share the same flag list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The build tool working directory in effect when the invocation was
    /// logged. All relative paths in `flags` have already been re-anchored
    /// against it.
    pub directory: PathBuf,
    /// The source file, absolute or joined to `directory`.
    pub file: PathBuf,
    /// The reconstructed compiler flags, in the order they were encountered.
    pub flags: Vec<String>,
}

impl Event {
    pub fn new(directory: &str, file: PathBuf, flags: Vec<String>) -> Self {
        Self {
            directory: PathBuf::from(normalize_subdir(directory)),
            file,
            flags,
        }
    }
}

/// Treat an empty subdirectory the same as the build root.
///
/// Directory change markers can carry an empty path on some build systems;
/// downstream consumers expect a usable directory either way.
pub(crate) fn normalize_subdir(subdir: &str) -> &str {
    if subdir.is_empty() { "." } else { subdir }
}

/// Joins a possibly relative path to the current subdirectory.
///
/// Absolute paths are kept as they are. Relative paths were logged relative
/// to the build tool's working directory and have to be re-anchored so they
/// resolve from the consumer's directory context.
pub(crate) fn resolve_path(subdir: &str, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        Path::new(normalize_subdir(subdir)).join(candidate)
    }
}
