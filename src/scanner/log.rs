// SPDX-License-Identifier: GPL-3.0-or-later

//! Scans a build log line by line and drives the command parser.
//!
//! The reader keeps track of the build tool's working directory as it changes
//! across log lines, recognizes compiler invocations embedded in otherwise
//! arbitrary text, and emits one extraction event per source file discovered.
//! Only file-level problems (unreadable file, invalid UTF-8) surface as
//! errors; a line that fails to tokenize is skipped with a diagnostic and
//! scanning continues.

use super::command::CommandParser;
use super::lines::LineReader;
use crate::events::Event;
use crossbeam_channel::{SendError, Sender};
use log::{debug, info};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// Printed by make (and imitated by other build tools) when the build
/// descends into a subdirectory. The path runs up to the closing quote at
/// the end of the line.
const DIRECTORY_MARKER: &str = ": Entering directory '";

/// Represents the fatal, per-file failures of an ingestion run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read log file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("The log file '{path}' contained invalid UTF-8")]
    Encoding { path: PathBuf },
    #[error("Failed to deliver extraction events: {0}")]
    Disconnected(#[from] SendError<Event>),
}

/// Scans build logs for compiler invocations.
///
/// One instance owns the scan context of one ingestion run: the current
/// subdirectory and the set of source files already dispatched. Re-ingesting
/// a log (or hitting the same compilation twice in one log) is therefore a
/// no-op for the repeated files.
pub struct LogReader {
    parser: CommandParser,
    compilers: Vec<String>,
    subdir: String,
    seen: HashSet<PathBuf>,
}

impl LogReader {
    /// Creates a reader that recognizes the given compiler front-end names.
    ///
    /// The names are matched as bare command names, not full paths; that is
    /// how autotools-style logs print them, and a path-qualified invocation
    /// is a known blind spot.
    pub fn new(parser: CommandParser, compilers: Vec<String>) -> Self {
        Self {
            parser,
            compilers,
            subdir: String::from("."),
            seen: HashSet::new(),
        }
    }

    /// Reads the log file into memory and scans it.
    ///
    /// The whole file content must be valid UTF-8; anything else aborts this
    /// file and leaves the caller to decide about the remaining ones.
    pub fn ingest(&mut self, path: &Path, sender: &Sender<Event>) -> Result<(), IngestError> {
        info!("Scanning build log: {}", path.display());

        let bytes = fs::read(path).map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let contents = String::from_utf8(bytes).map_err(|_| IngestError::Encoding {
            path: path.to_path_buf(),
        })?;

        self.scan(&contents, sender)
    }

    /// Scans in-memory log content, emitting events into the channel.
    pub fn scan(&mut self, contents: &str, sender: &Sender<Event>) -> Result<(), IngestError> {
        // The directory context belongs to one log; the dedup set spans all
        // logs of the run.
        self.subdir = String::from(".");

        for line in LineReader::new(contents) {
            // Track subdirectory changes. Some builds print subdir= lines
            // instead, but with subdir-objects disabled that is not
            // available, the entering marker is what every make emits.
            if let Some(at) = line.find(DIRECTORY_MARKER) {
                let start = at + DIRECTORY_MARKER.len();
                // the closing quote is the last byte of the line
                if start < line.len() {
                    if let Some(subdir) = line.get(start..line.len() - 1) {
                        self.subdir = subdir.to_string();
                    }
                }
                continue;
            }

            // Look for a compiler call somewhere in the line. Only the first
            // occurrence of each name is considered, and it counts only at
            // line start or after whitespace, so that a file name like
            // "libgcc" does not trigger a parse.
            let matches: Vec<usize> = self
                .compilers
                .iter()
                .filter_map(|compiler| {
                    line.find(compiler.as_str())
                        .filter(|&at| at == 0 || line.as_bytes()[at - 1].is_ascii_whitespace())
                })
                .collect();
            for at in matches {
                self.dispatch(&line[at..], sender)?;
            }
        }

        Ok(())
    }

    /// Parses one invocation and emits an event per discovered source file.
    fn dispatch(&mut self, invocation: &str, sender: &Sender<Event>) -> Result<(), IngestError> {
        let parsed = match self.parser.parse(invocation, &self.subdir) {
            Ok(parsed) => parsed,
            Err(error) => {
                // The line may have ended with a continuation backslash or
                // inside a quoted span; those are not reconstructed.
                debug!("Incomplete command '{invocation}': {error}");
                return Ok(());
            }
        };

        if parsed.flags.is_empty() {
            return Ok(());
        }

        for source in parsed.sources {
            if !self.seen.insert(source.clone()) {
                debug!("Skipping {}, already extracted", source.display());
                continue;
            }
            sender.send(Event::new(&self.subdir, source, parsed.flags.clone()))?;
        }

        Ok(())
    }
}
