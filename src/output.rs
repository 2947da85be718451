// SPDX-License-Identifier: GPL-3.0-or-later

//! This module is responsible for writing the extraction events.
//!
//! The shipped binary serializes the events as a JSON array, either to a
//! file or to standard output. Library users that parse the sources
//! themselves can plug in their own [`Consumer`] instead.

use crate::events::Event;
use crossbeam_channel::Receiver;
use serde::ser::{SerializeSeq, Serializer};
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// A trait for consuming events from a channel-based stream.
///
/// The method blocks until the sender side of the channel is dropped, and
/// receives the events in the order the scanner emitted them.
pub trait Consumer {
    fn consume(self: Box<Self>, receiver: Receiver<Event>) -> Result<(), FormatError>;
}

/// Writes extraction events as a JSON array.
pub struct JsonEventWriter<W: io::Write> {
    output: W,
}

impl JsonEventWriter<io::BufWriter<fs::File>> {
    /// Creates a writer targeting the given file.
    pub fn create(path: &Path) -> Result<Self, FormatError> {
        let output = fs::File::create(path)
            .map(io::BufWriter::new)
            .map_err(|source| FormatError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { output })
    }
}

impl JsonEventWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { output: io::stdout() }
    }
}

impl<W: io::Write> Consumer for JsonEventWriter<W> {
    fn consume(self: Box<Self>, receiver: Receiver<Event>) -> Result<(), FormatError> {
        serialize_seq(self.output, receiver.iter())
    }
}

/// Serialize events from an iterator into a JSON array.
fn serialize_seq<W, T>(writer: W, entries: impl Iterator<Item = T>) -> Result<(), FormatError>
where
    W: io::Write,
    T: serde::Serialize,
{
    let mut ser = serde_json::Serializer::pretty(writer);
    let mut seq = ser.serialize_seq(None)?;
    for entry in entries {
        seq.serialize_element(&entry)?;
    }
    seq.end()?;

    Ok(())
}

/// Represents the failures of writing the event stream.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Failed to open output file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize events: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_events_are_written_as_a_json_array() {
        let (sender, receiver) = unbounded();
        sender
            .send(Event::new(
                "/build/sub",
                PathBuf::from("/build/sub/main.c"),
                vec![String::from("-DFOO")],
            ))
            .unwrap();
        drop(sender);

        let mut buffer = Vec::new();
        serialize_seq(&mut buffer, receiver.iter()).unwrap();

        let written: Vec<Event> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].file, PathBuf::from("/build/sub/main.c"));
        assert_eq!(written[0].flags, vec!["-DFOO"]);
    }

    #[test]
    fn test_no_events_still_produce_a_valid_array() {
        let (sender, receiver) = unbounded::<Event>();
        drop(sender);

        let mut buffer = Vec::new();
        serialize_seq(&mut buffer, receiver.iter()).unwrap();

        let written: Vec<Event> = serde_json::from_slice(&buffer).unwrap();
        assert!(written.is_empty());
    }
}
