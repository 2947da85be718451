// SPDX-License-Identifier: GPL-3.0-or-later

//! This module implements the build log scanning engine.
//!
//! Build logs are unstructured text: compiler invocations sit between
//! progress chatter, directory changes and whatever else the build system
//! prints. The engine reconstructs, for each compiled source file, the
//! working directory and the exact flag set used to compile it.
//!
//! The pieces are:
//! - [`LineReader`]: zero-copy iteration over the lines of a log buffer.
//! - [`CommandParser`]: shell-tokenizes one invocation and classifies its
//!   arguments into flags and source files.
//! - [`LogReader`]: orchestrates the scan, tracking the directory context
//!   and detecting invocations, and emits [`crate::events::Event`] values.
//! - [`discover_include_flag`]: the one-time toolchain include-path probe.

mod command;
mod lines;
mod log;
mod toolchain;

pub use command::{CommandParser, ParsedCommand};
pub use lines::LineReader;
pub use log::{IngestError, LogReader};
pub use toolchain::discover_include_flag;
