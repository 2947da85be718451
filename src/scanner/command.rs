// SPDX-License-Identifier: GPL-3.0-or-later

//! Re-tokenizes a compiler invocation found in a log line and classifies its
//! arguments.
//!
//! The invocation is split with shell word-splitting semantics (quoting and
//! escaping), then each token is classified into include paths, preprocessor
//! and warning flags, or source file names. Include paths and source files
//! were logged relative to the build tool's working directory, so relative
//! ones are re-anchored against the current subdirectory; the downstream
//! consumer resolves paths from the compiled file's own directory context
//! and would otherwise be handed dangling paths.
//!
//! Tokens wrapped in backtick command substitution are skipped wholesale;
//! the scanner does not execute or interpret embedded subshells.

use crate::events::resolve_path;
use std::path::PathBuf;

/// Extensions that mark a token as a compilable source (or header) file.
const SOURCE_EXTENSIONS: &[&str] = &["c", "h", "cc", "hh", "cxx", "cpp"];

/// The flag list and source files reconstructed from one invocation.
///
/// Flags are shared by all source files of the invocation; the log reader
/// emits one event per source file carrying the full list.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedCommand {
    pub flags: Vec<String>,
    pub sources: Vec<PathBuf>,
}

/// Classifies the arguments of one compiler invocation.
///
/// The parser is configured once per scanning session with the baseline flag
/// discovered from the toolchain (see [`super::toolchain`]) and is handed
/// the subdirectory context per invocation by the log reader.
pub struct CommandParser {
    baseline: Option<String>,
}

impl CommandParser {
    pub fn new(baseline: Option<String>) -> Self {
        Self { baseline }
    }

    /// Parses the invocation substring, which starts at the compiler name
    /// and runs to the end of the log line.
    ///
    /// Fails when shell word-splitting fails (unterminated quote, dangling
    /// backslash). Command lines continued over multiple physical lines end
    /// up here too; reconstructing them is out of scope and the caller
    /// skips the invocation.
    pub fn parse(
        &self,
        invocation: &str,
        subdir: &str,
    ) -> Result<ParsedCommand, shell_words::ParseError> {
        let argv = shell_words::split(invocation.trim_start())?;

        let mut result = ParsedCommand::default();
        if let Some(baseline) = &self.baseline {
            result.flags.push(baseline.clone());
        }

        let mut in_expand = false;
        let mut index = 0;
        while index < argv.len() {
            let mut token = argv[index].as_str();
            index += 1;

            // A backtick toggles command substitution mode. The opening tick
            // discards the rest of its token, the closing tick resumes
            // classification on the remainder of its token.
            while let Some(tick) = token.find('`') {
                in_expand = !in_expand;
                if in_expand {
                    token = "";
                    break;
                }
                token = &token[tick + 1..];
            }

            if in_expand || token.len() < 2 {
                continue;
            }

            if let Some(source) = recognize_source(token) {
                result.sources.push(resolve_path(subdir, source));
                continue;
            }

            if !token.starts_with('-') {
                continue;
            }

            match token.as_bytes()[1] {
                // -I./includes/ or -I ./includes/, re-fused and re-anchored
                b'I' => {
                    let path = if token == "-I" {
                        match argv.get(index) {
                            Some(next) => {
                                index += 1;
                                next.as_str()
                            }
                            None => continue,
                        }
                    } else {
                        &token[2..]
                    };
                    let resolved = resolve_path(subdir, path);
                    result.flags.push(format!("-I{}", resolved.display()));
                }
                // -fPIC... -Werror... -m64 -mtune=native
                b'f' | b'W' | b'm' => result.flags.push(token.to_string()),
                // -Dfoo -D foo -xc++
                b'D' | b'x' => {
                    result.flags.push(token.to_string());
                    if token.len() == 2 {
                        if let Some(next) = argv.get(index) {
                            index += 1;
                            result.flags.push(next.clone());
                        }
                    }
                }
                _ => {
                    if token.starts_with("-std=") || token.starts_with("-pthread") {
                        result.flags.push(token.to_string());
                    }
                }
            }
        }

        Ok(result)
    }
}

/// Returns the source file name when the token's final extension marks one.
///
/// A leftover backtick artifact prefix is stripped from the name before use.
fn recognize_source(token: &str) -> Option<&str> {
    let (_, extension) = token.rsplit_once('.')?;
    if !SOURCE_EXTENSIONS.contains(&extension) {
        return None;
    }
    match token.find('`') {
        Some(tick) => Some(&token[tick + 1..]),
        None => Some(token),
    }
}
