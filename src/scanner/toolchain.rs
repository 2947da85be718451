// SPDX-License-Identifier: GPL-3.0-or-later

//! Probes the toolchain for its private include directory.
//!
//! Compilers ship headers of their own (stdarg.h and friends) that a
//! downstream parser will not find on the default search path. The probe
//! asks the compiler where they live and turns the answer into a baseline
//! `-I` flag that is prepended to every extracted flag list. A failing probe
//! degrades the result but never aborts a run.

use log::warn;
use std::process::Command;

/// Asks the given compiler for its builtin include directory.
///
/// Runs `<compiler> -print-file-name=include` once, blocking until the
/// subprocess finishes. When the compiler does not know the file it echoes
/// the bare name back, in which case there is no baseline flag to add.
pub fn discover_include_flag(compiler: &str) -> Option<String> {
    let output = match Command::new(compiler)
        .arg("-print-file-name=include")
        .output()
    {
        Ok(output) => output,
        Err(error) => {
            warn!("Failed to discover {compiler} include path: {error}");
            return None;
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let path = stdout.trim();
    if path.is_empty() || path == "include" {
        return None;
    }

    Some(format!("-I{path}"))
}
