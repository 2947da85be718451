// SPDX-License-Identifier: GPL-3.0-or-later

//! A zero-copy line splitter over an in-memory buffer.
//!
//! The reader hands out subslices of the buffer it was constructed with and
//! never copies or mutates it. The backing buffer must therefore outlive the
//! reader, which the borrow checker enforces here (the original C version
//! documented this as a usage rule instead).

/// Yields successive `\n`-delimited lines of a borrowed buffer.
///
/// The trailing newline is not part of the yielded line. A final line
/// without a terminating newline is still yielded. The cursor only moves
/// forward; restarting means constructing a new reader.
pub struct LineReader<'a> {
    contents: &'a str,
    pos: usize,
}

impl<'a> LineReader<'a> {
    pub fn new(contents: &'a str) -> Self {
        Self { contents, pos: 0 }
    }
}

impl<'a> Iterator for LineReader<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.pos >= self.contents.len() {
            return None;
        }

        let rest = &self.contents[self.pos..];
        let line = match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        };
        // Step over the line and its delimiter. On the last unterminated
        // line this lands one past the buffer end, which only means that the
        // iterator is exhausted.
        self.pos += line.len() + 1;

        Some(line)
    }
}
