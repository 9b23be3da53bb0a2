//! A `Console` over any buffered reader and writer.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::traits::Console;

/// Reads tokens and lines from `R`, writes prompts and output to `W`.
///
/// Tokens are buffered per line: `read_token` serves the rest of the current
/// line before reading another, skipping blank lines on the way.
pub struct LineConsole<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        if !prompt.is_empty() {
            self.writer.write_all(prompt.as_bytes())?;
            self.writer.flush()?;
        }
        Ok(())
    }

    /// Next input line without its terminator. Bytes that are not UTF-8
    /// become U+FFFD rather than an error.
    fn next_raw_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn show(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{text}")
    }

    fn read_token(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompt(prompt)?;
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let Some(line) = self.next_raw_line()? else {
                return Ok(None);
            };
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        // Tokens left on the current line are dropped, not returned as the line.
        self.pending.clear();
        self.prompt(prompt)?;
        self.next_raw_line()
    }
}
