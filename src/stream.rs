use std::borrow::Cow;
use std::io::BufRead;

use log::warn;

use crate::error::LispResult;

/// A character source over any buffered input, pulled one line at a time.
///
/// Lines are only fetched when the reader asks for a character past the end
/// of the current one, so an interactive session never blocks on input it
/// does not yet need.
pub struct CharStream<R> {
    input: R,
    line: Vec<char>,
    pos: usize,
    line_no: usize,
    eof: bool,
}

impl<R: BufRead> CharStream<R> {
    pub fn new(input: R) -> Self {
        CharStream {
            input,
            line: Vec::new(),
            pos: 0,
            line_no: 0,
            eof: false,
        }
    }

    /// Look at the next character without consuming it. None at end of input.
    pub fn peek(&mut self) -> LispResult<Option<char>> {
        while self.pos >= self.line.len() {
            if self.eof {
                return Ok(None);
            }
            self.fill()?;
        }
        Ok(Some(self.line[self.pos]))
    }

    /// Consume and return the next character.
    pub fn advance(&mut self) -> LispResult<Option<char>> {
        let ch = self.peek()?;
        if ch.is_some() {
            self.pos += 1;
        }
        Ok(ch)
    }

    /// Drop whatever is left of the current line.
    pub fn discard_line(&mut self) {
        self.pos = self.line.len();
    }

    /// 1-based number of the line most recently fetched (0 before any input).
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Fetch the next line. Bytes that are not valid UTF-8 become U+FFFD
    /// rather than failing the stream.
    fn fill(&mut self) -> LispResult<()> {
        let mut buf = Vec::new();
        let n = self.input.read_until(b'\n', &mut buf)?;
        if n == 0 {
            self.eof = true;
        } else {
            self.line_no += 1;
            let text = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = text {
                warn!("line {}: invalid UTF-8 replaced", self.line_no);
            }
            self.line = text.chars().collect();
            self.pos = 0;
        }
        Ok(())
    }
}
