//! Byte cursor shared by the temporal parsers.

use crate::error::{Error, Result};

pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    type_name: &'static str,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(type_name: &'static str, input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            type_name,
        }
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::malformed(self.type_name, self.input, reason)
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub(crate) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    pub(crate) fn is_done(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Consumes `byte` if it is next.
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, byte: u8, context: &str) -> Result<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.malformed(format!(
                "expected '{}' {} at position {}",
                byte as char, context, self.pos
            )))
        }
    }

    /// Reads exactly `count` ASCII digits, rejecting a longer run.
    pub(crate) fn fixed_digits(&mut self, count: usize, what: &str) -> Result<u32> {
        let run = self.digit_run();
        if run.len() != count {
            return Err(self.malformed(format!(
                "expected {} digits for {}, found {}",
                count,
                what,
                run.len()
            )));
        }
        // At most four digits here, always fits.
        Ok(run.bytes().fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0')))
    }

    /// Consumes the longest run of ASCII digits (possibly empty).
    pub(crate) fn digit_run(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    pub(crate) fn finish(&self) -> Result<()> {
        if self.is_done() {
            Ok(())
        } else {
            Err(self.malformed(format!(
                "unexpected trailing input '{}'",
                &self.input[self.pos..]
            )))
        }
    }
}
