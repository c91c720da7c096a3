//! Emission buffer.
//!
//! An append-only text buffer owned by one operation's emission pass and
//! concatenated into the output document after the pass completes.

use crate::wrap::{word_wrap, RIGHT_MARGIN};

/// Append-only buffer of generated source text.
#[derive(Default)]
pub struct SourceBuffer {
    buf: String,
}

impl SourceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    /// Append a fragment as-is.
    pub fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Append a fragment followed by a newline.
    pub fn line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    /// Append a blank line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Append `text` wrapped against the column budget, continuation lines
    /// indented to the width of `prefix`, followed by a newline.
    pub fn wrapped(&mut self, prefix: &str, text: &str) {
        self.buf.push_str(&word_wrap(prefix, text, RIGHT_MARGIN));
        self.buf.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Take the accumulated text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_and_blank() {
        let mut buf = SourceBuffer::new();
        buf.line("a = 1");
        buf.blank();
        buf.line("b = 2");
        assert_eq!(buf.as_str(), "a = 1\n\nb = 2\n");
    }

    #[test]
    fn test_take_empties_buffer() {
        let mut buf = SourceBuffer::new();
        buf.push("x");
        assert_eq!(buf.take(), "x");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_wrapped_short_text_is_one_line() {
        let mut buf = SourceBuffer::new();
        buf.wrapped("  _attrs = (", "\"T\", _attr_T)");
        assert_eq!(buf.as_str(), "  _attrs = (\"T\", _attr_T)\n");
    }
}
