//! CapturedOutput for capturing sink output in tests
//!
//! Hands out writers that append to a shared buffer instead of a terminal.

use std::io::Write;
use std::sync::{Arc, Mutex};

use strip_ansi_escapes::strip;

/// A shared buffer that captures everything written to its writers
///
/// Pass `writer()` to [`ConsoleSink::with_writers`](crate::ConsoleSink::with_writers),
/// then use `output()`, `contains()`, and the assertion methods to verify
/// what was written.
#[derive(Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    /// Create an empty capture buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer appending to this buffer
    #[must_use]
    pub fn writer(&self) -> BufferWriter {
        BufferWriter(Arc::clone(&self.buffer))
    }

    fn bytes(&self) -> Vec<u8> {
        self.buffer.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// Get all captured lines (ANSI codes stripped)
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        let stripped = strip(self.bytes());
        String::from_utf8_lossy(&stripped)
            .lines()
            .map(String::from)
            .collect()
    }

    /// Get all captured lines (with ANSI codes)
    #[must_use]
    pub fn raw_output(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.bytes())
            .lines()
            .map(String::from)
            .collect()
    }

    /// Get output as a single string
    #[must_use]
    pub fn output_string(&self) -> String {
        self.output().join("\n")
    }

    /// Check if output contains a string (case-insensitive)
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        let output = self.output_string().to_lowercase();
        output.contains(&needle.to_lowercase())
    }

    /// Check if output contains all of the given strings
    #[must_use]
    pub fn contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.contains(n))
    }

    /// Check if output matches a regex pattern
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        match regex::Regex::new(pattern) {
            Ok(re) => re.is_match(&self.output_string()),
            Err(_) => false,
        }
    }

    /// Assert that output contains a string
    ///
    /// # Panics
    ///
    /// Panics if the output does not contain the needle string.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "Output did not contain '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert that output does NOT contain a string
    ///
    /// # Panics
    ///
    /// Panics if the output contains the needle string.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.contains(needle),
            "Output unexpectedly contained '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert output has specific number of lines
    ///
    /// # Panics
    ///
    /// Panics if the line count doesn't match expected.
    pub fn assert_line_count(&self, expected: usize) {
        let actual = self.output().len();
        assert_eq!(
            actual, expected,
            "Expected {} lines but got {}. Actual output:\n{}",
            expected, actual, self.output_string()
        );
    }

    /// Clear the buffer
    pub fn clear(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
    }
}

impl std::fmt::Debug for CapturedOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedOutput")
            .field("line_count", &self.output().len())
            .finish()
    }
}

/// Writer that appends to a [`CapturedOutput`] buffer
pub struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl std::fmt::Debug for BufferWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferWriter").finish_non_exhaustive()
    }
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut buffer) = self.0.lock() {
            buffer.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(capture: &CapturedOutput, text: &str) {
        let mut writer = capture.writer();
        writer.write_all(text.as_bytes()).unwrap();
    }

    #[test]
    fn test_lines_split_across_writes() {
        let capture = CapturedOutput::new();
        write(&capture, "Hello, ");
        write(&capture, "world!\n");
        write(&capture, "second\n");
        assert_eq!(capture.output(), vec!["Hello, world!", "second"]);
    }

    #[test]
    fn test_ansi_is_stripped() {
        let capture = CapturedOutput::new();
        write(&capture, "\u{1b}[31mred\u{1b}[0m\n");
        assert_eq!(capture.output(), vec!["red"]);
        assert_ne!(capture.raw_output(), capture.output());
    }

    #[test]
    fn test_contains_case_insensitive() {
        let capture = CapturedOutput::new();
        write(&capture, "Hello World\n");
        assert!(capture.contains("hello"));
        assert!(capture.contains("WORLD"));
    }

    #[test]
    fn test_contains_all() {
        let capture = CapturedOutput::new();
        write(&capture, "The quick brown fox\n");
        assert!(capture.contains_all(&["quick", "brown", "fox"]));
        assert!(!capture.contains_all(&["quick", "lazy"]));
    }

    #[test]
    fn test_assert_not_contains() {
        let capture = CapturedOutput::new();
        write(&capture, "Success\n");
        capture.assert_not_contains("Error");
    }

    #[test]
    fn test_matches_regex() {
        let capture = CapturedOutput::new();
        write(&capture, "Error code: 42\n");
        assert!(capture.matches(r"code: \d+"));
        assert!(!capture.matches(r"code: [a-z]+"));
        assert!(!capture.matches(r"("));
    }

    #[test]
    fn test_clear() {
        let capture = CapturedOutput::new();
        write(&capture, "Some output\n");
        capture.assert_line_count(1);
        capture.clear();
        assert!(capture.output().is_empty());
    }

    #[test]
    fn test_clone_shares_buffer() {
        let capture = CapturedOutput::new();
        let other = capture.clone();
        write(&capture, "Test\n");
        assert!(other.contains("Test"));
    }
}
