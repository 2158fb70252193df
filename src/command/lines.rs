//! Splitting captured output into display lines.

/// Ordered, randomly indexable lines of a command's output.
///
/// Never empty: splitting an empty text yields one empty line, so a pager
/// always has a line to stand on and line numbers match the source output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    lines: Vec<String>,
}

impl LineIndex {
    /// Split `text` on `'\n'`.
    ///
    /// A single trailing newline ends the last line rather than starting a
    /// new one. Empty lines in between are kept. A `'\r'` left at the end of
    /// a line by CRLF output is dropped.
    pub fn split(text: &str) -> Self {
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }

    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Up to `len` lines starting at `start`.
    pub fn window(&self, start: usize, len: usize) -> &[String] {
        let start = start.min(self.lines.len());
        let end = start.saturating_add(len).min(self.lines.len());
        &self.lines[start..end]
    }
}
