//! Maps source positions to `(file, line, column)` for diagnostics (spec
//! §3's "file-set"). One table per unit, built once from its source text.

use crate::span::Span;

/// Pre-computed line-start offsets for O(log L) line lookup, the same
/// structure the teacher's diagnostic crate uses for repeated span lookups.
#[derive(Clone, Debug, Default)]
pub struct FileSet {
    file: String,
    line_starts: Vec<u32>,
}

impl FileSet {
    #[must_use]
    pub fn build(file: impl Into<String>, source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.as_bytes().iter().enumerate() {
            if *b == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        FileSet {
            file: file.into(),
            line_starts,
        }
    }

    /// Resolve a span's start offset to a human-readable `(file, line, col)`.
    /// Line and column are both 1-indexed.
    #[must_use]
    pub fn locate(&self, span: Span) -> (String, u32, u32) {
        let offset = span.start;
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let col = offset - line_start + 1;
        (self.file.clone(), (line_idx + 1) as u32, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_first_line() {
        let fs = FileSet::build("a.go", "line1\nline2\nline3");
        assert_eq!(fs.locate(Span::new(0, 1)), ("a.go".to_string(), 1, 1));
    }

    #[test]
    fn locates_subsequent_lines() {
        let fs = FileSet::build("a.go", "line1\nline2\nline3");
        assert_eq!(fs.locate(Span::new(6, 7)), ("a.go".to_string(), 2, 1));
        assert_eq!(fs.locate(Span::new(12, 13)), ("a.go".to_string(), 3, 1));
    }

    #[test]
    fn locates_mid_line_column() {
        let fs = FileSet::build("a.go", "line1\nline2");
        assert_eq!(fs.locate(Span::new(8, 9)), ("a.go".to_string(), 2, 3));
    }
}
