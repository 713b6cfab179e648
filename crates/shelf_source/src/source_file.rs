//! One input file with a line index for span resolution and line iteration.

use crate::file_id::FileId;
use crate::kind::FileKind;
use crate::span::Span;
use std::path::PathBuf;

/// A Bookshelf file registered in a [`SourceDb`](crate::SourceDb).
pub struct SourceFile {
    /// Identifier within the owning database.
    pub id: FileId,
    /// Path on disk, or a synthetic name for in-memory input.
    pub path: PathBuf,
    /// Kind derived from the path's extension, if recognized.
    pub kind: Option<FileKind>,
    /// Full text of the file.
    pub content: String,
    /// Byte offset at which each line starts; the first entry is 0.
    line_starts: Vec<u32>,
}

/// A single line of an input file.
#[derive(Clone, Copy, Debug)]
pub struct SourceLine<'a> {
    /// 1-indexed line number.
    pub number: u32,
    /// Span of the line text, excluding the terminator.
    pub span: Span,
    /// Line text with `\n` / `\r\n` removed.
    pub text: &'a str,
}

impl SourceFile {
    /// Creates a file, classifying it and indexing its line starts.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let kind = FileKind::from_path(&path);
        let line_starts = compute_line_starts(&content);
        Self {
            id,
            path,
            kind,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset into 1-indexed (line, column).
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line_idx as u32 + 1, col)
    }

    /// Returns the text between two byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }

    /// Number of lines, counting a trailing empty line after a final newline.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Iterates over every line in order, blank lines included.
    pub fn lines(&self) -> impl Iterator<Item = SourceLine<'_>> + '_ {
        let total = self.content.len() as u32;
        self.line_starts
            .iter()
            .enumerate()
            .map(move |(idx, &start)| {
                let end = self
                    .line_starts
                    .get(idx + 1)
                    .map_or(total, |&next| next - 1);
                let raw = &self.content[start as usize..end as usize];
                let text = raw.strip_suffix('\r').unwrap_or(raw);
                SourceLine {
                    number: idx as u32 + 1,
                    span: Span::new(self.id, start, start + text.len() as u32),
                    text,
                }
            })
    }
}

fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_file(name: &str, content: &str) -> SourceFile {
        SourceFile::new(FileId::from_raw(0), PathBuf::from(name), content.to_string())
    }

    #[test]
    fn kind_from_name() {
        assert_eq!(make_file("a.scl", "").kind, Some(FileKind::Scl));
        assert_eq!(make_file("notes.txt", "").kind, None);
    }

    #[test]
    fn line_col_resolution() {
        let f = make_file("a.pl", "o0 1 2\no1 3 4\n");
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line_col(7), (2, 1));
        assert_eq!(f.line_col(10), (2, 4));
    }

    #[test]
    fn lines_strip_terminators() {
        let f = make_file("a.nodes", "UCLA nodes 1.0\r\n\n  a 1 2\n");
        let lines: Vec<_> = f.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text, "UCLA nodes 1.0");
        assert_eq!(lines[1].text, "");
        assert_eq!(lines[2].text, "  a 1 2");
        assert_eq!(lines[2].number, 3);
        assert_eq!(f.snippet(lines[2].span.start, lines[2].span.end), "  a 1 2");
    }

    #[test]
    fn lines_without_trailing_newline() {
        let f = make_file("a.nets", "NetDegree : 2\nx I");
        let last = f.lines().last().unwrap();
        assert_eq!(last.text, "x I");
        assert_eq!(last.number, 2);
    }

    #[test]
    fn empty_file_has_one_blank_line() {
        let f = make_file("a.pl", "");
        assert_eq!(f.line_count(), 1);
        assert_eq!(f.lines().next().unwrap().text, "");
    }
}
