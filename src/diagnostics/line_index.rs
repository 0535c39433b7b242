use crate::span::Pos;

/// Maps 1-based line:column positions to byte offsets for a single source file.
pub struct LineIndex {
    /// Byte offset of the start of each line. line_starts[0] == 0 always.
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts, len: source.len() }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of a position. Columns count characters, so multi-byte
    /// text before the column is skipped correctly. Out-of-range positions
    /// clamp to the end of their line, or the end of the file.
    pub fn offset_of(&self, source: &str, pos: Pos) -> usize {
        let line = pos.line.saturating_sub(1) as usize;
        let Some(&start) = self.line_starts.get(line) else {
            return self.len;
        };
        let end = self.line_starts.get(line + 1).map(|e| e - 1).unwrap_or(self.len);
        let text = &source[start..end];
        let col = pos.column.saturating_sub(1) as usize;
        match text.char_indices().nth(col) {
            Some((i, _)) => start + i,
            None => end,
        }
    }

    /// End of the token starting at `offset`: the next whitespace, never
    /// less than one byte past `offset` while inside the source.
    pub fn word_end(&self, source: &str, offset: usize) -> usize {
        if offset >= self.len {
            return self.len;
        }
        let rest = &source[offset..];
        let word = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let min = rest.chars().next().map(char::len_utf8).unwrap_or(0);
        offset + word.max(min)
    }
}
