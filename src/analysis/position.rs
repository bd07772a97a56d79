//! Mapping between byte offsets and 1-indexed line/column positions.
//!
//! Columns are counted in Unicode scalar values, so text that has been masked
//! char-for-char maps to the same positions as the original.

/// Line start table for a piece of source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// Byte offset of the first character of each line.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    /// Number of lines (a trailing newline opens an empty last line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 1-indexed line, without its newline.
    pub fn line_text(&self, line: usize) -> &'a str {
        if line == 0 || line > self.line_count() {
            return "";
        }
        let start = self.line_starts[line - 1];
        let end = self
            .line_starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        &self.text[start..end]
    }

    /// Convert a byte offset into a 1-indexed (line, column) pair.
    ///
    /// Offsets past the end map to the end of the text; offsets inside a
    /// multi-byte character map to that character.
    pub fn position_of_byte(&self, offset: usize) -> (usize, usize) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let start = self.line_starts[line_idx];
        let column = self.text[start..offset].chars().count() + 1;
        (line_idx + 1, column)
    }

    /// Clamp a position onto the nearest real position in the text.
    pub fn clamp(&self, line: usize, column: usize) -> (usize, usize) {
        let line = line.clamp(1, self.line_count());
        let max_column = self.line_text(line).chars().count() + 1;
        (line, column.clamp(1, max_column))
    }
}
