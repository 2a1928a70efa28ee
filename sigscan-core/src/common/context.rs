//! Position helpers over one source text.

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let newlines = content
            .bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(i, _)| i)
            .collect();
        Self { newlines }
    }

    /// 1-based line of the character at `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset) + 1
    }
}

/// Up to `window` bytes of text ending right before `offset`.
///
/// The window start is moved forward to a char boundary.
pub fn text_before(content: &str, offset: usize, window: usize) -> &str {
    let end = offset.min(content.len());
    let mut start = end.saturating_sub(window);
    while !content.is_char_boundary(start) {
        start += 1;
    }
    &content[start..end]
}

/// Whether the text ends with `identifier.` plus optional whitespace,
/// i.e. the following name is reached through member access.
pub fn ends_with_member_access(before: &str) -> bool {
    let trimmed = before.trim_end();
    let Some(rest) = trimmed.strip_suffix('.') else {
        return false;
    };
    rest.chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == ')' || c == ']')
}

/// Whether the last non-whitespace character of the text is `ch`.
pub fn ends_with_char(before: &str, ch: char) -> bool {
    before.trim_end().ends_with(ch)
}

/// Whether the last word of the text is `word`, standing on its own.
pub fn ends_with_word(before: &str, word: &str) -> bool {
    let Some(rest) = before.trim_end().strip_suffix(word) else {
        return false;
    };
    !rest
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}
