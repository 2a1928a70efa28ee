//! Brace-bounded block spans (classes, interfaces, impls, traits).
//!
//! Profiles describe block headers with a regex whose match ends at the
//! opening `{`. The closing brace is found by counting braces; string and
//! comment contents are not special-cased, so a stray brace inside a literal
//! shifts the span the same way it would in a naive reader.

use regex::Regex;

/// A named block with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Header keyword (e.g. "class", "impl", "trait")
    pub kind: String,
    /// Declared or implemented type name
    pub name: String,
    /// Offset of the opening `{`
    pub open: usize,
    /// Offset of the matching `}`, or the end of the text when unbalanced
    pub close: usize,
}

impl Block {
    /// Whether `offset` lies strictly inside the braces.
    pub fn contains(&self, offset: usize) -> bool {
        offset > self.open && offset < self.close
    }
}

/// All blocks found in one source text.
#[derive(Debug, Clone, Default)]
pub struct BlockMap {
    blocks: Vec<Block>,
}

impl BlockMap {
    /// Scans `content` with a header regex.
    ///
    /// `name_of` turns one header capture into `(kind, name)`; returning
    /// `None` skips the header.
    pub fn scan<F>(content: &str, header: &Regex, mut name_of: F) -> Self
    where
        F: FnMut(&regex::Captures<'_>) -> Option<(String, String)>,
    {
        let mut blocks = Vec::new();
        for caps in header.captures_iter(content) {
            let Some(whole) = caps.get(0) else { continue };
            let Some((kind, name)) = name_of(&caps) else { continue };
            // Header patterns end with the opening brace.
            let open = whole.end().saturating_sub(1);
            if content.as_bytes().get(open) != Some(&b'{') {
                continue;
            }
            blocks.push(Block {
                kind,
                name,
                open,
                close: matching_brace(content, open),
            });
        }
        Self { blocks }
    }

    /// Innermost block containing `offset`.
    pub fn innermost(&self, offset: usize) -> Option<&Block> {
        self.blocks
            .iter()
            .filter(|b| b.contains(offset))
            .min_by_key(|b| b.close - b.open)
    }

    /// Innermost block of one of `kinds` containing `offset`.
    pub fn innermost_of(&self, offset: usize, kinds: &[&str]) -> Option<&Block> {
        self.blocks
            .iter()
            .filter(|b| kinds.contains(&b.kind.as_str()) && b.contains(offset))
            .min_by_key(|b| b.close - b.open)
    }

    /// Names of all blocks of the given kind, in file order.
    pub fn names_of(&self, kind: &str) -> impl Iterator<Item = &str> {
        let kind = kind.to_string();
        self.blocks
            .iter()
            .filter(move |b| b.kind == kind)
            .map(|b| b.name.as_str())
    }

    /// Combines two maps scanned with different header patterns.
    pub fn merged(mut self, other: Self) -> Self {
        self.blocks.extend(other.blocks);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Offset of the `}` balancing the `{` at `open`.
pub fn matching_brace(content: &str, open: usize) -> usize {
    let mut depth: usize = 0;
    for (i, b) in content.as_bytes().iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    content.len()
}
