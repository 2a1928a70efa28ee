//! Parameter list splitting.

/// Splits raw parameter text on commas that are not nested.
///
/// Depth is tracked over `<>`, `()`, `[]` and `{}` so that
/// `Vec<HashMap<K, V>>` or a destructuring pattern stays in one piece.
/// The `>` of `->` and `=>` does not close anything. Segments are trimmed
/// and empty segments dropped.
pub fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;
    let mut prev: Option<char> = None;

    for ch in text.chars() {
        match ch {
            '<' | '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            '>' if matches!(prev, Some('-') | Some('=')) => current.push(ch),
            '>' | ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                push_trimmed(&mut parts, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
        prev = Some(ch);
    }
    push_trimmed(&mut parts, &current);
    parts
}

fn push_trimmed(parts: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}

/// Byte index of the first `=` at nesting depth zero that is not part of
/// `==`, `=>`, `<=`, `>=` or `!=`.
pub fn top_level_assign(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    let mut depth: usize = 0;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' | b'(' | b'[' | b'{' => depth += 1,
            b'>' | b')' | b']' | b'}' => {
                if !(b == b'>' && i > 0 && bytes[i - 1] == b'=') {
                    depth = depth.saturating_sub(1);
                }
            }
            b'=' if depth == 0 => {
                let next = bytes.get(i + 1).copied();
                let prev = if i > 0 { Some(bytes[i - 1]) } else { None };
                let compound = matches!(next, Some(b'=') | Some(b'>'))
                    || matches!(prev, Some(b'=') | Some(b'!') | Some(b'<') | Some(b'>'));
                if !compound {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Collapses runs of whitespace to single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
