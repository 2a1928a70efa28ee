//! Collapsing of duplicate matches and name-based ignore filtering.

use std::collections::HashMap;

use crate::record::{CallableRecord, Category};

/// Keeps one record per (name, line).
///
/// The record with the lowest priority wins and takes the slot where its key
/// first appeared, so output order is scan order.
pub fn dedupe<F>(records: Vec<CallableRecord>, priority: F) -> Vec<CallableRecord>
where
    F: Fn(Category) -> u8,
{
    let mut slots: HashMap<(String, usize), usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<CallableRecord> = Vec::with_capacity(records.len());

    for record in records {
        let key = {
            let (name, line) = record.key();
            (name.to_string(), line)
        };
        match slots.get(&key) {
            Some(&idx) => {
                if priority(record.category) < priority(unique[idx].category) {
                    unique[idx] = record;
                }
            }
            None => {
                slots.insert(key, unique.len());
                unique.push(record);
            }
        }
    }
    unique
}

/// Checks if a callable name matches an ignore pattern.
///
/// A pattern ending in `*` matches by prefix, anything else exactly.
pub fn is_ignored(name: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| match p.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => p == name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, category: Category, line: usize) -> CallableRecord {
        CallableRecord {
            name: name.to_string(),
            category,
            return_type: None,
            parameters: Vec::new(),
            modifiers: Vec::new(),
            owning_type: None,
            file: "t".to_string(),
            line,
        }
    }

    fn rust_priority(c: Category) -> u8 {
        match c {
            Category::AsyncFunction => 0,
            Category::Function => 3,
            Category::Method => 4,
            _ => 9,
        }
    }

    #[test]
    fn test_lower_priority_wins_in_first_slot() {
        let input = vec![
            rec("a", Category::Method, 1),
            rec("b", Category::Function, 2),
            rec("a", Category::AsyncFunction, 1),
        ];
        let out = dedupe(input, rust_priority);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "a");
        assert_eq!(out[0].category, Category::AsyncFunction);
        assert_eq!(out[1].name, "b");
    }

    #[test]
    fn test_same_name_different_lines_kept() {
        let input = vec![rec("f", Category::Function, 1), rec("f", Category::Function, 9)];
        assert_eq!(dedupe(input, rust_priority).len(), 2);
    }

    #[test]
    fn test_equal_priority_keeps_first() {
        let mut first = rec("f", Category::Method, 3);
        first.owning_type = Some("First".to_string());
        let input = vec![first, rec("f", Category::Method, 3)];
        let out = dedupe(input, rust_priority);
        assert_eq!(out[0].owning_type.as_deref(), Some("First"));
    }

    #[test]
    fn test_is_ignored() {
        let patterns = vec!["main".to_string(), "test_*".to_string()];
        assert!(is_ignored("main", &patterns));
        assert!(!is_ignored("main_loop", &patterns));
        assert!(is_ignored("test_parse", &patterns));
        assert!(!is_ignored("parse_test", &patterns));
    }
}
