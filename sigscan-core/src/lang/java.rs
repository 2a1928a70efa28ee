//! Java profile: constructors, interface default/static methods, methods.

use std::sync::OnceLock;

use regex::Regex;

use crate::common::{collapse_whitespace, ends_with_char, ends_with_word, text_before, BlockMap};
use crate::profile::{LanguageProfile, PatternRule, Refined, SourceContext};
use crate::record::{Candidate, Category, Language};

/// Words that can never name a method.
const KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default", "try", "catch", "finally",
    "throw", "return", "break", "continue", "class", "interface", "enum", "extends",
    "implements", "super", "this", "new", "instanceof", "import", "package", "static", "final",
    "abstract", "public", "private", "protected", "void", "int", "long", "double", "float",
    "boolean", "char", "byte", "short", "String", "Object", "null", "true", "false",
];

/// Modifier keywords, in the order they are reported.
const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "final",
    "abstract",
    "synchronized",
    "native",
    "strictfp",
    "default",
];

/// A "return type" made of one of these is a statement, not a declaration.
const STATEMENT_WORDS: &[&str] = &["new", "return", "else", "throw", "case"];

/// How far back the closing-brace heuristic looks.
const BRACE_WINDOW: usize = 100;

const TYPE_KINDS: &[&str] = &["class", "interface", "enum", "record"];

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaProfile;

fn rules() -> &'static [PatternRule] {
    static RULES: OnceLock<Vec<PatternRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let tail = r"\s*\((?P<params>[^)]*)\)(?:\s*throws\s+[\w.]+(?:\s*,\s*[\w.]+)*)?\s*\{";
        vec![
            PatternRule::new(
                Category::Constructor,
                &format!(r"(?:(?:public|private|protected)\s+)?\b(?P<name>\w+){}", tail),
            ),
            PatternRule::new(
                Category::InterfaceMethod,
                &format!(
                    r"\b(?:default|static)\s+(?P<ret>void|[\w<>\[\]\t ,.?]+?)\s+(?P<name>\w+){}",
                    tail
                ),
            ),
            PatternRule::new(
                Category::Method,
                &format!(
                    r"(?:\b(?:public|private|protected|static|final|abstract|synchronized|native|strictfp)\s+)*(?P<ret>void|(?:<[^(){{}};\n]*?>\s*)?\b[\w<>\[\]\t ,.?]+?)\s+(?P<name>\w+){}",
                    tail
                ),
            ),
        ]
    })
}

fn type_header() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?P<lead>[.@]?)\b(?P<kind>class|interface|enum|record)\s+(?P<name>\w+)[^{;]*\{")
            .expect("Hardcoded regex pattern is valid")
    })
}

/// Strips modifier tokens and a leading `<T>` parameter list.
pub fn clean_return_type(raw: &str) -> String {
    let mut tokens: Vec<&str> = raw.split_whitespace().collect();
    tokens.retain(|t| !MODIFIERS.contains(t));
    let mut text = tokens.join(" ");

    if text.starts_with('<') {
        let mut depth = 0usize;
        let mut cut = None;
        for (i, ch) in text.char_indices() {
            match ch {
                '<' => depth += 1,
                '>' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        cut = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }
        if let Some(cut) = cut {
            text = text[cut..].trim_start().to_string();
        }
    }
    text
}

/// Drops the leading annotation name from a raw return type.
///
/// The return-type group starts at the first word after `@`, so
/// `@Override public String` arrives as `Override public String`.
pub fn drop_annotation(raw: &str) -> &str {
    raw.trim_start()
        .split_once(char::is_whitespace)
        .map_or("", |(_, rest)| rest)
}

/// Modifier keywords appearing in `prefix`, first occurrence order.
fn modifiers_in(prefix: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for word in prefix.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if MODIFIERS.contains(&word) && !found.iter().any(|f| f == word) {
            found.push(word.to_string());
        }
    }
    found
}

impl LanguageProfile for JavaProfile {
    fn language(&self) -> Language {
        Language::Java
    }

    fn rules(&self) -> &[PatternRule] {
        rules()
    }

    fn is_keyword(&self, name: &str, _category: Category) -> bool {
        KEYWORDS.contains(&name)
    }

    fn priority(&self, category: Category) -> u8 {
        match category {
            Category::Constructor => 0,
            Category::InterfaceMethod => 1,
            Category::Method => 2,
            _ => u8::MAX,
        }
    }

    fn normalize_param(&self, segment: &str) -> String {
        collapse_whitespace(segment)
    }

    fn blocks(&self, content: &str) -> BlockMap {
        BlockMap::scan(content, type_header(), |caps| {
            // `Foo.class` and `@interface` are not type bodies we report.
            if !caps["lead"].is_empty() {
                return None;
            }
            Some((caps["kind"].to_string(), caps["name"].to_string()))
        })
    }

    /// Declarations rarely follow a `}` directly unless they spell out a
    /// modifier or return type; a bare `name(...) {` there is usually a
    /// statement.
    fn rejects(&self, ctx: &SourceContext<'_>, cand: &Candidate) -> bool {
        let before = text_before(ctx.content, cand.start, BRACE_WINDOW);
        // `new Foo() {` opens an anonymous subclass.
        if cand.category == Category::Constructor && ends_with_word(before, "new") {
            return true;
        }
        if !ends_with_char(before, '}') {
            return false;
        }
        let prefix = &cand.text[..cand.name_start - cand.start];
        cand.return_type.is_none() && modifiers_in(prefix).is_empty()
    }

    fn refine(&self, ctx: &SourceContext<'_>, cand: &Candidate) -> Option<Refined> {
        let owner = ctx.blocks.innermost_of(cand.name_start, TYPE_KINDS);

        let return_type = match cand.category {
            Category::Constructor => {
                let matches_owner = match owner {
                    Some(block) => block.kind != "interface" && block.name == cand.name,
                    None => ctx.blocks.names_of("class").any(|n| n == cand.name),
                };
                if !matches_owner {
                    return None;
                }
                None
            }
            Category::InterfaceMethod if owner.map(|b| b.kind.as_str()) != Some("interface") => {
                return None;
            }
            _ => {
                let mut raw = cand.return_type.as_deref().unwrap_or("");
                if text_before(ctx.content, cand.start, 1) == "@" {
                    raw = drop_annotation(raw);
                }
                let cleaned = clean_return_type(raw);
                // A type header such as `record Point(int x) {` is not a method.
                if cleaned.is_empty()
                    || STATEMENT_WORDS.contains(&cleaned.as_str())
                    || TYPE_KINDS.contains(&cleaned.as_str())
                {
                    return None;
                }
                Some(cleaned)
            }
        };

        let prefix = &cand.text[..cand.name_start - cand.start];
        Some(Refined {
            return_type,
            modifiers: modifiers_in(prefix),
            owning_type: owner.map(|b| b.name.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_return_type() {
        assert_eq!(clean_return_type("public static int"), "int");
        assert_eq!(clean_return_type("<T> List<T>"), "List<T>");
        assert_eq!(clean_return_type("<K, V> Map<K, V>"), "Map<K, V>");
        assert_eq!(clean_return_type("default void"), "void");
        assert_eq!(clean_return_type("public"), "");
    }

    #[test]
    fn test_drop_annotation() {
        assert_eq!(drop_annotation("Override public String"), "public String");
        assert_eq!(drop_annotation("a.b.Marker void"), "void");
        assert_eq!(drop_annotation("Inject"), "");
    }

    #[test]
    fn test_modifiers_in() {
        assert_eq!(
            modifiers_in("public static final "),
            vec!["public", "static", "final"]
        );
        assert!(modifiers_in("int ").is_empty());
        assert!(modifiers_in("publicity ").is_empty());
    }

    #[test]
    fn test_generic_method_without_modifiers() {
        let src = "class Box {\n    <T> T unwrap(T value) {\n        return value;\n    }\n}\n";
        let records = crate::extract::extract_callables(&JavaProfile, "Box.java", src);
        assert_eq!(records.len(), 1, "{:?}", records);
        assert_eq!(records[0].return_type.as_deref(), Some("T"));
    }

    #[test]
    fn test_type_header_skips_class_literal() {
        let src = "class A { Object k = B.class; }\n@interface Marker {}";
        let map = JavaProfile.blocks(src);
        let names: Vec<_> = map.names_of("class").collect();
        assert_eq!(names, vec!["A"]);
        assert!(map.names_of("interface").next().is_none());
    }
}
