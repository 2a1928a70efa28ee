//! Rust profile: plain, async, const and extern functions, impl methods and
//! trait methods.
//!
//! The function, method and trait-method rules share one pattern. Which of
//! them applies is decided after matching, from the innermost `impl` or
//! `trait` block around the name.

use std::sync::OnceLock;

use regex::Regex;

use crate::common::{collapse_whitespace, ends_with_char, text_before, BlockMap};
use crate::profile::{LanguageProfile, PatternRule, Refined, SourceContext};
use crate::record::{Candidate, Category, Language};

/// Words that can never name a function.
const KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "loop", "match", "let", "mut", "const", "static", "fn",
    "struct", "enum", "impl", "trait", "mod", "use", "pub", "self", "Self", "super", "crate",
    "return", "break", "continue", "async", "await", "move", "ref", "true", "false", "Some",
    "None", "Ok", "Err", "Box", "Vec", "String",
];

const CONTEXT_WINDOW: usize = 100;
const VISIBILITY_WINDOW: usize = 200;

#[derive(Debug, Clone, Copy, Default)]
pub struct RustProfile;

fn rules() -> &'static [PatternRule] {
    static RULES: OnceLock<Vec<PatternRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let signature = r"\s+(?P<name>\w+)\s*(?:<[^()]*?>\s*)?\((?P<params>[^)]*)\)\s*(?:->\s*(?P<ret>[^{;]+?))?(?:\s+where\s[^{;]*?)?\s*\{";
        let plain = format!(r"\bfn{}", signature);
        vec![
            PatternRule::new(
                Category::AsyncFunction,
                &format!(r"\basync\s+(?:unsafe\s+)?fn{}", signature),
            ),
            PatternRule::new(
                Category::ConstFunction,
                &format!(r"\bconst\s+(?:unsafe\s+)?fn{}", signature),
            ),
            PatternRule::new(
                Category::ExternFunction,
                &format!(r#"\bextern\s+(?:"[^"]*"\s+)?fn{}"#, signature),
            ),
            PatternRule::new(Category::Function, &plain),
            PatternRule::new(Category::Method, &plain),
            PatternRule::new(Category::TraitMethod, &plain),
        ]
    })
}

fn impl_header() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*(?:unsafe[ \t]+)?impl\b(?P<head>[^{;]*)\{")
            .expect("Hardcoded regex pattern is valid")
    })
}

fn trait_header() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"(?m)^[ \t]*(?:pub(?:\s*\([^)]*\))?\s+)?(?:unsafe\s+)?(?:auto\s+)?trait\s+(?P<name>\w+)[^{;]*\{",
        )
        .expect("Hardcoded regex pattern is valid")
    })
}

fn visibility_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r#"(?:^|[^\w])pub(?:\s*\((?P<scope>[^)]*)\))?\s+(?:(?:async|const|unsafe|default|extern(?:\s+"[^"]*")?)\s+)*$"#,
        )
        .expect("Hardcoded regex pattern is valid")
    })
}

/// Byte index of keyword `kw` in `text` at angle-bracket depth zero.
fn find_keyword(text: &str, kw: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let is_ident = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let mut depth = 0usize;

    for i in 0..bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            _ if depth == 0 && bytes[i..].starts_with(kw.as_bytes()) => {
                let before_ok = i == 0 || !is_ident(bytes[i - 1]);
                let after_ok = bytes.get(i + kw.len()).map_or(true, |&b| !is_ident(b));
                if before_ok && after_ok {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Type named by an impl header: `impl<T> Trait for Foo<T> where ..` → `Foo`.
pub fn impl_target(head: &str) -> Option<String> {
    let mut rest = head.trim();

    if rest.starts_with('<') {
        let mut depth = 0usize;
        let mut cut = rest.len();
        for (i, ch) in rest.char_indices() {
            match ch {
                '<' => depth += 1,
                '>' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        cut = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        rest = rest[cut..].trim();
    }
    if let Some(i) = find_keyword(rest, "where") {
        rest = rest[..i].trim();
    }
    if let Some(i) = find_keyword(rest, "for") {
        rest = rest[i + "for".len()..].trim();
    }

    let base = rest
        .trim_start_matches('&')
        .trim_start_matches("mut ")
        .trim_start_matches("dyn ")
        .split('<')
        .next()
        .unwrap_or("")
        .trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

/// Visibility written in front of the declaration starting at `start`.
pub fn visibility_before(content: &str, start: usize) -> Option<String> {
    let before = text_before(content, start, VISIBILITY_WINDOW);
    let caps = visibility_regex().captures(before)?;
    Some(match caps.name("scope") {
        Some(scope) => format!("pub({})", collapse_whitespace(scope.as_str())),
        None => "pub".to_string(),
    })
}

/// Return type with a trailing `where` clause removed.
fn clean_return_type(raw: &str) -> Option<String> {
    let text = match find_keyword(raw, "where") {
        Some(i) => &raw[..i],
        None => raw,
    };
    let text = collapse_whitespace(text);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

impl LanguageProfile for RustProfile {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn rules(&self) -> &[PatternRule] {
        rules()
    }

    fn is_keyword(&self, name: &str, _category: Category) -> bool {
        KEYWORDS.contains(&name)
    }

    fn priority(&self, category: Category) -> u8 {
        match category {
            Category::AsyncFunction => 0,
            Category::ConstFunction => 1,
            Category::ExternFunction => 2,
            Category::Function => 3,
            Category::Method => 4,
            Category::TraitMethod => 5,
            _ => u8::MAX,
        }
    }

    fn normalize_param(&self, segment: &str) -> String {
        match segment.split_once(':') {
            Some((binding, ty)) => format!(
                "{}: {}",
                collapse_whitespace(binding),
                collapse_whitespace(ty)
            ),
            // Receivers: self, &self, &mut self, mut self
            None => collapse_whitespace(segment),
        }
    }

    fn blocks(&self, content: &str) -> BlockMap {
        let impls = BlockMap::scan(content, impl_header(), |caps| {
            impl_target(&caps["head"]).map(|name| ("impl".to_string(), name))
        });
        let traits = BlockMap::scan(content, trait_header(), |caps| {
            Some(("trait".to_string(), caps["name"].to_string()))
        });
        impls.merged(traits)
    }

    /// `name!(..)` shapes are macro invocations.
    fn rejects(&self, ctx: &SourceContext<'_>, cand: &Candidate) -> bool {
        ends_with_char(text_before(ctx.content, cand.start, CONTEXT_WINDOW), '!')
    }

    fn refine(&self, ctx: &SourceContext<'_>, cand: &Candidate) -> Option<Refined> {
        let enclosing = ctx.blocks.innermost(cand.name_start);
        let kind = enclosing.map(|b| b.kind.as_str());

        let accepted = match cand.category {
            Category::Function => kind.is_none(),
            Category::Method => kind == Some("impl"),
            Category::TraitMethod => kind == Some("trait"),
            _ => true,
        };
        if !accepted {
            return None;
        }

        Some(Refined {
            return_type: cand.return_type.as_deref().and_then(clean_return_type),
            modifiers: visibility_before(ctx.content, cand.start).into_iter().collect(),
            owning_type: enclosing.map(|b| b.name.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impl_target() {
        assert_eq!(impl_target(" Foo ").as_deref(), Some("Foo"));
        assert_eq!(impl_target("<T> Foo<T>").as_deref(), Some("Foo"));
        assert_eq!(
            impl_target("<T: Clone> fmt::Display for Wrapper<T> where T: Debug ").as_deref(),
            Some("Wrapper")
        );
        assert_eq!(impl_target(" From<Vec<u8>> for Buffer").as_deref(), Some("Buffer"));
        assert_eq!(impl_target("   "), None);
    }

    #[test]
    fn test_visibility_before() {
        let src = "pub(crate) async unsafe fn go() {}";
        let start = src.find("async").unwrap();
        assert_eq!(visibility_before(src, start).as_deref(), Some("pub(crate)"));

        let src = "struct A;\nfn private() {}";
        let start = src.find("fn").unwrap();
        assert_eq!(visibility_before(src, start), None);

        let src = "pub extern \"C\" fn ffi() {}";
        let start = src.find("extern").unwrap();
        assert_eq!(visibility_before(src, start).as_deref(), Some("pub"));
    }

    #[test]
    fn test_return_type_drops_where_clause() {
        assert_eq!(
            clean_return_type("Vec<T> where T: Clone ").as_deref(),
            Some("Vec<T>")
        );
        assert_eq!(clean_return_type("  "), None);
    }

    #[test]
    fn test_receiver_params_pass_through() {
        let p = RustProfile;
        assert_eq!(p.normalize_param("&mut self"), "&mut self");
        assert_eq!(p.normalize_param("mut buf :  &mut [u8]"), "mut buf: &mut [u8]");
    }

    #[test]
    fn test_blocks_ignore_impl_trait_in_return_position() {
        let src = "fn iter() -> impl Iterator<Item = u8> {\n    fn nested() {}\n}\n";
        let map = RustProfile.blocks(src);
        assert!(map.is_empty());
    }
}
