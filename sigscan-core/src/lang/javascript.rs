//! JavaScript profile: declarations, expressions, arrows and the catch-all
//! `name(...) {` method shape.

use std::sync::OnceLock;

use crate::common::{text_before, top_level_assign};
use crate::profile::{rule_rank, LanguageProfile, PatternRule, Refined, SourceContext};
use crate::record::{Candidate, Category, Language};

/// Reserved words; never a callable name.
const RESERVED: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default", "try", "catch", "finally",
    "throw", "return", "break", "continue", "var", "let", "const", "function", "class",
    "extends", "super", "this", "new", "typeof", "instanceof", "in", "with", "import", "export",
    "delete", "void", "yield", "await",
];

/// Contextual words that only rule out the catch-all method shape.
const CONTEXTUAL: &[&str] = &[
    "of", "from", "as", "static", "async", "constructor", "get", "set",
];

/// Characters after which the catch-all shape may start a definition.
const METHOD_LEAD: &[char] = &[',', '{', ';', ':'];

const LEAD_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptProfile;

fn rules() -> &'static [PatternRule] {
    static RULES: OnceLock<Vec<PatternRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let binding = r"\b(?:const|let|var)\s+(?P<name>[\w$]+)\s*=\s*";
        vec![
            PatternRule::new(
                Category::AsyncFunction,
                r"\basync\s+function\s+(?P<name>[\w$]+)\s*\((?P<params>[^)]*)\)",
            ),
            PatternRule::new(
                Category::GeneratorFunction,
                r"\bfunction\s*\*\s*(?P<name>[\w$]+)\s*\((?P<params>[^)]*)\)",
            ),
            PatternRule::new(
                Category::Function,
                r"\bfunction\s+(?P<name>[\w$]+)\s*\((?P<params>[^)]*)\)",
            ),
            PatternRule::new(
                Category::AsyncFunctionExpression,
                &format!(r"{}async\s+function\s*\((?P<params>[^)]*)\)", binding),
            ),
            PatternRule::new(
                Category::GeneratorFunctionExpression,
                &format!(r"{}function\s*\*\s*\((?P<params>[^)]*)\)", binding),
            ),
            PatternRule::new(
                Category::FunctionExpression,
                &format!(r"{}function\s*\((?P<params>[^)]*)\)", binding),
            ),
            PatternRule::new(
                Category::AsyncArrowFunction,
                &format!(r"{}async\s*\((?P<params>[^)]*)\)\s*=>", binding),
            ),
            PatternRule::new(
                Category::ArrowFunction,
                &format!(r"{}\((?P<params>[^)]*)\)\s*=>", binding),
            ),
            PatternRule::new(
                Category::Method,
                r"(?P<name>[\w$]+)\s*\((?P<params>[^)]*)\)\s*\{",
            ),
        ]
    })
}

impl LanguageProfile for JavaScriptProfile {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn rules(&self) -> &[PatternRule] {
        rules()
    }

    fn is_keyword(&self, name: &str, category: Category) -> bool {
        RESERVED.contains(&name) || (category == Category::Method && CONTEXTUAL.contains(&name))
    }

    fn priority(&self, category: Category) -> u8 {
        rule_rank(rules(), category)
    }

    fn normalize_param(&self, segment: &str) -> String {
        match top_level_assign(segment) {
            Some(eq) => segment[..eq].trim().to_string(),
            None => segment.trim().to_string(),
        }
    }

    /// The catch-all shape only counts when it starts a statement, a class
    /// member or an object-literal entry.
    fn rejects(&self, ctx: &SourceContext<'_>, cand: &Candidate) -> bool {
        if cand.category != Category::Method {
            return false;
        }
        match text_before(ctx.content, cand.start, LEAD_WINDOW).chars().next_back() {
            None => false,
            Some(c) => !(c.is_whitespace() || METHOD_LEAD.contains(&c)),
        }
    }

    fn refine(&self, _ctx: &SourceContext<'_>, _cand: &Candidate) -> Option<Refined> {
        Some(Refined::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contextual_words_only_block_methods() {
        let p = JavaScriptProfile;
        assert!(p.is_keyword("get", Category::Method));
        assert!(!p.is_keyword("get", Category::Function));
        assert!(p.is_keyword("if", Category::Function));
    }

    #[test]
    fn test_default_values_stripped() {
        let p = JavaScriptProfile;
        assert_eq!(p.normalize_param("retries = 3"), "retries");
        assert_eq!(p.normalize_param("{ a = 1, b }"), "{ a = 1, b }");
        assert_eq!(p.normalize_param("...rest"), "...rest");
    }

    #[test]
    fn test_priority_follows_rule_order() {
        let p = JavaScriptProfile;
        assert!(p.priority(Category::Function) < p.priority(Category::Method));
        assert!(p.priority(Category::AsyncFunction) < p.priority(Category::Function));
    }
}
