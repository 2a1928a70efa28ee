//! Language profiles: the per-language rule sets plugged into the generic
//! extraction pipeline.
//!
//! A profile supplies an ordered list of tagged patterns, a keyword test, a
//! category priority table, a parameter normaliser, an enclosing-block
//! scanner, and two hooks: [`LanguageProfile::rejects`] for context
//! heuristics and [`LanguageProfile::refine`] for accepting a candidate and
//! filling in its modifiers and owning type.

use regex::Regex;

use crate::common::{BlockMap, LineIndex};
use crate::lang::{JavaProfile, JavaScriptProfile, RustProfile};
use crate::record::{Candidate, Category, Language};

/// One category-tagged declaration pattern.
///
/// The regex must define the named groups `name` and `params`; `ret` is
/// optional and holds the raw return type.
#[derive(Debug)]
pub struct PatternRule {
    pub category: Category,
    pub regex: Regex,
}

impl PatternRule {
    /// Compiles a hardcoded pattern.
    pub fn new(category: Category, pattern: &str) -> Self {
        Self {
            category,
            // SAFETY: patterns are string literals covered by the profile tests.
            regex: Regex::new(pattern).expect("Hardcoded regex pattern is valid"),
        }
    }
}

/// Per-file state shared by every rule of one extraction.
#[derive(Debug)]
pub struct SourceContext<'a> {
    pub content: &'a str,
    pub lines: LineIndex,
    pub blocks: BlockMap,
}

impl<'a> SourceContext<'a> {
    pub fn new(profile: &dyn LanguageProfile, content: &'a str) -> Self {
        Self {
            content,
            lines: LineIndex::new(content),
            blocks: profile.blocks(content),
        }
    }
}

/// What a profile adds to an accepted candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refined {
    pub return_type: Option<String>,
    pub modifiers: Vec<String>,
    pub owning_type: Option<String>,
}

/// Rule set for one source language.
pub trait LanguageProfile: Sync {
    fn language(&self) -> Language;

    /// Patterns in application order.
    fn rules(&self) -> &[PatternRule];

    /// Whether `name` is a keyword that can never name a callable of
    /// `category`.
    fn is_keyword(&self, name: &str, category: Category) -> bool;

    /// Lower wins when several categories share a (name, line) key.
    fn priority(&self, category: Category) -> u8;

    /// Normalises one already-split parameter segment.
    fn normalize_param(&self, segment: &str) -> String;

    /// Enclosing type blocks of the text. Languages without owning types
    /// keep the empty default.
    fn blocks(&self, _content: &str) -> BlockMap {
        BlockMap::default()
    }

    /// Language-specific rejection based on the text around the match.
    fn rejects(&self, _ctx: &SourceContext<'_>, _cand: &Candidate) -> bool {
        false
    }

    /// Accepts the candidate and describes it, or returns `None` to drop it.
    fn refine(&self, ctx: &SourceContext<'_>, cand: &Candidate) -> Option<Refined>;
}

/// Static profile for a language.
pub fn profile_for(language: Language) -> &'static dyn LanguageProfile {
    static JAVA: JavaProfile = JavaProfile;
    static JAVASCRIPT: JavaScriptProfile = JavaScriptProfile;
    static RUST: RustProfile = RustProfile;

    match language {
        Language::Java => &JAVA,
        Language::JavaScript => &JAVASCRIPT,
        Language::Rust => &RUST,
    }
}

/// Position of the first rule tagged `category`; profiles whose priority
/// is plain rule order use it directly.
pub fn rule_rank(rules: &[PatternRule], category: Category) -> u8 {
    rules
        .iter()
        .position(|r| r.category == category)
        .map_or(u8::MAX, |i| i.min(u8::MAX as usize) as u8)
}
