//! Record model shared by every language profile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source language handled by a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    JavaScript,
    Rust,
}

impl Language {
    /// Short name used for program names and log fields.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::JavaScript => "js",
            Self::Rust => "rust",
        }
    }

    /// Name of the command-line program for this language.
    pub fn program_name(self) -> &'static str {
        match self {
            Self::Java => "sigscan-java",
            Self::JavaScript => "sigscan-js",
            Self::Rust => "sigscan-rust",
        }
    }

    /// What a callable is called in this language, for console output.
    pub fn callable_noun(self) -> &'static str {
        match self {
            Self::Java => "Method",
            Self::JavaScript | Self::Rust => "Function",
        }
    }

    /// Label for the owning type, if the language reports one.
    pub fn owner_label(self) -> Option<&'static str> {
        match self {
            Self::Java => Some("Class"),
            Self::JavaScript => None,
            Self::Rust => Some("Struct/Trait"),
        }
    }

    /// Label for the modifiers field, if the language reports one.
    pub fn modifiers_label(self) -> Option<&'static str> {
        match self {
            Self::Java => Some("Modifiers"),
            Self::JavaScript => None,
            Self::Rust => Some("Visibility"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Java => "Java",
            Self::JavaScript => "JavaScript",
            Self::Rust => "Rust",
        })
    }
}

/// Declaration kind a pattern is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Constructor,
    InterfaceMethod,
    Method,
    Function,
    AsyncFunction,
    GeneratorFunction,
    FunctionExpression,
    AsyncFunctionExpression,
    GeneratorFunctionExpression,
    ArrowFunction,
    AsyncArrowFunction,
    ConstFunction,
    ExternFunction,
    TraitMethod,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Self::Constructor,
        Self::InterfaceMethod,
        Self::Method,
        Self::Function,
        Self::AsyncFunction,
        Self::GeneratorFunction,
        Self::FunctionExpression,
        Self::AsyncFunctionExpression,
        Self::GeneratorFunctionExpression,
        Self::ArrowFunction,
        Self::AsyncArrowFunction,
        Self::ConstFunction,
        Self::ExternFunction,
        Self::TraitMethod,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::InterfaceMethod => "interface_method",
            Self::Method => "method",
            Self::Function => "function",
            Self::AsyncFunction => "async_function",
            Self::GeneratorFunction => "generator_function",
            Self::FunctionExpression => "function_expression",
            Self::AsyncFunctionExpression => "async_function_expression",
            Self::GeneratorFunctionExpression => "generator_function_expression",
            Self::ArrowFunction => "arrow_function",
            Self::AsyncArrowFunction => "async_arrow_function",
            Self::ConstFunction => "const_function",
            Self::ExternFunction => "extern_function",
            Self::TraitMethod => "trait_method",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// One regex hit before filtering and deduplication.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub category: Category,
    /// Raw text between the parameter parentheses
    pub params: String,
    /// Raw return type capture, before cleanup
    pub return_type: Option<String>,
    /// Byte offset where the pattern matched
    pub start: usize,
    /// Byte offset of the captured name
    pub name_start: usize,
    /// Full matched text
    pub text: String,
}

/// The deduplicated, user-facing description of one callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableRecord {
    pub name: String,
    pub category: Category,
    pub return_type: Option<String>,
    pub parameters: Vec<String>,
    pub modifiers: Vec<String>,
    pub owning_type: Option<String>,
    pub file: String,
    /// 1-based line where the pattern matched
    pub line: usize,
}

impl CallableRecord {
    /// Deduplication key within one file.
    pub fn key(&self) -> (&str, usize) {
        (self.name.as_str(), self.line)
    }
}
