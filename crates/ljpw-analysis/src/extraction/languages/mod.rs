//! Per-language rule tables.

pub mod javascript;
pub mod python;
pub mod rust_lang;

use super::rules::RuleTable;
use super::Language;

/// Rule table for a language. JavaScript and TypeScript share one table.
pub fn rule_table(language: Language) -> RuleTable {
    match language {
        Language::Python => python::rule_table(),
        Language::Rust => rust_lang::rule_table(),
        Language::JavaScript | Language::TypeScript => javascript::rule_table(language),
    }
}
