//! Rust rule table.

use ljpw_core::types::{Axis, StructuralFeature};

use crate::extraction::rules::{Matcher, RuleDefinition, RuleTable};
use crate::extraction::Language;

pub fn rule_table() -> RuleTable {
    use Axis::{Justice, Love, Power, Wisdom};
    use Matcher::{LineStartsWith, Pattern};

    RuleTable {
        language: Language::Rust,
        base: [0.2, 0.15, 0.25, 0.15],
        rules: vec![
            RuleDefinition::linear("rs.doc_comments", Love, Pattern(r"(?m)^\s*//[/!]".into()), 0.04, 0.2),
            RuleDefinition::linear("rs.comments", Love, Pattern(r"(?m)^\s*//(?:[^/!]|$)".into()), 0.01, 0.15),
            RuleDefinition::linear("rs.imports", Love, LineStartsWith("use ".into()), 0.01, 0.15),
            RuleDefinition::threshold("rs.public_api", Love, Pattern(r"\bpub(?:\([a-z]+\))?\s+fn\b".into()), 3, 0.1),
            RuleDefinition::threshold("rs.signatures", Love, Pattern(r"->".into()), 5, 0.1),
            RuleDefinition::linear("rs.results", Justice, Pattern(r"\bResult<".into()), 0.05, 0.2),
            RuleDefinition::linear("rs.assert", Justice, Pattern(r"\b(?:debug_)?assert(?:_eq|_ne)?!".into()), 0.03, 0.15),
            RuleDefinition::linear("rs.validation", Justice, Pattern(r"(?i)valid|check".into()), 0.02, 0.15),
            RuleDefinition::linear("rs.propagation", Justice, Pattern(r"\?;|\bErr\(".into()), 0.03, 0.15),
            RuleDefinition::threshold("rs.constants", Justice, Pattern(r"(?m)^\s*(?:pub(?:\([a-z]+\))?\s+)?(?:const|static)\s+[A-Z]".into()), 2, 0.1),
            RuleDefinition::linear("rs.functions", Power, Pattern(r"\bfn\s".into()), 0.02, 0.25),
            RuleDefinition::linear("rs.types", Power, Pattern(r"\b(?:struct|enum|impl)\b".into()), 0.04, 0.15),
            RuleDefinition::linear("rs.loops", Power, Pattern(r"\b(?:for|while|loop)\b".into()), 0.02, 0.1),
            RuleDefinition::threshold("rs.iterators", Power, Pattern(r"\.(?:iter|map|fold|filter|zip)\(".into()), 3, 0.1),
            RuleDefinition::linear("rs.logging", Wisdom, Pattern(r"(?i:log)|tracing::|println!".into()), 0.02, 0.2),
            RuleDefinition::linear("rs.metrics", Wisdom, Pattern(r"(?i)metric|measure".into()), 0.03, 0.15),
            RuleDefinition::linear("rs.state", Wisdom, Pattern(r"\bself\.".into()), 0.005, 0.15),
            RuleDefinition::threshold("rs.abstractions", Wisdom, Pattern(r"\btrait\s|\bimpl<|\bwhere\b".into()), 0, 0.15),
            RuleDefinition::linear("rs.analysis", Wisdom, Pattern(r"(?i)analyz|inspect".into()), 0.03, 0.15),
        ],
        flag_patterns: vec![
            (StructuralFeature::Docstring, r"///|//!"),
            (StructuralFeature::TypeHints, r"->\s*\S|:\s*&?(?:mut\s+)?[A-Za-z_][\w:]*(?:<[^>]*>)?\s*[,)=;]"),
            (StructuralFeature::ErrorHandling, r"\bResult<|\?;|\bErr\("),
            (StructuralFeature::Logging, r"\btracing::|\blog::|\b(?:info|warn|debug|error|trace)!\("),
            (StructuralFeature::Testing, r"#\[test\]|#\[cfg\(test\)\]|\bassert(?:_eq|_ne)?!"),
            (StructuralFeature::State, r"&mut self|\bself\.\w+\s*[+\-*/]?="),
            (StructuralFeature::History, r"(?i)history|audit|journal"),
            (StructuralFeature::Validation, r"(?i)\bvalidat|\bensure\b|\bis_valid"),
        ],
        concept_pattern: r"\b(?:fn|struct|enum|trait)\s+[A-Za-z_]\w*",
    }
}
