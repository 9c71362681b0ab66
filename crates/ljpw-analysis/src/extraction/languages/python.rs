//! Python rule table.

use ljpw_core::types::{Axis, StructuralFeature};

use crate::extraction::rules::{Matcher, RuleDefinition, RuleTable};
use crate::extraction::Language;

pub fn rule_table() -> RuleTable {
    use Axis::{Justice, Love, Power, Wisdom};
    use Matcher::{LineContains, LineStartsWith, Pattern, Substring};

    RuleTable {
        language: Language::Python,
        base: [0.2, 0.15, 0.25, 0.15],
        rules: vec![
            // Love: documentation and readability.
            RuleDefinition::linear("py.docstrings", Love, Pattern(r#"(?s)""".*?"""|'''.*?'''"#.into()), 0.04, 0.2),
            RuleDefinition::linear("py.comments", Love, LineStartsWith("#".into()), 0.01, 0.15),
            RuleDefinition::linear("py.imports", Love, LineContains("import ".into()), 0.01, 0.15),
            RuleDefinition::threshold("py.public_api", Love, Pattern(r"(?m)^\s*def [A-Za-z]".into()), 3, 0.1),
            RuleDefinition::threshold("py.type_hints", Love, Pattern(r"->|: (?:str|int|float)\b".into()), 5, 0.1),
            // Justice: correctness and guarding.
            RuleDefinition::linear("py.try", Justice, Substring("try:".into()), 0.05, 0.2),
            RuleDefinition::linear("py.assert", Justice, Substring("assert ".into()), 0.03, 0.15),
            RuleDefinition::linear("py.validation", Justice, Pattern(r"(?i)valid|check".into()), 0.02, 0.15),
            RuleDefinition::linear("py.raise", Justice, Substring("raise ".into()), 0.03, 0.15),
            RuleDefinition::threshold("py.constants", Justice, Pattern(r"(?m)^[A-Z][A-Z0-9_]+\s*=".into()), 2, 0.1),
            // Power: capability and computation.
            RuleDefinition::linear("py.functions", Power, Substring("def ".into()), 0.02, 0.25),
            RuleDefinition::linear("py.classes", Power, Substring("class ".into()), 0.04, 0.15),
            RuleDefinition::linear("py.loops", Power, Pattern(r"\b(?:for|while)\b".into()), 0.02, 0.1),
            RuleDefinition::threshold("py.math", Power, Pattern(r"math\.|numpy|\*\*".into()), 3, 0.1),
            // Wisdom: observation and abstraction.
            RuleDefinition::linear("py.logging", Wisdom, Pattern(r"(?i:log)|print\(".into()), 0.02, 0.2),
            RuleDefinition::linear("py.metrics", Wisdom, Pattern(r"(?i)metric|measure".into()), 0.03, 0.15),
            RuleDefinition::linear("py.state", Wisdom, Pattern(r"self\.|__".into()), 0.005, 0.15),
            RuleDefinition::threshold("py.abstractions", Wisdom, Pattern(r"@dataclass|TypeVar|Generic".into()), 0, 0.15),
            RuleDefinition::linear("py.analysis", Wisdom, Pattern(r"(?i)analyz|inspect".into()), 0.03, 0.15),
        ],
        flag_patterns: vec![
            (StructuralFeature::Docstring, r#""""|'''"#),
            (StructuralFeature::TypeHints, r"->|:\s*(?:str|int|float|bool|list|dict)\b"),
            (StructuralFeature::ErrorHandling, r"\btry:|\bexcept\b|\braise\b"),
            (StructuralFeature::Logging, r"\blogging\.|\blogger\.|\blog\("),
            (StructuralFeature::Testing, r"\bassert\b|\bdef test_|unittest|pytest"),
            (StructuralFeature::State, r"self\.\w+\s*="),
            (StructuralFeature::History, r"(?i)history|audit"),
            (StructuralFeature::Validation, r"(?i)\bvalidat|\bif not\b|isinstance\("),
        ],
        concept_pattern: r"(?m)^\s*(?:async\s+)?(?:def|class)\s+\w+",
    }
}
