//! JavaScript and TypeScript rule table.

use ljpw_core::types::{Axis, StructuralFeature};

use crate::extraction::rules::{Matcher, RuleDefinition, RuleTable};
use crate::extraction::Language;

pub fn rule_table(language: Language) -> RuleTable {
    use Axis::{Justice, Love, Power, Wisdom};
    use Matcher::{LineStartsWith, Pattern};

    RuleTable {
        language,
        base: [0.2, 0.15, 0.25, 0.15],
        rules: vec![
            RuleDefinition::linear("js.doc_comments", Love, Pattern(r"(?s)/\*\*.*?\*/".into()), 0.04, 0.2),
            RuleDefinition::linear("js.comments", Love, LineStartsWith("//".into()), 0.01, 0.15),
            RuleDefinition::linear("js.imports", Love, Pattern(r"(?m)^\s*import\s|\brequire\(".into()), 0.01, 0.15),
            RuleDefinition::threshold("js.public_api", Love, Pattern(r"\bexport\s+(?:default\s+)?(?:async\s+)?(?:function|const|class)\b".into()), 3, 0.1),
            RuleDefinition::threshold("js.type_hints", Love, Pattern(r":\s*(?:string|number|boolean|void)\b".into()), 5, 0.1),
            RuleDefinition::linear("js.try", Justice, Pattern(r"\btry\s*\{".into()), 0.05, 0.2),
            RuleDefinition::linear("js.assert", Justice, Pattern(r"\bassert|\bexpect\(".into()), 0.03, 0.15),
            RuleDefinition::linear("js.validation", Justice, Pattern(r"(?i)valid|check".into()), 0.02, 0.15),
            RuleDefinition::linear("js.throw", Justice, Pattern(r"\bthrow\s".into()), 0.03, 0.15),
            RuleDefinition::threshold("js.constants", Justice, Pattern(r"\bconst\s+[A-Z][A-Z0-9_]+\s*=".into()), 2, 0.1),
            RuleDefinition::linear("js.functions", Power, Pattern(r"\bfunction\b|=>".into()), 0.02, 0.25),
            RuleDefinition::linear("js.classes", Power, Pattern(r"\bclass\s".into()), 0.04, 0.15),
            RuleDefinition::linear("js.loops", Power, Pattern(r"\b(?:for|while)\b".into()), 0.02, 0.1),
            RuleDefinition::threshold("js.math", Power, Pattern(r"Math\.|\*\*|\.reduce\(".into()), 3, 0.1),
            RuleDefinition::linear("js.logging", Wisdom, Pattern(r"(?i:log)|console\.".into()), 0.02, 0.2),
            RuleDefinition::linear("js.metrics", Wisdom, Pattern(r"(?i)metric|measure".into()), 0.03, 0.15),
            RuleDefinition::linear("js.state", Wisdom, Pattern(r"\bthis\.".into()), 0.005, 0.15),
            RuleDefinition::threshold("js.abstractions", Wisdom, Pattern(r"\binterface\s|\btype\s+\w+\s*=|<T\b".into()), 0, 0.15),
            RuleDefinition::linear("js.analysis", Wisdom, Pattern(r"(?i)analyz|inspect".into()), 0.03, 0.15),
        ],
        flag_patterns: vec![
            (StructuralFeature::Docstring, r"/\*\*"),
            (StructuralFeature::TypeHints, r":\s*(?:string|number|boolean|void)\b|\binterface\s"),
            (StructuralFeature::ErrorHandling, r"\btry\s*\{|\bcatch\s*\(|\bthrow\b"),
            (StructuralFeature::Logging, r"\bconsole\.|\blogger\."),
            (StructuralFeature::Testing, r"\bdescribe\(|\bit\(|\btest\(|\bexpect\("),
            (StructuralFeature::State, r"\bthis\.\w+\s*=[^=]|\buseState\b|\bsetState\("),
            (StructuralFeature::History, r"(?i)history|audit"),
            (StructuralFeature::Validation, r"(?i)\bvalidat|\btypeof\b"),
        ],
        concept_pattern: r"\bfunction\b|\bclass\s+\w+|=>",
    }
}
