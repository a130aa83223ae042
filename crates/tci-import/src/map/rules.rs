//! Ordered header rules.
//!
//! Each rule is a `(predicate, field, tier)` triple evaluated top to bottom
//! against a normalized header; the first match wins. The two-token
//! expected-result rule sits above the single-token result rule so
//! "Expected Result" never reaches actual result.

use tci_model::{ColumnTarget, ConfidenceTier, FieldName};

/// Confidence of a header no rule recognized.
pub const SKIP_CONFIDENCE: f32 = 0.1;

/// Rule position of the exact canonical-name match.
const CANONICAL_RULE: usize = 0;

/// Header lowercased with separators and camelCase boundaries turned into
/// single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedHeader {
    text: String,
}

impl NormalizedHeader {
    pub fn new(raw: &str) -> Self {
        Self {
            text: normalize_header(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Substring match.
    fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    /// Whole-word match.
    fn word(&self, word: &str) -> bool {
        self.text.split(' ').any(|w| w == word)
    }

    fn is(&self, exact: &str) -> bool {
        self.text == exact
    }

    fn is_any(&self, options: &[&str]) -> bool {
        options.iter().any(|o| self.is(o))
    }
}

/// Lowercases a header, splitting camelCase and replacing every run of
/// non-alphanumeric characters with one space.
pub fn normalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev_lower {
                out.push(' ');
            }
            out.extend(c.to_lowercase());
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        } else {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            prev_lower = false;
        }
    }
    out.trim_end().to_string()
}

struct Rule {
    name: &'static str,
    predicate: fn(&NormalizedHeader) -> bool,
    field: FieldName,
    tier: ConfidenceTier,
}

const TITLE_SYNONYMS: &[&str] = &[
    "title",
    "name",
    "summary",
    "test name",
    "test title",
    "case name",
    "test case name",
    "test case title",
];

/// Rules after the canonical match, in evaluation order.
static RULES: &[Rule] = &[
    Rule {
        name: "title synonym",
        predicate: |h| h.is_any(TITLE_SYNONYMS),
        field: FieldName::Title,
        tier: ConfidenceTier::High,
    },
    Rule {
        name: "test case",
        predicate: |h| h.contains("test") && (h.contains("case") || h.word("id")),
        field: FieldName::Title,
        tier: ConfidenceTier::High,
    },
    Rule {
        name: "description",
        predicate: |h| h.contains("description") || h.word("desc"),
        field: FieldName::Description,
        tier: ConfidenceTier::High,
    },
    Rule {
        name: "expected result",
        predicate: |h| h.contains("expected") && h.contains("result"),
        field: FieldName::ExpectedResult,
        tier: ConfidenceTier::High,
    },
    Rule {
        name: "steps",
        predicate: |h| h.contains("steps") || h.contains("procedure"),
        field: FieldName::StepsToReproduce,
        tier: ConfidenceTier::High,
    },
    Rule {
        name: "status",
        predicate: |h| h.is("status"),
        field: FieldName::Status,
        tier: ConfidenceTier::High,
    },
    Rule {
        name: "priority",
        predicate: |h| h.is("priority"),
        field: FieldName::Priority,
        tier: ConfidenceTier::High,
    },
    Rule {
        name: "assignee",
        predicate: |h| h.contains("assigned") || h.contains("tester") || h.word("owner"),
        field: FieldName::AssignedTester,
        tier: ConfidenceTier::Medium,
    },
    Rule {
        name: "execution date",
        predicate: |h| h.word("date") || h.contains("execution"),
        field: FieldName::ExecutionDate,
        tier: ConfidenceTier::Medium,
    },
    Rule {
        name: "notes",
        predicate: |h| h.contains("notes") || h.contains("comment"),
        field: FieldName::Notes,
        tier: ConfidenceTier::Medium,
    },
    Rule {
        name: "actual result",
        predicate: |h| h.contains("actual") || h.contains("result"),
        field: FieldName::ActualResult,
        tier: ConfidenceTier::Medium,
    },
    Rule {
        name: "environment",
        predicate: |h| h.contains("environment") || h.word("env"),
        field: FieldName::Environment,
        tier: ConfidenceTier::Medium,
    },
    Rule {
        name: "prerequisites",
        predicate: |h| h.contains("prerequisite") || h.contains("setup") || h.contains("precondition"),
        field: FieldName::Prerequisites,
        tier: ConfidenceTier::Medium,
    },
    Rule {
        name: "platform",
        predicate: |h| h.contains("platform") || h.word("os"),
        field: FieldName::Platform,
        tier: ConfidenceTier::Medium,
    },
    Rule {
        name: "category",
        predicate: |h| h.contains("category") || h.word("type"),
        field: FieldName::Category,
        tier: ConfidenceTier::Low,
    },
];

/// Result of mapping one header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnMatch {
    pub target: ColumnTarget,
    pub tier: ConfidenceTier,
    pub confidence: f32,
    /// Position of the matching rule; lower is stronger. `None` for Skip.
    pub rule: Option<usize>,
}

impl ColumnMatch {
    fn skip() -> Self {
        Self {
            target: ColumnTarget::Skip,
            tier: ConfidenceTier::Low,
            confidence: SKIP_CONFIDENCE,
            rule: None,
        }
    }
}

/// Maps one header to a canonical field or Skip.
///
/// # Example
///
/// ```
/// use tci_import::map_column;
/// use tci_model::{ColumnTarget, ConfidenceTier, FieldName};
///
/// let found = map_column("Expected Result");
/// assert_eq!(found.target, ColumnTarget::Field(FieldName::ExpectedResult));
/// assert_eq!(found.tier, ConfidenceTier::High);
///
/// assert_eq!(map_column("Sprint").target, ColumnTarget::Skip);
/// ```
pub fn map_column(header: &str) -> ColumnMatch {
    let normalized = NormalizedHeader::new(header);
    if normalized.as_str().is_empty() {
        return ColumnMatch::skip();
    }

    if let Some(field) = FieldName::ALL
        .into_iter()
        .find(|field| normalized.is(&normalize_header(field.label())))
    {
        return ColumnMatch {
            target: ColumnTarget::Field(field),
            tier: ConfidenceTier::High,
            confidence: ConfidenceTier::High.score(),
            rule: Some(CANONICAL_RULE),
        };
    }

    for (idx, rule) in RULES.iter().enumerate() {
        if (rule.predicate)(&normalized) {
            tracing::trace!(rule = rule.name, field = %rule.field.key(), "header rule matched");
            return ColumnMatch {
                target: ColumnTarget::Field(rule.field),
                tier: rule.tier,
                confidence: rule.tier.score(),
                rule: Some(idx + 1),
            };
        }
    }
    ColumnMatch::skip()
}
