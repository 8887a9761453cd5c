//! Host augmentation for network references.
//!
//! The rewrite inserts `.` + append text into the remainder at a position
//! picked by the first rule in [`CANONICALIZE_RULES`] whose predicate holds.
//! Positions come from the first `/`, `?` and `.` in the remainder; no URL
//! parsing is involved.

use tracing::debug;

use super::types::{ClassifiedInput, InputKind};

/// First occurrence of each delimiter within a remainder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub slash: Option<usize>,
    pub question: Option<usize>,
    pub dot: Option<usize>,
}

impl Delimiters {
    pub fn locate(remainder: &str) -> Self {
        Self {
            slash: remainder.find('/'),
            question: remainder.find('?'),
            dot: remainder.find('.'),
        }
    }

    /// `a` exists and no `b` precedes it
    fn precedes(a: Option<usize>, b: Option<usize>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => a < b,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    fn slash_leads(&self) -> bool {
        Self::precedes(self.slash, self.question)
    }

    fn question_leads(&self) -> bool {
        Self::precedes(self.question, self.slash)
    }
}

/// Where the append text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    BeforeSlash,
    BeforeQuestion,
    AtEnd,
    Unchanged,
}

impl Insertion {
    fn offset(self, remainder: &str, delimiters: &Delimiters) -> Option<usize> {
        match self {
            Insertion::BeforeSlash => delimiters.slash,
            Insertion::BeforeQuestion => delimiters.question,
            Insertion::AtEnd => Some(remainder.len()),
            Insertion::Unchanged => None,
        }
    }
}

/// One row of the rewrite table
pub struct CanonicalizeRule {
    pub name: &'static str,
    pub applies: fn(&Delimiters) -> bool,
    pub insertion: Insertion,
}

/// Evaluated top to bottom; the first rule that applies wins.
pub const CANONICALIZE_RULES: &[CanonicalizeRule] = &[
    CanonicalizeRule {
        name: "bare host before path",
        applies: |d| d.dot.is_none() && d.slash_leads(),
        insertion: Insertion::BeforeSlash,
    },
    CanonicalizeRule {
        name: "bare host before query",
        applies: |d| d.dot.is_none() && d.question_leads(),
        insertion: Insertion::BeforeQuestion,
    },
    CanonicalizeRule {
        name: "bare host",
        applies: |d| d.dot.is_none() && d.slash.is_none() && d.question.is_none(),
        insertion: Insertion::AtEnd,
    },
    CanonicalizeRule {
        name: "dot only in path",
        applies: |d| d.dot.is_some() && Delimiters::precedes(d.slash, d.dot) && d.slash_leads(),
        insertion: Insertion::BeforeSlash,
    },
    CanonicalizeRule {
        name: "dot only in query",
        applies: |d| {
            d.dot.is_some() && Delimiters::precedes(d.question, d.dot) && d.question_leads()
        },
        insertion: Insertion::BeforeQuestion,
    },
    CanonicalizeRule {
        name: "qualified host",
        applies: |_| true,
        insertion: Insertion::Unchanged,
    },
];

/// Pick the rule for a remainder
pub fn select_rule(remainder: &str) -> &'static CanonicalizeRule {
    let delimiters = Delimiters::locate(remainder);
    CANONICALIZE_RULES
        .iter()
        .find(|rule| (rule.applies)(&delimiters))
        .unwrap_or(&CANONICALIZE_RULES[CANONICALIZE_RULES.len() - 1])
}

/// Rewrite the remainder of a protocol reference by inserting `append_text`.
///
/// Returns the input unchanged when disabled, when the input is not a
/// protocol reference, or when there is nothing to insert. A single leading
/// `.` on `append_text` is tolerated so `"com"` and `".com"` behave alike.
pub fn canonicalize(input: ClassifiedInput, enabled: bool, append_text: &str) -> ClassifiedInput {
    let suffix = append_text.strip_prefix('.').unwrap_or(append_text);
    if !enabled || input.kind != InputKind::ProtocolReference || suffix.is_empty() {
        return input;
    }
    if input.remainder.is_empty() {
        return input;
    }

    let delimiters = Delimiters::locate(&input.remainder);
    let rule = select_rule(&input.remainder);
    let Some(offset) = rule.insertion.offset(&input.remainder, &delimiters) else {
        debug!(remainder = %input.remainder, rule = rule.name, "Remainder left as is");
        return input;
    };

    let mut remainder = String::with_capacity(input.remainder.len() + suffix.len() + 1);
    remainder.push_str(&input.remainder[..offset]);
    remainder.push('.');
    remainder.push_str(suffix);
    remainder.push_str(&input.remainder[offset..]);

    debug!(
        before = %input.remainder,
        after = %remainder,
        rule = rule.name,
        "Canonicalized remainder"
    );

    ClassifiedInput { remainder, ..input }
}
