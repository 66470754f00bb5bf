use std::fmt;

use crate::model::question::ExamType;

//
// ─── MODE ─────────────────────────────────────────────────────────────────────
//

/// Session-level selection of the question source.
///
/// Chosen once at session start and immutable for the session lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The full question bank, shuffled.
    Random,
    /// Questions whose number falls in a category's range, shuffled.
    Category { slug: String },
    /// One exam paper in its original order.
    Exam { year: String, exam_type: ExamType },
}

impl Mode {
    /// Exam sequencing matters; random and category sets are shuffled.
    #[must_use]
    pub fn preserves_order(&self) -> bool {
        matches!(self, Mode::Exam { .. })
    }

    /// The scope portion of answer keys derived in this mode.
    #[must_use]
    pub fn scope(&self) -> ScopeId {
        match self {
            Mode::Random => ScopeId::Random,
            Mode::Category { slug } => ScopeId::Category(slug.clone()),
            Mode::Exam { year, exam_type } => ScopeId::Exam {
                year: year.clone(),
                exam_type: *exam_type,
            },
        }
    }
}

//
// ─── ANSWER KEYS ──────────────────────────────────────────────────────────────
//

/// Identifies which question set is active: a category slug, an exam
/// year + type, or the whole-bank random pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeId {
    Random,
    Category(String),
    Exam { year: String, exam_type: ExamType },
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeId::Random => f.write_str("random"),
            ScopeId::Category(slug) => write!(f, "category-{slug}"),
            ScopeId::Exam { year, exam_type } => write!(f, "{year}-{exam_type}"),
        }
    }
}

/// Uniquely identifies a question instance within a session, so repeated
/// navigation to the same index never double-counts an answer.
///
/// A typed composite of scope and index; distinct scopes can never collide
/// the way concatenated string keys could.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnswerKey {
    scope: ScopeId,
    index: usize,
}

impl AnswerKey {
    #[must_use]
    pub fn new(scope: ScopeId, index: usize) -> Self {
        Self { scope, index }
    }

    #[must_use]
    pub fn scope(&self) -> &ScopeId {
        &self.scope
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.scope, self.index)
    }
}
