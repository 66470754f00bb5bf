use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

use crate::error::SessionError;
use crate::model::{AnswerKey, Mode, Question, ScopeId};

//
// ─── ANSWER STATE ─────────────────────────────────────────────────────────────
//

/// The locked-in answer for one question. A question never transitions back
/// to unanswered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub selected: String,
    pub is_correct: bool,
}

/// Outcome returned to the presenter for a freshly submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    /// The question's answer letter; empty for exam questions whose key
    /// entry was never parsed.
    pub correct_answer: String,
}

/// Cumulative score counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub attempted: u32,
}

impl Score {
    /// Rounded percent correct, or `None` before the first attempt.
    #[must_use]
    pub fn percentage(&self) -> Option<u32> {
        if self.attempted == 0 {
            return None;
        }
        let pct = f64::from(self.correct) * 100.0 / f64::from(self.attempted);
        Some(pct.round() as u32)
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// In-memory question session: a fixed question sequence, a cursor, and
/// single-answer-per-question scoring.
///
/// All mutation happens through navigation and answer operations; there is
/// no persistence and no background state.
pub struct QuizSession {
    scope: ScopeId,
    questions: Vec<Question>,
    current: usize,
    answered: HashMap<AnswerKey, SubmittedAnswer>,
    correct_count: u32,
    attempted_count: u32,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Create a session over an already loaded and ordered question set.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided; the
    /// cursor invariant `current < len` could not hold otherwise.
    pub fn new(
        mode: &Mode,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            scope: mode.scope(),
            questions,
            current: 0,
            answered: HashMap::new(),
            correct_count: 0,
            attempted_count: 0,
            started_at,
        })
    }

    #[must_use]
    pub fn scope(&self) -> &ScopeId {
        &self.scope
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Move the cursor to `index`.
    ///
    /// Out-of-range indices are a silent no-op returning `false`; the
    /// presenter disables navigation at the boundaries, so this is a
    /// tolerance, not an error.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.questions.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Advance the cursor, clamped at the last question (no wraparound).
    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Step the cursor back, clamped at the first question (no wraparound).
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Lock in an answer for the current question.
    ///
    /// Idempotent per question key: a second submission (rapid double-click,
    /// repeated keypress) is a silent no-op returning `None`, leaving every
    /// counter untouched. Comparison is case-sensitive exact string equality.
    pub fn submit_answer(&mut self, selected: &str) -> Option<AnswerFeedback> {
        let key = AnswerKey::new(self.scope.clone(), self.current);
        if self.answered.contains_key(&key) {
            return None;
        }

        let correct_answer = self
            .current_question()
            .answer()
            .unwrap_or_default()
            .to_string();
        let is_correct = selected == correct_answer;

        self.answered.insert(
            key,
            SubmittedAnswer {
                selected: selected.to_string(),
                is_correct,
            },
        );
        self.attempted_count += 1;
        if is_correct {
            self.correct_count += 1;
        }

        Some(AnswerFeedback {
            is_correct,
            correct_answer,
        })
    }

    /// True when the question at `index` already has a locked answer.
    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.answer_at(index).is_some()
    }

    /// The locked answer for the question at `index`, if any.
    #[must_use]
    pub fn answer_at(&self, index: usize) -> Option<&SubmittedAnswer> {
        self.answered
            .get(&AnswerKey::new(self.scope.clone(), index))
    }

    /// Number of questions with a locked answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        Score {
            correct: self.correct_count,
            attempted: self.attempted_count,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("scope", &self.scope)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered_len", &self.answered.len())
            .field("correct_count", &self.correct_count)
            .field("attempted_count", &self.attempted_count)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//
