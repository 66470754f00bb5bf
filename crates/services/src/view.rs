//! View models handed to a presenter. The core stays free of rendering;
//! these are the display fields a UI binds to.

use quiz_core::{Category, Mode, QuizSession, ScopeId};

/// Heading for the active session.
#[must_use]
pub fn session_title(mode: &Mode) -> String {
    match mode {
        Mode::Random => "Random Questions".to_string(),
        Mode::Category { slug } => Category::by_slug(slug)
            .map_or_else(|| "Category Questions".to_string(), |c| c.name().to_string()),
        Mode::Exam { year, exam_type } => format!("{year} {} Exam", exam_type.label()),
    }
}

/// Display fields for the question under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// "Questions this session: N" (one-based cursor position).
    pub position: String,
    /// "Total questions: N".
    pub counter: String,
    /// "{year} {Local|National} — Q{n}"; hidden in exam mode, where the
    /// heading already names the paper.
    pub details: Option<String>,
    pub image_url: Option<String>,
    pub alt_text: String,
    /// True once an answer is locked in; the presenter disables input.
    pub locked: bool,
    /// The answer letter to highlight, present only when locked.
    pub correct_answer: Option<String>,
}

#[must_use]
pub fn question_view(session: &QuizSession) -> QuestionView {
    let index = session.current_index();
    let question = session.current_question();
    let locked = session.is_answered(index);
    let details = match session.scope() {
        ScopeId::Exam { .. } => None,
        ScopeId::Random | ScopeId::Category(_) => Some(question.details()),
    };

    QuestionView {
        position: format!("Questions this session: {}", index + 1),
        counter: format!("Total questions: {}", session.total()),
        details,
        image_url: question.image_url().map(str::to_string),
        alt_text: question.alt_text(index),
        locked,
        correct_answer: locked.then(|| question.answer().unwrap_or_default().to_string()),
    }
}

/// Score line plus the progress percentage, empty before the first attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreView {
    /// "Correct: c / a".
    pub summary: String,
    /// "{p}% correct".
    pub percentage: Option<String>,
}

#[must_use]
pub fn score_view(session: &QuizSession) -> ScoreView {
    let score = session.score();
    ScoreView {
        summary: format!("Correct: {} / {}", score.correct, score.attempted),
        percentage: score.percentage().map(|p| format!("{p}% correct")),
    }
}
