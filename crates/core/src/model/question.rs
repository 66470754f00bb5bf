use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── EXAM TYPE ────────────────────────────────────────────────────────────────
//

/// Which exam series a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    Local,
    National,
}

impl ExamType {
    /// Parses the lowercase wire spelling ("local" / "national").
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "local" => Some(Self::Local),
            "national" => Some(Self::National),
            _ => None,
        }
    }

    /// The lowercase spelling used in resource paths and answer keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExamType::Local => "local",
            ExamType::National => "national",
        }
    }

    /// The capitalized spelling used in headings ("Local" / "National").
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ExamType::Local => "Local",
            ExamType::National => "National",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── IMAGE REFERENCES ─────────────────────────────────────────────────────────
//

/// The prioritized set of URL fields a question image can be served from.
///
/// Bank records carry `local_path` and usually a `direct_link`; exam answer
/// keys carry only an `image_path` until the link annotation pass fills in
/// the direct link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRefs {
    direct_link: Option<String>,
    image_path: Option<String>,
    local_path: Option<String>,
}

impl ImageRefs {
    #[must_use]
    pub fn new(
        direct_link: Option<String>,
        image_path: Option<String>,
        local_path: Option<String>,
    ) -> Self {
        Self {
            direct_link,
            image_path,
            local_path,
        }
    }

    #[must_use]
    pub fn direct_link(&self) -> Option<&str> {
        self.direct_link.as_deref()
    }

    #[must_use]
    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    #[must_use]
    pub fn local_path(&self) -> Option<&str> {
        self.local_path.as_deref()
    }

    /// Resolves the display URL with the fallback order
    /// `direct_link` → `image_path` → `local_path`.
    #[must_use]
    pub fn resolved(&self) -> Option<&str> {
        self.direct_link
            .as_deref()
            .or(self.image_path.as_deref())
            .or(self.local_path.as_deref())
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single image-backed multiple-choice question.
///
/// Immutable once loaded; bank entries that were never matched to an answer
/// key have no number, year, type, or answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    number: Option<u32>,
    exam_year: Option<String>,
    exam_type: Option<ExamType>,
    answer: Option<String>,
    image: ImageRefs,
}

impl Question {
    #[must_use]
    pub fn new(
        number: Option<u32>,
        exam_year: Option<String>,
        exam_type: Option<ExamType>,
        answer: Option<String>,
        image: ImageRefs,
    ) -> Self {
        Self {
            number,
            exam_year,
            exam_type,
            answer,
            image,
        }
    }

    #[must_use]
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    #[must_use]
    pub fn exam_year(&self) -> Option<&str> {
        self.exam_year.as_deref()
    }

    #[must_use]
    pub fn exam_type(&self) -> Option<ExamType> {
        self.exam_type
    }

    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    #[must_use]
    pub fn image(&self) -> &ImageRefs {
        &self.image
    }

    /// True when the answer field is present and non-blank.
    ///
    /// Random and category mode drop questions without one; exam mode keeps
    /// them so the exam sequence stays intact.
    #[must_use]
    pub fn has_answer(&self) -> bool {
        self.answer.as_deref().is_some_and(|a| !a.trim().is_empty())
    }

    /// Attaches a resolved direct link (exam-mode annotation pass).
    #[must_use]
    pub fn with_direct_link(mut self, link: Option<String>) -> Self {
        self.image.direct_link = link;
        self
    }

    /// The display URL for this question's image, if any reference resolves.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image.resolved()
    }

    /// Alt text `"{year} {type} Question {number}"`.
    ///
    /// `position` is the zero-based index in the active set; it backs the
    /// question-number fallback for unmatched bank entries.
    #[must_use]
    pub fn alt_text(&self, position: usize) -> String {
        let year = self.exam_year.as_deref().unwrap_or("Unknown");
        let exam_type = self.exam_type.map_or("", ExamType::as_str);
        let number = self
            .number
            .map_or_else(|| (position + 1).to_string(), |n| n.to_string());
        format!("{year} {exam_type} Question {number}")
    }

    /// Detail line `"{year} {Local|National} — Q{number}"` shown in random
    /// and category mode.
    #[must_use]
    pub fn details(&self) -> String {
        let year = self.exam_year.as_deref().unwrap_or("?");
        let exam_type = self.exam_type.map_or("?", ExamType::label);
        let number = self
            .number
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        format!("{year} {exam_type} — Q{number}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: Option<&str>) -> Question {
        Question::new(
            Some(5),
            Some("2023".to_string()),
            Some(ExamType::Local),
            answer.map(str::to_string),
            ImageRefs::new(
                Some("https://example.com/q5.png?raw=1".to_string()),
                None,
                Some("question_images/2023/local/q5.png".to_string()),
            ),
        )
    }

    #[test]
    fn image_resolution_prefers_direct_link() {
        let q = question(Some("A"));
        assert_eq!(q.image_url(), Some("https://example.com/q5.png?raw=1"));
    }

    #[test]
    fn image_resolution_falls_back_in_order() {
        let refs = ImageRefs::new(
            None,
            Some("parsed_exams/2023/images/q5.png".to_string()),
            Some("question_images/q5.png".to_string()),
        );
        assert_eq!(refs.resolved(), Some("parsed_exams/2023/images/q5.png"));

        let refs = ImageRefs::new(None, None, Some("question_images/q5.png".to_string()));
        assert_eq!(refs.resolved(), Some("question_images/q5.png"));

        assert_eq!(ImageRefs::default().resolved(), None);
    }

    #[test]
    fn blank_answer_does_not_count_as_answered() {
        assert!(question(Some("A")).has_answer());
        assert!(!question(Some("")).has_answer());
        assert!(!question(Some("   ")).has_answer());
        assert!(!question(None).has_answer());
    }

    #[test]
    fn alt_text_uses_question_fields() {
        let q = question(Some("A"));
        assert_eq!(q.alt_text(0), "2023 local Question 5");
    }

    #[test]
    fn alt_text_falls_back_to_position() {
        let q = Question::new(None, None, None, None, ImageRefs::default());
        assert_eq!(q.alt_text(3), "Unknown  Question 4");
    }

    #[test]
    fn details_line_formats_exam_label() {
        let q = question(Some("A"));
        assert_eq!(q.details(), "2023 Local — Q5");
    }

    #[test]
    fn exam_type_round_trips_wire_spelling() {
        assert_eq!(ExamType::parse("local"), Some(ExamType::Local));
        assert_eq!(ExamType::parse("national"), Some(ExamType::National));
        assert_eq!(ExamType::parse("regional"), None);
        assert_eq!(ExamType::National.to_string(), "national");
        assert_eq!(ExamType::National.label(), "National");
    }
}
