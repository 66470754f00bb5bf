//! Question-set loading: wire records, the bank data source, and per-mode
//! selection (filter + shuffle).

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::sync::Arc;

use quiz_core::{Category, ExamType, ImageRefs, Mode, Question};

use crate::error::SourceError;

//
// ─── WIRE RECORDS ─────────────────────────────────────────────────────────────
//

/// One entry of the full question bank (`dropbox_question_links.json`).
///
/// Every image in the bank has a `local_path`; entries that were matched to
/// an answer key also carry year, type, number, and answer. The bank's
/// `exam_year` is a JSON number, while exam keys ship it as a string, so the
/// field accepts both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BankRecord {
    #[serde(default)]
    pub dropbox_path: Option<String>,
    pub local_path: String,
    #[serde(default)]
    pub direct_link: Option<String>,
    #[serde(default, deserialize_with = "year_as_string")]
    pub exam_year: Option<String>,
    #[serde(default)]
    pub exam_type: Option<ExamType>,
    #[serde(default)]
    pub question_number: Option<u32>,
    #[serde(default)]
    pub answer: Option<String>,
}

/// One entry of a per-exam answer key
/// (`parsed_exams/{year}/{type}_answer_key.json`). Ordered as printed in the
/// exam paper; carries no resolved link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamKeyRecord {
    #[serde(default)]
    pub question_number: Option<u32>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "year_as_string")]
    pub exam_year: Option<String>,
    #[serde(default)]
    pub exam_type: Option<ExamType>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearField {
    Number(i64),
    Text(String),
}

fn year_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let year = Option::<YearField>::deserialize(deserializer)?;
    Ok(year.map(|y| match y {
        YearField::Number(n) => n.to_string(),
        YearField::Text(s) => s,
    }))
}

impl From<BankRecord> for Question {
    fn from(record: BankRecord) -> Self {
        Question::new(
            record.question_number,
            record.exam_year,
            record.exam_type,
            record.answer,
            ImageRefs::new(record.direct_link, None, Some(record.local_path)),
        )
    }
}

impl From<ExamKeyRecord> for Question {
    fn from(record: ExamKeyRecord) -> Self {
        Question::new(
            record.question_number,
            record.exam_year,
            record.exam_type,
            record.answer,
            ImageRefs::new(None, record.image_path, None),
        )
    }
}

//
// ─── DATA SOURCE ──────────────────────────────────────────────────────────────
//

/// Backing store for question resources. The HTTP implementation talks to
/// the static site; tests swap in an in-memory bank.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    async fn fetch_bank(&self) -> Result<Vec<BankRecord>, SourceError>;

    async fn fetch_exam_key(
        &self,
        year: &str,
        exam_type: ExamType,
    ) -> Result<Vec<ExamKeyRecord>, SourceError>;
}

/// Fetches question resources over HTTP from a base URL.
#[derive(Clone)]
pub struct HttpQuestionBank {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQuestionBank {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl QuestionBank for HttpQuestionBank {
    async fn fetch_bank(&self) -> Result<Vec<BankRecord>, SourceError> {
        self.get_json("dropbox_question_links.json").await
    }

    async fn fetch_exam_key(
        &self,
        year: &str,
        exam_type: ExamType,
    ) -> Result<Vec<ExamKeyRecord>, SourceError> {
        self.get_json(&format!("parsed_exams/{year}/{exam_type}_answer_key.json"))
            .await
    }
}

//
// ─── QUESTION SOURCE ──────────────────────────────────────────────────────────
//

/// Builds the active question list for a chosen mode.
pub struct QuestionSource {
    bank: Arc<dyn QuestionBank>,
    shuffle: bool,
}

impl QuestionSource {
    #[must_use]
    pub fn new(bank: Arc<dyn QuestionBank>) -> Self {
        Self {
            bank,
            shuffle: true,
        }
    }

    /// Disable shuffling for deterministic tests. Exam mode never shuffles
    /// either way.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Load, filter, and order the question list for `mode`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::UnknownCategory` for a category slug outside
    /// the catalog, and propagates fetch/decode failures.
    pub async fn load(&self, mode: &Mode) -> Result<Vec<Question>, SourceError> {
        match mode {
            Mode::Random => {
                let mut questions: Vec<Question> = self
                    .bank
                    .fetch_bank()
                    .await?
                    .into_iter()
                    .map(Question::from)
                    .filter(Question::has_answer)
                    .collect();
                self.maybe_shuffle(&mut questions);
                log::info!("loaded {} random questions", questions.len());
                Ok(questions)
            }
            Mode::Category { slug } => {
                let category = Category::by_slug(slug).ok_or_else(|| {
                    SourceError::UnknownCategory { slug: slug.clone() }
                })?;
                let mut questions: Vec<Question> = self
                    .bank
                    .fetch_bank()
                    .await?
                    .into_iter()
                    .map(Question::from)
                    .filter(|q| {
                        q.has_answer() && q.number().is_some_and(|n| category.contains(n))
                    })
                    .collect();
                self.maybe_shuffle(&mut questions);
                let (lo, hi) = category.range();
                log::info!(
                    "loaded {} questions for category {} (Q{lo}-Q{hi} across all years)",
                    questions.len(),
                    category.name()
                );
                Ok(questions)
            }
            Mode::Exam { year, exam_type } => {
                let key_records = self.bank.fetch_exam_key(year, *exam_type).await?;
                let bank_records = self.bank.fetch_bank().await?;
                let links: HashMap<&str, &str> = bank_records
                    .iter()
                    .filter_map(|r| {
                        r.direct_link
                            .as_deref()
                            .map(|link| (r.local_path.as_str(), link))
                    })
                    .collect();

                let questions: Vec<Question> = key_records
                    .into_iter()
                    .map(|record| {
                        let link = record
                            .image_path
                            .as_deref()
                            .and_then(|path| links.get(path).copied())
                            .map(str::to_string);
                        Question::from(record).with_direct_link(link)
                    })
                    .collect();
                log::info!(
                    "loaded {} questions from {year} {exam_type} exam",
                    questions.len()
                );
                Ok(questions)
            }
        }
    }

    fn maybe_shuffle(&self, questions: &mut [Question]) {
        if self.shuffle {
            shuffle(questions);
        }
    }
}

/// Uniform random permutation in place (rand's Fisher–Yates).
pub fn shuffle<T>(items: &mut [T]) {
    let mut rng = rand::rng();
    items.shuffle(&mut rng);
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    struct InMemoryBank {
        bank: Vec<BankRecord>,
        exam: Vec<ExamKeyRecord>,
    }

    #[async_trait]
    impl QuestionBank for InMemoryBank {
        async fn fetch_bank(&self) -> Result<Vec<BankRecord>, SourceError> {
            Ok(self.bank.clone())
        }

        async fn fetch_exam_key(
            &self,
            _year: &str,
            _exam_type: ExamType,
        ) -> Result<Vec<ExamKeyRecord>, SourceError> {
            Ok(self.exam.clone())
        }
    }

    fn bank_record(number: Option<u32>, answer: Option<&str>) -> BankRecord {
        BankRecord {
            local_path: format!("question_images/q{}.png", number.unwrap_or(0)),
            direct_link: number.map(|n| format!("https://img.example/q{n}.png?raw=1")),
            exam_year: Some("2023".to_string()),
            exam_type: Some(ExamType::Local),
            question_number: number,
            answer: answer.map(str::to_string),
            ..BankRecord::default()
        }
    }

    fn source(bank: Vec<BankRecord>, exam: Vec<ExamKeyRecord>) -> QuestionSource {
        QuestionSource::new(Arc::new(InMemoryBank { bank, exam })).with_shuffle(false)
    }

    #[tokio::test]
    async fn random_mode_drops_records_without_answers() {
        let source = source(
            vec![
                bank_record(Some(1), Some("A")),
                bank_record(Some(2), Some("")),
                bank_record(Some(3), Some("  ")),
                bank_record(None, None),
                bank_record(Some(4), Some("D")),
            ],
            Vec::new(),
        );

        let questions = source.load(&Mode::Random).await.unwrap();
        let numbers: Vec<_> = questions.iter().map(|q| q.number().unwrap()).collect();
        assert_eq!(numbers, vec![1, 4]);
    }

    #[tokio::test]
    async fn category_mode_keeps_only_the_inclusive_range() {
        // redox is Q37-Q42.
        let source = source(
            vec![
                bank_record(Some(36), Some("A")),
                bank_record(Some(37), Some("B")),
                bank_record(Some(40), Some("")),
                bank_record(Some(42), Some("C")),
                bank_record(Some(43), Some("D")),
            ],
            Vec::new(),
        );

        let questions = source
            .load(&Mode::Category {
                slug: "redox".to_string(),
            })
            .await
            .unwrap();
        let numbers: Vec<_> = questions.iter().map(|q| q.number().unwrap()).collect();
        assert_eq!(numbers, vec![37, 42]);
        assert!(questions.iter().all(Question::has_answer));
    }

    #[tokio::test]
    async fn unknown_category_fails_at_load_time() {
        let source = source(vec![bank_record(Some(1), Some("A"))], Vec::new());
        let err = source
            .load(&Mode::Category {
                slug: "astrochemistry".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SourceError::UnknownCategory { slug } if slug == "astrochemistry"
        ));
    }

    #[tokio::test]
    async fn exam_mode_preserves_order_and_annotates_links() {
        let exam = vec![
            ExamKeyRecord {
                question_number: Some(1),
                answer: Some("A".to_string()),
                image_path: Some("question_images/q1.png".to_string()),
                exam_year: Some("2023".to_string()),
                exam_type: Some(ExamType::Local),
            },
            ExamKeyRecord {
                question_number: Some(2),
                answer: Some(String::new()),
                image_path: Some("question_images/q99.png".to_string()),
                exam_year: Some("2023".to_string()),
                exam_type: Some(ExamType::Local),
            },
        ];
        let source = source(vec![bank_record(Some(1), Some("A"))], exam);

        let mode = Mode::Exam {
            year: "2023".to_string(),
            exam_type: ExamType::Local,
        };
        let questions = source.load(&mode).await.unwrap();

        // Fixed exam order, blank answers kept.
        let numbers: Vec<_> = questions.iter().map(|q| q.number().unwrap()).collect();
        assert_eq!(numbers, vec![1, 2]);

        // Q1 resolves through the bank's direct link; Q2 has no bank entry
        // and falls back to its image path.
        assert_eq!(
            questions[0].image_url(),
            Some("https://img.example/q1.png?raw=1")
        );
        assert_eq!(questions[1].image_url(), Some("question_images/q99.png"));
    }

    #[tokio::test]
    async fn shuffling_is_a_permutation() {
        let records: Vec<BankRecord> = (1..=40)
            .map(|n| bank_record(Some(n), Some("A")))
            .collect();
        let source =
            QuestionSource::new(Arc::new(InMemoryBank { bank: records, exam: Vec::new() }));

        let questions = source.load(&Mode::Random).await.unwrap();
        let mut numbers: Vec<_> = questions.iter().map(|q| q.number().unwrap()).collect();
        assert_eq!(numbers.len(), 40);
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=40).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_keeps_the_multiset_with_duplicates() {
        let mut items = vec![1, 1, 2, 2, 2, 3];
        shuffle(&mut items);
        items.sort_unstable();
        assert_eq!(items, vec![1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn bank_year_accepts_number_or_string() {
        let numeric: BankRecord = serde_json::from_value(serde_json::json!({
            "local_path": "question_images/q1.png",
            "exam_year": 2023,
        }))
        .unwrap();
        assert_eq!(numeric.exam_year.as_deref(), Some("2023"));

        let text: BankRecord = serde_json::from_value(serde_json::json!({
            "local_path": "question_images/q1.png",
            "exam_year": "2024",
            "exam_type": "national",
        }))
        .unwrap();
        assert_eq!(text.exam_year.as_deref(), Some("2024"));
        assert_eq!(text.exam_type, Some(ExamType::National));

        let missing: BankRecord = serde_json::from_value(serde_json::json!({
            "local_path": "question_images/q1.png",
            "exam_year": null,
        }))
        .unwrap();
        assert_eq!(missing.exam_year, None);
    }
}
