#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod prefetch;
pub mod runner;
pub mod source;
pub mod view;

pub use quiz_core::Clock;

pub use config::SessionConfig;
pub use error::{ConfigError, PrefetchError, SourceError, StartError};
pub use prefetch::{HttpImageFetcher, ImageFetcher, ImagePrefetcher};
pub use runner::SessionRunner;
pub use source::{BankRecord, ExamKeyRecord, HttpQuestionBank, QuestionBank, QuestionSource};
pub use view::{QuestionView, ScoreView, question_view, score_view, session_title};
