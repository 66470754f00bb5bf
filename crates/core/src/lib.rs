#![forbid(unsafe_code)]

//! Domain model and session state machine for the exam practice quiz.
//!
//! This crate is pure: no I/O, no async. Loading question banks and
//! prefetching images live in the `services` crate.

pub mod error;
pub mod model;
pub mod session;
pub mod time;

pub use error::SessionError;
pub use model::{AnswerKey, Category, ExamType, ImageRefs, Mode, Question, ScopeId};
pub use session::{AnswerFeedback, QuizSession, Score, SubmittedAnswer};
pub use time::{Clock, fixed_clock, fixed_now};
