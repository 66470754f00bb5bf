mod category;
mod mode;
mod question;

pub use category::Category;
pub use mode::{AnswerKey, Mode, ScopeId};
pub use question::{ExamType, ImageRefs, Question};
