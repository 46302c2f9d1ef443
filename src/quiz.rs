mod client;
mod dashboard;
mod document;
mod draft;
mod error;
mod model;

pub use client::{parse_recipients, QuizClient, QuizService};
pub use dashboard::Dashboard;
pub use document::{load_draft, write_quiz};
pub use draft::QuizDraft;
pub use error::{DraftError, QuizError};
pub use model::{EmailRecipients, Question, Quiz, QuizCreate, QuizFilter, QuizStatus, QuizTextInput};
