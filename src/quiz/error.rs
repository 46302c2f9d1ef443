use thiserror::Error;

/// Local failures of the quiz editing model. Question and option numbers in
/// the messages are 1-based, the fields are 0-based indices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("You need at least one question")]
    LastQuestion,

    #[error("Questions must have at least 2 options")]
    MinimumOptions,

    #[error("Question {} does not exist", .question + 1)]
    NoSuchQuestion { question: usize },

    #[error("Option {} for Question {} does not exist", .option + 1, .question + 1)]
    NoSuchOption { question: usize, option: usize },

    #[error("Please enter a quiz title")]
    TitleRequired,

    #[error("Please add at least one question")]
    NoQuestions,

    #[error("Question {} text is required", .question + 1)]
    QuestionTextRequired { question: usize },

    #[error("Question {} must have at least 2 options", .question + 1)]
    TooFewOptions { question: usize },

    #[error("Option {} for Question {} is required", .option + 1, .question + 1)]
    OptionRequired { question: usize, option: usize },

    #[error("Question {} has no correct answer selected", .question + 1)]
    CorrectAnswerOutOfRange { question: usize },
}

impl DraftError {
    /// Question the error points at, for focusing the offending field.
    pub fn question(&self) -> Option<usize> {
        match self {
            DraftError::NoSuchQuestion { question }
            | DraftError::NoSuchOption { question, .. }
            | DraftError::QuestionTextRequired { question }
            | DraftError::TooFewOptions { question }
            | DraftError::OptionRequired { question, .. }
            | DraftError::CorrectAnswerOutOfRange { question } => Some(*question),
            _ => None,
        }
    }

    pub fn option(&self) -> Option<usize> {
        match self {
            DraftError::NoSuchOption { option, .. } | DraftError::OptionRequired { option, .. } => {
                Some(*option)
            }
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum QuizError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("No quizzes selected")]
    EmptySelection,

    #[error("Please enter at least one valid email address")]
    NoRecipients,

    #[error("Please enter some text for the quiz")]
    EmptyText,

    #[error("Only text files (.txt, .md) are supported, got '{filename}'")]
    UnsupportedFile { filename: String },

    #[error("Error {action}: {status_text}")]
    Transport {
        action: &'static str,
        status: Option<u16>,
        status_text: String,
    },

    #[error("Error {action}: {payload}")]
    ServerValidation {
        action: &'static str,
        status: u16,
        payload: String,
    },

    #[error("Failed to read response body while {action}: {source}")]
    Decode {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl QuizError {
    /// True when the error was raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            QuizError::Draft(_)
                | QuizError::EmptySelection
                | QuizError::NoRecipients
                | QuizError::EmptyText
                | QuizError::UnsupportedFile { .. }
        )
    }

    /// HTTP status of a remote failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            QuizError::Transport { status, .. } => *status,
            QuizError::ServerValidation { status, .. } => Some(*status),
            _ => None,
        }
    }
}
