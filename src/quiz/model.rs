use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizStatus {
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "deleted")]
    Deleted,
}

impl QuizStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizStatus::Draft => "draft",
            QuizStatus::Approved => "approved",
            QuizStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status filter of the quiz listing. `All` sends no `status` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizFilter {
    #[default]
    All,
    Draft,
    Approved,
}

impl QuizFilter {
    /// Value of the `status` query parameter, if any.
    pub fn status(&self) -> Option<QuizStatus> {
        match self {
            QuizFilter::All => None,
            QuizFilter::Draft => Some(QuizStatus::Draft),
            QuizFilter::Approved => Some(QuizStatus::Approved),
        }
    }
}

impl FromStr for QuizFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(QuizFilter::All),
            "draft" => Ok(QuizFilter::Draft),
            "approved" => Ok(QuizFilter::Approved),
            other => Err(format!("unknown quiz filter '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

impl Default for Question {
    /// Blank question with two empty options, first one marked correct.
    fn default() -> Self {
        Self {
            text: String::new(),
            options: vec![String::new(), String::new()],
            correct_answer_index: 0,
        }
    }
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_answer_index: usize) -> Self {
        Self {
            text: text.into(),
            options,
            correct_answer_index,
        }
    }

    pub fn correct_answer(&self) -> Option<&str> {
        self.options
            .get(self.correct_answer_index)
            .map(String::as_str)
    }
}

/// Body of `POST /quizzes/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A quiz as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: QuizStatus,
    #[serde(default)]
    pub form_url: Option<String>,
    #[serde(default)]
    pub form_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    // the listing endpoint does not always populate questions
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Only drafts can be approved.
    pub fn can_approve(&self) -> bool {
        self.status == QuizStatus::Draft
    }

    pub fn can_delete(&self) -> bool {
        self.status != QuizStatus::Deleted
    }

    /// Copy of the quiz content in the shape accepted by `POST /quizzes/`.
    pub fn to_create(&self) -> QuizCreate {
        QuizCreate {
            title: self.title.clone(),
            description: self.description.clone(),
            questions: self.questions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecipients {
    pub recipients: Vec<String>,
}

/// Body of `POST /quizzes/from-text`.
#[derive(Debug, Clone, Serialize)]
pub struct QuizTextInput<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_title: Option<&'a str>,
}
