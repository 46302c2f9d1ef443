use super::error::DraftError;
use super::model::{Question, QuizCreate};

/// In-memory quiz being authored.
///
/// Structural invariants (at least one question, at least two options per
/// question, correct answer pointing at an existing option after a removal)
/// are kept by the mutation methods. Content rules such as non-blank text are
/// only checked by [`QuizDraft::validate_for_submission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    title: String,
    description: String,
    questions: Vec<Question>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            questions: vec![Question::default()],
        }
    }
}

impl From<QuizCreate> for QuizDraft {
    fn from(quiz: QuizCreate) -> Self {
        let questions = if quiz.questions.is_empty() {
            vec![Question::default()]
        } else {
            quiz.questions
        };

        Self {
            title: quiz.title,
            description: quiz.description.unwrap_or_default(),
            questions,
        }
    }
}

impl QuizDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn add_question(&mut self) {
        self.questions.push(Question::default());
    }

    pub fn remove_question(&mut self, index: usize) -> Result<(), DraftError> {
        if index >= self.questions.len() {
            return Err(DraftError::NoSuchQuestion { question: index });
        }
        if self.questions.len() <= 1 {
            return Err(DraftError::LastQuestion);
        }

        self.questions.remove(index);
        Ok(())
    }

    pub fn update_question_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), DraftError> {
        self.question_mut(index)?.text = text.into();
        Ok(())
    }

    /// Marks `option_index` as the correct answer. The index is not checked
    /// against the options here.
    pub fn update_correct_answer_index(
        &mut self,
        index: usize,
        option_index: usize,
    ) -> Result<(), DraftError> {
        self.question_mut(index)?.correct_answer_index = option_index;
        Ok(())
    }

    pub fn update_option(
        &mut self,
        question_index: usize,
        option_index: usize,
        text: impl Into<String>,
    ) -> Result<(), DraftError> {
        let option = self
            .question_mut(question_index)?
            .options
            .get_mut(option_index)
            .ok_or(DraftError::NoSuchOption {
                question: question_index,
                option: option_index,
            })?;
        *option = text.into();
        Ok(())
    }

    pub fn add_option(&mut self, question_index: usize) -> Result<(), DraftError> {
        self.question_mut(question_index)?.options.push(String::new());
        Ok(())
    }

    /// Removes an option, keeping the correct answer on the same logical
    /// option. Removing the correct option itself resets it to the first one.
    pub fn remove_option(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<(), DraftError> {
        let question = self.question_mut(question_index)?;
        if option_index >= question.options.len() {
            return Err(DraftError::NoSuchOption {
                question: question_index,
                option: option_index,
            });
        }
        if question.options.len() <= 2 {
            return Err(DraftError::MinimumOptions);
        }

        if option_index == question.correct_answer_index {
            question.correct_answer_index = 0;
        } else if option_index < question.correct_answer_index {
            question.correct_answer_index -= 1;
        }

        question.options.remove(option_index);
        Ok(())
    }

    /// Checks the draft in submission order and returns the first violated
    /// rule, or the request body to send. A blank description is dropped.
    pub fn validate_for_submission(&self) -> Result<QuizCreate, DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::TitleRequired);
        }

        if self.questions.is_empty() {
            return Err(DraftError::NoQuestions);
        }

        for (i, question) in self.questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                return Err(DraftError::QuestionTextRequired { question: i });
            }

            if question.options.len() < 2 {
                return Err(DraftError::TooFewOptions { question: i });
            }

            if let Some(j) = question.options.iter().position(|o| o.trim().is_empty()) {
                return Err(DraftError::OptionRequired {
                    question: i,
                    option: j,
                });
            }

            if question.correct_answer_index >= question.options.len() {
                return Err(DraftError::CorrectAnswerOutOfRange { question: i });
            }
        }

        let description = if self.description.trim().is_empty() {
            None
        } else {
            Some(self.description.clone())
        };

        Ok(QuizCreate {
            title: self.title.clone(),
            description,
            questions: self.questions.clone(),
        })
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut Question, DraftError> {
        self.questions
            .get_mut(index)
            .ok_or(DraftError::NoSuchQuestion { question: index })
    }
}
