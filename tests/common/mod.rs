#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use autoquiz::quiz::{Question, Quiz, QuizCreate, QuizError, QuizFilter, QuizService, QuizStatus};

pub fn quiz(id: &str, status: QuizStatus) -> Quiz {
    Quiz {
        id: id.to_string(),
        title: format!("Quiz {}", id),
        description: None,
        status,
        form_url: Some(format!("https://docs.google.com/forms/d/{}/edit", id)),
        form_id: Some(id.to_string()),
        created_at: "2023-01-01T12:00:00".to_string(),
        updated_at: "2023-01-01T12:00:00".to_string(),
        questions: vec![Question::new(
            "Capital of France?",
            vec!["Paris".into(), "Lyon".into()],
            0,
        )],
    }
}

/// In-memory quiz service that records every call it receives.
#[derive(Default)]
pub struct RecordingService {
    pub quizzes: RefCell<Vec<Quiz>>,
    pub calls: RefCell<Vec<String>>,
    pub failing_deletes: HashSet<String>,
    pub fail_list: Cell<bool>,
}

impl RecordingService {
    pub fn with_quizzes(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes: RefCell::new(quizzes),
            ..Self::default()
        }
    }

    pub fn failing_delete(mut self, id: &str) -> Self {
        self.failing_deletes.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("delete ").map(String::from))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn not_found(action: &'static str) -> QuizError {
        QuizError::Transport {
            action,
            status: Some(404),
            status_text: "Not Found".to_string(),
        }
    }
}

impl QuizService for RecordingService {
    fn list(&self, filter: QuizFilter) -> Result<Vec<Quiz>, QuizError> {
        self.record(format!("list {:?}", filter));
        if self.fail_list.get() {
            return Err(QuizError::Transport {
                action: "fetching quizzes",
                status: Some(500),
                status_text: "Internal Server Error".to_string(),
            });
        }
        Ok(self
            .quizzes
            .borrow()
            .iter()
            .filter(|q| q.status != QuizStatus::Deleted)
            .filter(|q| filter.status().map_or(true, |s| q.status == s))
            .cloned()
            .collect())
    }

    fn get(&self, id: &str) -> Result<Quiz, QuizError> {
        self.record(format!("get {}", id));
        self.quizzes
            .borrow()
            .iter()
            .find(|q| q.id == id && q.status != QuizStatus::Deleted)
            .cloned()
            .ok_or_else(|| Self::not_found("fetching quiz"))
    }

    fn create(&self, quiz: &QuizCreate) -> Result<Quiz, QuizError> {
        self.record(format!("create {}", quiz.title));
        let id = format!("new-{}", self.quizzes.borrow().len());
        let mut created = crate::common::quiz(&id, QuizStatus::Draft);
        created.title = quiz.title.clone();
        created.description = quiz.description.clone();
        created.questions = quiz.questions.clone();
        self.quizzes.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn create_from_text(&self, text: &str, _suggested_title: Option<&str>) -> Result<Quiz, QuizError> {
        self.record(format!("from-text {}", text.len()));
        Ok(quiz("from-text", QuizStatus::Draft))
    }

    fn create_from_file(
        &self,
        _contents: &[u8],
        filename: &str,
        _suggested_title: Option<&str>,
    ) -> Result<Quiz, QuizError> {
        self.record(format!("from-file {}", filename));
        Ok(quiz("from-file", QuizStatus::Draft))
    }

    fn approve(&self, id: &str, recipients: &[String]) -> Result<Quiz, QuizError> {
        self.record(format!("approve {} {}", id, recipients.join(",")));
        let mut quizzes = self.quizzes.borrow_mut();
        let quiz = quizzes
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| Self::not_found("approving quiz"))?;
        quiz.status = QuizStatus::Approved;
        Ok(quiz.clone())
    }

    fn delete(&self, id: &str) -> Result<(), QuizError> {
        self.record(format!("delete {}", id));
        if self.failing_deletes.contains(id) {
            return Err(QuizError::Transport {
                action: "deleting quiz",
                status: Some(500),
                status_text: "Internal Server Error".to_string(),
            });
        }
        let mut quizzes = self.quizzes.borrow_mut();
        let quiz = quizzes
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| Self::not_found("deleting quiz"))?;
        quiz.status = QuizStatus::Deleted;
        Ok(())
    }

    fn form_questions(&self, form_id: &str) -> Result<Vec<Question>, QuizError> {
        self.record(format!("form {}", form_id));
        Ok(quiz(form_id, QuizStatus::Draft).questions)
    }
}
