use tracing::{debug, info, warn};

use super::client::QuizService;
use super::error::QuizError;
use super::model::{Quiz, QuizFilter};

/// The quiz listing: current filter, fetched quizzes and the bulk
/// selection workflow.
///
/// Leaving selection mode or switching filter always empties the selection.
#[derive(Debug, Default)]
pub struct Dashboard {
    filter: QuizFilter,
    quizzes: Vec<Quiz>,
    selection_mode: bool,
    // insertion ordered, no duplicates
    selected: Vec<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> QuizFilter {
        self.filter
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Re-fetches the quizzes for the current filter. The previous list is
    /// kept if the request fails.
    pub fn refresh(&mut self, service: &impl QuizService) -> Result<(), QuizError> {
        let quizzes = service.list(self.filter)?;
        debug!(filter = ?self.filter, count = quizzes.len(), "quizzes refreshed");
        self.quizzes = quizzes;
        Ok(())
    }

    pub fn set_filter(
        &mut self,
        filter: QuizFilter,
        service: &impl QuizService,
    ) -> Result<(), QuizError> {
        self.filter = filter;
        self.selected.clear();
        self.selection_mode = false;
        self.refresh(service)
    }

    pub fn toggle_selection_mode(&mut self) {
        self.selection_mode = !self.selection_mode;
        if !self.selection_mode {
            self.selected.clear();
        }
    }

    pub fn toggle_selected(&mut self, id: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.quizzes.iter().map(|q| q.id.clone()).collect();
    }

    /// Deletes every selected quiz, one request at a time, in selection
    /// order. Stops at the first failure; quizzes deleted before it stay
    /// deleted and leave the selection, the rest remain selected.
    ///
    /// Returns the number of quizzes deleted.
    pub fn delete_selected(&mut self, service: &impl QuizService) -> Result<usize, QuizError> {
        if self.selected.is_empty() {
            return Err(QuizError::EmptySelection);
        }

        let total = self.selected.len();
        while let Some(id) = self.selected.first() {
            if let Err(e) = service.delete(id) {
                warn!(
                    id = %id,
                    deleted = total - self.selected.len(),
                    remaining = self.selected.len(),
                    "bulk delete stopped"
                );
                return Err(e);
            }
            self.selected.remove(0);
        }

        info!(count = total, "quizzes deleted");
        self.selection_mode = false;
        self.refresh(service)?;
        Ok(total)
    }
}
