use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

use autoquiz::quiz::{
    load_draft, parse_recipients, write_quiz, Dashboard, QuizFilter, QuizService,
};

use crate::cli::StatusArg;
use crate::summary::{print_questions, print_quiz, print_quiz_list};

pub fn run_list(service: &impl QuizService, status: StatusArg) -> Result<()> {
    let filter = match status {
        StatusArg::All => QuizFilter::All,
        StatusArg::Draft => QuizFilter::Draft,
        StatusArg::Approved => QuizFilter::Approved,
    };

    let mut dashboard = Dashboard::new();
    dashboard
        .set_filter(filter, service)
        .context("failed to load quizzes")?;
    print_quiz_list(dashboard.quizzes());
    Ok(())
}

pub fn run_show(service: &impl QuizService, id: &str) -> Result<()> {
    let quiz = service
        .get(id)
        .context(format!("could not find quiz with id {}", id))?;
    print_quiz(&quiz);
    Ok(())
}

pub fn run_create(service: &impl QuizService, path: &Path) -> Result<()> {
    let draft = load_draft(path)?;
    let quiz = draft
        .validate_for_submission()
        .context(format!("'{}' is not ready to submit", path.display()))?;

    let created = service.create(&quiz).context("failed to create quiz")?;
    println!("Quiz created successfully: {}", created.id);
    Ok(())
}

pub fn run_from_text(service: &impl QuizService, input: &str, title: Option<&str>) -> Result<()> {
    let text = if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read quiz text from stdin")?;
        text
    } else {
        fs::read_to_string(input).context(format!("failed to read '{}'", input))?
    };

    let created = service
        .create_from_text(&text, title)
        .context("failed to create quiz from text")?;
    println!("Quiz created successfully from text: {}", created.id);
    Ok(())
}

pub fn run_from_file(service: &impl QuizService, path: &Path, title: Option<&str>) -> Result<()> {
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| anyhow!("'{}' has no file name", path.display()))?;
    let contents = fs::read(path).context(format!("failed to read '{}'", path.display()))?;

    let created = service
        .create_from_file(&contents, filename, title)
        .context("failed to create quiz from file")?;
    println!("Quiz created successfully from file: {}", created.id);
    Ok(())
}

pub fn run_approve(service: &impl QuizService, id: &str, recipients: &str) -> Result<()> {
    let quiz = service
        .get(id)
        .context(format!("could not find quiz with id {}", id))?;
    if !quiz.can_approve() {
        bail!("quiz {} is {}, only draft quizzes can be approved", id, quiz.status);
    }

    let recipients = parse_recipients(recipients);
    let approved = service
        .approve(id, &recipients)
        .context("failed to approve quiz")?;
    println!(
        "Quiz approved and emails sent to {} recipient(s): {}",
        recipients.len(),
        approved.id
    );
    Ok(())
}

pub fn run_delete(service: &impl QuizService, ids: &[String]) -> Result<()> {
    let mut dashboard = Dashboard::new();
    dashboard.toggle_selection_mode();
    for id in ids {
        let quiz = service
            .get(id)
            .context(format!("could not find quiz with id {}", id))?;
        if !quiz.can_delete() {
            bail!("quiz {} is {}, it cannot be deleted", id, quiz.status);
        }
        if !dashboard.is_selected(id) {
            dashboard.toggle_selected(id);
        }
    }

    match dashboard.delete_selected(service) {
        Ok(count) => {
            println!("{} quizzes deleted successfully", count);
            Ok(())
        }
        Err(e) if dashboard.selected().is_empty() => {
            Err(anyhow::Error::new(e).context("quizzes deleted, but the list could not be refreshed"))
        }
        Err(e) => {
            let remaining = dashboard.selected().join(", ");
            Err(anyhow::Error::new(e)
                .context(format!("failed to delete quizzes, not deleted: {}", remaining)))
        }
    }
}

pub fn run_export(service: &impl QuizService, id: &str, output_dir: &Path) -> Result<()> {
    let quiz = service
        .get(id)
        .context(format!("could not find quiz with id {}", id))?;
    let path = write_quiz(&quiz, output_dir)?;
    info!(id, path = %path.display(), "quiz exported");
    println!("Quiz written to {}", path.display());
    Ok(())
}

pub fn run_form_questions(service: &impl QuizService, form_id: &str) -> Result<()> {
    let questions = service
        .form_questions(form_id)
        .context(format!("failed to read form {}", form_id))?;
    print_questions(&questions);
    Ok(())
}
