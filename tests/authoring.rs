mod common;

use autoquiz::quiz::{DraftError, QuizDraft, QuizError, QuizService, QuizStatus};
use common::RecordingService;

fn submit(draft: &QuizDraft, service: &impl QuizService) -> Result<String, QuizError> {
    let quiz = draft.validate_for_submission()?;
    Ok(service.create(&quiz)?.id)
}

#[test]
fn invalid_draft_never_reaches_the_service() {
    let service = RecordingService::default();
    let mut draft = QuizDraft::new();
    draft.set_title("Capitals");
    draft.update_question_text(0, "Capital of France?").unwrap();
    draft.update_option(0, 1, "Lyon").unwrap();

    let err = submit(&draft, &service).unwrap_err();
    assert!(err.is_local());
    assert!(matches!(
        err,
        QuizError::Draft(DraftError::OptionRequired {
            question: 0,
            option: 0
        })
    ));
    assert_eq!(err.to_string(), "Option 1 for Question 1 is required");
    assert!(service.calls().is_empty());
}

#[test]
fn authored_quiz_is_created_as_draft() {
    let service = RecordingService::default();
    let mut draft = QuizDraft::new();
    draft.set_title("Capitals");
    draft.set_description("");
    draft.update_question_text(0, "Capital of France?").unwrap();
    draft.update_option(0, 0, "Paris").unwrap();
    draft.update_option(0, 1, "Lyon").unwrap();
    draft.add_question();
    draft.update_question_text(1, "Capital of Italy?").unwrap();
    draft.update_option(1, 0, "Milan").unwrap();
    draft.update_option(1, 1, "Rome").unwrap();
    draft.update_correct_answer_index(1, 1).unwrap();

    let id = submit(&draft, &service).unwrap();
    let created = service.get(&id).unwrap();
    assert_eq!(created.status, QuizStatus::Draft);
    assert_eq!(created.description, None);
    assert_eq!(created.questions.len(), 2);
    assert_eq!(created.questions[1].correct_answer(), Some("Rome"));
    assert!(created.can_approve());

    let approved = service.approve(&id, &["a@example.com".to_string()]).unwrap();
    assert!(!approved.can_approve());
    assert!(approved.can_delete());
}
