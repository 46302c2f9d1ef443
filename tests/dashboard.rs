mod common;

use autoquiz::quiz::{Dashboard, QuizError, QuizFilter, QuizStatus};
use common::{quiz, RecordingService};

fn service() -> RecordingService {
    RecordingService::with_quizzes(vec![
        quiz("a", QuizStatus::Draft),
        quiz("b", QuizStatus::Approved),
        quiz("c", QuizStatus::Draft),
    ])
}

fn loaded(service: &RecordingService) -> Dashboard {
    let mut dashboard = Dashboard::new();
    dashboard.refresh(service).unwrap();
    dashboard
}

fn ids(dashboard: &Dashboard) -> Vec<&str> {
    dashboard.quizzes().iter().map(|q| q.id.as_str()).collect()
}

#[test]
fn starts_idle_on_all() {
    let dashboard = Dashboard::new();
    assert_eq!(dashboard.filter(), QuizFilter::All);
    assert!(!dashboard.selection_mode());
    assert!(dashboard.selected().is_empty());
    assert!(dashboard.quizzes().is_empty());
}

#[test]
fn set_filter_refetches_for_the_new_filter() {
    let service = service();
    let mut dashboard = loaded(&service);
    assert_eq!(ids(&dashboard), vec!["a", "b", "c"]);

    dashboard.set_filter(QuizFilter::Draft, &service).unwrap();
    assert_eq!(dashboard.filter(), QuizFilter::Draft);
    assert_eq!(ids(&dashboard), vec!["a", "c"]);
    assert_eq!(service.calls(), vec!["list All", "list Draft"]);
}

#[test]
fn set_filter_clears_selection_and_mode() {
    let service = service();
    let mut dashboard = loaded(&service);
    dashboard.toggle_selection_mode();
    dashboard.select_all();
    assert_eq!(dashboard.selected().len(), 3);

    dashboard.set_filter(QuizFilter::Approved, &service).unwrap();
    assert!(!dashboard.selection_mode());
    assert!(dashboard.selected().is_empty());
    assert_eq!(ids(&dashboard), vec!["b"]);
}

#[test]
fn set_filter_resets_selection_even_when_fetch_fails() {
    let service = service();
    let mut dashboard = loaded(&service);
    dashboard.toggle_selection_mode();
    dashboard.toggle_selected("a");

    service.fail_list.set(true);
    let err = dashboard
        .set_filter(QuizFilter::Approved, &service)
        .unwrap_err();
    assert!(matches!(err, QuizError::Transport { status: Some(500), .. }));
    assert!(!dashboard.selection_mode());
    assert!(dashboard.selected().is_empty());
    // previous listing is kept
    assert_eq!(ids(&dashboard), vec!["a", "b", "c"]);
}

#[test]
fn toggling_selection_mode_off_clears_selection() {
    let service = service();
    let mut dashboard = loaded(&service);

    dashboard.toggle_selection_mode();
    assert!(dashboard.selection_mode());
    dashboard.toggle_selected("b");
    dashboard.toggle_selection_mode();
    assert!(!dashboard.selection_mode());
    assert!(dashboard.selected().is_empty());

    dashboard.toggle_selection_mode();
    assert!(dashboard.selected().is_empty());
}

#[test]
fn toggle_selected_adds_and_removes() {
    let mut dashboard = Dashboard::new();
    dashboard.toggle_selection_mode();
    dashboard.toggle_selected("a");
    dashboard.toggle_selected("b");
    assert!(dashboard.is_selected("a"));
    assert_eq!(dashboard.selected(), ["a", "b"]);

    dashboard.toggle_selected("a");
    assert!(!dashboard.is_selected("a"));
    assert_eq!(dashboard.selected(), ["b"]);
}

#[test]
fn select_all_takes_displayed_quizzes() {
    let service = service();
    let mut dashboard = Dashboard::new();
    dashboard.set_filter(QuizFilter::Draft, &service).unwrap();
    dashboard.toggle_selection_mode();
    dashboard.toggle_selected("b");

    dashboard.select_all();
    assert_eq!(dashboard.selected(), ["a", "c"]);
}

#[test]
fn empty_selection_makes_no_request() {
    let service = service();
    let mut dashboard = loaded(&service);
    dashboard.toggle_selection_mode();

    let err = dashboard.delete_selected(&service).unwrap_err();
    assert!(matches!(err, QuizError::EmptySelection));
    assert!(err.is_local());
    assert_eq!(service.calls(), vec!["list All"]);
    assert!(dashboard.selection_mode());
}

#[test]
fn delete_selected_runs_sequentially_and_returns_to_idle() {
    let service = service();
    let mut dashboard = loaded(&service);
    dashboard.toggle_selection_mode();
    dashboard.toggle_selected("c");
    dashboard.toggle_selected("a");

    assert_eq!(dashboard.delete_selected(&service).unwrap(), 2);
    assert_eq!(
        service.calls(),
        vec!["list All", "delete c", "delete a", "list All"]
    );
    assert!(!dashboard.selection_mode());
    assert!(dashboard.selected().is_empty());
    assert_eq!(ids(&dashboard), vec!["b"]);
}

#[test]
fn delete_selected_stops_at_first_failure() {
    let service = service().failing_delete("b");
    let mut dashboard = loaded(&service);
    dashboard.toggle_selection_mode();
    dashboard.select_all();

    let err = dashboard.delete_selected(&service).unwrap_err();
    assert!(matches!(err, QuizError::Transport { .. }));
    assert_eq!(service.deletes(), vec!["a", "b"]);
    assert_eq!(dashboard.selected(), ["b", "c"]);
    assert!(dashboard.selection_mode());
    // no refresh after a failed bulk delete
    assert_eq!(service.calls().last().map(String::as_str), Some("delete b"));
    assert_eq!(service.quizzes.borrow()[0].status, QuizStatus::Deleted);
    assert_eq!(service.quizzes.borrow()[2].status, QuizStatus::Draft);
}
