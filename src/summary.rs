use autoquiz::quiz::{Question, Quiz};
use chrono::{DateTime, NaiveDateTime};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub fn print_quiz_list(quizzes: &[Quiz]) {
    if quizzes.is_empty() {
        println!("No quizzes found");
        return;
    }

    for quiz in quizzes {
        println!(
            "{}  {:<8}  {}{}{}  ({}, created {})",
            quiz.id,
            quiz.status,
            BOLD,
            quiz.title,
            RESET,
            question_count(quiz.questions.len()),
            format_timestamp(&quiz.created_at, false)
        );
    }
}

pub fn print_quiz(quiz: &Quiz) {
    println!("{BOLD}{}{RESET} [{}]", quiz.title, quiz.status);
    println!("id: {}", quiz.id);
    println!("created: {}", format_timestamp(&quiz.created_at, true));
    println!("updated: {}", format_timestamp(&quiz.updated_at, true));
    if let Some(description) = &quiz.description {
        println!("\n{}", description);
    }
    match &quiz.form_url {
        Some(url) => println!("\nform: {}", url),
        None => println!("\nform: not generated"),
    }
    println!();
    print_questions(&quiz.questions);
}

pub fn print_questions(questions: &[Question]) {
    for (i, question) in questions.iter().enumerate() {
        println!("{}. {}", i + 1, question.text);
        for (j, option) in question.options.iter().enumerate() {
            let marker = if j == question.correct_answer_index {
                "*"
            } else {
                " "
            };
            println!("   {} {}) {}", marker, option_letter(j), option);
        }
    }
}

fn question_count(n: usize) -> String {
    if n == 1 {
        "1 question".to_string()
    } else {
        format!("{} questions", n)
    }
}

fn option_letter(index: usize) -> String {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i).to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

/// Formats an ISO-8601 timestamp as `Jan 1, 2023` (with the time when
/// `with_time` is set). Unparseable input is returned as is.
pub fn format_timestamp(raw: &str, with_time: bool) -> String {
    let pattern = if with_time {
        "%b %-d, %Y %-I:%M %p"
    } else {
        "%b %-d, %Y"
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(pattern).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format(pattern).to_string(),
        Err(_) => raw.to_string(),
    }
}
