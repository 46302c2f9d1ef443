use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::draft::QuizDraft;
use super::model::{Quiz, QuizCreate};

/// Reads a quiz document (`.json`, `.yaml` or `.yml`) into an editable draft.
pub fn load_draft(path: &Path) -> Result<QuizDraft> {
    let content = fs::read_to_string(path)
        .context(format!("failed to read quiz document '{}'", path.display()))?;

    let quiz = parse_document(&content, path)?;
    Ok(QuizDraft::from(quiz))
}

fn parse_document(content: &str, path: &Path) -> Result<QuizCreate> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => serde_json::from_str(content)
            .context(format!("'{}' is not a valid quiz document", path.display())),
        Some("yaml") | Some("yml") => serde_yaml_ng::from_str(content)
            .context(format!("'{}' is not a valid quiz document", path.display())),
        _ => Err(anyhow::anyhow!(
            "unsupported quiz document '{}', expected .json, .yaml or .yml",
            path.display()
        )),
    }
}

fn serialize_quiz(quiz: &Quiz) -> Result<String> {
    serde_yaml_ng::to_string(&quiz.to_create()).context("failed to serialize quiz")
}

/// Writes `quiz` as `<output_dir>/<slugged title>.yaml`, refusing to
/// overwrite an existing file.
pub fn write_quiz(quiz: &Quiz, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).context(format!(
        "failed to create output directory '{}'",
        output_dir.display()
    ))?;

    let mut slugger = github_slugger::Slugger::default();
    let mut slug = slugger.slug(&quiz.title);
    if slug.is_empty() {
        slug = quiz.id.clone();
    }
    let path = output_dir.join(format!("{}.yaml", slug));

    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&path)
        .context(format!("failed to open file for {}", path.display()))?;

    let content = serialize_quiz(quiz)?;
    write!(file, "{}", content).context("failed to write quiz")?;

    Ok(path)
}
