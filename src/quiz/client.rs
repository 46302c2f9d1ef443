use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::QuizError;
use super::model::{EmailRecipients, Question, Quiz, QuizCreate, QuizFilter, QuizTextInput};
use crate::config::Config;

/// Operations of the remote quiz API used by the dashboard and the CLI.
pub trait QuizService {
    fn list(&self, filter: QuizFilter) -> Result<Vec<Quiz>, QuizError>;

    fn get(&self, id: &str) -> Result<Quiz, QuizError>;

    fn create(&self, quiz: &QuizCreate) -> Result<Quiz, QuizError>;

    /// Lets the service extract a quiz from free text.
    fn create_from_text(&self, text: &str, suggested_title: Option<&str>)
        -> Result<Quiz, QuizError>;

    /// Uploads a `.txt` or `.md` file for the service to extract a quiz from.
    fn create_from_file(
        &self,
        contents: &[u8],
        filename: &str,
        suggested_title: Option<&str>,
    ) -> Result<Quiz, QuizError>;

    /// Approves a draft and has the service email the form to `recipients`.
    fn approve(&self, id: &str, recipients: &[String]) -> Result<Quiz, QuizError>;

    fn delete(&self, id: &str) -> Result<(), QuizError>;

    /// Questions as they currently stand in the generated form.
    fn form_questions(&self, form_id: &str) -> Result<Vec<Question>, QuizError>;
}

/// Blocking HTTP implementation of [`QuizService`].
#[derive(Debug, Clone)]
pub struct QuizClient {
    agent: ureq::Agent,
    base_url: String,
}

impl QuizClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_url, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl QuizService for QuizClient {
    fn list(&self, filter: QuizFilter) -> Result<Vec<Quiz>, QuizError> {
        const ACTION: &str = "fetching quizzes";
        let mut request = self.agent.get(&self.url("/quizzes/"));
        if let Some(status) = filter.status() {
            request = request.query("status", status.as_str());
        }
        debug!(filter = ?filter, "listing quizzes");

        let response = request.call().map_err(|e| transport_error(ACTION, e))?;
        read_json(ACTION, response)
    }

    fn get(&self, id: &str) -> Result<Quiz, QuizError> {
        const ACTION: &str = "fetching quiz";
        debug!(id, "fetching quiz");

        let response = self
            .agent
            .get(&self.url(&format!("/quizzes/{}", path_segment(id))))
            .call()
            .map_err(|e| transport_error(ACTION, e))?;
        read_json(ACTION, response)
    }

    fn create(&self, quiz: &QuizCreate) -> Result<Quiz, QuizError> {
        const ACTION: &str = "creating quiz";
        debug!(title = %quiz.title, questions = quiz.questions.len(), "creating quiz");

        let response = self
            .agent
            .post(&self.url("/quizzes/"))
            .send_json(quiz)
            .map_err(|e| validation_error(ACTION, e))?;
        let created: Quiz = read_json(ACTION, response)?;

        info!(id = %created.id, "quiz created");
        Ok(created)
    }

    fn create_from_text(
        &self,
        text: &str,
        suggested_title: Option<&str>,
    ) -> Result<Quiz, QuizError> {
        const ACTION: &str = "creating quiz from text";
        if text.trim().is_empty() {
            return Err(QuizError::EmptyText);
        }
        let body = QuizTextInput {
            text,
            suggested_title: non_blank(suggested_title),
        };
        debug!(len = text.len(), "creating quiz from text");

        let response = self
            .agent
            .post(&self.url("/quizzes/from-text"))
            .send_json(&body)
            .map_err(|e| validation_error(ACTION, e))?;
        let created: Quiz = read_json(ACTION, response)?;

        info!(id = %created.id, "quiz created from text");
        Ok(created)
    }

    fn create_from_file(
        &self,
        contents: &[u8],
        filename: &str,
        suggested_title: Option<&str>,
    ) -> Result<Quiz, QuizError> {
        const ACTION: &str = "importing quiz";
        let content_type = upload_content_type(filename)?;

        let mut form = Multipart::new(contents);
        form.add_file("file", filename, content_type, contents);
        if let Some(title) = non_blank(suggested_title) {
            form.add_text("suggested_title", title);
        }
        debug!(filename, bytes = contents.len(), "uploading quiz file");

        let response = self
            .agent
            .post(&self.url("/quizzes/from-file"))
            .set("Content-Type", &form.content_type())
            .send_bytes(&form.finish())
            .map_err(|e| validation_error(ACTION, e))?;
        let created: Quiz = read_json(ACTION, response)?;

        info!(id = %created.id, filename, "quiz created from file");
        Ok(created)
    }

    fn approve(&self, id: &str, recipients: &[String]) -> Result<Quiz, QuizError> {
        const ACTION: &str = "approving quiz";
        let body = EmailRecipients {
            recipients: clean_recipients(recipients)?,
        };
        debug!(id, recipients = body.recipients.len(), "approving quiz");

        let response = self
            .agent
            .post(&self.url(&format!("/quizzes/{}/approve", path_segment(id))))
            .send_json(&body)
            .map_err(|e| validation_error(ACTION, e))?;
        let approved: Quiz = read_json(ACTION, response)?;

        info!(id, status = %approved.status, "quiz approved");
        Ok(approved)
    }

    fn delete(&self, id: &str) -> Result<(), QuizError> {
        const ACTION: &str = "deleting quiz";
        debug!(id, "deleting quiz");

        self.agent
            .delete(&self.url(&format!("/quizzes/{}", path_segment(id))))
            .call()
            .map_err(|e| transport_error(ACTION, e))?;

        info!(id, "quiz deleted");
        Ok(())
    }

    fn form_questions(&self, form_id: &str) -> Result<Vec<Question>, QuizError> {
        const ACTION: &str = "fetching form details";
        debug!(form_id, "fetching form questions");

        let response = self
            .agent
            .get(&self.url(&format!("/quizdetails/{}", path_segment(form_id))))
            .call()
            .map_err(|e| transport_error(ACTION, e))?;
        read_json(ACTION, response)
    }
}

/// Splits a comma-separated recipient list, dropping blank entries.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(String::from)
        .collect()
}

fn clean_recipients(recipients: &[String]) -> Result<Vec<String>, QuizError> {
    let cleaned: Vec<String> = recipients
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect();

    if cleaned.is_empty() {
        return Err(QuizError::NoRecipients);
    }
    Ok(cleaned)
}

/// Only plain text and markdown uploads are accepted by the service.
fn upload_content_type(filename: &str) -> Result<&'static str, QuizError> {
    if filename.ends_with(".txt") {
        Ok("text/plain")
    } else if filename.ends_with(".md") {
        Ok("text/markdown")
    } else {
        Err(QuizError::UnsupportedFile {
            filename: filename.to_string(),
        })
    }
}

/// Percent-encodes an id for use as a single URL path segment.
fn path_segment(id: &str) -> String {
    let mut encoded = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn read_json<T: DeserializeOwned>(action: &'static str, response: ureq::Response) -> Result<T, QuizError> {
    response
        .into_json()
        .map_err(|source| QuizError::Decode { action, source })
}

// Failures that only carry the status line.
fn transport_error(action: &'static str, err: ureq::Error) -> QuizError {
    let err = match err {
        ureq::Error::Status(code, response) => QuizError::Transport {
            action,
            status: Some(code),
            status_text: response.status_text().to_string(),
        },
        ureq::Error::Transport(transport) => QuizError::Transport {
            action,
            status: None,
            status_text: transport.to_string(),
        },
    };
    warn!(error = %err, "request failed");
    err
}

// Failures where the server explains itself in a JSON body.
fn validation_error(action: &'static str, err: ureq::Error) -> QuizError {
    let err = match err {
        ureq::Error::Status(code, response) => {
            let payload = response
                .into_string()
                .ok()
                .and_then(|body| serde_json::from_str::<Value>(&body).ok())
                .unwrap_or_else(|| Value::Object(Default::default()));
            QuizError::ServerValidation {
                action,
                status: code,
                payload: payload.to_string(),
            }
        }
        other => return transport_error(action, other),
    };
    warn!(error = %err, "request rejected");
    err
}

struct Multipart {
    boundary: String,
    body: Vec<u8>,
}

impl Multipart {
    fn new(contents: &[u8]) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let mut boundary = format!("autoquiz-{:x}", nanos);
        while contains(contents, boundary.as_bytes()) {
            boundary.push('x');
        }

        Self {
            boundary,
            body: Vec::with_capacity(contents.len() + 512),
        }
    }

    fn add_file(&mut self, name: &str, filename: &str, content_type: &str, contents: &[u8]) {
        let header = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            self.boundary,
            name,
            header_value(filename),
            content_type
        );
        self.body.extend_from_slice(header.as_bytes());
        self.body.extend_from_slice(contents);
        self.body.extend_from_slice(b"\r\n");
    }

    fn add_text(&mut self, name: &str, value: &str) {
        let part = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            self.boundary, name, value
        );
        self.body.extend_from_slice(part.as_bytes());
    }

    fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }
}

// Keeps a filename from breaking out of its part header.
fn header_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect::<String>()
        .replace('"', "%22")
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
