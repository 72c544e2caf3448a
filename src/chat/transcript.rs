//! Per-session transcript logging.
//!
//! Every session appends to one flat, human-readable text file named after
//! the session start time. The file records a start marker, the model, each
//! turn as a `You:`/`<model>:` pair (or an `[ERROR]` record), imports, and
//! an end marker. Writes are flushed after every turn so the transcript is
//! current if the process dies.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::error::{Error, Result};
use crate::types::Model;

/// Append-only transcript of one chat session.
///
/// A transcript can be disabled (no backing file), in which case every
/// write is a successful no-op; the session carries on without logging.
pub struct Transcript {
    file: Option<File>,
    path: Option<PathBuf>,
}

impl Transcript {
    /// Create a transcript file under `dir`, named after the current time.
    ///
    /// The directory is created if missing. The header records the session
    /// start and the active model.
    pub fn create(dir: &Path, model: &Model) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|err| {
            Error::io(format!("failed to create log directory {}", dir.display()), err)
        })?;

        let started = now();
        let stamp_format =
            format_description!("[year][month][day]-[hour][minute][second]");
        let stamp = started
            .format(&stamp_format)
            .map_err(|err| Error::encoding("failed to format timestamp", Some(Box::new(err))))?;
        let path = dir.join(format!("chat_{stamp}.txt"));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| {
                Error::io(format!("failed to open log file {}", path.display()), err)
            })?;

        let header_time = rfc3339(&started);
        writeln!(file, "Chat session started {header_time}")
            .and_then(|_| writeln!(file, "Model: {model}"))
            .and_then(|_| writeln!(file))
            .map_err(|err| {
                Error::io(format!("failed to write log header to {}", path.display()), err)
            })?;

        Ok(Self {
            file: Some(file),
            path: Some(path),
        })
    }

    /// A transcript that records nothing.
    pub fn disabled() -> Self {
        Self {
            file: None,
            path: None,
        }
    }

    /// The path of the backing file, if logging is enabled.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn write(&mut self, record: &str) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        file.write_all(record.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|err| Error::io("failed to write transcript record", err))
    }

    /// Record one line of user input.
    pub fn user(&mut self, input: &str) -> Result<()> {
        self.write(&format!("You: {input}\n"))
    }

    /// Record the assistant's answer for a turn.
    pub fn assistant(&mut self, model: &Model, answer: &str) -> Result<()> {
        self.write(&format!("{model}: {answer}\n\n"))
    }

    /// Record an imported file and its contents.
    pub fn import(&mut self, path: &Path, content: &str) -> Result<()> {
        self.write(&format!("You imported {}:\n{content}\n\n", path.display()))
    }

    /// Record a turn-level error.
    pub fn error(&mut self, message: &str) -> Result<()> {
        self.write(&format!("[ERROR] {message}\n\n"))
    }

    /// Write the session-end marker and close the file.
    pub fn close(mut self) -> Result<()> {
        let ended = rfc3339(&now());
        self.write(&format!("\nChat session ended {ended}\n"))
    }
}

fn now() -> OffsetDateTime {
    // UTC throughout: the local offset is not reliably determinable once
    // the runtime has spawned threads.
    OffsetDateTime::now_utc()
}

fn rfc3339(datetime: &OffsetDateTime) -> String {
    datetime
        .format(&Rfc3339)
        .unwrap_or_else(|_| datetime.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_a_full_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut transcript = Transcript::create(dir.path(), &Model::Gpt41Nano).unwrap();
        let path = transcript.path().unwrap().to_path_buf();

        transcript.user("hello").unwrap();
        transcript.assistant(&Model::Gpt41Nano, "hi there").unwrap();
        transcript.error("Rate limit exceeded: slow down").unwrap();
        transcript.close().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Chat session started "));
        assert!(contents.contains("Model: gpt-4.1-nano"));
        assert!(contents.contains("You: hello\n"));
        assert!(contents.contains("gpt-4.1-nano: hi there\n"));
        assert!(contents.contains("[ERROR] Rate limit exceeded: slow down\n"));
        assert!(contents.contains("Chat session ended "));
    }

    #[test]
    fn file_name_carries_the_chat_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = Transcript::create(dir.path(), &Model::O4Mini).unwrap();
        let name = transcript
            .path()
            .unwrap()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .to_string();
        assert!(name.starts_with("chat_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn import_records_path_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut transcript = Transcript::create(dir.path(), &Model::Gpt41).unwrap();
        let path = transcript.path().unwrap().to_path_buf();

        transcript
            .import(Path::new("notes.txt"), "line one\nline two")
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("You imported notes.txt:\nline one\nline two\n"));
    }

    #[test]
    fn disabled_transcript_accepts_writes() {
        let mut transcript = Transcript::disabled();
        assert!(transcript.path().is_none());
        transcript.user("hello").unwrap();
        transcript.assistant(&Model::Gpt41Nano, "hi").unwrap();
        transcript.close().unwrap();
    }

    #[test]
    fn creates_the_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let transcript = Transcript::create(&nested, &Model::Gpt41Nano).unwrap();
        assert!(transcript.path().unwrap().starts_with(&nested));
    }
}
