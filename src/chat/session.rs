//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns conversation
//! state, the transport, and the transcript, and drives one streaming
//! request at a time through the accumulate/erase/render cycle.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use futures::StreamExt;

use crate::accumulator::StreamAccumulator;
use crate::chat::config::ChatConfig;
use crate::chat::transcript::Transcript;
use crate::client::CompletionTransport;
use crate::error::{Error, Result};
use crate::observability::{CHAT_IMPORTS, CHAT_TURN_ERRORS, CHAT_TURNS, STREAM_DURATION};
use crate::render::{BANNER_ROWS, Renderer};
use crate::repaint::Repaint;
use crate::types::{MessageParam, Model, ResponseCreateParams};
use crate::wrap::TerminalWidth;

/// A chat session that manages conversation state and API interactions.
///
/// The session maintains message history, issues at most one streaming
/// request at a time, and appends every turn to the transcript. It is
/// generic over the transport so tests can substitute a scripted fake.
pub struct ChatSession<T: CompletionTransport> {
    transport: T,
    config: ChatConfig,
    messages: Vec<MessageParam>,
    transcript: Transcript,
}

impl<T: CompletionTransport> ChatSession<T> {
    /// Creates a new chat session.
    ///
    /// The conversation opens with the configured system prompt.
    pub fn new(transport: T, config: ChatConfig, transcript: Transcript) -> Self {
        let messages = vec![MessageParam::system(config.system_prompt.clone())];
        Self {
            transport,
            config,
            messages,
            transcript,
        }
    }

    /// Returns the current model.
    pub fn model(&self) -> Model {
        self.config.model
    }

    /// Changes the model used for responses.
    pub fn set_model(&mut self, model: Model) {
        self.config.model = model;
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns the number of messages in the conversation, including the
    /// system prompt.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns the conversation history.
    pub fn messages(&self) -> &[MessageParam] {
        &self.messages
    }

    /// Returns the transcript path, if logging is enabled.
    pub fn transcript_path(&self) -> Option<&Path> {
        self.transcript.path()
    }

    /// Record one line of user input in the transcript.
    ///
    /// Every non-empty input line is recorded, slash commands included.
    pub fn record_user_input(&mut self, line: &str) -> Result<()> {
        self.transcript.user(line)
    }

    /// Read a local file and inject its contents as conversation context.
    ///
    /// The file lands in history as a user message carrying an
    /// `<Imported file ...>` header, and is recorded in the transcript.
    /// Failures leave the history untouched.
    pub fn import_file(&mut self, raw_path: &str) -> Result<PathBuf> {
        let path = expand_user(raw_path);
        if !path.is_file() {
            return Err(Error::not_found(format!(
                "File not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(&path)
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;

        self.messages.push(MessageParam::user(format!(
            "<Imported file {}>\n\n{}",
            path.display(),
            content
        )));
        CHAT_IMPORTS.click();
        self.transcript.import(&path, &content)?;
        Ok(path)
    }

    /// Sends a user message and streams the response.
    ///
    /// This method:
    /// 1. Adds the user message to history
    /// 2. Prints the thinking banner and streams raw fragments to stdout,
    ///    tracking the display rows they occupy
    /// 3. Erases the banner and raw output, then renders the formatted
    ///    answer in place
    /// 4. Adds the assistant response to history and logs the turn
    ///
    /// On interruption or transport failure the history is restored to its
    /// pre-turn state, an `[ERROR]` record is logged, and the raw partial
    /// output is left on screen as a trace; nothing is erased.
    pub async fn send_streaming(
        &mut self,
        user_input: &str,
        renderer: &mut dyn Renderer,
        repaint: &mut dyn Repaint,
        width: TerminalWidth,
        interrupted: &AtomicBool,
    ) -> Result<()> {
        CHAT_TURNS.click();
        let previous_len = self.messages.len();
        self.messages.push(MessageParam::user(user_input));

        let model = self.config.model;
        renderer.print_banner(&model);

        let started = Instant::now();
        let params = ResponseCreateParams::streaming(model, self.messages.clone());
        let mut stream = match self.transport.stream(params).await {
            Ok(stream) => stream,
            Err(err) => return Err(self.fail_turn(previous_len, err, renderer)),
        };

        let mut accumulator = StreamAccumulator::new(width);
        loop {
            if interrupted.load(Ordering::Relaxed) {
                renderer.print_interrupted();
                let err = Error::interrupted("response interrupted by user");
                return Err(self.fail_turn(previous_len, err, renderer));
            }
            match stream.next().await {
                Some(Ok(event)) => {
                    if let Some(text) = StreamAccumulator::display_text(&event) {
                        renderer.print_fragment(text);
                    }
                    accumulator.observe(&event);
                    if accumulator.is_complete() {
                        break;
                    }
                }
                Some(Err(err)) => return Err(self.fail_turn(previous_len, err, renderer)),
                None => break,
            }
        }
        STREAM_DURATION.add(started.elapsed().as_secs_f64());

        // Replace the raw streamed text with the formatted answer. The
        // erased rows are exactly what the accumulator saw written, plus
        // the banner.
        repaint.erase_lines(accumulator.display_rows() + BANNER_ROWS);
        let answer = accumulator.into_answer();
        renderer.print_answer(&model, &answer);

        self.messages.push(MessageParam::assistant(answer.clone()));
        if let Err(err) = self.transcript.assistant(&model, &answer) {
            renderer.print_error(&err.to_string());
        }
        Ok(())
    }

    /// Write the session-end marker and release the transcript.
    pub fn finish(self) -> Result<()> {
        self.transcript.close()
    }

    fn fail_turn(
        &mut self,
        previous_len: usize,
        err: Error,
        renderer: &mut dyn Renderer,
    ) -> Error {
        CHAT_TURN_ERRORS.click();
        self.messages.truncate(previous_len);
        let record = if err.is_remote() {
            format!("API Error: {err}")
        } else if err.is_interrupted() {
            err.to_string()
        } else {
            format!("Unexpected: {err}")
        };
        if let Err(log_err) = self.transcript.error(&record) {
            renderer.print_error(&log_err.to_string());
        }
        err
    }
}

fn expand_user(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicBool;

    use futures::stream;

    use crate::client::EventStream;
    use crate::types::{
        MessageRole, OutputTextDeltaEvent, OutputTextDoneEvent, Response, ResponseCompletedEvent,
        ResponseStreamEvent,
    };

    /// Transport that replays a scripted event sequence.
    struct FakeTransport {
        script: Mutex<Vec<Result<ResponseStreamEvent>>>,
    }

    impl FakeTransport {
        fn new(script: Vec<Result<ResponseStreamEvent>>) -> Self {
            Self {
                script: Mutex::new(script),
            }
        }
    }

    #[async_trait::async_trait]
    impl CompletionTransport for FakeTransport {
        async fn stream(&self, _params: ResponseCreateParams) -> Result<EventStream> {
            let script = std::mem::take(&mut *self.script.lock().unwrap());
            Ok(Box::pin(stream::iter(script)))
        }
    }

    /// Transport that fails before any event is produced.
    struct FailingTransport;

    #[async_trait::async_trait]
    impl CompletionTransport for FailingTransport {
        async fn stream(&self, _params: ResponseCreateParams) -> Result<EventStream> {
            Err(Error::rate_limit("too many requests", Some(30)))
        }
    }

    /// Renderer that records everything instead of printing.
    #[derive(Default)]
    struct RecordingRenderer {
        fragments: String,
        answers: Vec<String>,
        banners: usize,
        errors: Vec<String>,
        interruptions: usize,
    }

    impl Renderer for RecordingRenderer {
        fn print_fragment(&mut self, text: &str) {
            self.fragments.push_str(text);
        }

        fn print_banner(&mut self, _model: &Model) {
            self.banners += 1;
        }

        fn print_answer(&mut self, _model: &Model, answer: &str) {
            self.answers.push(answer.to_string());
        }

        fn print_info(&mut self, _info: &str) {}

        fn print_success(&mut self, _message: &str) {}

        fn print_error(&mut self, error: &str) {
            self.errors.push(error.to_string());
        }

        fn print_interrupted(&mut self) {
            self.interruptions += 1;
        }
    }

    /// Repaint that records the requested counts.
    #[derive(Default)]
    struct CountingRepaint {
        calls: Vec<usize>,
    }

    impl Repaint for CountingRepaint {
        fn erase_lines(&mut self, n: usize) {
            self.calls.push(n);
        }
    }

    fn delta(text: &str) -> Result<ResponseStreamEvent> {
        Ok(ResponseStreamEvent::OutputTextDelta(
            OutputTextDeltaEvent::new(text),
        ))
    }

    fn done(text: &str) -> Result<ResponseStreamEvent> {
        Ok(ResponseStreamEvent::OutputTextDone(
            OutputTextDoneEvent::new(text),
        ))
    }

    fn completed() -> Result<ResponseStreamEvent> {
        Ok(ResponseStreamEvent::Completed(ResponseCompletedEvent::new(
            Response::new("resp_1", Model::Gpt41Nano),
        )))
    }

    fn session_in(
        dir: &Path,
        script: Vec<Result<ResponseStreamEvent>>,
    ) -> ChatSession<FakeTransport> {
        let config = ChatConfig::new().with_log_dir(dir);
        let transcript = Transcript::create(dir, &config.model).unwrap();
        ChatSession::new(FakeTransport::new(script), config, transcript)
    }

    #[tokio::test]
    async fn successful_turn_updates_history_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(
            dir.path(),
            vec![
                Ok(ResponseStreamEvent::Created),
                delta("Hel"),
                delta("lo."),
                done("Hello."),
                completed(),
            ],
        );
        let log_path = session.transcript_path().unwrap().to_path_buf();
        let mut renderer = RecordingRenderer::default();
        let mut repaint = CountingRepaint::default();
        let interrupted = AtomicBool::new(false);

        session.record_user_input("hi there").unwrap();
        session
            .send_streaming(
                "hi there",
                &mut renderer,
                &mut repaint,
                TerminalWidth::new(80),
                &interrupted,
            )
            .await
            .unwrap();

        // system + user + assistant, in that order
        assert_eq!(session.message_count(), 3);
        assert_eq!(session.messages()[1].role, MessageRole::User);
        assert_eq!(session.messages()[1].content, "hi there");
        assert_eq!(session.messages()[2].role, MessageRole::Assistant);
        assert_eq!(session.messages()[2].content, "Hello.");

        assert_eq!(renderer.fragments, "Hello.");
        assert_eq!(renderer.answers, vec!["Hello.".to_string()]);

        let contents = fs::read_to_string(&log_path).unwrap();
        assert_eq!(contents.matches("You: hi there").count(), 1);
        assert_eq!(contents.matches("gpt-4.1-nano: Hello.").count(), 1);
        assert!(!contents.contains("[ERROR]"));
    }

    #[tokio::test]
    async fn erases_exactly_the_rows_written_plus_banner() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(
            dir.path(),
            vec![
                delta("Hello "),
                delta("World, "),
                delta("this is a test"),
                completed(),
            ],
        );
        let mut renderer = RecordingRenderer::default();
        let mut repaint = CountingRepaint::default();
        let interrupted = AtomicBool::new(false);

        session
            .send_streaming(
                "wrap please",
                &mut renderer,
                &mut repaint,
                TerminalWidth::new(10),
                &interrupted,
            )
            .await
            .unwrap();

        // 27 chars at width 10: 2 completed rows + 1 partial + 1 banner
        assert_eq!(repaint.calls, vec![2 + 1 + BANNER_ROWS]);
    }

    #[tokio::test]
    async fn transport_failure_restores_history_and_logs_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChatConfig::new();
        let transcript = Transcript::create(dir.path(), &config.model).unwrap();
        let log_path = transcript.path().unwrap().to_path_buf();
        let mut session = ChatSession::new(FailingTransport, config, transcript);
        let mut renderer = RecordingRenderer::default();
        let mut repaint = CountingRepaint::default();
        let interrupted = AtomicBool::new(false);

        let err = session
            .send_streaming(
                "hi",
                &mut renderer,
                &mut repaint,
                TerminalWidth::new(80),
                &interrupted,
            )
            .await
            .unwrap_err();

        assert!(err.is_rate_limit());
        // only the system prompt remains
        assert_eq!(session.message_count(), 1);
        assert!(repaint.calls.is_empty());

        let contents = fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("[ERROR] API Error: Rate limit exceeded"));
    }

    #[tokio::test]
    async fn mid_stream_failure_is_not_erased() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(
            dir.path(),
            vec![
                delta("partial "),
                Err(Error::streaming("connection reset", None)),
            ],
        );
        let mut renderer = RecordingRenderer::default();
        let mut repaint = CountingRepaint::default();
        let interrupted = AtomicBool::new(false);

        let err = session
            .send_streaming(
                "hi",
                &mut renderer,
                &mut repaint,
                TerminalWidth::new(80),
                &interrupted,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Streaming { .. }));
        assert_eq!(renderer.fragments, "partial ");
        assert!(repaint.calls.is_empty());
        assert_eq!(session.message_count(), 1);
    }

    #[tokio::test]
    async fn interruption_keeps_raw_output_and_restores_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path(), vec![delta("half an ans"), completed()]);
        let log_path = session.transcript_path().unwrap().to_path_buf();
        let mut renderer = RecordingRenderer::default();
        let mut repaint = CountingRepaint::default();
        let interrupted = AtomicBool::new(true);

        let err = session
            .send_streaming(
                "hi",
                &mut renderer,
                &mut repaint,
                TerminalWidth::new(80),
                &interrupted,
            )
            .await
            .unwrap_err();

        assert!(err.is_interrupted());
        assert_eq!(renderer.interruptions, 1);
        assert!(repaint.calls.is_empty());
        assert_eq!(session.message_count(), 1);

        let contents = fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("[ERROR] Interrupted:"));
    }

    #[tokio::test]
    async fn canonical_text_is_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(
            dir.path(),
            vec![delta("Hello, wor"), done("Hello, world!"), completed()],
        );
        let mut renderer = RecordingRenderer::default();
        let mut repaint = CountingRepaint::default();
        let interrupted = AtomicBool::new(false);

        session
            .send_streaming(
                "hi",
                &mut renderer,
                &mut repaint,
                TerminalWidth::new(80),
                &interrupted,
            )
            .await
            .unwrap();

        assert_eq!(renderer.answers, vec!["Hello, world!".to_string()]);
        assert_eq!(session.messages()[2].content, "Hello, world!");
    }

    #[test]
    fn import_missing_file_leaves_history_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path(), Vec::new());
        let missing = dir.path().join("notes.txt");

        let err = session
            .import_file(missing.to_str().unwrap())
            .unwrap_err();

        assert!(err.to_string().contains("File not found"));
        assert_eq!(session.message_count(), 1);
    }

    #[test]
    fn import_injects_content_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("notes.txt");
        let mut file = fs::File::create(&file_path).unwrap();
        writeln!(file, "remember the milk").unwrap();

        let mut session = session_in(dir.path(), Vec::new());
        let log_path = session.transcript_path().unwrap().to_path_buf();
        let imported = session.import_file(file_path.to_str().unwrap()).unwrap();

        assert_eq!(imported, file_path);
        assert_eq!(session.message_count(), 2);
        let message = &session.messages()[1];
        assert_eq!(message.role, MessageRole::User);
        assert!(message.content.starts_with("<Imported file "));
        assert!(message.content.contains("remember the milk"));

        let contents = fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("You imported"));
        assert!(contents.contains("remember the milk"));
    }

    #[test]
    fn set_model_switches_the_active_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path(), Vec::new());
        assert_eq!(session.model(), Model::Gpt41Nano);
        session.set_model(Model::O4Mini);
        assert_eq!(session.model(), Model::O4Mini);
    }
}
