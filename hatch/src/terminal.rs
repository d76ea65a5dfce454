use std::sync::Arc;

use crate::knowledge::LocalKnowledge;
use crate::provider::ProviderError;

const WELCOME: &[&str] = &["Welcome to AI Terminal v1.0", "Type \"help\" for available commands"];

const HELP_TEXT: &str = "Available commands:
- help: Show this help message
- clear: Clear terminal
- about: About this terminal
- chat [message]: Chat with AI
- exit: Close terminal";

const ABOUT_TEXT: &str =
    "AI Terminal v1.0 - An interactive terminal experience powered by ChatGPT";

const EMPTY_CHAT_PROMPT: &str = "Please provide a message after \"chat\"";

const BUSY_NOTICE: &str = "Still waiting on the previous reply. Try again in a moment.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Input,
    Output,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptLine {
    pub role: Role,
    pub text: String,
}

/// A chat message headed for the completion provider, tagged with the id the
/// reply must echo back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    pub id: u64,
    pub message: String,
}

/// What the host must do after a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond transcript updates.
    None,
    /// Hide the terminal.
    Close,
    /// Dispatch this message to the completion provider.
    Request(ChatRequest),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Idle,
    AwaitingReply(u64),
}

/// Line-oriented command interpreter with local-first chat resolution.
///
/// Sans-IO: `submit` never blocks. A remote round-trip is expressed as
/// `Action::Request` going out and a later `resolve` coming back in, so the
/// whole state machine is testable without a provider. One request may be in
/// flight at a time; submissions made meanwhile are rejected with a busy
/// notice rather than racing.
pub struct Terminal {
    knowledge: Arc<LocalKnowledge>,
    transcript: Vec<TranscriptLine>,
    mode: Mode,
    next_request: u64,
}

impl Terminal {
    pub fn new(knowledge: Arc<LocalKnowledge>) -> Self {
        let transcript = WELCOME
            .iter()
            .map(|text| TranscriptLine {
                role: Role::Output,
                text: text.to_string(),
            })
            .collect();
        Self {
            knowledge,
            transcript,
            mode: Mode::Idle,
            next_request: 0,
        }
    }

    /// Append-only session history, strictly in insertion order.
    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    pub fn awaiting_reply(&self) -> bool {
        matches!(self.mode, Mode::AwaitingReply(_))
    }

    /// Process one line of input.
    pub fn submit(&mut self, line: &str) -> Action {
        self.push(Role::Input, line);

        let command = line.trim().to_lowercase();

        if self.awaiting_reply() {
            // exit stays reachable while a request is outstanding.
            if command == "exit" {
                return Action::Close;
            }
            self.push(Role::Output, BUSY_NOTICE);
            return Action::None;
        }

        match command.as_str() {
            "help" => {
                self.push(Role::Output, HELP_TEXT);
                Action::None
            }
            "clear" => {
                self.transcript.clear();
                Action::None
            }
            "about" => {
                self.push(Role::Output, ABOUT_TEXT);
                Action::None
            }
            "exit" => Action::Close,
            _ if command == "chat" || command.starts_with("chat ") => {
                // Preserve the user's casing: slice the message out of the
                // trimmed original rather than the lowercased copy.
                let message = line.trim()[4..].trim();
                self.chat(message)
            }
            _ => {
                self.push(
                    Role::Output,
                    format!("Command not found: {line}. Type \"help\" for available commands."),
                );
                Action::None
            }
        }
    }

    fn chat(&mut self, message: &str) -> Action {
        if message.is_empty() {
            self.push(Role::Output, EMPTY_CHAT_PROMPT);
            return Action::None;
        }

        let knowledge = Arc::clone(&self.knowledge);
        if let Some(answer) = knowledge.lookup(message) {
            self.push(Role::Output, answer);
            return Action::None;
        }

        let id = self.next_request;
        self.next_request += 1;
        self.mode = Mode::AwaitingReply(id);
        tracing::info!(id, "chat message sent to completion provider");
        Action::Request(ChatRequest {
            id,
            message: message.to_string(),
        })
    }

    /// Feed back the outcome of a dispatched request. Replies whose id does
    /// not match the one in flight are dropped; this is how responses that
    /// arrive after `close` are discarded.
    pub fn resolve(&mut self, id: u64, result: Result<String, ProviderError>) {
        match self.mode {
            Mode::AwaitingReply(pending) if pending == id => {}
            _ => {
                tracing::warn!(id, "discarding stale chat reply");
                return;
            }
        }
        self.mode = Mode::Idle;

        match result {
            Ok(text) if text.is_empty() => self.push(Role::Output, "Error: No response from AI"),
            Ok(text) => self.push(Role::Output, text),
            Err(err) => {
                tracing::info!(status = err.http_status(), "chat request failed");
                let mut block = format!("Error: {err}");
                if let Some(details) = err.details() {
                    block.push('\n');
                    block.push_str(details);
                }
                self.push(Role::Output, block);
            }
        }
    }

    /// Host-driven close. Any in-flight request is abandoned; its reply will
    /// fail the id check in `resolve`. The transcript survives for reopen.
    pub fn close(&mut self) {
        self.mode = Mode::Idle;
    }

    fn push(&mut self, role: Role, text: impl Into<String>) {
        self.transcript.push(TranscriptLine {
            role,
            text: text.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Profile;

    fn terminal() -> Terminal {
        Terminal::new(Arc::new(LocalKnowledge::from_profile(&Profile::default())))
    }

    fn last_output(term: &Terminal) -> &str {
        term.transcript()
            .iter()
            .rev()
            .find(|l| l.role == Role::Output)
            .map(|l| l.text.as_str())
            .unwrap_or("")
    }

    #[test]
    fn starts_with_welcome_lines() {
        let term = terminal();
        assert_eq!(term.transcript().len(), 2);
        assert_eq!(term.transcript()[0].text, "Welcome to AI Terminal v1.0");
    }

    #[test]
    fn help_appends_command_list() {
        let mut term = terminal();
        assert_eq!(term.submit("help"), Action::None);
        assert!(last_output(&term).contains("- chat [message]: Chat with AI"));
    }

    #[test]
    fn commands_dispatch_case_insensitively() {
        let mut term = terminal();
        term.submit("  HELP  ");
        assert!(last_output(&term).starts_with("Available commands:"));
    }

    #[test]
    fn clear_empties_transcript_and_appends_nothing() {
        let mut term = terminal();
        term.submit("help");
        term.submit("clear");
        assert!(term.transcript().is_empty());
    }

    #[test]
    fn about_appends_description() {
        let mut term = terminal();
        term.submit("about");
        assert_eq!(last_output(&term), ABOUT_TEXT);
    }

    #[test]
    fn exit_closes_without_output() {
        let mut term = terminal();
        let before = term.transcript().len();
        assert_eq!(term.submit("exit"), Action::Close);
        // Only the input line was appended.
        assert_eq!(term.transcript().len(), before + 1);
        assert_eq!(term.transcript().last().unwrap().role, Role::Input);
    }

    #[test]
    fn unknown_command_reports_original_input() {
        let mut term = terminal();
        term.submit("make me a sandwich");
        assert_eq!(
            last_output(&term),
            "Command not found: make me a sandwich. Type \"help\" for available commands."
        );
    }

    #[test]
    fn chat_skills_is_answered_locally() {
        let mut term = terminal();
        let action = term.submit("chat skills");
        assert_eq!(action, Action::None);
        let answer = last_output(&term);
        assert!(answer.contains("Technical Skills:"));
        assert!(answer.contains("Leadership Experience:"));
        assert!(answer.contains("AI & Emerging Technologies:"));
    }

    #[test]
    fn empty_chat_message_prompts_instead_of_requesting() {
        let mut term = terminal();
        assert_eq!(term.submit("chat "), Action::None);
        assert_eq!(last_output(&term), EMPTY_CHAT_PROMPT);
        assert!(!term.awaiting_reply());
    }

    #[test]
    fn unmatched_chat_issues_one_request() {
        let mut term = terminal();
        let action = term.submit("chat tell me about the weather today");
        let request = match action {
            Action::Request(req) => req,
            other => panic!("expected request, got {other:?}"),
        };
        assert_eq!(request.message, "tell me about the weather today");
        assert!(term.awaiting_reply());

        term.resolve(request.id, Ok("sunny".to_string()));
        assert!(!term.awaiting_reply());
        assert_eq!(term.transcript().last().unwrap().text, "sunny");
    }

    #[test]
    fn chat_preserves_message_casing() {
        let mut term = terminal();
        match term.submit("Chat What Is Rust?") {
            Action::Request(req) => assert_eq!(req.message, "What Is Rust?"),
            other => panic!("expected request, got {other:?}"),
        }
    }

    #[test]
    fn submissions_while_awaiting_are_rejected_with_busy_notice() {
        let mut term = terminal();
        let first = match term.submit("chat what time is it") {
            Action::Request(req) => req,
            other => panic!("expected request, got {other:?}"),
        };
        assert_eq!(term.submit("chat another question"), Action::None);
        assert_eq!(last_output(&term), BUSY_NOTICE);

        // The original request still resolves normally.
        term.resolve(first.id, Ok("noon".to_string()));
        assert_eq!(term.transcript().last().unwrap().text, "noon");
    }

    #[test]
    fn exit_works_while_awaiting() {
        let mut term = terminal();
        term.submit("chat what time is it");
        assert_eq!(term.submit("exit"), Action::Close);
    }

    #[test]
    fn reply_after_close_is_discarded() {
        let mut term = terminal();
        let request = match term.submit("chat what time is it") {
            Action::Request(req) => req,
            other => panic!("expected request, got {other:?}"),
        };
        term.close();
        let before = term.transcript().len();
        term.resolve(request.id, Ok("too late".to_string()));
        assert_eq!(term.transcript().len(), before);
    }

    #[test]
    fn transcript_survives_close() {
        let mut term = terminal();
        term.submit("about");
        let len = term.transcript().len();
        term.close();
        assert_eq!(term.transcript().len(), len);
    }

    #[test]
    fn auth_error_renders_message_then_details() {
        let mut term = terminal();
        let request = match term.submit("chat what time is it") {
            Action::Request(req) => req,
            other => panic!("expected request, got {other:?}"),
        };
        term.resolve(
            request.id,
            Err(ProviderError::Auth {
                details: Some("Please provide a valid OpenAI API key".to_string()),
            }),
        );
        let block = last_output(&term);
        assert!(block.starts_with("Error: Authentication failed\n"));
        assert!(block.ends_with("Please provide a valid OpenAI API key"));
        assert!(!term.awaiting_reply());
    }

    #[test]
    fn rate_limit_error_renders_retry_notice() {
        let mut term = terminal();
        let request = match term.submit("chat what time is it") {
            Action::Request(req) => req,
            other => panic!("expected request, got {other:?}"),
        };
        term.resolve(request.id, Err(ProviderError::RateLimited));
        assert_eq!(
            last_output(&term),
            "Error: Rate limit exceeded. Please try again later."
        );
    }

    #[test]
    fn generic_error_renders_available_detail() {
        let mut term = terminal();
        let request = match term.submit("chat what time is it") {
            Action::Request(req) => req,
            other => panic!("expected request, got {other:?}"),
        };
        term.resolve(
            request.id,
            Err(ProviderError::Api {
                message: "Failed to get AI response".to_string(),
                details: Some("model overloaded".to_string()),
            }),
        );
        assert_eq!(
            last_output(&term),
            "Error: Failed to get AI response\nmodel overloaded"
        );
    }

    #[test]
    fn empty_reply_renders_fallback_error() {
        let mut term = terminal();
        let request = match term.submit("chat what time is it") {
            Action::Request(req) => req,
            other => panic!("expected request, got {other:?}"),
        };
        term.resolve(request.id, Ok(String::new()));
        assert_eq!(last_output(&term), "Error: No response from AI");
    }

    #[test]
    fn request_ids_are_never_reused() {
        let mut term = terminal();
        let first = match term.submit("chat one thing") {
            Action::Request(req) => req,
            other => panic!("expected request, got {other:?}"),
        };
        term.close();
        let second = match term.submit("chat another thing") {
            Action::Request(req) => req,
            other => panic!("expected request, got {other:?}"),
        };
        assert_ne!(first.id, second.id);

        // The abandoned reply cannot be mistaken for the new one.
        term.resolve(first.id, Ok("stale".to_string()));
        assert!(term.awaiting_reply());
    }
}
