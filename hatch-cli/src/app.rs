use std::time::{Duration, Instant};

use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hatch_core::{
    Action, ChatReply, ChatRouter, Profile, Role, SequenceDetector, Signal, Terminal,
};

use crate::session_log::SessionLogger;

/// How long the unlock quote stays on screen.
const QUOTE_DURATION: Duration = Duration::from_secs(5);

pub struct QuoteBanner {
    pub text: String,
    shown_at: Instant,
}

/// All mutable state of the host shell. Key events come in through
/// [`App::on_term_event`], chat replies through [`App::on_reply`].
pub struct App {
    pub detector: SequenceDetector,
    pub chat: Terminal,
    pub router: ChatRouter,
    pub profile: Profile,
    pub terminal_open: bool,
    pub input: String,
    pub progress: f64,
    pub quote: Option<QuoteBanner>,
    pub should_quit: bool,
    /// Spinner frame counter
    pub tick: usize,
    logger: Option<SessionLogger>,
}

impl App {
    pub fn new(
        detector: SequenceDetector,
        chat: Terminal,
        router: ChatRouter,
        profile: Profile,
        logger: Option<SessionLogger>,
    ) -> Self {
        Self {
            detector,
            chat,
            router,
            profile,
            terminal_open: false,
            input: String::new(),
            progress: 0.0,
            quote: None,
            should_quit: false,
            tick: 0,
            logger,
        }
    }

    pub fn on_term_event(&mut self, event: TermEvent) {
        let TermEvent::Key(key) = event else { return };
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.terminal_open {
            self.on_terminal_key(key, ctrl);
        } else {
            self.on_splash_key(key, ctrl);
        }
    }

    /// The splash owns the raw key stream: everything goes to the detector.
    fn on_splash_key(&mut self, key: KeyEvent, ctrl: bool) {
        if !ctrl && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }
        if let Some(token) = key_token(key.code) {
            let signals = self.detector.on_key(&token, ctrl, Instant::now());
            self.apply_signals(signals);
        }
    }

    /// While the pane is open, keys edit the input line. The toggle chord
    /// still goes through the detector so there is one source of truth.
    fn on_terminal_key(&mut self, key: KeyEvent, ctrl: bool) {
        if ctrl && key.code == KeyCode::Char('/') {
            let signals = self.detector.on_key("/", true, Instant::now());
            self.apply_signals(signals);
            return;
        }
        match key.code {
            KeyCode::Esc => self.close_terminal(),
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            _ => {}
        }
    }

    pub fn on_reply(&mut self, reply: ChatReply) {
        let before = self.chat.transcript().len();
        self.chat.resolve(reply.id, reply.result);
        self.log_new_outputs(before);
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if let Some(banner) = &self.quote
            && banner.shown_at.elapsed() >= QUOTE_DURATION
        {
            self.quote = None;
        }
    }

    fn apply_signals(&mut self, signals: Vec<Signal>) {
        for signal in signals {
            match signal {
                Signal::ToggleTerminal => {
                    if self.terminal_open {
                        self.close_terminal();
                    } else {
                        self.terminal_open = true;
                    }
                }
                Signal::Progress(ratio) => self.progress = ratio,
                Signal::ProgressCleared => self.progress = 0.0,
                Signal::Unlocked(quote) => {
                    tracing::info!("unlock sequence completed");
                    self.progress = 0.0;
                    if let Some(logger) = &mut self.logger {
                        logger.log_unlock(&quote);
                    }
                    self.quote = Some(QuoteBanner {
                        text: quote,
                        shown_at: Instant::now(),
                    });
                }
            }
        }
    }

    fn close_terminal(&mut self) {
        self.terminal_open = false;
        self.chat.close();
    }

    fn submit_input(&mut self) {
        let line = std::mem::take(&mut self.input);
        if line.trim().is_empty() {
            return;
        }
        if let Some(logger) = &mut self.logger {
            logger.log_input(&line);
        }
        let before = self.chat.transcript().len();
        match self.chat.submit(&line) {
            Action::None => {}
            Action::Close => self.close_terminal(),
            Action::Request(request) => self.router.dispatch(request),
        }
        self.log_new_outputs(before);
    }

    fn log_new_outputs(&mut self, from: usize) {
        let Some(logger) = &mut self.logger else {
            return;
        };
        for line in self.chat.transcript().iter().skip(from) {
            if line.role == Role::Output {
                logger.log_output(&line.text);
            }
        }
    }
}

/// Map a crossterm key to the symbolic token the detector matches on.
/// Keys with no token can never be part of a sequence.
fn key_token(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Up => Some("arrowup".into()),
        KeyCode::Down => Some("arrowdown".into()),
        KeyCode::Left => Some("arrowleft".into()),
        KeyCode::Right => Some("arrowright".into()),
        KeyCode::Enter => Some("enter".into()),
        KeyCode::Tab => Some("tab".into()),
        KeyCode::Backspace => Some("backspace".into()),
        KeyCode::Esc => Some("escape".into()),
        KeyCode::Char(c) => Some(c.to_ascii_lowercase().to_string()),
        _ => None,
    }
}
