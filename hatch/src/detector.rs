use std::time::{Duration, Instant};

use rand::seq::IndexedRandom;

/// The classic cheat-code arrows plus B A, lowercased for matching.
const DEFAULT_SEQUENCE: &[&str] = &[
    "arrowup",
    "arrowup",
    "arrowdown",
    "arrowdown",
    "arrowleft",
    "arrowright",
    "arrowleft",
    "arrowright",
    "b",
    "a",
];

const DEFAULT_QUOTES: &[&str] = &[
    "The best way to predict the future is to invent it. - Alan Kay",
    "Simplicity is the ultimate sophistication. - Leonardo da Vinci",
    "Code is like humor. When you have to explain it, it's bad. - Cory House",
    "AI is the new electricity. - Andrew Ng",
    "The future is already here – it's just not evenly distributed. - William Gibson",
];

/// Tunables and payload data for the detector. All of it is injected so the
/// matching logic can be tested against synthetic fixtures.
#[derive(Clone, Debug)]
pub struct DetectorConfig {
    /// Ordered key tokens that unlock the celebration, matched case-insensitively.
    pub sequence: Vec<String>,
    /// Key that toggles the hidden terminal when the modifier is held.
    pub toggle_key: String,
    /// Inactivity window after which partial progress is abandoned.
    pub window: Duration,
    /// Pool the unlock payload is drawn from, uniformly at random.
    pub quotes: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sequence: DEFAULT_SEQUENCE.iter().map(|s| s.to_string()).collect(),
            toggle_key: "/".to_string(),
            window: Duration::from_millis(2000),
            quotes: DEFAULT_QUOTES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Discrete signals the detector hands back to the host shell.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    /// Open or close the hidden terminal.
    ToggleTerminal,
    /// Fraction of the unlock sequence entered so far, in (0, 1].
    Progress(f64),
    /// Partial progress was abandoned (wrong key or inactivity).
    ProgressCleared,
    /// The full sequence was entered; payload is the celebration quote.
    Unlocked(String),
}

/// Recognizes the toggle chord and the unlock sequence in a stream of key
/// presses. Single-writer: all state lives here and is only touched by
/// [`SequenceDetector::on_key`], so replaying the same `(key, modifier, at)`
/// stream yields the same signals (modulo which quote is drawn).
pub struct SequenceDetector {
    config: DetectorConfig,
    expected: usize,
    last_key: Option<Instant>,
}

impl SequenceDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            expected: 0,
            last_key: None,
        }
    }

    /// Feed one key press. The chord is checked first and never advances
    /// sequence matching; unknown keys are ordinary mismatches.
    pub fn on_key(&mut self, key: &str, modifier: bool, at: Instant) -> Vec<Signal> {
        if modifier && key.eq_ignore_ascii_case(&self.config.toggle_key) {
            return vec![Signal::ToggleTerminal];
        }

        let mut signals = Vec::new();

        // Stale progress must not carry across a long pause.
        if let Some(last) = self.last_key
            && at.duration_since(last) > self.config.window
            && self.expected > 0
        {
            tracing::debug!("sequence progress expired after inactivity");
            self.expected = 0;
            signals.push(Signal::ProgressCleared);
        }

        let matched = self
            .config
            .sequence
            .get(self.expected)
            .is_some_and(|token| token.eq_ignore_ascii_case(key));

        if matched {
            self.expected += 1;
            signals.push(Signal::Progress(
                self.expected as f64 / self.config.sequence.len() as f64,
            ));
            if self.expected == self.config.sequence.len() {
                self.expected = 0;
                signals.push(Signal::Unlocked(self.pick_quote()));
            }
        } else if self.expected > 0 {
            self.expected = 0;
            signals.push(Signal::ProgressCleared);
        }

        self.last_key = Some(at);
        signals
    }

    fn pick_quote(&self) -> String {
        self.config
            .quotes
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_default()
    }
}
