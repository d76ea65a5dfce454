use crossterm::event::Event as TermEvent;
use hatch_core::ChatReply;

/// Unified event type for the main loop.
pub enum AppEvent {
    Term(TermEvent),
    Reply(ChatReply),
    Tick,
}
