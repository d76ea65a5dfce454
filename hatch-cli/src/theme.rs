use ratatui::style::{Color, Modifier, Style};

// ── Phosphor greens on near-black, after the web original's terminal pane ──
pub const SCREEN: Color = Color::Rgb(8, 10, 8);
pub const PHOSPHOR: Color = Color::Rgb(74, 222, 128);
pub const PHOSPHOR_DIM: Color = Color::Rgb(52, 140, 82);
pub const PHOSPHOR_FAINT: Color = Color::Rgb(30, 84, 50);

// ── Accent ─────────────────────────────────────────────────────────
pub const STAR: Color = Color::Rgb(250, 204, 21);

// ── Character constants ────────────────────────────────────────────
pub const PROMPT_CHAR: &str = ">";

// ── Style helpers ──────────────────────────────────────────────────

/// Owner name on the splash
pub fn headline() -> Style {
    Style::default().fg(PHOSPHOR).add_modifier(Modifier::BOLD)
}

/// Role line and other secondary splash text
pub fn subtitle() -> Style {
    Style::default().fg(PHOSPHOR_DIM)
}

/// Key hints and other chrome
pub fn hint() -> Style {
    Style::default().fg(PHOSPHOR_FAINT)
}

/// User-typed transcript lines
pub fn input_line() -> Style {
    Style::default().fg(PHOSPHOR_DIM)
}

/// Terminal output lines
pub fn output_line() -> Style {
    Style::default().fg(PHOSPHOR)
}

/// Pulsing "Processing..." indicator
pub fn processing() -> Style {
    Style::default().fg(PHOSPHOR_FAINT).add_modifier(Modifier::ITALIC)
}

/// Terminal pane border and title
pub fn pane_chrome() -> Style {
    Style::default().fg(PHOSPHOR_DIM)
}

/// Unlock celebration banner
pub fn banner() -> Style {
    Style::default().fg(STAR).add_modifier(Modifier::BOLD)
}

/// Quote text inside the banner
pub fn banner_quote() -> Style {
    Style::default().fg(PHOSPHOR).add_modifier(Modifier::ITALIC)
}

/// Sequence progress gauge
pub fn gauge() -> Style {
    Style::default().fg(PHOSPHOR).bg(SCREEN)
}
