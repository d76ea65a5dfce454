use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};

use hatch_core::Role;

use crate::app::App;
use crate::theme;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::SCREEN)),
        area,
    );

    let [content, gauge_row, hint_row] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_splash(frame, app, content);
    if app.progress > 0.0 {
        draw_progress(frame, app, gauge_row);
    }
    draw_hints(frame, app, hint_row);

    if app.terminal_open {
        draw_terminal_pane(frame, app, content);
    }
    if let Some(banner) = &app.quote {
        draw_quote(frame, &banner.text, area);
    }
}

fn draw_splash(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::styled(app.profile.name.clone(), theme::headline()),
        Line::styled(app.profile.role.clone(), theme::subtitle()),
        Line::default(),
        Line::styled(app.profile.links.github.clone(), theme::hint()),
        Line::styled(app.profile.links.linkedin.clone(), theme::hint()),
    ];

    // Vertically center the block.
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let [_, centered, _] = Layout::vertical([
        Constraint::Length(top),
        Constraint::Length(lines.len() as u16),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
}

fn draw_progress(frame: &mut Frame, app: &App, area: Rect) {
    let gauge = Gauge::default()
        .gauge_style(theme::gauge())
        .ratio(app.progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", app.progress * 100.0));
    frame.render_widget(gauge, area);
}

fn draw_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hint = if app.terminal_open {
        "enter send · esc close · ctrl+/ toggle"
    } else {
        "ctrl+/ terminal · q quit"
    };
    frame.render_widget(
        Paragraph::new(hint)
            .style(theme::hint())
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_terminal_pane(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(4).min(64);
    let height = area.height.saturating_sub(2).min(18);
    if width < 20 || height < 6 {
        return;
    }
    let pane = Rect {
        x: area.x + area.width.saturating_sub(width + 2),
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    };

    frame.render_widget(Clear, pane);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::pane_chrome())
        .title(Span::styled(" AI Terminal v1.0 ", theme::pane_chrome()));
    let inner = block.inner(pane);
    frame.render_widget(block, pane);

    let [history, input_row] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let mut lines: Vec<Line> = Vec::new();
    for entry in app.chat.transcript() {
        match entry.role {
            Role::Input => lines.push(Line::styled(
                format!("{} {}", theme::PROMPT_CHAR, entry.text),
                theme::input_line(),
            )),
            Role::Output => {
                for part in entry.text.lines() {
                    lines.push(Line::styled(part.to_string(), theme::output_line()));
                }
            }
        }
    }
    if app.chat.awaiting_reply() {
        lines.push(Line::styled("Processing...", theme::processing()));
    }

    // Show the tail that fits.
    let skip = lines.len().saturating_sub(history.height as usize);
    frame.render_widget(Paragraph::new(lines[skip..].to_vec()), history);

    let input = Line::from(vec![
        Span::styled(format!("{} ", theme::PROMPT_CHAR), theme::output_line()),
        Span::styled(app.input.clone(), theme::output_line()),
        Span::styled("█", theme::processing()),
    ]);
    frame.render_widget(Paragraph::new(input), input_row);
}

fn draw_quote(frame: &mut Frame, quote: &str, area: Rect) {
    let width = area.width.saturating_sub(8).min(52);
    if width < 16 {
        return;
    }
    let text_width = (width - 4) as usize;
    let quote_rows = quote.chars().count().div_ceil(text_width) as u16 + 1;
    let height = (quote_rows + 4).min(area.height);

    let pane = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, pane);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::banner());
    let inner = block.inner(pane);
    frame.render_widget(block, pane);

    let mut lines = vec![
        Line::styled("* Easter Egg Found! *", theme::banner()),
        Line::default(),
    ];
    lines.push(Line::styled(format!("\"{quote}\""), theme::banner_quote()));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
