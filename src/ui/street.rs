use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// The current street, shown under (or instead of) the gallery.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.store().state();
    let current = state.current_street.as_deref().map(|id| {
        state
            .gallery
            .streets
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.display_name().to_string())
            .unwrap_or_else(|| id.to_string())
    });

    let mut lines = vec![Line::from("")];
    match current {
        Some(name) => lines.push(Line::from(vec![
            Span::styled("Current street: ", Style::default().fg(Color::DarkGray)),
            Span::styled(name, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ])),
        None => lines.push(Line::from(Span::styled(
            "No street open. Press g to browse the gallery.",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    if app.is_signed_in() {
        lines.push(Line::from(Span::styled(
            "Press m for your own streets.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Street "),
        );
    frame.render_widget(body, area);
}
