use crate::gallery::controller::{GalleryItem, GalleryLabel, GalleryPanel, OwnerLinks};
use crate::gallery::GalleryContent;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const BUTTONS_WIDTH: u16 = 24;

pub fn render(content: &GalleryContent, list_state: &mut ListState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Gallery ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match content {
        GalleryContent::SignInPromo { sign_in_url } => {
            let promo = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Sign in with Twitter for your personal street gallery",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*sign_in_url, Style::default().fg(Color::DarkGray))),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(promo, inner);
        }
        GalleryContent::Loading => {
            let loading = Paragraph::new("Loading…")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
        }
        GalleryContent::Error { .. } => {
            let error = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Failed to load the gallery.",
                    Style::default().fg(Color::Red),
                )),
                Line::from(vec![
                    Span::styled("r", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                    Span::raw(" Try again"),
                ]),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(error, inner);
        }
        GalleryContent::Gallery(panel) => render_panel(panel, list_state, frame, inner),
    }
}

fn render_panel(panel: &GalleryPanel, list_state: &mut ListState, frame: &mut Frame, area: Rect) {
    let header_height = if panel.street_count.is_some() { 2 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(1)])
        .split(area);

    let mut header = vec![label_line(&panel.label)];
    if let Some(count) = &panel.street_count {
        header.push(Line::from(Span::styled(
            count.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(header), chunks[0]);

    // Owners get a column of buttons next to the list
    let list_area = match (&panel.owner_links, panel.full_width) {
        (Some(links), false) => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(BUTTONS_WIDTH), Constraint::Min(10)])
                .split(chunks[1]);
            render_owner_links(links, frame, columns[0]);
            columns[1]
        }
        _ => chunks[1],
    };

    let width = list_area.width.saturating_sub(2) as usize;
    let rows: Vec<ListItem> = panel.items.iter().map(|item| street_row(item, width)).collect();
    let list = List::new(rows).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_stateful_widget(list, list_area, list_state);
}

fn label_line(label: &GalleryLabel) -> Line<'_> {
    match label {
        GalleryLabel::User { user_id, profile_url } => Line::from(vec![
            Span::styled(avatar(user_id), Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" "),
            Span::styled(user_id.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  Twitter profile » {}", profile_url),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        GalleryLabel::AllStreets => Line::from(Span::styled(
            "All streets",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    }
}

/// Single-letter stand-in for the user's picture.
fn avatar(user_id: &str) -> String {
    let initial = user_id.chars().next().map_or('?', |c| c.to_ascii_uppercase());
    format!(" {} ", initial)
}

fn render_owner_links(links: &OwnerLinks, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let buttons = Paragraph::new(vec![
        Line::from(vec![Span::styled("n", key_style), Span::raw(" Create new street")]),
        Line::from(Span::styled(format!("  {}", links.new_street), Style::default().fg(Color::DarkGray))),
        Line::from(vec![Span::styled("c", key_style), Span::raw(" Make a copy")]),
        Line::from(Span::styled(
            format!("  {}", links.copy_last_street),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(buttons, area);
}

fn street_row(item: &GalleryItem, width: usize) -> ListItem<'static> {
    let street = &item.street;
    let date = street
        .updated_at
        .map(|t| t.format("%b %-d, %Y").to_string())
        .unwrap_or_default();
    let creator = street.creator_id.as_deref().unwrap_or("anonymous");
    let meta = format!("  {}  {}", creator, date);
    let name_width = width.saturating_sub(meta.width() + 2);

    let (marker, name_style) = if item.selected {
        ("▸ ", Style::default().fg(Color::White).bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default())
    };

    ListItem::new(Line::from(vec![
        Span::styled(marker, name_style),
        Span::styled(truncate_width(street.display_name(), name_width), name_style),
        Span::styled(meta, Style::default().fg(Color::DarkGray)),
    ]))
}

/// Truncate to `max_width` display columns, adding "…" if truncated.
pub fn truncate_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}
