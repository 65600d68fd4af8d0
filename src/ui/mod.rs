mod gallery;
mod street;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const GALLERY_HEIGHT: u16 = 14;

/// Top-level render dispatch.
pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let main = chunks[0];
    match app.content().cloned() {
        Some(content) => {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(GALLERY_HEIGHT), Constraint::Min(3)])
                .split(main);
            gallery::render(&content, &mut app.list_state, frame, split[0]);
            street::render(app, frame, split[1]);
        }
        None => street::render(app, frame, main),
    }

    render_status_bar(app, frame, chunks[1]);

    // Dialog goes on top of everything else
    app.dialogs().render(frame);
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (key, label) in [
        (" g", " Gallery  "),
        ("m", " My streets  "),
        ("↑↓", " Select  "),
        ("a", " About  "),
        ("i", " Image  "),
        ("d", " Donate  "),
        ("q", " Quit  "),
    ] {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::raw(label));
    }
    spans.push(Span::styled(
        app.status_msg.as_str(),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Create a centered rectangle using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::StaticSession;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 20);
    }

    #[tokio::test]
    async fn test_render_promo_and_dialog() {
        let config = Config { load_delay_ms: 0, ..Config::default() };
        let mut app = App::new(&config, Box::new(StaticSession::new(None)));
        app.handle_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        app.update().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(&mut app, frame)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Sign in with Twitter"));
        assert!(text.contains("About"));
    }

    #[tokio::test]
    async fn test_render_all_streets() {
        let config = Config { load_delay_ms: 0, ..Config::default() };
        let mut app = App::new(&config, Box::new(StaticSession::new(None)));
        app.show_gallery(None);
        for _ in 0..100 {
            app.update().unwrap();
            if app.content().is_some_and(|c| matches!(c, crate::gallery::GalleryContent::Gallery(_))) {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(&mut app, frame)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("All streets"));
        assert!(text.contains("Market Street Redesign"));
    }
}
