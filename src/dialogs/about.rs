use super::DialogKey;
use crate::ui::centered_rect;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const ABOUT_LINES: &[&str] = &[
    "Street Gallery lets you browse saved street designs.",
    "",
    "Pick a street from the gallery to make it the current one.",
    "Owners can create a new street or copy their most recent one.",
    "",
    "Made by people who care about streets.",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AboutDialog {
    scroll: u16,
}

impl AboutDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogKey {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let max = ABOUT_LINES.len().saturating_sub(1) as u16;
                self.scroll = (self.scroll + 1).min(max);
                DialogKey::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                DialogKey::Consumed
            }
            KeyCode::Enter => DialogKey::Close { status: None },
            _ => DialogKey::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(Span::styled(
                "  About Street Gallery",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(ABOUT_LINES.iter().map(|l| Line::from(format!("  {}", l))));

        let about = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" About ")
                    .title_bottom(
                        Line::from(" Esc to close ").style(Style::default().fg(Color::DarkGray)),
                    ),
            );
        frame.render_widget(about, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_about_scroll_is_clamped() {
        let mut dialog = AboutDialog::new();
        dialog.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(dialog.scroll(), 0);

        for _ in 0..50 {
            dialog.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        }
        assert_eq!(dialog.scroll(), (ABOUT_LINES.len() - 1) as u16);
    }

    #[test]
    fn test_about_enter_closes() {
        let mut dialog = AboutDialog::new();
        assert_eq!(
            dialog.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            DialogKey::Close { status: None }
        );
        assert_eq!(
            dialog.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            DialogKey::Ignored
        );
    }
}
