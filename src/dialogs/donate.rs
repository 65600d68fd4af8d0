use super::DialogKey;
use crate::store::DialogProps;
use crate::ui::centered_rect;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub const AMOUNTS: [u32; 4] = [5, 10, 25, 50];
const DEFAULT_AMOUNT: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonateDialog {
    selected: usize,
}

impl DonateDialog {
    /// A numeric `"amount"` prop preselects a matching amount.
    pub fn new(props: &DialogProps) -> Self {
        let selected = props
            .get("amount")
            .and_then(|v| v.as_u64())
            .and_then(|amount| AMOUNTS.iter().position(|a| u64::from(*a) == amount))
            .unwrap_or(DEFAULT_AMOUNT);
        Self { selected }
    }

    pub fn amount(&self) -> u32 {
        AMOUNTS[self.selected]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogKey {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = self.selected.saturating_sub(1);
                DialogKey::Consumed
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected = (self.selected + 1).min(AMOUNTS.len() - 1);
                DialogKey::Consumed
            }
            KeyCode::Enter => DialogKey::Close {
                status: Some(format!("Thanks for donating ${}!", self.amount())),
            },
            _ => DialogKey::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let mut choices = vec![Span::raw("  ")];
        for (i, amount) in AMOUNTS.iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .bg(Color::Yellow)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow)
            };
            choices.push(Span::styled(format!(" ${} ", amount), style));
            choices.push(Span::raw(" "));
        }

        let lines = vec![
            Line::from(""),
            Line::from("Keep the gallery running for everyone.").alignment(Alignment::Center),
            Line::from(""),
            Line::from(choices).alignment(Alignment::Center),
        ];
        let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" Donate ")
                .title_bottom(
                    Line::from(" ←/→ amount | Enter donate | Esc close ")
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        );
        frame.render_widget(body, area);
    }
}
