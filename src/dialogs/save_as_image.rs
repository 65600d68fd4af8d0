use super::DialogKey;
use crate::store::DialogProps;
use crate::ui::centered_rect;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const DEFAULT_FILENAME: &str = "street.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOption {
    TransparentSky,
    SegmentNames,
    StreetName,
}

impl ImageOption {
    pub const ALL: [ImageOption; 3] = [Self::TransparentSky, Self::SegmentNames, Self::StreetName];

    pub fn label(self) -> &'static str {
        match self {
            Self::TransparentSky => "Transparent sky",
            Self::SegmentNames => "Segment names and widths",
            Self::StreetName => "Street name",
        }
    }
}

/// Export options for the current street.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveAsImageDialog {
    filename: String,
    cursor: usize,
    transparent_sky: bool,
    segment_names: bool,
    street_name: bool,
}

impl SaveAsImageDialog {
    pub fn new(props: &DialogProps) -> Self {
        let filename = props
            .get("filename")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        Self {
            filename,
            cursor: 0,
            transparent_sky: false,
            segment_names: true,
            street_name: true,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn is_enabled(&self, option: ImageOption) -> bool {
        match option {
            ImageOption::TransparentSky => self.transparent_sky,
            ImageOption::SegmentNames => self.segment_names,
            ImageOption::StreetName => self.street_name,
        }
    }

    fn toggle(&mut self, option: ImageOption) {
        let flag = match option {
            ImageOption::TransparentSky => &mut self.transparent_sky,
            ImageOption::SegmentNames => &mut self.segment_names,
            ImageOption::StreetName => &mut self.street_name,
        };
        *flag = !*flag;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogKey {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(ImageOption::ALL.len() - 1);
                DialogKey::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                DialogKey::Consumed
            }
            KeyCode::Char(' ') => {
                self.toggle(ImageOption::ALL[self.cursor]);
                DialogKey::Consumed
            }
            KeyCode::Enter => {
                tracing::info!(
                    filename = %self.filename,
                    transparent_sky = self.transparent_sky,
                    segment_names = self.segment_names,
                    street_name = self.street_name,
                    "image export requested"
                );
                DialogKey::Close {
                    status: Some(format!("Saved {}", self.filename)),
                }
            }
            _ => DialogKey::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = centered_rect(50, 40, frame.area());
        frame.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  File: ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.filename.as_str()),
            ]),
            Line::from(""),
        ];
        for (i, option) in ImageOption::ALL.into_iter().enumerate() {
            let mark = if self.is_enabled(option) { "[x]" } else { "[ ]" };
            let style = if i == self.cursor {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("  {} {}", mark, option.label()),
                style,
            )));
        }

        let body = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Save as image ")
                .title_bottom(
                    Line::from(" Space toggle | Enter save | Esc cancel ")
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        );
        frame.render_widget(body, area);
    }
}
