//! # Landing Page Component
//!
//! The Home screen: a short welcome and the key bindings.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const KEYS: [(&str, &str); 6] = [
    ("↑/↓, Enter", "choose a screen from the menu"),
    ("n", "open or close the form"),
    ("e / Enter", "edit the selected record"),
    ("d d", "delete the selected record"),
    ("r", "refresh the list"),
    ("Esc, Ctrl+C", "back to the menu, quit"),
];

pub struct LandingPage {
    pub backend_name: String,
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut text_lines = vec![
            Line::from(Span::styled(
                "Monitora",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format!("Connected to {}", self.backend_name),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
        ];
        text_lines.extend(KEYS.iter().map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{:>12}  ", key), Style::default().fg(Color::Yellow)),
                Span::raw(format!("{:<32}", what)),
            ])
        }));

        let [centered] = Layout::vertical([Constraint::Length(text_lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, centered);
    }
}
