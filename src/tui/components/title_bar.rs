//! # TitleBar Component
//!
//! Top status bar: backend location, current screen, status message and a
//! spinner while a request for the current screen is in flight.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar {
//!     backend_name: app.backend.name().to_string(),
//!     screen_title: app.screen.title(),
//!     status_message: app.status_message.clone(),
//!     spinner: app.is_loading().then_some(spinner_frame),
//! };
//! title_bar.render(frame, area);
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub struct TitleBar {
    pub backend_name: String,
    pub screen_title: &'static str,
    pub status_message: String,
    /// Animation frame while loading, None when idle.
    pub spinner: Option<usize>,
}

impl TitleBar {
    fn text(&self) -> String {
        let mut text = format!("Monitora ({}) | {}", self.backend_name, self.screen_title);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if let Some(frame) = self.spinner {
            text.push(' ');
            text.push(SPINNER[frame % SPINNER.len()]);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(Color::Blue));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar {
            backend_name: "http://localhost:8081".to_string(),
            screen_title: "Clients",
            status_message: "3 clients".to_string(),
            spinner: None,
        };
        let text = render_text(&mut title_bar);
        assert!(text.contains("Monitora (http://localhost:8081)"));
        assert!(text.contains("Clients | 3 clients"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar {
            backend_name: "noop".to_string(),
            screen_title: "Home",
            status_message: String::new(),
            spinner: None,
        };
        assert_eq!(title_bar.text(), "Monitora (noop) | Home");
        let text = render_text(&mut title_bar);
        assert_eq!(text.matches('|').count(), 1);
    }

    #[test]
    fn test_title_bar_spinner_cycles() {
        let mut title_bar = TitleBar {
            backend_name: "noop".to_string(),
            screen_title: "Locations",
            status_message: String::new(),
            spinner: Some(5),
        };
        assert!(title_bar.text().ends_with(" /"));
        title_bar.spinner = Some(6);
        assert!(title_bar.text().ends_with(" -"));
    }
}
