//! # RecordForm Component
//!
//! Renders a core `Form` as one labelled row per field, with the submit
//! label switching between "Add" and "Update" by edit mode. When focused,
//! the terminal cursor is placed at the end of the focused text field.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::form::{FieldKind, Form};
use crate::tui::component::Component;

const LABEL_WIDTH: usize = 20;

pub struct RecordForm<'a> {
    pub form: &'a Form,
    pub singular: &'static str,
    pub focused: bool,
}

impl RecordForm<'_> {
    /// Rows needed to render the form: fields + submit line + borders.
    pub fn required_height(form: &Form) -> u16 {
        form.fields().len() as u16 + 2 + 2
    }

    fn title(&self) -> String {
        match self.form.editing_id {
            Some(id) => format!(" Edit {} #{} ", self.singular, id),
            None => format!(" New {} ", self.singular),
        }
    }
}

impl Component for RecordForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focused { Color::Yellow } else { Color::DarkGray };
        let help = if self.focused {
            " Tab Next field  Space Toggle  ←/→ Choose  Enter Save  Esc Close "
        } else {
            " n Close form "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(self.title())
            .title_bottom(Line::from(help).centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);

        let mut lines: Vec<Line> = Vec::new();
        for (i, field_spec) in self.form.fields().iter().enumerate() {
            let is_focused = self.focused && i == self.form.focused;
            let marker = if field_spec.required { "*" } else { " " };
            let label = format!("{:<width$}", format!("{}{}", field_spec.label, marker), width = LABEL_WIDTH);
            let label_style = if is_focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(vec![
                Span::styled(label, label_style),
                Span::raw(self.form.display_value(i)),
            ]));
        }
        lines.push(Line::default());
        let submit = if self.form.is_editing() { "[ Update ]" } else { "[ Add ]" };
        lines.push(Line::from(Span::styled(
            submit,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), area);

        if self.focused {
            let field_spec = self.form.focused_spec();
            if !matches!(field_spec.kind, FieldKind::Toggle | FieldKind::Choice(_)) {
                let value_width = self.form.display_value(self.form.focused).width();
                let x = inner.x + (LABEL_WIDTH + value_width) as u16;
                let y = inner.y + self.form.focused as u16;
                if x < inner.x + inner.width && y < inner.y + inner.height {
                    frame.set_cursor_position(Position::new(x, y));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{EquipmentClass, Record, Resource};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(form: &Form) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        terminal
            .draw(|f| {
                RecordForm {
                    form,
                    singular: form.resource.singular(),
                    focused: true,
                }
                .render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_create_mode_labels() {
        let form = Form::new(Resource::Client);
        let text = render(&form);
        assert!(text.contains("New client"));
        assert!(text.contains("First name*"));
        assert!(text.contains("[ Add ]"));
    }

    #[test]
    fn test_edit_mode_labels() {
        let mut form = Form::new(Resource::EquipmentClass);
        form.load(&Record::EquipmentClass(EquipmentClass {
            id: 3,
            name: "Cameras".to_string(),
            description: "Video".to_string(),
        }));
        let text = render(&form);
        assert!(text.contains("Edit equipment class #3"));
        assert!(text.contains("Cameras"));
        assert!(text.contains("[ Update ]"));
    }

    #[test]
    fn test_required_height() {
        let form = Form::new(Resource::Client);
        assert_eq!(RecordForm::required_height(&form), 10);
    }
}
