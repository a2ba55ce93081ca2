//! # RecordList Component
//!
//! The list half of a resource screen. Each record renders as its title
//! followed by its detail lines.
//!
//! `RecordListState` lives in `TuiState` and is re-synced with the current
//! screen's record ids before every event dispatch, so selection survives
//! refreshes while staying in range.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::backend::Record;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub struct RecordListState {
    /// Ids of the records currently shown, in display order.
    pub ids: Vec<i64>,
    pub selected: usize,
    /// Set after the first `d`; a second `d` deletes.
    pub confirm_delete: bool,
    pub list_state: ListState,
}

impl Default for RecordListState {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordListState {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            selected: 0,
            confirm_delete: false,
            list_state: ListState::default(),
        }
    }

    /// Replaces the known ids, clamping the selection.
    pub fn sync(&mut self, ids: Vec<i64>) {
        if ids != self.ids {
            self.confirm_delete = false;
        }
        self.ids = ids;
        if self.ids.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.ids.len() - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Back to the top, used when switching screens.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.ids.get(self.selected).copied()
    }
}

/// Events emitted by the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    Edit(i64),
    Delete(i64),
    ToggleForm,
    Refresh,
    Back,
}

impl EventHandler for RecordListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        // Reset delete confirmation on any non-delete key
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        match event {
            TuiEvent::CursorUp => {
                if !self.ids.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.ids.is_empty() {
                    self.selected = (self.selected + 1).min(self.ids.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar('e') => self.selected_id().map(ListEvent::Edit),
            TuiEvent::InputChar('n') => Some(ListEvent::ToggleForm),
            TuiEvent::InputChar('r') => Some(ListEvent::Refresh),
            TuiEvent::InputChar('d') => {
                let id = self.selected_id()?;
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(ListEvent::Delete(id))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            TuiEvent::Escape | TuiEvent::CursorLeft => Some(ListEvent::Back),
            _ => None,
        }
    }
}

/// Transient render wrapper for a screen's records.
pub struct RecordList<'a> {
    pub state: &'a mut RecordListState,
    pub records: &'a [Record],
    pub title: &'static str,
    pub is_loading: bool,
    pub focused: bool,
}

impl Component for RecordList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.state.confirm_delete {
            " Press d again to confirm delete | any other key cancels "
        } else {
            " n New  e Edit  d Delete  r Refresh  Esc Menu "
        };
        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", self.title))
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.records.is_empty() {
            let message = if self.is_loading {
                "Loading..."
            } else {
                "No records yet. Press n to add one."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let selected = i == self.state.selected;
                let title_style = if selected && self.state.confirm_delete {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };

                let mut lines = vec![Line::from(Span::styled(
                    truncate_str(&record.title(), inner_width),
                    title_style,
                ))];
                lines.extend(record.details().into_iter().map(|detail| {
                    Line::from(Span::styled(
                        truncate_str(&format!("  {}", detail), inner_width),
                        Style::default().fg(Color::Gray),
                    ))
                }));
                lines.push(Line::default());
                ListItem::new(lines)
            })
            .collect();

        let highlight = if self.focused {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width - 3 {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}
