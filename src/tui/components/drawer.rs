//! # Drawer Component
//!
//! Side panel listing every screen. Up/Down move the highlight,
//! Enter/Right open the highlighted screen.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `DrawerState` lives in `TuiState`
//! - `Drawer` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::core::state::Screen;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const DRAWER_WIDTH: u16 = 24;

pub struct DrawerState {
    pub selected: usize,
    pub list_state: ListState,
}

impl DrawerState {
    pub fn new(active: Screen) -> Self {
        let selected = active.position();
        Self {
            selected,
            list_state: ListState::default().with_selected(Some(selected)),
        }
    }

    pub fn selected_screen(&self) -> Screen {
        Screen::ALL[self.selected]
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }
}

/// Events emitted by the drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEvent {
    Open(Screen),
    Quit,
}

impl EventHandler for DrawerState {
    type Event = DrawerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DrawerEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.select((self.selected + 1).min(Screen::ALL.len() - 1));
                None
            }
            TuiEvent::Submit | TuiEvent::CursorRight => {
                Some(DrawerEvent::Open(self.selected_screen()))
            }
            TuiEvent::InputChar('q') => Some(DrawerEvent::Quit),
            _ => None,
        }
    }
}

/// Transient render wrapper for the drawer.
pub struct Drawer<'a> {
    pub state: &'a mut DrawerState,
    /// Screen currently shown in the main area.
    pub active: Screen,
    /// Whether keyboard input goes to the drawer.
    pub focused: bool,
}

impl Component for Drawer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(border_color))
            .title(" Menu ");

        let items: Vec<ListItem> = Screen::ALL
            .iter()
            .map(|screen| {
                let marker = if *screen == self.active { "● " } else { "  " };
                let style = if *screen == self.active {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(screen.title(), style),
                ]))
            })
            .collect();

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
